//! Composite reading-list score.
//!
//! S(p) = venue tier bonus
//!      + field-match bonus + structural + novel data + novel measurement
//!      + keyword-relevance bonus
//!
//! Each term is independent and saturating; see `weights` for the caps.
//! Scores are recomputed on every run and never stored.

use folio_common::{Paper, PicksConfig};
use serde::{Deserialize, Serialize};

use crate::venue::{self, VenueTier};
use crate::weights::{KeywordFeature, FIELD_MATCH, NOVEL_DATA, NOVEL_MEASUREMENT, STRUCTURAL};

/// Per-term contributions, kept for inspection and debugging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub tier: Option<VenueTier>,
    pub venue: f64,
    pub field_match: f64,
    pub structural: f64,
    pub novel_data: f64,
    pub novel_measurement: f64,
    pub keyword_relevant: f64,
}

impl ScoreBreakdown {
    /// Sum of all terms, floored at zero and rounded to 2 decimals.
    pub fn total(&self) -> f64 {
        let sum = self.venue
            + self.field_match
            + self.structural
            + self.novel_data
            + self.novel_measurement
            + self.keyword_relevant;
        round2(sum.max(0.0))
    }
}

/// Breakdown field a single-list feature writes to.
type Slot = fn(&mut ScoreBreakdown) -> &mut f64;

/// Single-list features with the keyword list they read and the term they fill.
fn single_list_features(config: &PicksConfig) -> [(KeywordFeature, &[String], Slot); 3] {
    [
        (STRUCTURAL, config.structural_keywords.as_slice(), |b| &mut b.structural),
        (NOVEL_DATA, config.novel_data_keywords.as_slice(), |b| &mut b.novel_data),
        (NOVEL_MEASUREMENT, config.novel_measurement_keywords.as_slice(), |b| &mut b.novel_measurement),
    ]
}

/// A paper together with this run's score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPaper {
    pub paper: Paper,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl ScoredPaper {
    pub fn new(paper: Paper, config: &PicksConfig) -> Self {
        let breakdown = score_breakdown(&paper, config);
        Self { score: breakdown.total(), paper, breakdown }
    }
}

/// Number of keywords that occur (case-insensitively) in `haystack`.
/// `haystack` must already be lowercased. Each keyword counts at most once.
pub fn keyword_hits(haystack: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .map(|kw| kw.trim().to_lowercase())
        .filter(|kw| !kw.is_empty() && haystack.contains(kw.as_str()))
        .count()
}

/// Compute every term for one paper.
pub fn score_breakdown(paper: &Paper, config: &PicksConfig) -> ScoreBreakdown {
    let w = &config.weights;
    let text = paper.search_text();

    let tier = venue::classify(paper.venue_name());
    let venue = tier.map(|t| w.get(t.weight_key())).unwrap_or(0.0);

    let field_hits: usize = config
        .field_keywords
        .values()
        .map(|kws| keyword_hits(&text, kws))
        .sum();

    let mut breakdown = ScoreBreakdown {
        tier,
        venue,
        field_match: FIELD_MATCH.bonus(w.get(FIELD_MATCH.weight_key), field_hits),
        keyword_relevant: if paper.keyword_relevant { w.keyword_relevant } else { 0.0 },
        ..Default::default()
    };

    for (feature, keywords, slot) in single_list_features(config) {
        *slot(&mut breakdown) = feature.bonus(w.get(feature.weight_key), keyword_hits(&text, keywords));
    }

    breakdown
}

/// Score a paper. Deterministic and non-negative; never fails on a
/// malformed record (missing abstract or venue count as empty).
pub fn score_paper(paper: &Paper, config: &PicksConfig) -> f64 {
    score_breakdown(paper, config).total()
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
