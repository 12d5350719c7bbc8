//! Venue tiers and the eligibility gate.
//!
//! Tiers are a fixed, ordered table of (tier, weight key, membership rule).
//! Scoring walks the table top to bottom and stops at the first match, so
//! adding a venue or a tier never touches scoring control flow.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueTier {
    Top5,
    TopField,
    WorkingPaperSeries,
    FieldJournal,
    JobMarket,
}

impl VenueTier {
    pub fn label(&self) -> &'static str {
        match self {
            VenueTier::Top5               => "Top 5",
            VenueTier::TopField           => "Top Field",
            VenueTier::WorkingPaperSeries => "NBER",
            VenueTier::FieldJournal       => "Field Journal",
            VenueTier::JobMarket          => "Job Market Paper",
        }
    }

    /// Key into `WeightMap` holding this tier's bonus.
    pub fn weight_key(&self) -> &'static str {
        rule_for(*self).weight_key
    }
}

/// How a venue name qualifies for a tier.
#[derive(Debug, Clone, Copy)]
pub enum VenueMatch {
    /// Trimmed venue equals one of the names.
    OneOf(&'static [&'static str]),
    /// Trimmed venue contains the marker.
    Contains(&'static str),
}

impl VenueMatch {
    fn matches(&self, venue: &str) -> bool {
        match self {
            VenueMatch::OneOf(names) => names.contains(&venue),
            VenueMatch::Contains(marker) => venue.contains(marker),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TierRule {
    pub tier: VenueTier,
    pub weight_key: &'static str,
    pub rule: VenueMatch,
}

const TOP5: &[&str] = &[
    "American Economic Review",
    "Econometrica",
    "Journal of Political Economy",
    "Quarterly Journal of Economics",
    "Review of Economic Studies",
];

const TOP_FIELD: &[&str] = &[
    "Review of Economics and Statistics",
    "Journal of the European Economic Association",
    "AEJ: Applied Economics",
    "AEJ: Economic Policy",
    "AEJ: Microeconomics",
    "JPE Microeconomics",
];

const FIELD_JOURNALS: &[&str] = &[
    "Journal of Labor Economics",
    "Journal of Public Economics",
    "Journal of Health Economics",
    "Journal of Human Resources",
    "RAND Journal of Economics",
    "Journal of Urban Economics",
    "Journal of Development Economics",
    "Journal of Econometrics",
    "Journal of Political Economy Microeconomics",
];

/// Tier table in priority order. First match wins.
pub const TIERS: &[TierRule] = &[
    TierRule { tier: VenueTier::Top5,               weight_key: "journal_top5",      rule: VenueMatch::OneOf(TOP5) },
    TierRule { tier: VenueTier::TopField,           weight_key: "journal_top_field", rule: VenueMatch::OneOf(TOP_FIELD) },
    TierRule { tier: VenueTier::WorkingPaperSeries, weight_key: "nber",              rule: VenueMatch::Contains("NBER") },
    TierRule { tier: VenueTier::FieldJournal,       weight_key: "journal_field",     rule: VenueMatch::OneOf(FIELD_JOURNALS) },
    TierRule { tier: VenueTier::JobMarket,          weight_key: "job_market",        rule: VenueMatch::OneOf(&["Job Market Paper"]) },
];

fn rule_for(tier: VenueTier) -> &'static TierRule {
    // Every variant has exactly one row; the table is static.
    TIERS
        .iter()
        .find(|r| r.tier == tier)
        .unwrap_or(&TIERS[0])
}

/// Tier for a venue name, or `None` if the venue is not on the allow-list.
pub fn classify(venue: &str) -> Option<VenueTier> {
    let venue = venue.trim();
    if venue.is_empty() {
        return None;
    }
    TIERS.iter().find(|r| r.rule.matches(venue)).map(|r| r.tier)
}

/// Eligibility gate: a venue is admitted iff some tier claims it.
pub fn is_eligible(venue: &str) -> bool {
    classify(venue).is_some()
}
