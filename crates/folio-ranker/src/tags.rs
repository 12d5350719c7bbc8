//! Short topical labels shown next to each pick in the report.

use folio_common::{Paper, PicksConfig};

use crate::scorer::keyword_hits;
use crate::venue::{self, VenueTier};

/// `labor_economics` -> `Labor Economics`.
pub fn pretty_category(name: &str) -> String {
    name.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Tags for one paper: matched field categories (alphabetical by category
/// name), then the feature lists that hit, then a venue marker for top-5 or
/// NBER venues.
pub fn tags(paper: &Paper, config: &PicksConfig) -> Vec<String> {
    let text = paper.search_text();
    let mut out: Vec<String> = config
        .field_keywords
        .iter()
        .filter(|(_, kws)| keyword_hits(&text, kws) > 0)
        .map(|(name, _)| pretty_category(name))
        .collect();

    let features: [(&[String], &str); 3] = [
        (config.structural_keywords.as_slice(), "Structural"),
        (config.novel_data_keywords.as_slice(), "Novel Data"),
        (config.novel_measurement_keywords.as_slice(), "Novel Measurement"),
    ];
    for (keywords, label) in features {
        if keyword_hits(&text, keywords) > 0 {
            out.push(label.to_string());
        }
    }

    if let Some(tier @ (VenueTier::Top5 | VenueTier::WorkingPaperSeries)) = venue::classify(paper.venue_name()) {
        out.push(tier.label().to_string());
    }

    out
}
