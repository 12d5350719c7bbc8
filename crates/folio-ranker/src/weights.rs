//! Saturation constants for the keyword features.
//!
//! Bonus magnitudes are configuration (`WeightMap`); the cap and divisor of
//! each keyword feature are part of the formula and are fixed here:
//!
//! bonus = weight × min(hits, cap) / divisor

/// One saturating keyword feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordFeature {
    pub name: &'static str,
    pub weight_key: &'static str,
    pub cap: usize,
    pub divisor: f64,
}

impl KeywordFeature {
    /// Contribution for a given hit count. Zero hits contribute nothing.
    pub fn bonus(&self, weight: f64, hits: usize) -> f64 {
        if hits == 0 {
            return 0.0;
        }
        weight * hits.min(self.cap) as f64 / self.divisor
    }

    /// Largest bonus this feature can add under the given weight.
    pub fn max_bonus(&self, weight: f64) -> f64 {
        weight * self.cap as f64 / self.divisor
    }
}

/// Hits summed across every topical category.
pub const FIELD_MATCH: KeywordFeature =
    KeywordFeature { name: "field_match", weight_key: "field_match", cap: 5, divisor: 3.0 };

pub const STRUCTURAL: KeywordFeature =
    KeywordFeature { name: "structural", weight_key: "structural", cap: 4, divisor: 2.0 };

pub const NOVEL_DATA: KeywordFeature =
    KeywordFeature { name: "novel_data", weight_key: "novel_data", cap: 4, divisor: 2.0 };

pub const NOVEL_MEASUREMENT: KeywordFeature =
    KeywordFeature { name: "novel_measurement", weight_key: "novel_measurement", cap: 3, divisor: 2.0 };
