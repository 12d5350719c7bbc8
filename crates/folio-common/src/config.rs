//! Configuration for the reading-list engine.
//!
//! Read from folio.toml (or the path in FOLIO_CONFIG). Files ending in
//! `.yaml`/`.yml` are parsed as YAML. Every field has a default, so a
//! partial file is always valid: missing weights fall back to their fixed
//! defaults and missing keyword lists contribute nothing.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Runner-up list length. Fixed, not configurable.
pub const RUNNERS_UP: usize = 7;

/// Complete Folio configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Weekly selection parameters
    #[serde(default)]
    pub picks: PicksConfig,

    #[serde(default)]
    pub ingestion: IngestionConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

// ── Database ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

fn default_db_path() -> PathBuf { PathBuf::from("data/papers.db") }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: default_db_path() }
    }
}

// ── Weekly picks ──────────────────────────────────────────────────────────────

/// Parameters consumed by the selection engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PicksConfig {
    /// Papers to select per week
    #[serde(default = "default_num_papers")]
    pub num_papers: usize,

    /// Papers scoring below this are discarded
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Window for the "new this week" count
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    #[serde(default)]
    pub weights: WeightMap,

    /// Topical categories, each a named keyword list. Iterated in
    /// alphabetical order of category name, whatever the file order.
    #[serde(default)]
    pub field_keywords: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub structural_keywords: Vec<String>,

    #[serde(default)]
    pub novel_data_keywords: Vec<String>,

    #[serde(default)]
    pub novel_measurement_keywords: Vec<String>,
}

fn default_num_papers() -> usize { 7 }
fn default_min_score() -> f64 { 20.0 }
fn default_lookback_days() -> u32 { 7 }

impl Default for PicksConfig {
    fn default() -> Self {
        Self {
            num_papers: default_num_papers(),
            min_score: default_min_score(),
            lookback_days: default_lookback_days(),
            weights: WeightMap::default(),
            field_keywords: BTreeMap::new(),
            structural_keywords: vec![],
            novel_data_keywords: vec![],
            novel_measurement_keywords: vec![],
        }
    }
}

impl PicksConfig {
    /// Report suspicious settings. Never fails: the engine runs with whatever it is given.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.num_papers == 0 {
            warnings.push("picks.num_papers is 0; no paper will ever be selected".to_string());
        }
        if self.min_score < 0.0 {
            warnings.push(format!("picks.min_score is negative ({})", self.min_score));
        }
        for (key, value) in self.weights.entries() {
            if value < 0.0 {
                warnings.push(format!("picks.weights.{key} is negative ({value})"));
            }
        }
        if self.field_keywords.values().all(Vec::is_empty) {
            warnings.push("picks.field_keywords is empty; field-match bonus disabled".to_string());
        }
        warnings
    }
}

/// Bonus magnitudes for each scoring feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightMap {
    #[serde(default = "default_top5")]
    pub journal_top5: f64,
    #[serde(default = "default_top_field")]
    pub journal_top_field: f64,
    #[serde(default = "default_nber")]
    pub nber: f64,
    #[serde(default = "default_field_journal")]
    pub journal_field: f64,
    #[serde(default = "default_job_market")]
    pub job_market: f64,
    #[serde(default = "default_field_match")]
    pub field_match: f64,
    #[serde(default = "default_structural")]
    pub structural: f64,
    #[serde(default = "default_novel_data")]
    pub novel_data: f64,
    #[serde(default = "default_novel_measurement")]
    pub novel_measurement: f64,
    #[serde(default = "default_keyword_relevant")]
    pub keyword_relevant: f64,
}

fn default_top5() -> f64 { 30.0 }
fn default_top_field() -> f64 { 20.0 }
fn default_nber() -> f64 { 18.0 }
fn default_field_journal() -> f64 { 15.0 }
fn default_job_market() -> f64 { 20.0 }
fn default_field_match() -> f64 { 25.0 }
fn default_structural() -> f64 { 20.0 }
fn default_novel_data() -> f64 { 15.0 }
fn default_novel_measurement() -> f64 { 15.0 }
fn default_keyword_relevant() -> f64 { 10.0 }

impl Default for WeightMap {
    fn default() -> Self {
        Self {
            journal_top5:      default_top5(),
            journal_top_field: default_top_field(),
            nber:              default_nber(),
            journal_field:     default_field_journal(),
            job_market:        default_job_market(),
            field_match:       default_field_match(),
            structural:        default_structural(),
            novel_data:        default_novel_data(),
            novel_measurement: default_novel_measurement(),
            keyword_relevant:  default_keyword_relevant(),
        }
    }
}

impl WeightMap {
    /// Look up a weight by its config key. Unknown keys weigh nothing.
    pub fn get(&self, key: &str) -> f64 {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .unwrap_or(0.0)
    }

    pub fn entries(&self) -> [(&'static str, f64); 10] {
        [
            ("journal_top5",      self.journal_top5),
            ("journal_top_field", self.journal_top_field),
            ("nber",              self.nber),
            ("journal_field",     self.journal_field),
            ("job_market",        self.job_market),
            ("field_match",       self.field_match),
            ("structural",        self.structural),
            ("novel_data",        self.novel_data),
            ("novel_measurement", self.novel_measurement),
            ("keyword_relevant",  self.keyword_relevant),
        ]
    }
}

// ── Ingestion ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Keywords that flag a paper as relevant at ingestion
    #[serde(default)]
    pub keywords: Vec<String>,
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_picks_dir")]
    pub weekly_picks_dir: PathBuf,

    #[serde(default = "default_max_abstract")]
    pub max_abstract_length: usize,
}

fn default_picks_dir() -> PathBuf { PathBuf::from("output/weekly_reading") }
fn default_max_abstract() -> usize { 500 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            weekly_picks_dir: default_picks_dir(),
            max_abstract_length: default_max_abstract(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl FolioConfig {
    /// Path from FOLIO_CONFIG, else ./folio.toml.
    pub fn default_path() -> PathBuf {
        std::env::var("FOLIO_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("folio.toml"))
    }

    /// Load from FOLIO_CONFIG or ./folio.toml.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_path(Self::default_path())
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Copy folio.example.toml to folio.toml and edit it.",
                path.display()
            );
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        // An empty YAML document deserialises to unit, not to an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
