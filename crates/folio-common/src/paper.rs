/// Paper record and its selection lifecycle.
/// Rust representation of the `papers` table owned by the store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Content-derived paper key: first 16 hex chars of SHA-256 over the
/// normalised title and first author.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperId(String);

impl PaperId {
    /// Derive the id for a (title, authors) pair. Re-ingesting the same
    /// paper always yields the same id.
    pub fn fingerprint(title: &str, authors: &str) -> Self {
        let raw = format!(
            "{}|{}",
            normalise_text(title),
            normalise_text(first_author(authors)),
        );
        let digest = Sha256::digest(raw.as_bytes());
        let mut hex = hex::encode(digest);
        hex.truncate(16);
        PaperId(hex)
    }

    /// Wrap an id read back from storage.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        PaperId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase, trim, and collapse internal whitespace runs to one space.
pub fn normalise_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First entry of an author string such as "Card, David; Krueger, Alan"
/// or "David Card and Alan Krueger".
pub fn first_author(authors: &str) -> &str {
    let end = [",", ";", " and ", " & "]
        .iter()
        .filter_map(|sep| authors.find(sep))
        .min()
        .unwrap_or(authors.len());
    authors[..end].trim()
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Selection lifecycle. `Unpicked` is the only non-terminal state; every
/// other variant means the paper has left the candidate pool for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaperStatus {
    Unpicked,
    Selected { week_of: NaiveDate },
    RejectedIneligible,
    RejectedBelowThreshold,
}

impl PaperStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperStatus::Unpicked               => "unpicked",
            PaperStatus::Selected { .. }        => "selected",
            PaperStatus::RejectedIneligible     => "rejected_ineligible",
            PaperStatus::RejectedBelowThreshold => "rejected_below_threshold",
        }
    }

    /// True for every terminal state.
    pub fn is_picked(&self) -> bool {
        !matches!(self, PaperStatus::Unpicked)
    }

    pub fn week_of(&self) -> Option<NaiveDate> {
        match self {
            PaperStatus::Selected { week_of } => Some(*week_of),
            _ => None,
        }
    }

    /// Rebuild a status from its stored column pair. `selected` requires a week.
    pub fn from_parts(status: &str, week_of: Option<NaiveDate>) -> Option<Self> {
        match (status, week_of) {
            ("unpicked", _)                 => Some(PaperStatus::Unpicked),
            ("selected", Some(week_of))     => Some(PaperStatus::Selected { week_of }),
            ("rejected_ineligible", _)      => Some(PaperStatus::RejectedIneligible),
            ("rejected_below_threshold", _) => Some(PaperStatus::RejectedBelowThreshold),
            _ => None,
        }
    }
}

impl Default for PaperStatus {
    fn default() -> Self {
        PaperStatus::Unpicked
    }
}

impl fmt::Display for PaperStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperStatus::Selected { week_of } => write!(f, "selected ({week_of})"),
            other => f.write_str(other.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// Paper
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    pub id: PaperId,
    pub title: String,
    pub authors: String,
    pub abstract_text: Option<String>,
    /// Journal or working-paper series name.
    pub venue: Option<String>,
    pub source: String,
    pub url: Option<String>,
    pub doi: Option<String>,
    pub oa_url: Option<String>,
    /// Free-form as published by the source (e.g. "2024-05-01" or "2024").
    pub publication_date: Option<String>,
    pub ingested_at: DateTime<Utc>,
    /// Keyword match computed once at ingestion.
    pub keyword_relevant: bool,
    pub status: PaperStatus,
}

impl Paper {
    pub fn new(title: impl Into<String>, authors: impl Into<String>, venue: impl Into<String>) -> Self {
        let title = title.into();
        let authors = authors.into();
        Self {
            id: PaperId::fingerprint(&title, &authors),
            title,
            authors,
            abstract_text: None,
            venue: Some(venue.into()),
            source: String::new(),
            url: None,
            doi: None,
            oa_url: None,
            publication_date: None,
            ingested_at: Utc::now(),
            keyword_relevant: false,
            status: PaperStatus::Unpicked,
        }
    }

    /// Venue name, empty when the source did not report one.
    pub fn venue_name(&self) -> &str {
        self.venue.as_deref().unwrap_or("")
    }

    pub fn abstract_or_empty(&self) -> &str {
        self.abstract_text.as_deref().unwrap_or("")
    }

    /// Lowercased "title abstract" haystack used for keyword matching.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.abstract_or_empty()).to_lowercase()
    }

    /// Best link for a reader: landing page, then DOI resolver.
    pub fn link(&self) -> Option<String> {
        self.url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.doi
                    .as_deref()
                    .filter(|d| !d.trim().is_empty())
                    .map(|d| format!("https://doi.org/{}", d.trim()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable_under_case_and_whitespace() {
        let a = PaperId::fingerprint("The Minimum  Wage ", "Card, David; Krueger, Alan");
        let b = PaperId::fingerprint("the minimum wage", "CARD, David");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 16);
    }

    #[test]
    fn test_fingerprint_distinguishes_first_author() {
        let a = PaperId::fingerprint("Minimum Wages", "Card, David");
        let b = PaperId::fingerprint("Minimum Wages", "Neumark, David");
        assert_ne!(a, b);
    }

    #[test]
    fn test_first_author_separators() {
        assert_eq!(first_author("David Card and Alan Krueger"), "David Card");
        assert_eq!(first_author("Card; Krueger"), "Card");
        assert_eq!(first_author("  Solo Author "), "Solo Author");
        assert_eq!(first_author(""), "");
    }

    #[test]
    fn test_status_parts_roundtrip() {
        let week = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let selected = PaperStatus::Selected { week_of: week };
        assert_eq!(
            PaperStatus::from_parts(selected.as_str(), selected.week_of()),
            Some(selected)
        );
        assert_eq!(PaperStatus::from_parts("selected", None), None);
        assert_eq!(PaperStatus::from_parts("bogus", None), None);
        assert!(!PaperStatus::Unpicked.is_picked());
        assert!(PaperStatus::RejectedBelowThreshold.is_picked());
    }

    #[test]
    fn test_link_prefers_url_then_doi() {
        let mut p = Paper::new("T", "A", "Econometrica");
        assert_eq!(p.link(), None);
        p.doi = Some("10.3982/ECTA1".into());
        assert_eq!(p.link().as_deref(), Some("https://doi.org/10.3982/ECTA1"));
        p.url = Some("https://example.org/t".into());
        assert_eq!(p.link().as_deref(), Some("https://example.org/t"));
    }

    #[test]
    fn test_search_text_tolerates_missing_abstract() {
        let p = Paper::new("Labor Supply", "A", "X");
        assert_eq!(p.search_text(), "labor supply ");
    }
}
