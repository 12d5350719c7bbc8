//! Data models for ingestion.

use chrono::{DateTime, Utc};
use folio_common::{Paper, PaperId, PaperStatus};
use serde::{Deserialize, Serialize};

use crate::relevance::check_relevance;

/// Author list as exported by fetchers: either one pre-joined string or a
/// list of names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Authors {
    Joined(String),
    List(Vec<String>),
}

impl Default for Authors {
    fn default() -> Self {
        Authors::Joined(String::new())
    }
}

impl Authors {
    /// Comma-joined form stored on the paper.
    pub fn joined(&self) -> String {
        match self {
            Authors::Joined(s) => s.trim().to_string(),
            Authors::List(names) => names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// One discovered paper before it is stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperMetadata {
    pub title: String,
    #[serde(default)]
    pub authors: Authors,
    #[serde(default, rename = "abstract", alias = "abstract_text")]
    pub abstract_text: Option<String>,
    #[serde(default, alias = "journal")]
    pub venue: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default, alias = "pub_date")]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub oa_url: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl PaperMetadata {
    /// False when the title is blank; such records cannot be fingerprinted.
    pub fn is_usable(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn id(&self) -> PaperId {
        PaperId::fingerprint(&self.title, &self.authors.joined())
    }

    /// Build the stored record. `keywords` drive the relevance flag.
    pub fn into_paper(self, keywords: &[String], ingested_at: DateTime<Utc>) -> Paper {
        let id = self.id();
        let title = self.title.trim().to_string();
        let abstract_text = non_empty(self.abstract_text);
        let keyword_relevant = check_relevance(&title, abstract_text.as_deref().unwrap_or(""), keywords);

        Paper {
            id,
            authors: self.authors.joined(),
            venue: non_empty(self.venue),
            source: non_empty(self.source).unwrap_or_else(|| "import".to_string()),
            url: non_empty(self.url),
            doi: non_empty(self.doi),
            oa_url: non_empty(self.oa_url),
            publication_date: non_empty(self.publication_date),
            ingested_at,
            keyword_relevant,
            status: PaperStatus::Unpicked,
            title,
            abstract_text,
        }
    }
}
