//! Shared fixtures for Folio tests: paper builders, in-memory stores and a
//! ready-made economics configuration.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use folio_common::{FolioError, Paper, PaperId, PaperStatus, PaperStore, PicksConfig, Result, StatusTransition};

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Fluent builder for `Paper` fixtures.
#[derive(Debug, Clone)]
pub struct PaperBuilder {
    paper: Paper,
}

impl PaperBuilder {
    pub fn new(title: &str) -> Self {
        Self { paper: Paper::new(title, "Doe, Jane", "Econometrica") }
    }

    /// Recomputes the id from the new author string.
    pub fn authors(mut self, authors: &str) -> Self {
        self.paper.authors = authors.to_string();
        self.paper.id = PaperId::fingerprint(&self.paper.title, authors);
        self
    }

    /// Override the fingerprint, e.g. to create two records sharing a title.
    pub fn id(mut self, id: &str) -> Self {
        self.paper.id = PaperId::from_stored(id);
        self
    }

    pub fn venue(mut self, venue: &str) -> Self {
        self.paper.venue = Some(venue.to_string());
        self
    }

    pub fn no_venue(mut self) -> Self {
        self.paper.venue = None;
        self
    }

    pub fn abstract_text(mut self, text: &str) -> Self {
        self.paper.abstract_text = Some(text.to_string());
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.paper.url = Some(url.to_string());
        self
    }

    pub fn keyword_relevant(mut self) -> Self {
        self.paper.keyword_relevant = true;
        self
    }

    pub fn ingested_at(mut self, at: DateTime<Utc>) -> Self {
        self.paper.ingested_at = at;
        self
    }

    pub fn ingested_days_ago(self, days: i64) -> Self {
        self.ingested_at(Utc::now() - Duration::days(days))
    }

    pub fn status(mut self, status: PaperStatus) -> Self {
        self.paper.status = status;
        self
    }

    pub fn build(self) -> Paper {
        self.paper
    }
}

/// `n` distinct top-5 papers titled `"{prefix} 0"`, `"{prefix} 1"`, ...
pub fn top5_papers(prefix: &str, n: usize) -> Vec<Paper> {
    (0..n).map(|i| PaperBuilder::new(&format!("{prefix} {i}")).build()).collect()
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Applied-micro configuration used across the engine tests. Default weights.
pub fn sample_picks_config() -> PicksConfig {
    let mut field_keywords = BTreeMap::new();
    field_keywords.insert(
        "labor".to_string(),
        strings(&["labor market", "minimum wage", "unemployment", "wages"]),
    );
    field_keywords.insert(
        "political_economy".to_string(),
        strings(&["elections", "voting", "political"]),
    );
    field_keywords.insert(
        "applied_micro".to_string(),
        strings(&["difference-in-differences", "regression discontinuity"]),
    );

    PicksConfig {
        field_keywords,
        structural_keywords: strings(&["structural model", "counterfactual", "estimate the model"]),
        novel_data_keywords: strings(&["administrative data", "new dataset", "linked data"]),
        novel_measurement_keywords: strings(&["we measure", "new measure", "we construct"]),
        ..PicksConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// In-memory `PaperStore`. Ids are unique, as with the SQLite primary key.
/// `mark_picked` validates the whole batch before touching anything, so a
/// rejected batch leaves the store unchanged.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    papers: Vec<Paper>,
    /// Number of successful `mark_picked` calls.
    pub commits: usize,
}

impl MemoryStore {
    /// Panics if two papers share an id.
    pub fn new(papers: Vec<Paper>) -> Self {
        let mut ids = HashSet::new();
        for p in &papers {
            assert!(ids.insert(p.id.clone()), "duplicate paper id {} ({:?})", p.id, p.title);
        }
        Self { papers, commits: 0 }
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn get(&self, id: &PaperId) -> Option<&Paper> {
        self.papers.iter().find(|p| &p.id == id)
    }

    pub fn status_of(&self, title: &str) -> Option<PaperStatus> {
        self.papers.iter().find(|p| p.title == title).map(|p| p.status)
    }

    pub fn count_status(&self, pred: impl Fn(&PaperStatus) -> bool) -> usize {
        self.papers.iter().filter(|p| pred(&p.status)).count()
    }
}

impl PaperStore for MemoryStore {
    fn list_unpicked(&self) -> Result<Vec<Paper>> {
        Ok(self.papers.iter().filter(|p| !p.status.is_picked()).cloned().collect())
    }

    fn list_recent_since(&self, since: DateTime<Utc>) -> Result<Vec<Paper>> {
        Ok(self.papers.iter().filter(|p| p.ingested_at >= since).cloned().collect())
    }

    fn mark_picked(&mut self, transitions: &[StatusTransition]) -> Result<()> {
        let mut seen = HashSet::new();
        for t in transitions {
            let invalid = |reason: &str| FolioError::InvalidTransition {
                id: t.id.to_string(),
                reason: reason.to_string(),
            };
            if !t.status.is_picked() {
                return Err(invalid("target status is not terminal"));
            }
            if !seen.insert(t.id.clone()) {
                return Err(invalid("paper appears twice in one batch"));
            }
            match self.get(&t.id) {
                None => return Err(FolioError::PaperNotFound(t.id.to_string())),
                Some(p) if p.status.is_picked() => return Err(invalid("paper is no longer unpicked")),
                Some(_) => {}
            }
        }
        for t in transitions {
            if let Some(p) = self.papers.iter_mut().find(|p| p.id == t.id) {
                p.status = t.status;
            }
        }
        self.commits += 1;
        Ok(())
    }
}

/// Which store operation `FailingStore` breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Read,
    Write,
}

/// Wraps a `MemoryStore` and fails one class of operation with
/// `StoreUnavailable`.
#[derive(Debug, Clone)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_on: FailOn,
}

impl FailingStore {
    pub fn new(papers: Vec<Paper>, fail_on: FailOn) -> Self {
        Self { inner: MemoryStore::new(papers), fail_on }
    }

    fn unavailable() -> FolioError {
        FolioError::StoreUnavailable("simulated outage".to_string())
    }
}

impl PaperStore for FailingStore {
    fn list_unpicked(&self) -> Result<Vec<Paper>> {
        if self.fail_on == FailOn::Read {
            return Err(Self::unavailable());
        }
        self.inner.list_unpicked()
    }

    fn list_recent_since(&self, since: DateTime<Utc>) -> Result<Vec<Paper>> {
        if self.fail_on == FailOn::Read {
            return Err(Self::unavailable());
        }
        self.inner.list_recent_since(since)
    }

    fn mark_picked(&mut self, transitions: &[StatusTransition]) -> Result<()> {
        if self.fail_on == FailOn::Write {
            return Err(Self::unavailable());
        }
        self.inner.mark_picked(transitions)
    }
}
