//! Ingestion run.
//!
//! Flow for one batch of metadata:
//!   1. Drop records with a blank title
//!   2. Derive the content id and the keyword relevance flag
//!   3. Insert everything in one transaction (`INSERT OR IGNORE` semantics)
//!   4. Known papers only get an empty open-access link filled in
//!
//! New papers always enter the candidate pool as `unpicked`. A paper that
//! was already picked keeps its status when it shows up again.

use chrono::{DateTime, Utc};
use folio_db::{InsertOutcome, PaperRepository};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::models::PaperMetadata;
use crate::sources::MetadataSource;

/// Counts for one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Records offered by the source.
    pub found: usize,
    pub inserted: usize,
    /// Already stored (including repeats within the same batch).
    pub duplicates: usize,
    /// Duplicates whose missing open-access link was filled in.
    pub backfilled: usize,
    /// Unusable records (blank title).
    pub skipped: usize,
}

/// Store a batch of metadata records.
pub fn ingest(
    repo: &PaperRepository,
    records: Vec<PaperMetadata>,
    keywords: &[String],
    now: DateTime<Utc>,
) -> Result<IngestSummary> {
    let mut summary = IngestSummary { found: records.len(), ..Default::default() };

    let mut papers = Vec::with_capacity(records.len());
    for record in records {
        if !record.is_usable() {
            warn!(url = ?record.url, "Skipping record with blank title");
            summary.skipped += 1;
            continue;
        }
        papers.push(record.into_paper(keywords, now));
    }

    for outcome in repo.insert_batch(&papers)? {
        match outcome {
            InsertOutcome::Inserted => summary.inserted += 1,
            InsertOutcome::Existing => summary.duplicates += 1,
            InsertOutcome::BackfilledOaUrl => {
                summary.duplicates += 1;
                summary.backfilled += 1;
            }
        }
    }

    let relevant = papers.iter().filter(|p| p.keyword_relevant).count();
    info!(
        found = summary.found,
        inserted = summary.inserted,
        duplicates = summary.duplicates,
        backfilled = summary.backfilled,
        skipped = summary.skipped,
        relevant,
        "Ingestion complete"
    );
    Ok(summary)
}

/// Fetch from `source` and store the result.
#[instrument(skip(source, repo, keywords), fields(source = source.name()))]
pub fn ingest_from<S: MetadataSource + ?Sized>(
    source: &S,
    repo: &PaperRepository,
    keywords: &[String],
) -> Result<IngestSummary> {
    let records = source.fetch()?;
    ingest(repo, records, keywords, Utc::now())
}
