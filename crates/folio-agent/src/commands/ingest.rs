//! `folio ingest <FILE>`: import a metadata export into the store.

use anyhow::Context;
use folio_common::FolioConfig;
use folio_ingestion::{ingest_from, FileSource, IngestSummary};
use std::path::Path;

pub fn run(config: &FolioConfig, file: &Path) -> anyhow::Result<IngestSummary> {
    let source = FileSource::new(file)?;
    let repo = super::open_repository(config)?;
    let summary = ingest_from(&source, &repo, &config.ingestion.keywords)
        .with_context(|| format!("ingesting {}", file.display()))?;
    Ok(summary)
}

pub fn print(summary: &IngestSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }
    println!(
        "{} found, {} new, {} already known ({} open-access links added), {} skipped",
        summary.found, summary.inserted, summary.duplicates, summary.backfilled, summary.skipped
    );
    Ok(())
}
