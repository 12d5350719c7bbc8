//! Subcommand implementations.

pub mod backlog;
pub mod ingest;
pub mod picks;

use anyhow::Context;
use folio_common::FolioConfig;
use folio_db::{Database, PaperRepository};

/// Open (creating if needed) the SQLite store named in the config.
pub fn open_repository(config: &FolioConfig) -> anyhow::Result<PaperRepository> {
    let path = &config.database.path;
    let db = Database::open(path).with_context(|| format!("opening database {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Database opened");
    Ok(PaperRepository::new(db))
}
