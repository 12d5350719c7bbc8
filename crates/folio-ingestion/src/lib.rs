//! folio-ingestion: Paper metadata import.
//!
//! - Metadata sources (JSON / YAML export files)
//! - Keyword relevance flag, computed once at ingestion
//! - Content-derived ids and idempotent inserts
//! - Open-access link backfill for papers seen again

pub mod error;
pub mod models;
pub mod relevance;
pub mod sources;
pub mod pipeline;

pub use error::{IngestError, Result};
pub use models::{Authors, PaperMetadata};
pub use pipeline::{ingest, ingest_from, IngestSummary};
pub use relevance::check_relevance;
pub use sources::{FileSource, MetadataSource};
