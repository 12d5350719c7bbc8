use folio_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML metadata: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported metadata format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    #[error("Store error: {0}")]
    Store(#[from] DbError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
