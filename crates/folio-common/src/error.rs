use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    /// The paper store could not be read or written. Fatal for a selection run.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Paper not found: {0}")]
    PaperNotFound(String),

    #[error("Invalid status transition for {id}: {reason}")]
    InvalidTransition { id: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FolioError>;
