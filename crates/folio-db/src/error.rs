//! Database error types.

use folio_common::FolioError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Paper {0} is not in the candidate pool")]
    NotUnpicked(String),

    #[error("Refusing to move {0} back to unpicked")]
    NonTerminalTransition(String),

    #[error("Corrupt row for {id}: {reason}")]
    CorruptRow { id: String, reason: String },
}

impl From<DbError> for FolioError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotUnpicked(id) => FolioError::InvalidTransition {
                id,
                reason: "paper already picked".to_string(),
            },
            DbError::NonTerminalTransition(id) => FolioError::InvalidTransition {
                id,
                reason: "target status is not terminal".to_string(),
            },
            other => FolioError::StoreUnavailable(other.to_string()),
        }
    }
}
