//! folio-common: Shared types, errors, and traits used across all Folio crates.

pub mod error;
pub mod paper;
pub mod config;
pub mod store;

// Re-export commonly used types
pub use config::{FolioConfig, PicksConfig, WeightMap};
pub use error::{FolioError, Result};
pub use paper::{Paper, PaperId, PaperStatus};
pub use store::{PaperStore, StatusTransition};
