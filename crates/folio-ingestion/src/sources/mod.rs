//! Paper metadata sources.

pub mod file;

pub use file::{FileSource, MetadataFormat};

use crate::error::Result;
use crate::models::PaperMetadata;

/// Common interface for anything that yields paper metadata.
pub trait MetadataSource {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Every record the source currently offers.
    fn fetch(&self) -> Result<Vec<PaperMetadata>>;
}
