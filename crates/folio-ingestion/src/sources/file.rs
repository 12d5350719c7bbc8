//! Metadata export files.
//!
//! A file holds one array (JSON) or sequence (YAML) of paper records, as
//! written by the feed fetchers.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::MetadataSource;
use crate::error::{IngestError, Result};
use crate::models::PaperMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataFormat {
    Json,
    Yaml,
}

impl MetadataFormat {
    /// Format from a file extension (`json`, `yaml`, `yml`; case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(MetadataFormat::Json),
            "yaml" | "yml" => Ok(MetadataFormat::Yaml),
            _ => Err(IngestError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn parse(&self, content: &str) -> Result<Vec<PaperMetadata>> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(match self {
            MetadataFormat::Json => serde_json::from_str(content)?,
            MetadataFormat::Yaml => serde_yaml::from_str(content)?,
        })
    }
}

/// A metadata export on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: MetadataFormat,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = MetadataFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetadataSource for FileSource {
    fn name(&self) -> &str {
        self.path.to_str().unwrap_or("file")
    }

    fn fetch(&self) -> Result<Vec<PaperMetadata>> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| IngestError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let records = self.format.parse(&content)?;
        debug!(path = %self.path.display(), records = records.len(), "Read metadata file");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Authors;
    use std::io::Write;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(MetadataFormat::from_path(Path::new("a.JSON")).unwrap(), MetadataFormat::Json);
        assert_eq!(MetadataFormat::from_path(Path::new("a.yml")).unwrap(), MetadataFormat::Yaml);
        assert!(matches!(
            MetadataFormat::from_path(Path::new("a.csv")),
            Err(IngestError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_json_with_fetcher_field_names() {
        let json = r#"[
            {"title": "A", "authors": ["X", "Y"], "abstract": "text", "journal": "Econometrica", "pub_date": "2026-01-01"},
            {"title": "B"}
        ]"#;
        let records = MetadataFormat::Json.parse(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].authors, Authors::List(vec!["X".into(), "Y".into()]));
        assert_eq!(records[0].abstract_text.as_deref(), Some("text"));
        assert_eq!(records[0].venue.as_deref(), Some("Econometrica"));
        assert_eq!(records[0].publication_date.as_deref(), Some("2026-01-01"));
        assert_eq!(records[1].authors, Authors::default());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "- title: A\n  authors: \"Card, David\"\n  venue: NBER Working Paper\n";
        let records = MetadataFormat::Yaml.parse(yaml).unwrap();
        assert_eq!(records[0].authors, Authors::Joined("Card, David".into()));
        assert_eq!(records[0].venue.as_deref(), Some("NBER Working Paper"));
    }

    #[test]
    fn test_empty_file_is_no_records() {
        assert!(MetadataFormat::Yaml.parse("").unwrap().is_empty());
    }

    #[test]
    fn test_file_source_reads_disk() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"title": "On Disk"}}]"#).unwrap();
        let source = FileSource::new(file.path()).unwrap();
        let records = source.fetch().unwrap();
        assert_eq!(records[0].title, "On Disk");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = FileSource::new("/nonexistent/papers.json").unwrap();
        assert!(matches!(source.fetch(), Err(IngestError::Io { .. })));
    }
}
