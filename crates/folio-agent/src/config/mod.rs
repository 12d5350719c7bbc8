//! Configuration loading for the folio binary.
//! Reads folio.toml from the current directory, the path in FOLIO_CONFIG, or
//! the path given with `--config`.

use anyhow::Context;
use folio_common::FolioConfig;
use std::path::{Path, PathBuf};

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Load configuration.
///
/// An explicit path must exist. The implicit path (FOLIO_CONFIG or
/// ./folio.toml) may be missing, in which case built-in defaults apply.
/// A file that exists but does not parse is always an error.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<(FolioConfig, ConfigSource)> {
    if let Some(path) = explicit {
        let config = FolioConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?;
        return Ok((config, ConfigSource::File(path.to_path_buf())));
    }
    load_implicit(&FolioConfig::default_path())
}

fn load_implicit(path: &Path) -> anyhow::Result<(FolioConfig, ConfigSource)> {
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "Config file not found, using built-in defaults. Copy folio.example.toml to folio.toml to customise."
        );
        return Ok((FolioConfig::default(), ConfigSource::Defaults));
    }
    let config = FolioConfig::from_path(path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    Ok((config, ConfigSource::File(path.to_path_buf())))
}
