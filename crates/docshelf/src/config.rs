//! Configuration file loading (docshelf.toml).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration file structure (docshelf.toml).
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub docs: DocsSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocsSection {
    /// Root directory of the pre-built documentation trees
    pub root: String,
    /// Manifest output path
    pub manifest: String,
    /// URL base for manual links and the shim's prefix check
    pub base_path: String,
    /// Prefix identifying version folders
    pub version_prefix: String,
    /// Entry page filename inside each version folder
    pub entry_page: String,
}

impl Default for DocsSection {
    fn default() -> Self {
        Self {
            root: "static/documentation".to_string(),
            manifest: "manual-list.json".to_string(),
            base_path: "/documentation".to_string(),
            version_prefix: "v_".to_string(),
            entry_page: "index.html".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Directory served as the site root
    pub site_dir: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
            site_dir: "static".to_string(),
        }
    }
}

/// Load configuration from the given path.
///
/// A missing file yields the defaults; a file that exists but does not parse
/// is an error.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile {
            docs: DocsSection::default(),
            server: ServerSection::default(),
        });
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}
