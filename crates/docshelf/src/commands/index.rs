//! Manifest generation command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use docshelf_index::{IndexBuilder, IndexConfig};

use crate::config;

/// Run the index command.
pub async fn run(
    config_path: &Path,
    root: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let file = config::load(config_path)?;

    let config = IndexConfig {
        doc_root: root.unwrap_or_else(|| PathBuf::from(&file.docs.root)),
        output: output.unwrap_or_else(|| PathBuf::from(&file.docs.manifest)),
        base_path: file.docs.base_path,
        version_prefix: file.docs.version_prefix,
        entry_page: file.docs.entry_page,
    };

    let summary = IndexBuilder::new(config).run()?;

    tracing::info!(
        "Indexed {} manuals across {} groups into {}",
        summary.manuals,
        summary.groups,
        summary.output.display()
    );

    Ok(())
}
