//! Site serve command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docshelf_index::{IndexBuilder, IndexConfig};
use docshelf_server::{ServeConfig, SiteServer, TreeWatcher};

use crate::config;

/// Run the serve command.
pub async fn run(
    config_path: &Path,
    port: Option<u16>,
    dir: Option<PathBuf>,
    open: bool,
    watch: bool,
) -> Result<()> {
    let file = config::load(config_path)?;

    let index_config = IndexConfig {
        doc_root: PathBuf::from(&file.docs.root),
        output: PathBuf::from(&file.docs.manifest),
        base_path: file.docs.base_path.clone(),
        version_prefix: file.docs.version_prefix.clone(),
        entry_page: file.docs.entry_page.clone(),
    };

    // Build the manifest once up front so the library page has data
    IndexBuilder::new(index_config.clone()).run()?;

    let serve_config = ServeConfig {
        site_dir: dir.unwrap_or_else(|| PathBuf::from(&file.server.site_dir)),
        host: file.server.host,
        port: port.unwrap_or(file.server.port),
        open,
        docs_prefix: file.docs.base_path,
        manifest_path: index_config.output.clone(),
    };

    if !serve_config.site_dir.exists() {
        anyhow::bail!(
            "Site directory not found: {}. Run 'docshelf init' first.",
            serve_config.site_dir.display()
        );
    }

    if watch {
        let (watcher, mut rx) = TreeWatcher::new(&index_config.doc_root)
            .with_context(|| format!("Failed to watch {}", index_config.doc_root.display()))?;
        let builder = IndexBuilder::new(index_config);

        tokio::spawn(async move {
            while let Some(change) = rx.recv().await {
                tracing::info!("Documentation tree changed: {}", change.path().display());
                if let Err(e) = builder.run() {
                    tracing::warn!("Reindex failed: {}", e);
                }
            }
            // Keep watcher alive
            drop(watcher);
        });
    }

    SiteServer::new(serve_config).start().await?;

    Ok(())
}
