//! Documentation tree scanner and manifest writer.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::manifest::{ManualEntry, ManualGroup};
use crate::version::compare_versions;

/// Configuration for building the manual index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Root directory containing one subdirectory per product
    pub doc_root: PathBuf,

    /// Path of the JSON manifest to write
    pub output: PathBuf,

    /// URL base prepended to every manual path (no trailing slash)
    pub base_path: String,

    /// Prefix identifying version folders within a product
    pub version_prefix: String,

    /// Entry page filename inside each version folder
    pub entry_page: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            doc_root: PathBuf::from("static/documentation"),
            output: PathBuf::from("manual-list.json"),
            base_path: "/documentation".to_string(),
            version_prefix: "v_".to_string(),
            entry_page: "index.html".to_string(),
        }
    }
}

/// Result of an index run.
#[derive(Debug)]
pub struct IndexSummary {
    /// Number of product groups in the manifest
    pub groups: usize,

    /// Total number of manuals across all groups
    pub manuals: usize,

    /// Path the manifest was written to
    pub output: PathBuf,
}

/// Errors that can occur while building the index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Failed to read documentation root {root}: {message}")]
    RootUnreadable { root: String, message: String },

    #[error("Failed to read product directory {path}: {message}")]
    ProductUnreadable { path: String, message: String },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(String),

    #[error("Failed to write manifest {path}: {message}")]
    Write { path: String, message: String },
}

/// Manual index builder.
pub struct IndexBuilder {
    config: IndexConfig,
}

impl IndexBuilder {
    /// Create a new index builder.
    pub fn new(config: IndexConfig) -> Self {
        Self { config }
    }

    /// Scan the documentation root and write the manifest.
    ///
    /// Fail-open: a tree that cannot be scanned degrades to an empty
    /// manifest so downstream consumers always find well-formed JSON. Only
    /// a failure to write the output file itself is an error.
    pub fn run(&self) -> Result<IndexSummary, IndexError> {
        tracing::info!(
            "Scanning for product manuals in {}",
            self.config.doc_root.display()
        );

        let groups = match self.scan() {
            Ok(groups) => groups,
            Err(e) => {
                tracing::error!(
                    "Could not read manuals directory {}: {}",
                    self.config.doc_root.display(),
                    e
                );
                Vec::new()
            }
        };

        self.write(&groups)?;

        let manuals = groups.iter().map(|g| g.manuals.len()).sum();

        tracing::info!(
            "Manual list generated at {} ({} groups, {} manuals)",
            self.config.output.display(),
            groups.len(),
            manuals
        );

        Ok(IndexSummary {
            groups: groups.len(),
            manuals,
            output: self.config.output.clone(),
        })
    }

    /// Discover all manual groups under the documentation root.
    pub fn scan(&self) -> Result<Vec<ManualGroup>, IndexError> {
        let root = &self.config.doc_root;

        if !root.is_dir() {
            return Err(IndexError::RootUnreadable {
                root: root.display().to_string(),
                message: "not a directory".to_string(),
            });
        }

        let mut groups = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| IndexError::RootUnreadable {
                root: root.display().to_string(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_dir() {
                continue;
            }

            let product = entry.file_name().to_string_lossy().to_string();
            let manuals = self.scan_product(entry.path(), &product)?;

            // Products without any version folder are silently skipped
            if manuals.is_empty() {
                tracing::debug!("No version folders in {}, skipping", product);
                continue;
            }

            groups.push(ManualGroup {
                group_name: product,
                manuals,
            });
        }

        groups.sort_by(|a, b| a.group_name.cmp(&b.group_name));

        Ok(groups)
    }

    /// Collect the version folders of a single product, newest first.
    fn scan_product(&self, dir: &Path, product: &str) -> Result<Vec<ManualEntry>, IndexError> {
        let mut manuals = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| IndexError::ProductUnreadable {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_dir() {
                continue;
            }

            let folder = entry.file_name().to_string_lossy().to_string();
            let Some(version) = folder.strip_prefix(&self.config.version_prefix) else {
                continue;
            };

            manuals.push(ManualEntry {
                version: version.to_string(),
                path: format!(
                    "{}/{}/{}/{}",
                    self.config.base_path, product, folder, self.config.entry_page
                ),
            });
        }

        manuals.sort_by(|a, b| compare_versions(&b.version, &a.version));

        Ok(manuals)
    }

    /// Serialize the groups and overwrite the manifest file.
    fn write(&self, groups: &[ManualGroup]) -> Result<(), IndexError> {
        let json = serde_json::to_string_pretty(groups)
            .map_err(|e| IndexError::Serialize(e.to_string()))?;

        if let Some(parent) = self.config.output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| IndexError::Write {
                    path: self.config.output.display().to_string(),
                    message: e.to_string(),
                })?;
            }
        }

        fs::write(&self.config.output, json).map_err(|e| IndexError::Write {
            path: self.config.output.display().to_string(),
            message: e.to_string(),
        })
    }
}
