//! Scaffold a docshelf site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing docshelf...");

    // Create default config
    let config_path = Path::new("docshelf.toml");
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write docshelf.toml")?;
        tracing::info!("Created docshelf.toml");
    }

    // Create a sample documentation tree
    let sample_dir = Path::new("static/documentation/sample-product/v_1.0");
    if !sample_dir.exists() {
        fs::create_dir_all(sample_dir).context("Failed to create documentation tree")?;
    }

    let index_path = sample_dir.join("index.html");
    if !index_path.exists() || yes {
        fs::write(&index_path, DEFAULT_MANUAL).context("Failed to write index.html")?;
        tracing::info!("Created {}", index_path.display());
    }

    let search_path = sample_dir.join("search.html");
    if !search_path.exists() || yes {
        fs::write(&search_path, DEFAULT_SEARCH).context("Failed to write search.html")?;
        tracing::info!("Created {}", search_path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'docshelf serve' to preview the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Docshelf Configuration

[docs]
# Root directory of the pre-built documentation trees
root = "static/documentation"

# Manifest output path
manifest = "manual-list.json"

# URL base for manual links
base_path = "/documentation"

# Prefix identifying version folders
version_prefix = "v_"

# Entry page inside each version folder
entry_page = "index.html"

[server]
host = "127.0.0.1"
port = 4000

# Directory served as the site root
site_dir = "static"
"#;

const DEFAULT_MANUAL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Sample Product Manual</title>
</head>
<body>
  <h1>Sample Product v1.0</h1>
  <p>Replace this tree with the generated documentation for your product.</p>
</body>
</html>
"#;

const DEFAULT_SEARCH: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Search - Sample Product Manual</title>
</head>
<body>
  <h1>Search</h1>
  <p>Generated documentation ships its own search page; this is a placeholder.</p>
</body>
</html>
"#;
