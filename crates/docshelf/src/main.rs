//! Docshelf CLI - versioned product-manual hosting toolkit.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "docshelf")]
#[command(about = "Versioned product-manual hosting toolkit")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docshelf.toml config file
    #[arg(short, long, default_value = "docshelf.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a docshelf site in the current directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate the manual-list manifest from the documentation tree
    Index {
        /// Documentation root (overrides config)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Manifest output path (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the site with the search-redirect shim
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory to serve (overrides config)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,

        /// Rebuild the manifest when the documentation tree changes
        #[arg(long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes).await?;
        }
        Commands::Index { root, output } => {
            commands::index::run(&cli.config, root, output).await?;
        }
        Commands::Serve {
            port,
            dir,
            no_open,
            watch,
        } => {
            commands::serve::run(&cli.config, port, dir, !no_open, watch).await?;
        }
    }

    Ok(())
}
