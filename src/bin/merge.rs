//! Swagger Merge CLI
//!
//! Discovers per-service Swagger documents beneath each root's `api/`
//! directory, merges them into a single deterministic document, and writes
//! the result to stdout or a file. Everything beyond argument handling and
//! persistence lives in the library.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use swagger_merge::{merge, Checksum, MergeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swagger-merge")]
#[command(about = "Merge per-service Swagger documents into a single API description")]
struct Cli {
    /// Root directories, each containing an `api` subdirectory
    roots: Vec<PathBuf>,

    /// Path to a config file (merge.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Write the merged document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Title recorded in the merged document's info block
    #[arg(long)]
    title: Option<String>,

    /// Version recorded in the merged document's info block
    #[arg(long)]
    api_version: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = MergeConfig::load_from(cli.config.as_deref())?;

    let roots = if cli.roots.is_empty() {
        config.discovery.roots.clone()
    } else {
        cli.roots
    };
    if roots.is_empty() {
        return Err("no root directories given (pass them as arguments or set [discovery] roots)".into());
    }

    let mut options = config.options();
    if let Some(title) = cli.title {
        options.title = title;
    }
    if let Some(version) = cli.api_version {
        options.version = version;
    }

    let merged = merge(&roots, &options)?;
    let digest = Checksum::from_text(&merged);
    info!(%digest, bytes = merged.len(), "merged document rendered");

    match cli.output.or(config.output.file) {
        Some(path) => {
            fs::write(&path, &merged)?;
            info!(file = %path.display(), "merged document written");
        }
        None => println!("{}", merged),
    }

    Ok(())
}
