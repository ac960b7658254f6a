mod archive;
mod runner;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use venik_extract::Extractor;

use crate::archive::LocalArchive;

#[derive(Debug, Parser)]
#[command(name = "venik-cli")]
#[command(about = "Extract product records from archived vendor pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract one archived page and print its records as JSON.
    Extract {
        file: PathBuf,
        /// Storage key to extract under; defaults to the path relative to
        /// the archive directory.
        #[arg(long)]
        key: Option<String>,
    },
    /// Extract every page in the archive and write one JSON line per product.
    Batch {
        /// Archive root; defaults to `VENIK_ARCHIVE_DIR`.
        #[arg(long)]
        archive: Option<PathBuf>,
        /// Output file; defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = venik_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(archive = %config.archive_dir.display(), "configuration loaded");

    let extractor = Arc::new(Extractor::new(config.extractor_config()));

    match cli.command {
        Commands::Extract { file, key } => {
            let archive = LocalArchive::new(&config.archive_dir);
            run_extract(&archive, &extractor, &file, key)?;
        }
        Commands::Batch { archive, output } => {
            let archive = LocalArchive::new(archive.unwrap_or(config.archive_dir));
            let report =
                runner::run_batch(&archive, extractor, config.max_concurrent_documents).await?;
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    runner::write_json_lines(&report.extractions, BufWriter::new(file))?;
                }
                None => runner::write_json_lines(&report.extractions, std::io::stdout().lock())?,
            }
            eprintln!("batch complete: {}", report.summary);
        }
    }

    Ok(())
}

fn run_extract(
    archive: &LocalArchive,
    extractor: &Extractor,
    file: &Path,
    key: Option<String>,
) -> anyhow::Result<()> {
    let key = key.unwrap_or_else(|| archive.key_for(file));
    let bytes = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let extraction = extractor.extract(&bytes, &key)?;
    println!("{}", serde_json::to_string_pretty(&extraction)?);
    Ok(())
}
