//! Fetch Blogger pages into the archive tree and extract them.
use std::process::ExitCode;

use anyhow::{Context, Result};
use archive_app::CommonArgs;
use archive_engine::{ArchiveConfig, Archiver, DownloadOutcome};
use archive_logging::{archive_error, archive_info, archive_warn};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "download",
    version,
    about = "Download Blogger posts listed in the manifest, or a single post URL"
)]
struct Cli {
    /// Download only this URL instead of the whole manifest.
    url: Option<String>,
    /// Replace an existing original.html (single URL mode).
    #[arg(long)]
    overwrite: bool,
    /// Do not extract data.json / index.md after downloading.
    #[arg(long)]
    skip_extract: bool,
    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.common.init_logging();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            archive_error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = ArchiveConfig {
        extract_after_download: !cli.skip_extract,
        ..cli.common.config()
    };
    let archiver = Archiver::with_reqwest(config).context("failed to build HTTP client")?;

    if let Some(url) = cli.url.as_deref() {
        return match archiver.download_url(url, cli.overwrite).await {
            Ok(DownloadOutcome::Downloaded(path)) => {
                archive_info!("Saved to: {}", path.display());
                Ok(ExitCode::SUCCESS)
            }
            Ok(DownloadOutcome::AlreadyPresent(path)) => {
                archive_warn!(
                    "{} already exists, use --overwrite to replace it",
                    path.display()
                );
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                archive_error!("{}: {err}", err.kind());
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let entries = archiver.load_manifest()?;
    archive_info!("Found {} posts in manifest", entries.len());
    archiver.download_all(&entries).await;
    Ok(ExitCode::SUCCESS)
}
