//! Turn downloaded pages into `data.json` and `index.md`.
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use archive_app::CommonArgs;
use archive_engine::Archiver;
use archive_logging::{archive_error, archive_info};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "extract",
    version,
    about = "Extract structured content from downloaded Blogger pages"
)]
struct Cli {
    /// Extract only this HTML file; output goes next to it.
    html_file: Option<PathBuf>,
    /// Re-download images that already exist locally.
    #[arg(long)]
    overwrite: bool,
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
    let archiver =
        Archiver::with_reqwest(cli.common.config()).context("failed to build HTTP client")?;

    if let Some(path) = cli.html_file.as_deref() {
        return match archiver.extract_file(path, cli.overwrite).await {
            Ok(_) => Ok(ExitCode::SUCCESS),
            Err(err) => {
                archive_error!("{}: {err}", err.kind());
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let entries = archiver.load_manifest()?;
    archive_info!("Found {} posts in manifest", entries.len());
    let summary = archiver.extract_all(&entries, cli.overwrite).await;
    Ok(if summary.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
