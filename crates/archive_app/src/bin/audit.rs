//! List `index.md` files whose blockquotes look like mangled code.
use clap::Parser;

use archive_app::CommonArgs;
use archive_engine::find_suspicious_markdown;
use archive_logging::archive_info;

#[derive(Debug, Parser)]
#[command(
    name = "audit",
    version,
    about = "Find posts with code blocks mis-converted into quotes"
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    let cli = Cli::parse();
    cli.common.init_logging();

    let posts_root = cli.common.config().layout.posts_root;
    let suspicious = find_suspicious_markdown(&posts_root);
    for path in &suspicious {
        println!("{}", path.display());
    }
    archive_info!(
        "{} suspicious files under {}",
        suspicious.len(),
        posts_root.display()
    );
}
