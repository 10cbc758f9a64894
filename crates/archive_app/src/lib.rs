//! Command-line plumbing shared by the `download`, `extract` and `audit` binaries.
use std::path::{Path, PathBuf};

use archive_core::Layout;
use archive_engine::{ArchiveConfig, MANIFEST_FILE};
use archive_logging::LogDestination;
use clap::Args;
use log::LevelFilter;

/// Options every binary accepts.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project directory holding the manifest, `posts/` and `guides/`.
    #[arg(long, env = "BLOG_ARCHIVE_ROOT", default_value = ".", value_name = "DIR")]
    pub root: PathBuf,
    /// Dated posts directory (default: <root>/posts).
    #[arg(long, value_name = "DIR")]
    pub posts_dir: Option<PathBuf>,
    /// Guide pages directory (default: <root>/guides).
    #[arg(long, value_name = "DIR")]
    pub guides_dir: Option<PathBuf>,
    /// Manifest file (default: <root>/posts-metadata.json).
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,
    /// Also write the log to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// Log debug output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn init_logging(&self) {
        let destination = match &self.log_file {
            Some(path) => LogDestination::TerminalAndFile(path.clone()),
            None => LogDestination::Terminal,
        };
        let level = if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        archive_logging::initialize(&destination, level);
    }

    /// Relative overrides are taken from the project root.
    pub fn config(&self) -> ArchiveConfig {
        let defaults = ArchiveConfig::for_project(&self.root);
        let posts_root = self
            .resolve(self.posts_dir.as_deref())
            .unwrap_or(defaults.layout.posts_root);
        let guides_root = self
            .resolve(self.guides_dir.as_deref())
            .unwrap_or(defaults.layout.guides_root);
        let manifest_path = self
            .resolve(self.manifest.as_deref())
            .unwrap_or_else(|| self.root.join(MANIFEST_FILE));

        ArchiveConfig {
            layout: Layout::new(posts_root, guides_root),
            manifest_path,
            ..defaults
        }
    }

    fn resolve(&self, path: Option<&Path>) -> Option<PathBuf> {
        path.map(|path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                self.root.join(path)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        common: CommonArgs,
    }

    fn parse(args: &[&str]) -> CommonArgs {
        Cli::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
            .common
    }

    #[test]
    fn defaults_follow_the_root() {
        let config = parse(&["--root", "/data/blog"]).config();
        assert_eq!(config.layout.posts_root, PathBuf::from("/data/blog/posts"));
        assert_eq!(config.layout.guides_root, PathBuf::from("/data/blog/guides"));
        assert_eq!(
            config.manifest_path,
            PathBuf::from("/data/blog/posts-metadata.json")
        );
        assert!(config.extract_after_download);
    }

    #[test]
    fn relative_overrides_are_joined_to_the_root() {
        let config = parse(&[
            "--root",
            "/data/blog",
            "--posts-dir",
            "archive/posts",
            "--manifest",
            "/elsewhere/list.json",
        ])
        .config();
        assert_eq!(
            config.layout.posts_root,
            PathBuf::from("/data/blog/archive/posts")
        );
        assert_eq!(config.manifest_path, PathBuf::from("/elsewhere/list.json"));
    }

    #[test]
    fn verbose_flag_is_short_and_long() {
        assert!(parse(&["-v", "--root", "."]).verbose);
        assert!(parse(&["--verbose", "--root", "."]).verbose);
    }
}
