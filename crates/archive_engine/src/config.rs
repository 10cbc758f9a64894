use std::path::{Path, PathBuf};
use std::time::Duration;

use archive_core::Layout;

use crate::FetchSettings;

pub const MANIFEST_FILE: &str = "posts-metadata.json";
pub const DEFAULT_POLITENESS_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub layout: Layout,
    pub manifest_path: PathBuf,
    pub fetch: FetchSettings,
    /// Pause after every batch page fetch attempt, failed ones included.
    pub politeness_delay: Duration,
    /// Run the extractor on each freshly downloaded page.
    pub extract_after_download: bool,
}

impl ArchiveConfig {
    /// Defaults for a project directory: `posts/`, `guides/` and the manifest at its root.
    pub fn for_project(root: &Path) -> Self {
        Self {
            layout: Layout::under(root),
            manifest_path: root.join(MANIFEST_FILE),
            fetch: FetchSettings::default(),
            politeness_delay: DEFAULT_POLITENESS_DELAY,
            extract_after_download: true,
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self::for_project(Path::new("."))
    }
}
