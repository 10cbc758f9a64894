use std::fs;
use std::path::{Path, PathBuf};

use archive_core::has_suspicious_quotes;
use archive_logging::archive_warn;
use walkdir::WalkDir;

use crate::emit::INDEX_MD;

/// Every `index.md` below `posts_root` with a suspicious quoted section.
///
/// Paths are relative to `posts_root` and sorted.
pub fn find_suspicious_markdown(posts_root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for entry in WalkDir::new(posts_root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                archive_warn!("Skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() || entry.file_name() != INDEX_MD {
            continue;
        }

        let path = entry.path();
        let markdown = match fs::read_to_string(path) {
            Ok(markdown) => markdown,
            Err(err) => {
                archive_warn!("io_read: cannot read {}: {err}", path.display());
                continue;
            }
        };
        if has_suspicious_quotes(&markdown) {
            let relative = path.strip_prefix(posts_root).unwrap_or(path);
            found.push(relative.to_path_buf());
        }
    }
    found.sort();
    found
}
