use std::fs;
use std::path::{Path, PathBuf};

use archive_core::{parse_manifest, ManifestEntry, Post, ORIGINAL_HTML};
use archive_logging::{archive_debug, archive_error, archive_info, archive_warn};

use crate::config::ArchiveConfig;
use crate::decode::decode_html;
use crate::emit::emit_post;
use crate::error::ArchiveError;
use crate::extract::PostExtractor;
use crate::fetch::{fetch_page, Fetcher, ReqwestFetcher};
use crate::persist::{ensure_dir, AtomicWriter};
use crate::FetchError;

/// Files written by this tool are always UTF-8.
const SAVED_CONTENT_TYPE: &str = "text/html; charset=utf-8";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl DownloadSummary {
    pub fn total(&self) -> usize {
        self.downloaded + self.skipped + self.errors
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub successful: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded(PathBuf),
    /// `original.html` was already on disk and left untouched.
    AlreadyPresent(PathBuf),
}

impl DownloadOutcome {
    /// Location of `original.html`.
    pub fn path(&self) -> &Path {
        match self {
            DownloadOutcome::Downloaded(path) | DownloadOutcome::AlreadyPresent(path) => path,
        }
    }
}

/// Drives downloads and extractions in manifest order, one page at a time.
pub struct Archiver {
    config: ArchiveConfig,
    fetcher: Box<dyn Fetcher>,
}

impl Archiver {
    pub fn new(config: ArchiveConfig, fetcher: Box<dyn Fetcher>) -> Self {
        Self { config, fetcher }
    }

    pub fn with_reqwest(config: ArchiveConfig) -> Result<Self, FetchError> {
        let fetcher = ReqwestFetcher::new(&config.fetch)?;
        Ok(Self::new(config, Box::new(fetcher)))
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    pub fn load_manifest(&self) -> Result<Vec<ManifestEntry>, ArchiveError> {
        let path = &self.config.manifest_path;
        let manifest_error = |message: String| ArchiveError::Manifest {
            path: path.clone(),
            message,
        };
        let json = fs::read_to_string(path).map_err(|err| manifest_error(err.to_string()))?;
        parse_manifest(&json).map_err(|err| manifest_error(err.to_string()))
    }

    pub async fn download_all(&self, entries: &[ManifestEntry]) -> DownloadSummary {
        let mut summary = DownloadSummary::default();
        let total = entries.len();

        for (index, entry) in entries.iter().enumerate() {
            archive_info!("[{}/{}] Processing: {}", index + 1, total, entry.display_title());
            let Some(url) = entry.original_url.as_deref() else {
                archive_warn!("  No URL found, skipping");
                summary.skipped += 1;
                continue;
            };
            archive_info!("  URL: {url}");

            match self.download_into(url, false, true).await {
                Ok(DownloadOutcome::Downloaded(path)) => {
                    archive_info!("  Saved to: {}", path.display());
                    summary.downloaded += 1;
                }
                Ok(DownloadOutcome::AlreadyPresent(path)) => {
                    archive_info!("  Already exists, skipping: {}", path.display());
                    summary.skipped += 1;
                }
                Err(err @ ArchiveError::Classification(_)) => {
                    archive_warn!("  {}: {err}", err.kind());
                    summary.skipped += 1;
                }
                Err(err) => {
                    archive_error!("  {}: {err}", err.kind());
                    summary.errors += 1;
                }
            }
        }

        archive_info!(
            "Download complete: {} downloaded, {} skipped, {} errors, {} total",
            summary.downloaded,
            summary.skipped,
            summary.errors,
            summary.total()
        );
        summary
    }

    /// Download one page. With `overwrite` an existing `original.html` is replaced.
    pub async fn download_url(
        &self,
        url: &str,
        overwrite: bool,
    ) -> Result<DownloadOutcome, ArchiveError> {
        self.download_into(url, overwrite, false).await
    }

    async fn download_into(
        &self,
        url: &str,
        overwrite: bool,
        pause: bool,
    ) -> Result<DownloadOutcome, ArchiveError> {
        let dir = self.config.layout.plan(url)?;
        ensure_dir(&dir)?;
        let original = dir.join(ORIGINAL_HTML);
        let outcome = if !overwrite && original.exists() {
            DownloadOutcome::AlreadyPresent(original)
        } else {
            let saved = self.save_original(url, &dir).await;
            if pause && !self.config.politeness_delay.is_zero() {
                tokio::time::sleep(self.config.politeness_delay).await;
            }
            DownloadOutcome::Downloaded(saved?)
        };

        if self.config.extract_after_download {
            self.extract_file(outcome.path(), false).await?;
        }
        Ok(outcome)
    }

    async fn save_original(&self, url: &str, dir: &Path) -> Result<PathBuf, ArchiveError> {
        let page = fetch_page(self.fetcher.as_ref(), url)
            .await
            .map_err(|source| ArchiveError::Fetch {
                url: url.to_string(),
                source,
            })?;
        archive_debug!("Decoded {url} as {}", page.encoding_label);
        Ok(AtomicWriter::new(dir).write_text(ORIGINAL_HTML, &page.html)?)
    }

    /// Extract every manifest entry whose page has been downloaded.
    pub async fn extract_all(
        &self,
        entries: &[ManifestEntry],
        overwrite_images: bool,
    ) -> ExtractSummary {
        let mut summary = ExtractSummary::default();
        let total = entries.len();

        for (index, entry) in entries.iter().enumerate() {
            archive_info!("[{}/{}] Extracting: {}", index + 1, total, entry.display_title());
            let Some(url) = entry.original_url.as_deref() else {
                archive_warn!("  No URL found");
                summary.failed += 1;
                continue;
            };

            let path = match self.config.layout.original_html(url) {
                Ok(path) => path,
                Err(err) => {
                    archive_warn!("  classification: {err}");
                    summary.failed += 1;
                    continue;
                }
            };
            if !path.exists() {
                archive_warn!("  HTML file not found: {}", path.display());
                summary.failed += 1;
                continue;
            }

            match self.extract_file(&path, overwrite_images).await {
                Ok(_) => summary.successful += 1,
                Err(err) => {
                    archive_error!("  {}: {err}", err.kind());
                    summary.failed += 1;
                }
            }
        }

        archive_info!(
            "Extraction complete: {} successful, {} failed",
            summary.successful,
            summary.failed
        );
        summary
    }

    /// Extract one saved page; `data.json`, `index.md` and images land beside it.
    pub async fn extract_file(
        &self,
        path: &Path,
        overwrite_images: bool,
    ) -> Result<Post, ArchiveError> {
        let bytes = fs::read(path).map_err(|source| ArchiveError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let html = decode_html(&bytes, Some(SAVED_CONTENT_TYPE)).html;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let post = PostExtractor::new(self.fetcher.as_ref(), overwrite_images)
            .extract(&html, dir)
            .await;
        emit_post(&post, dir).map_err(|source| ArchiveError::Extract {
            path: path.to_path_buf(),
            source,
        })?;

        archive_info!(
            "  Extracted \"{}\": {} comments, {} images",
            post.title.as_deref().unwrap_or("Untitled"),
            post.comments.len(),
            post.downloaded_images.len()
        );
        Ok(post)
    }
}
