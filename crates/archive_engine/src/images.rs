use std::collections::HashMap;
use std::path::Path;

use archive_logging::{archive_info, archive_warn};
use thiserror::Error;
use url::Url;

use crate::filename::image_filename;
use crate::persist::{AtomicWriter, PersistError};
use crate::{FetchError, Fetcher};

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("cannot resolve image url {0:?}")]
    Unresolvable(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Outcome of relocating the images of one post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRelocation {
    /// Original `src` attribute value to local filename.
    pub rewrites: HashMap<String, String>,
    /// Local filenames, one per successfully relocated reference, in document order.
    pub downloaded: Vec<String>,
}

/// Downloads post images next to the post and reports how to rewrite them.
pub struct ImageRelocator<'a> {
    fetcher: &'a dyn Fetcher,
    writer: AtomicWriter,
    overwrite: bool,
    base_url: Option<Url>,
}

impl<'a> ImageRelocator<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, output_dir: &Path, overwrite: bool) -> Self {
        Self {
            fetcher,
            writer: AtomicWriter::new(output_dir),
            overwrite,
            base_url: None,
        }
    }

    /// Base for relative and protocol-relative sources, usually the canonical post URL.
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        self.base_url = base_url.and_then(|base| Url::parse(base).ok());
        self
    }

    pub async fn relocate(&self, sources: &[String]) -> ImageRelocation {
        let mut relocation = ImageRelocation::default();
        for src in sources {
            match self.relocate_one(src).await {
                Ok(filename) => {
                    relocation.rewrites.insert(src.clone(), filename.clone());
                    relocation.downloaded.push(filename);
                }
                Err(err) => archive_warn!("image_fetch: failed to download image {src}: {err}"),
            }
        }
        relocation
    }

    async fn relocate_one(&self, src: &str) -> Result<String, ImageError> {
        let url = self.resolve(src)?;
        let filename = image_filename(&url);

        if !self.overwrite && self.writer.dir().join(&filename).exists() {
            archive_info!("Image already exists, skipping: {filename}");
            return Ok(filename);
        }

        let output = self.fetcher.fetch(url.as_str()).await?;
        self.writer.write_bytes(&filename, &output.bytes)?;
        Ok(filename)
    }

    fn resolve(&self, src: &str) -> Result<Url, ImageError> {
        let resolved = match Url::parse(src) {
            Ok(url) => Some(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                self.base_url.as_ref().and_then(|base| base.join(src).ok())
            }
            Err(_) => None,
        };
        resolved
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| ImageError::Unresolvable(src.to_string()))
    }
}
