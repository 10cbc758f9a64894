use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

/// Name of the raw page saved in every destination directory.
pub const ORIGINAL_HTML: &str = "original.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostKind {
    /// `/YYYY/MM/<slug>.html`
    Dated { year: String, month: String },
    /// `/p/<slug>.html`
    Guide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedUrl {
    pub kind: PostKind,
    pub basename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("invalid url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("url is neither a dated post nor a guide: {0}")]
    Unclassified(String),
    #[error("cannot extract basename from url: {0}")]
    MissingBasename(String),
}

/// Classify a post URL by the shape of its path.
pub fn classify_url(raw: &str) -> Result<RoutedUrl, RouteError> {
    let url = Url::parse(raw.trim()).map_err(|err| RouteError::InvalidUrl {
        url: raw.to_string(),
        message: err.to_string(),
    })?;
    let path = url.path();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let kind = match segments.as_slice() {
        ["p", ..] => PostKind::Guide,
        [year, month, ..] if is_decimal(year) && is_decimal(month) => PostKind::Dated {
            year: (*year).to_string(),
            month: (*month).to_string(),
        },
        _ => return Err(RouteError::Unclassified(raw.to_string())),
    };

    let basename = basename_of(path);
    if basename.is_empty() {
        return Err(RouteError::MissingBasename(raw.to_string()));
    }

    Ok(RoutedUrl {
        kind,
        basename: basename.to_string(),
    })
}

fn is_decimal(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

fn basename_of(path: &str) -> &str {
    let last = path.rsplit('/').next().unwrap_or_default();
    last.strip_suffix(".html").unwrap_or(last)
}

/// Where dated posts and guides live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub posts_root: PathBuf,
    pub guides_root: PathBuf,
}

impl Layout {
    pub fn new(posts_root: impl Into<PathBuf>, guides_root: impl Into<PathBuf>) -> Self {
        Self {
            posts_root: posts_root.into(),
            guides_root: guides_root.into(),
        }
    }

    /// `posts/` and `guides/` under a project directory.
    pub fn under(project_root: &Path) -> Self {
        Self::new(project_root.join("posts"), project_root.join("guides"))
    }

    pub fn destination(&self, routed: &RoutedUrl) -> PathBuf {
        match &routed.kind {
            PostKind::Dated { year, month } => self
                .posts_root
                .join(year)
                .join(month)
                .join(&routed.basename),
            PostKind::Guide => self.guides_root.join(&routed.basename),
        }
    }

    pub fn plan(&self, url: &str) -> Result<PathBuf, RouteError> {
        classify_url(url).map(|routed| self.destination(&routed))
    }

    pub fn original_html(&self, url: &str) -> Result<PathBuf, RouteError> {
        self.plan(url).map(|dir| dir.join(ORIGINAL_HTML))
    }
}

#[cfg(test)]
mod tests {
    use super::basename_of;

    #[test]
    fn basename_strips_only_html_suffix() {
        assert_eq!(basename_of("/2007/03/post.html"), "post");
        assert_eq!(basename_of("/2007/03/post.htm"), "post.htm");
        assert_eq!(basename_of("/2007/03/"), "");
    }
}
