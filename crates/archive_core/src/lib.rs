//! Archive core: pure data model and rules for the Blogger archiver.
//!
//! Nothing in this crate touches the network or the filesystem.
mod audit;
mod codeblock;
mod frontmatter;
mod manifest;
mod post;
mod route;

pub use audit::has_suspicious_quotes;
pub use codeblock::{fence_indented_code, FENCE};
pub use frontmatter::render_index_markdown;
pub use manifest::{parse_manifest, ManifestEntry};
pub use post::{Comment, Post, PostMetadata};
pub use route::{classify_url, Layout, PostKind, RouteError, RoutedUrl, ORIGINAL_HTML};
