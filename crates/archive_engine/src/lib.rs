//! Archive engine: network, filesystem and HTML work for the Blogger archiver.
mod audit;
mod batch;
mod comments;
mod config;
mod convert;
mod decode;
mod dom;
mod emit;
mod error;
mod extract;
mod fetch;
mod filename;
mod images;
mod persist;
mod types;

pub use audit::find_suspicious_markdown;
pub use batch::{Archiver, DownloadOutcome, DownloadSummary, ExtractSummary};
pub use comments::parse_comments;
pub use config::{ArchiveConfig, DEFAULT_POLITENESS_DELAY, MANIFEST_FILE};
pub use convert::{convert_body, MarkdownConverter, MarkdownOptions};
pub use decode::{decode_html, DecodedHtml};
pub use emit::{emit_post, EmitError, EmittedFiles, DATA_JSON, INDEX_MD};
pub use error::ArchiveError;
pub use extract::{select_post, PostExtractor, PostPage};
pub use fetch::{fetch_page, FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use filename::{image_filename, url_hash};
pub use images::{ImageError, ImageRelocation, ImageRelocator};
pub use persist::{ensure_dir, AtomicWriter, PersistError};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
