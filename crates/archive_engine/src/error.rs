use std::io;
use std::path::PathBuf;

use archive_core::RouteError;
use thiserror::Error;

use crate::emit::EmitError;
use crate::persist::PersistError;
use crate::FetchError;

/// Failure of one archiver operation.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Classification(#[from] RouteError),
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot load manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },
    #[error("failed to extract {}: {source}", path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: EmitError,
    },
}

impl ArchiveError {
    /// Stable name of the failure class, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ArchiveError::Classification(_) => "classification",
            ArchiveError::Fetch { source, .. } => source.kind.as_str(),
            ArchiveError::Persist(PersistError::Directory { .. }) => "io_directory",
            ArchiveError::Persist(PersistError::Write { .. }) => "io_write",
            ArchiveError::Read { .. } => "io_read",
            ArchiveError::Manifest { .. } => "manifest",
            ArchiveError::Extract { .. } => "extract_fatal",
        }
    }
}
