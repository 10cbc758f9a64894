use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot create directory {}: {source}", path.display())]
    Directory { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Create `dir` (and parents) unless it already exists as a directory.
pub fn ensure_dir(dir: &Path) -> Result<(), PersistError> {
    let directory_error = |source| PersistError::Directory {
        path: dir.to_path_buf(),
        source,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(directory_error(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "path exists and is not a directory",
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(directory_error)
        }
        Err(err) => Err(directory_error(err)),
    }
}

/// Writes whole files into one directory with truncate-and-replace semantics:
/// content goes to a temp file in the same directory which is then renamed
/// over the target, so readers never observe a partial file.
#[derive(Debug, Clone)]
pub struct AtomicWriter {
    dir: PathBuf,
}

impl AtomicWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write_text(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        self.write_bytes(filename, content.as_bytes())
    }

    pub fn write_bytes(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let write_error = |source| PersistError::Write {
            path: target.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_error)?;
        tmp.write_all(content).map_err(write_error)?;
        tmp.flush().map_err(write_error)?;
        tmp.as_file_mut().sync_all().map_err(write_error)?;
        tmp.persist(&target).map_err(|err| write_error(err.error))?;
        Ok(target)
    }
}
