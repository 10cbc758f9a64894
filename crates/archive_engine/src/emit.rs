use std::path::{Path, PathBuf};

use archive_core::{render_index_markdown, Post};
use thiserror::Error;

use crate::persist::{AtomicWriter, PersistError};

pub const DATA_JSON: &str = "data.json";
pub const INDEX_MD: &str = "index.md";

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("cannot serialize post: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFiles {
    pub data_json: PathBuf,
    pub index_md: PathBuf,
}

/// Write `data.json` and `index.md` for `post` into `dir`, replacing any previous copies.
pub fn emit_post(post: &Post, dir: &Path) -> Result<EmittedFiles, EmitError> {
    let writer = AtomicWriter::new(dir);
    let json = serde_json::to_string_pretty(post)?;
    let data_json = writer.write_text(DATA_JSON, &json)?;
    let index_md = writer.write_text(INDEX_MD, &render_index_markdown(post))?;
    Ok(EmittedFiles {
        data_json,
        index_md,
    })
}
