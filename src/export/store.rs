// src/export/store.rs

//! Object-store boundary for finished artifacts. The engine only knows
//! "put bytes, get back a download reference"; signing and serving live
//! outside.

use crate::errors::AppResult;
use std::fs;
use std::path::PathBuf;

/// Upload target for finished artifacts. `put` returns the reference the
/// report should carry (an absolute URL for remote stores, a served
/// relative path for the filesystem store).
pub trait ArtifactStore {
    fn put(&self, name: &str, bytes: &[u8]) -> AppResult<String>;
}

/// Filesystem-backed store: writes below the export directory and returns
/// the path under which the export directory is served.
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ArtifactStore for FsArtifactStore {
    fn put(&self, name: &str, bytes: &[u8]) -> AppResult<String> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.root.join(name), bytes)?;
        Ok(format!("exports/{name}"))
    }
}
