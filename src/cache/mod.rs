//! On-disk image cache.
//!
//! A file present at a task's destination means the task is done; contents
//! are never re-validated. Writes go through a temporary file in the
//! destination directory and are renamed into place, so an interrupted
//! download never leaves a truncated file behind.

use std::io::Write;
use std::path::Path;

use async_trait::async_trait;

use crate::app::{Result, SyncError};

#[async_trait]
pub trait AssetStore {
    async fn exists(&self, path: &Path) -> Result<bool>;
    async fn write(&self, path: &Path, body: Vec<u8>) -> Result<()>;
    async fn ensure_dir(&self, dir: &Path) -> Result<()>;
}

/// Filesystem-backed store.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FsStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AssetStore for FsStore {
    async fn exists(&self, path: &Path) -> Result<bool> {
        Ok(tokio::fs::try_exists(path).await?)
    }

    async fn write(&self, path: &Path, body: Vec<u8>) -> Result<()> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || write_atomic(&path, &body))
            .await
            .map_err(|e| SyncError::Other(format!("Write task failed: {}", e)))?
    }

    async fn ensure_dir(&self, dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(dir).await?;
        Ok(())
    }
}

/// Write `body` to a temp file beside `path`, then rename it into place.
pub fn write_atomic(path: &Path, body: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".assetsync-")
        .suffix(".part")
        .tempfile_in(dir)?;

    tmp.write_all(body)?;
    tmp.as_file().sync_all()?;

    // On failure the temp file is removed when the error drops it
    tmp.persist(path).map_err(|e| SyncError::Io(e.error))?;
    Ok(())
}
