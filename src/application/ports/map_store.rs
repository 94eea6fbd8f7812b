use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::MapFileName;

/// The directory holding finished map archives.
#[async_trait]
pub trait MapStore: Send + Sync {
    fn path_for(&self, name: &MapFileName) -> PathBuf;

    async fn exists(&self, name: &MapFileName) -> Result<bool, MapStoreError>;

    /// Deletes the archive if present; returns whether a file was removed.
    async fn remove(&self, name: &MapFileName) -> Result<bool, MapStoreError>;

    async fn size(&self, name: &MapFileName) -> Result<u64, MapStoreError>;

    async fn list(&self) -> Result<Vec<String>, MapStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MapStoreError {
    #[error("map not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
