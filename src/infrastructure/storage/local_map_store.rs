use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::{MapStore, MapStoreError};
use crate::domain::MapFileName;

pub const DEFAULT_EXTENSION: &str = "pmtiles";

/// Map archives stored as `<name>.<extension>` files in a single directory.
pub struct LocalMapStore {
    base_path: PathBuf,
    extension: String,
}

impl LocalMapStore {
    pub fn new(base_path: PathBuf, extension: impl Into<String>) -> Result<Self, MapStoreError> {
        std::fs::create_dir_all(&base_path)?;
        Ok(Self {
            base_path,
            extension: extension.into(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl MapStore for LocalMapStore {
    fn path_for(&self, name: &MapFileName) -> PathBuf {
        self.base_path.join(name.with_extension(&self.extension))
    }

    async fn exists(&self, name: &MapFileName) -> Result<bool, MapStoreError> {
        Ok(tokio::fs::try_exists(self.path_for(name)).await?)
    }

    async fn remove(&self, name: &MapFileName) -> Result<bool, MapStoreError> {
        match tokio::fs::remove_file(self.path_for(name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(MapStoreError::Io(e)),
        }
    }

    async fn size(&self, name: &MapFileName) -> Result<u64, MapStoreError> {
        match tokio::fs::metadata(self.path_for(name)).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(MapStoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(MapStoreError::Io(e)),
        }
    }

    async fn list(&self) -> Result<Vec<String>, MapStoreError> {
        let mut entries = tokio::fs::read_dir(&self.base_path).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                continue;
            }
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
        files.sort();
        Ok(files)
    }
}
