use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use mapsmith::application::ports::{
    BuildSourceError, BuildSourceResolver, ExtractionEngine, ExtractionEngineError,
    MapJobRepository, RepositoryError,
};
use mapsmith::domain::{JobId, JobStatus, MapJob};
use mapsmith::infrastructure::persistence::InMemoryMapJobRepository;

pub const TEST_SOURCE_URL: &str = "https://build.example.test/20250101.pmtiles";

pub struct FakeResolver {
    fail: bool,
}

impl FakeResolver {
    pub fn ok() -> Self {
        Self { fail: false }
    }

    /// Fails every resolution with `BuildSourceError::Empty`.
    pub fn empty_catalog() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl BuildSourceResolver for FakeResolver {
    async fn resolve_latest_source(&self) -> Result<String, BuildSourceError> {
        if self.fail {
            Err(BuildSourceError::Empty)
        } else {
            Ok(TEST_SOURCE_URL.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Extract {
        source: String,
        bbox: String,
        destination: PathBuf,
    },
    Sync {
        destination: PathBuf,
        source: String,
    },
}

/// Writes a small archive on extract. Sync fails when there is no archive to update.
pub struct FakeEngine {
    failure: Option<String>,
    gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<EngineCall>>,
}

impl FakeEngine {
    pub fn succeeding() -> Self {
        Self {
            failure: None,
            gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::succeeding()
        }
    }

    /// Blocks every call until the returned notifier is signalled once per call.
    pub fn gated() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let engine = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::succeeding()
        };
        (engine, gate)
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl ExtractionEngine for FakeEngine {
    async fn extract(
        &self,
        source: &str,
        bbox: &str,
        destination: &Path,
    ) -> Result<(), ExtractionEngineError> {
        self.calls.lock().unwrap().push(EngineCall::Extract {
            source: source.to_string(),
            bbox: bbox.to_string(),
            destination: destination.to_path_buf(),
        });
        self.wait_for_gate().await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        if let Some(message) = &self.failure {
            return Err(ExtractionEngineError::Failed(message.clone()));
        }
        tokio::fs::write(destination, b"PMTiles")
            .await
            .map_err(|e| ExtractionEngineError::Failed(e.to_string()))
    }

    async fn sync(&self, destination: &Path, source: &str) -> Result<(), ExtractionEngineError> {
        self.calls.lock().unwrap().push(EngineCall::Sync {
            destination: destination.to_path_buf(),
            source: source.to_string(),
        });
        self.wait_for_gate().await;

        if let Some(message) = &self.failure {
            return Err(ExtractionEngineError::Failed(message.clone()));
        }
        if !destination.exists() {
            return Err(ExtractionEngineError::Failed(
                "no archive to sync".to_string(),
            ));
        }
        Ok(())
    }

    async fn show(&self, _path: &Path) -> Result<String, ExtractionEngineError> {
        Ok(r#"{"tile_type":"mvt","min_zoom":0,"max_zoom":15}"#.to_string())
    }
}

/// Record store whose status updates always fail.
#[derive(Default)]
pub struct FailingStatusRepository {
    inner: InMemoryMapJobRepository,
}

#[async_trait]
impl MapJobRepository for FailingStatusRepository {
    async fn create(&self, job: &MapJob) -> Result<(), RepositoryError> {
        self.inner.create(job).await
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<MapJob>, RepositoryError> {
        self.inner.get_by_id(id).await
    }

    async fn update_status(
        &self,
        _id: JobId,
        _status: JobStatus,
        _error: Option<&str>,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::ConnectionFailed("store offline".to_string()))
    }

    async fn delete(&self, id: JobId) -> Result<Option<MapJob>, RepositoryError> {
        self.inner.delete(id).await
    }

    async fn list(&self) -> Result<Vec<MapJob>, RepositoryError> {
        self.inner.list().await
    }
}
