use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{
    BuildSourceResolver, ExtractionEngine, ExtractionEngineError, JobStatusLookup, JobStatusView,
    MapJobRepository, MapStore, MapStoreError, RepositoryError,
};
use crate::application::services::{
    ExtractionRun, ExtractionWorker, JobStatusTable, PersistedStatusLookup, WorkerHandle,
};
use crate::domain::{ExtractionMode, JobId, JobStatus, MapFileName, MapJob};

/// A job whose worker run has been launched.
#[derive(Debug)]
pub struct JobAccepted {
    pub id: JobId,
    pub status: JobStatus,
    pub worker: WorkerHandle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSize {
    pub name: String,
    pub size_bytes: u64,
}

/// Entry point for map builds: validates requests, keeps the record store and the live
/// status table in step, and launches one worker per run.
pub struct MapJobService {
    job_repository: Arc<dyn MapJobRepository>,
    map_store: Arc<dyn MapStore>,
    source_resolver: Arc<dyn BuildSourceResolver>,
    engine: Arc<dyn ExtractionEngine>,
    status_table: Arc<JobStatusTable>,
    persisted_status: PersistedStatusLookup,
    sync_enabled: bool,
}

impl MapJobService {
    pub fn new(
        job_repository: Arc<dyn MapJobRepository>,
        map_store: Arc<dyn MapStore>,
        source_resolver: Arc<dyn BuildSourceResolver>,
        engine: Arc<dyn ExtractionEngine>,
        status_table: Arc<JobStatusTable>,
        sync_enabled: bool,
    ) -> Self {
        let persisted_status = PersistedStatusLookup::new(Arc::clone(&job_repository));
        Self {
            job_repository,
            map_store,
            source_resolver,
            engine,
            status_table,
            persisted_status,
            sync_enabled,
        }
    }

    pub fn status_table(&self) -> &Arc<JobStatusTable> {
        &self.status_table
    }

    /// Registers a new map build and starts a full extraction in the background.
    ///
    /// The existence check and the record insert are not atomic: two concurrent
    /// requests for the same name can both pass the check.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, name: &str, bbox: &str) -> Result<JobAccepted, MapJobError> {
        let file_name = MapFileName::parse(name).map_err(MapJobError::InvalidRequest)?;
        if bbox.is_empty() {
            return Err(MapJobError::InvalidRequest(
                "Missing bbox parameter".to_string(),
            ));
        }

        if self.map_store.exists(&file_name).await? {
            return Err(MapJobError::Conflict("File already exists".to_string()));
        }

        let job = MapJob::new(file_name.as_str().to_string(), bbox.to_string());
        self.job_repository.create(&job).await?;
        self.status_table.start(job.id);

        let worker = self.launch(&job, &file_name, ExtractionMode::Full);

        tracing::info!(job_id = %job.id, name = %job.name, "Map extraction job started");

        Ok(JobAccepted {
            id: job.id,
            status: JobStatus::Pending,
            worker,
        })
    }

    /// Resolves a job's status, preferring this process's live view over the record.
    pub async fn status(&self, id: JobId) -> Result<JobStatusView, MapJobError> {
        if let Some(view) = self.status_table.lookup(id).await? {
            return Ok(view);
        }
        self.persisted_status
            .lookup(id)
            .await?
            .ok_or_else(|| MapJobError::NotFound("Extraction not found".to_string()))
    }

    /// Runs a finished job again. Failed jobs are re-extracted from scratch; completed
    /// jobs are synced in place when sync mode is enabled.
    #[tracing::instrument(skip(self), fields(job_id = %id))]
    pub async fn recreate(&self, id: JobId) -> Result<JobAccepted, MapJobError> {
        let job = self
            .job_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| MapJobError::NotFound("Extraction not found".to_string()))?;

        if !job.status.is_terminal() {
            return Err(MapJobError::InvalidState(
                "Extraction is not in a failed or completed state".to_string(),
            ));
        }

        let file_name = MapFileName::parse(&job.name).map_err(MapJobError::InvalidRequest)?;

        let mode = match job.status {
            JobStatus::Completed if self.sync_enabled => ExtractionMode::Sync,
            _ => ExtractionMode::Full,
        };

        if mode == ExtractionMode::Full && self.map_store.remove(&file_name).await? {
            tracing::debug!(name = %file_name, "Removed previous map output");
        }

        // The record is reset before the worker starts so the worker's own
        // transitions are never overwritten with `pending`.
        self.job_repository
            .update_status(id, JobStatus::Pending, None)
            .await?;
        self.status_table.start(id);

        let worker = self.launch(&job, &file_name, mode);

        tracing::info!(previous_status = %job.status, mode = %mode, "Map extraction job restarted");

        Ok(JobAccepted {
            id,
            status: JobStatus::Pending,
            worker,
        })
    }

    /// Deletes a job record and then its output file. Any live status entry is left
    /// in the table.
    #[tracing::instrument(skip(self), fields(job_id = %id))]
    pub async fn delete(&self, id: JobId) -> Result<MapJob, MapJobError> {
        let job = self
            .job_repository
            .delete(id)
            .await?
            .ok_or_else(|| MapJobError::NotFound("Extraction not found".to_string()))?;

        self.after_delete(&job).await;
        Ok(job)
    }

    /// Every job record, newest first.
    pub async fn list_jobs(&self) -> Result<Vec<MapJob>, MapJobError> {
        Ok(self.job_repository.list().await?)
    }

    pub async fn list_maps(&self) -> Result<Vec<String>, MapJobError> {
        Ok(self.map_store.list().await?)
    }

    pub async fn map_size(&self, name: &str) -> Result<MapSize, MapJobError> {
        let file_name = MapFileName::parse(name).map_err(MapJobError::InvalidRequest)?;
        let size_bytes = self
            .map_store
            .size(&file_name)
            .await
            .map_err(not_found_as_missing_file)?;
        Ok(MapSize {
            name: file_name.as_str().to_string(),
            size_bytes,
        })
    }

    pub async fn map_info(&self, name: &str) -> Result<String, MapJobError> {
        let file_name = MapFileName::parse(name).map_err(MapJobError::InvalidRequest)?;
        if !self.map_store.exists(&file_name).await? {
            return Err(MapJobError::NotFound("File not found".to_string()));
        }
        let path = self.map_store.path_for(&file_name);
        Ok(self.engine.show(&path).await?)
    }

    /// Location of a job's finished archive.
    pub async fn output_path(&self, id: JobId) -> Result<PathBuf, MapJobError> {
        let job = self
            .job_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| MapJobError::NotFound("Extraction not found".to_string()))?;
        let file_name = MapFileName::parse(&job.name).map_err(MapJobError::InvalidRequest)?;
        if !self.map_store.exists(&file_name).await? {
            return Err(MapJobError::NotFound("File not found".to_string()));
        }
        Ok(self.map_store.path_for(&file_name))
    }

    fn launch(&self, job: &MapJob, file_name: &MapFileName, mode: ExtractionMode) -> WorkerHandle {
        let run = ExtractionRun {
            job_id: job.id,
            name: job.name.clone(),
            bbox: job.bbox.clone(),
            destination: self.map_store.path_for(file_name),
            mode,
        };
        ExtractionWorker::new(
            run,
            Arc::clone(&self.status_table),
            Arc::clone(&self.job_repository),
            Arc::clone(&self.source_resolver),
            Arc::clone(&self.engine),
        )
        .spawn()
    }

    async fn after_delete(&self, job: &MapJob) {
        let Ok(file_name) = MapFileName::parse(&job.name) else {
            return;
        };
        match self.map_store.remove(&file_name).await {
            Ok(true) => tracing::info!(name = %file_name, "Removed map output of deleted job"),
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, name = %file_name, "Failed to remove map output"),
        }
    }
}

fn not_found_as_missing_file(e: MapStoreError) -> MapJobError {
    match e {
        MapStoreError::NotFound(_) => MapJobError::NotFound("File not found".to_string()),
        other => MapJobError::Storage(other),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MapJobError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("map store: {0}")]
    Storage(#[from] MapStoreError),
    #[error("extraction engine: {0}")]
    Engine(#[from] ExtractionEngineError),
}
