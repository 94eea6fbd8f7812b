use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::application::ports::{
    BuildSourceError, BuildSourceResolver, ExtractionEngine, ExtractionEngineError,
    MapJobRepository,
};
use crate::application::services::JobStatusTable;
use crate::domain::{ExtractionMode, JobId, JobStatus};

/// Everything one worker run needs to know about its job.
#[derive(Debug, Clone)]
pub struct ExtractionRun {
    pub job_id: JobId,
    pub name: String,
    pub bbox: String,
    pub destination: PathBuf,
    pub mode: ExtractionMode,
}

/// Performs a single extraction or sync run and records its progress.
pub struct ExtractionWorker {
    run: ExtractionRun,
    status_table: Arc<JobStatusTable>,
    job_repository: Arc<dyn MapJobRepository>,
    source_resolver: Arc<dyn BuildSourceResolver>,
    engine: Arc<dyn ExtractionEngine>,
}

/// Handle to a spawned worker run. Dropping it detaches the run.
#[derive(Debug)]
pub struct WorkerHandle(JoinHandle<()>);

impl WorkerHandle {
    /// Waits for the run to reach a terminal state.
    pub async fn wait(self) {
        if let Err(e) = self.0.await {
            tracing::error!(error = %e, "Extraction worker task aborted");
        }
    }
}

impl ExtractionWorker {
    pub fn new(
        run: ExtractionRun,
        status_table: Arc<JobStatusTable>,
        job_repository: Arc<dyn MapJobRepository>,
        source_resolver: Arc<dyn BuildSourceResolver>,
        engine: Arc<dyn ExtractionEngine>,
    ) -> Self {
        Self {
            run,
            status_table,
            job_repository,
            source_resolver,
            engine,
        }
    }

    pub fn spawn(self) -> WorkerHandle {
        let span = tracing::info_span!(
            "extraction_job",
            job_id = %self.run.job_id,
            name = %self.run.name,
            mode = %self.run.mode,
        );
        WorkerHandle(tokio::spawn(self.run().instrument(span)))
    }

    pub async fn run(self) {
        tracing::info!("Extraction worker started");
        match self.process_job().await {
            Ok(()) => tracing::info!("Extraction completed"),
            Err(e) => tracing::error!(error = %e, "Extraction job failed"),
        }
    }

    async fn process_job(&self) -> Result<(), ExtractionWorkerError> {
        let job_id = self.run.job_id;

        self.status_table.set(job_id, JobStatus::Processing);
        self.persist_status(JobStatus::Processing, None).await;

        let source = match self.source_resolver.resolve_latest_source().await {
            Ok(source) => source,
            Err(e) => {
                let error_msg = e.to_string();
                self.status_table.fail(job_id, error_msg.clone());
                self.persist_status(JobStatus::Failed, Some(&error_msg))
                    .await;
                return Err(ExtractionWorkerError::Resolver(e));
            }
        };
        tracing::debug!(source = %source, "Resolved latest build");

        let result = match self.run.mode {
            ExtractionMode::Full => {
                self.engine
                    .extract(&source, &self.run.bbox, &self.run.destination)
                    .await
            }
            ExtractionMode::Sync => self.engine.sync(&self.run.destination, &source).await,
        };

        match result {
            Ok(()) => {
                self.status_table
                    .mark_end(job_id, JobStatus::Completed, None);
                self.persist_status(JobStatus::Completed, None).await;
                Ok(())
            }
            Err(e) => {
                let error_msg = e.to_string();
                self.status_table
                    .mark_end(job_id, JobStatus::Failed, Some(error_msg.clone()));
                self.persist_status(JobStatus::Failed, Some(&error_msg))
                    .await;
                Err(ExtractionWorkerError::Engine(e))
            }
        }
    }

    // The live table stays authoritative for this process when the record store is
    // unavailable, so write failures are only logged.
    async fn persist_status(&self, status: JobStatus, error: Option<&str>) {
        tracing::debug!(status = %status, "Job status transition");
        if let Err(e) = self
            .job_repository
            .update_status(self.run.job_id, status, error)
            .await
        {
            tracing::warn!(error = %e, status = %status, "Failed to persist job status");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionWorkerError {
    #[error("source resolution: {0}")]
    Resolver(BuildSourceError),
    #[error("extraction engine: {0}")]
    Engine(ExtractionEngineError),
}
