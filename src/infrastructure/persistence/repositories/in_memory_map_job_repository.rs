use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::{MapJobRepository, RepositoryError};
use crate::domain::{JobId, JobStatus, MapJob};

/// Record store kept in process memory. Used when no database is configured.
#[derive(Default)]
pub struct InMemoryMapJobRepository {
    jobs: RwLock<HashMap<JobId, MapJob>>,
}

impl InMemoryMapJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MapJobRepository for InMemoryMapJobRepository {
    async fn create(&self, job: &MapJob) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.id) {
            return Err(RepositoryError::QueryFailed(format!(
                "duplicate job id: {}",
                job.id
            )));
        }
        jobs.insert(job.id, job.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<MapJob>, RepositoryError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: JobId,
        status: JobStatus,
        error: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        job.status = status;
        job.error = error.map(str::to_string);
        job.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: JobId) -> Result<Option<MapJob>, RepositoryError> {
        Ok(self.jobs.write().await.remove(&id))
    }

    async fn list(&self) -> Result<Vec<MapJob>, RepositoryError> {
        let mut jobs: Vec<MapJob> = self.jobs.read().await.values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }
}
