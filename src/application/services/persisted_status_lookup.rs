use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{
    JobStatusLookup, JobStatusView, MapJobRepository, RepositoryError,
};
use crate::domain::JobId;

/// Status as last written to the durable record store.
pub struct PersistedStatusLookup {
    repository: Arc<dyn MapJobRepository>,
}

impl PersistedStatusLookup {
    pub fn new(repository: Arc<dyn MapJobRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl JobStatusLookup for PersistedStatusLookup {
    async fn lookup(&self, id: JobId) -> Result<Option<JobStatusView>, RepositoryError> {
        let job = self.repository.get_by_id(id).await?;
        Ok(job.map(|job| JobStatusView {
            id,
            status: job.status,
            error: job.error,
            duration: None,
            name: Some(job.name),
        }))
    }
}
