use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{JobId, JobStatus};

use super::RepositoryError;

/// What a status query reports about a job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobStatusView {
    pub id: JobId,
    pub status: JobStatus,
    pub error: Option<String>,
    pub duration: Option<Duration>,
    pub name: Option<String>,
}

/// One tier of status resolution. `Ok(None)` means this tier does not know the job.
#[async_trait]
pub trait JobStatusLookup: Send + Sync {
    async fn lookup(&self, id: JobId) -> Result<Option<JobStatusView>, RepositoryError>;
}
