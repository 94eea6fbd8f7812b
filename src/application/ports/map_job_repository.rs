use async_trait::async_trait;

use crate::domain::{JobId, JobStatus, MapJob};

use super::RepositoryError;

/// Durable store of map build records.
#[async_trait]
pub trait MapJobRepository: Send + Sync {
    async fn create(&self, job: &MapJob) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: JobId) -> Result<Option<MapJob>, RepositoryError>;

    /// Sets the status and replaces the error; `None` clears a previous error.
    async fn update_status(
        &self,
        id: JobId,
        status: JobStatus,
        error: Option<&str>,
    ) -> Result<(), RepositoryError>;

    /// Removes the record and returns it, or `None` when nothing was stored under `id`.
    async fn delete(&self, id: JobId) -> Result<Option<MapJob>, RepositoryError>;

    /// All records, newest first.
    async fn list(&self) -> Result<Vec<MapJob>, RepositoryError>;
}
