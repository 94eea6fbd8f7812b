use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::application::ports::{JobStatusLookup, JobStatusView, RepositoryError};
use crate::domain::{ExtractionStatus, JobId, JobStatus};

/// In-process cache of the most recent run of each job.
///
/// Entries are never evicted. A missing entry means this process has not run the job,
/// so callers fall back to the persisted record.
#[derive(Debug, Default)]
pub struct JobStatusTable {
    entries: RwLock<HashMap<JobId, ExtractionStatus>>,
}

impl JobStatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new run for `id`, replacing whatever the previous run left behind.
    pub fn start(&self, id: JobId) {
        self.write().insert(id, ExtractionStatus::started());
    }

    /// Moves the run forward. Returns `false` for unknown ids and for transitions that
    /// would move a run backwards or out of a terminal state.
    pub fn set(&self, id: JobId, status: JobStatus) -> bool {
        let mut entries = self.write();
        match entries.get_mut(&id) {
            Some(entry) if entry.status.can_advance_to(status) => {
                entry.status = status;
                true
            }
            _ => false,
        }
    }

    /// Ends the run with a terminal status and stamps the end time.
    pub fn mark_end(&self, id: JobId, status: JobStatus, error: Option<String>) -> bool {
        let mut entries = self.write();
        match entries.get_mut(&id) {
            Some(entry) if entry.status.can_advance_to(status) => {
                entry.status = status;
                entry.end_time = Some(Utc::now());
                entry.error = error;
                true
            }
            _ => false,
        }
    }

    /// Fails the run without stamping an end time, for runs that never reached the engine.
    pub fn fail(&self, id: JobId, error: String) -> bool {
        let mut entries = self.write();
        match entries.get_mut(&id) {
            Some(entry) if entry.status.can_advance_to(JobStatus::Failed) => {
                entry.status = JobStatus::Failed;
                entry.error = Some(error);
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: JobId) -> Option<ExtractionStatus> {
        self.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Entries are replaced whole, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<JobId, ExtractionStatus>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<JobId, ExtractionStatus>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl JobStatusLookup for JobStatusTable {
    async fn lookup(&self, id: JobId) -> Result<Option<JobStatusView>, RepositoryError> {
        Ok(self.get(id).map(|entry| JobStatusView {
            id,
            status: entry.status,
            error: if entry.status == JobStatus::Failed {
                entry.error.clone()
            } else {
                None
            },
            duration: entry.duration(),
            name: None,
        }))
    }
}
