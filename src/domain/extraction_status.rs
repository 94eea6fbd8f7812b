use std::time::Duration;

use chrono::{DateTime, Utc};

use super::JobStatus;

/// Live view of one worker run, kept only for the lifetime of this process.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionStatus {
    pub status: JobStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl ExtractionStatus {
    pub fn started() -> Self {
        Self {
            status: JobStatus::Pending,
            start_time: Utc::now(),
            end_time: None,
            error: None,
        }
    }

    /// Elapsed run time, available once the run has ended.
    pub fn duration(&self) -> Option<Duration> {
        let end = self.end_time?;
        Some((end - self.start_time).to_std().unwrap_or_default())
    }
}
