use chrono::{DateTime, Utc};

use super::{JobId, JobStatus};

/// Durable record of a map build: what was asked for and how the last run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct MapJob {
    pub id: JobId,
    pub name: String,
    pub bbox: String,
    pub status: JobStatus,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MapJob {
    pub fn new(name: String, bbox: String) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            name,
            bbox,
            status: JobStatus::Pending,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }
}
