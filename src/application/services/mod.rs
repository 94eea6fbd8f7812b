mod extraction_worker;
mod job_status_table;
mod map_job_service;
mod persisted_status_lookup;

pub use extraction_worker::{ExtractionRun, ExtractionWorker, ExtractionWorkerError, WorkerHandle};
pub use job_status_table::JobStatusTable;
pub use map_job_service::{JobAccepted, MapJobError, MapJobService, MapSize};
pub use persisted_status_lookup::PersistedStatusLookup;
