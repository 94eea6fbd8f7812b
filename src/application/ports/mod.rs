mod build_source;
mod extraction_engine;
mod job_status_lookup;
mod map_job_repository;
mod map_store;
mod repository_error;

pub use build_source::{BuildSourceError, BuildSourceResolver};
pub use extraction_engine::{ExtractionEngine, ExtractionEngineError};
pub use job_status_lookup::{JobStatusLookup, JobStatusView};
pub use map_job_repository::MapJobRepository;
pub use map_store::{MapStore, MapStoreError};
pub use repository_error::RepositoryError;
