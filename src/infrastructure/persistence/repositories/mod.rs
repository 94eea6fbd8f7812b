mod in_memory_map_job_repository;
mod pg_map_job_repository;

pub use in_memory_map_job_repository::InMemoryMapJobRepository;
pub use pg_map_job_repository::PgMapJobRepository;
