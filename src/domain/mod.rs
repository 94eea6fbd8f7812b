mod extraction_mode;
mod extraction_status;
mod job_id;
mod job_status;
mod map_file_name;
mod map_job;

pub use extraction_mode::ExtractionMode;
pub use extraction_status::ExtractionStatus;
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use map_file_name::MapFileName;
pub use map_job::MapJob;
