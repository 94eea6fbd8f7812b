mod create_job;
mod delete_job;
mod error;
mod health;
mod job_output;
mod job_status;
mod list_jobs;
mod maps;
mod recreate_job;

pub use create_job::{CreateJobRequest, JobAcceptedResponse, create_job_handler};
pub use delete_job::delete_job_handler;
pub use error::{ErrorResponse, error_response, map_job_error_response};
pub use health::health_handler;
pub use job_output::job_output_handler;
pub use job_status::{JobStatusResponse, job_status_handler};
pub use list_jobs::{JobRecordResponse, list_jobs_handler};
pub use maps::{MapSizeResponse, list_maps_handler, map_info_handler, map_size_handler};
pub use recreate_job::recreate_job_handler;
