mod pg_pool;
mod repositories;

pub use pg_pool::connect_and_migrate;
pub use repositories::{InMemoryMapJobRepository, PgMapJobRepository};
