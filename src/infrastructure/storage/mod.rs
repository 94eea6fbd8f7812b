mod local_map_store;

pub use local_map_store::{DEFAULT_EXTENSION, LocalMapStore};
