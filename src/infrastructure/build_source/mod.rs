mod catalog_resolver;

pub use catalog_resolver::{
    Build, CatalogBuildSourceResolver, DEFAULT_BUILD_BASE_URL, DEFAULT_CATALOG_URL, latest_build,
};
