pub mod build_source;
pub mod extraction;
pub mod observability;
pub mod persistence;
pub mod storage;
