#![allow(dead_code, unused_imports)]

mod fakes;
mod test_postgres;

pub use fakes::{EngineCall, FailingStatusRepository, FakeEngine, FakeResolver};
pub use test_postgres::TestPostgres;

use std::sync::Arc;

use mapsmith::application::ports::{MapJobRepository, MapStore};
use mapsmith::application::services::{JobStatusTable, MapJobService};
use mapsmith::domain::MapFileName;
use mapsmith::infrastructure::persistence::InMemoryMapJobRepository;
use mapsmith::infrastructure::storage::LocalMapStore;

pub struct TestHarness {
    pub service: Arc<MapJobService>,
    pub repository: Arc<dyn MapJobRepository>,
    pub store: Arc<LocalMapStore>,
    pub engine: Arc<FakeEngine>,
    pub status_table: Arc<JobStatusTable>,
    pub dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn new(resolver: FakeResolver, engine: FakeEngine, sync_enabled: bool) -> Self {
        Self::with_repository(
            resolver,
            engine,
            sync_enabled,
            Arc::new(InMemoryMapJobRepository::new()),
        )
    }

    pub fn with_repository(
        resolver: FakeResolver,
        engine: FakeEngine,
        sync_enabled: bool,
        repository: Arc<dyn MapJobRepository>,
    ) -> Self {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Arc::new(LocalMapStore::new(dir.path().join("maps"), "pmtiles").unwrap());
        let engine = Arc::new(engine);
        let status_table = Arc::new(JobStatusTable::new());
        let service = Arc::new(MapJobService::new(
            Arc::clone(&repository),
            store.clone(),
            Arc::new(resolver),
            engine.clone(),
            Arc::clone(&status_table),
            sync_enabled,
        ));
        Self {
            service,
            repository,
            store,
            engine,
            status_table,
            dir,
        }
    }

    pub fn output_exists(&self, name: &str) -> bool {
        let name = MapFileName::parse(name).unwrap();
        self.store.path_for(&name).exists()
    }

    pub fn write_output(&self, name: &str, contents: &[u8]) {
        let name = MapFileName::parse(name).unwrap();
        std::fs::write(self.store.path_for(&name), contents).unwrap();
    }
}
