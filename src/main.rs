use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use mapsmith::application::ports::MapJobRepository;
use mapsmith::application::services::{JobStatusTable, MapJobService};
use mapsmith::infrastructure::build_source::CatalogBuildSourceResolver;
use mapsmith::infrastructure::extraction::PmtilesCliEngine;
use mapsmith::infrastructure::observability::{TracingConfig, init_tracing};
use mapsmith::infrastructure::persistence::{
    InMemoryMapJobRepository, PgMapJobRepository, connect_and_migrate,
};
use mapsmith::infrastructure::storage::LocalMapStore;
use mapsmith::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::new(environment.as_str(), settings.logging.json_format)
            .with_env_log_format(),
    );

    let job_repository: Arc<dyn MapJobRepository> = match &settings.database.url {
        Some(url) => {
            let pool = connect_and_migrate(url, settings.database.max_connections).await?;
            Arc::new(PgMapJobRepository::new(pool))
        }
        None => {
            tracing::warn!("No database configured, job records will not survive a restart");
            Arc::new(InMemoryMapJobRepository::new())
        }
    };

    let maps_dir = settings.storage.maps_dir();
    let map_store = Arc::new(
        LocalMapStore::new(maps_dir.clone(), settings.storage.extension.clone())
            .with_context(|| format!("Failed to create maps directory {}", maps_dir.display()))?,
    );

    let source_resolver = Arc::new(CatalogBuildSourceResolver::for_source(
        &settings.source.external_source,
        settings.source.request_timeout(),
    )?);
    tracing::info!(catalog_url = %source_resolver.catalog_url(), "Build source configured");

    let engine = Arc::new(PmtilesCliEngine::new(settings.extraction.pmtiles_bin.clone()));

    let map_job_service = Arc::new(MapJobService::new(
        job_repository,
        map_store,
        source_resolver,
        engine,
        Arc::new(JobStatusTable::new()),
        settings.extraction.sync_enabled,
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let router = create_router(AppState {
        map_job_service,
        settings,
    });

    tracing::info!(%addr, maps_dir = %maps_dir.display(), "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
