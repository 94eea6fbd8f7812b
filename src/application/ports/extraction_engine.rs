use std::path::Path;

use async_trait::async_trait;

/// Tile extraction backend. Calls may run for minutes.
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Writes the tiles inside `bbox` from `source` into a new archive at `destination`.
    async fn extract(
        &self,
        source: &str,
        bbox: &str,
        destination: &Path,
    ) -> Result<(), ExtractionEngineError>;

    /// Updates the existing archive at `destination` from `source`.
    async fn sync(&self, destination: &Path, source: &str) -> Result<(), ExtractionEngineError>;

    /// Header of the archive at `path`, as a JSON document.
    async fn show(&self, path: &Path) -> Result<String, ExtractionEngineError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionEngineError {
    #[error("failed to launch extraction engine: {0}")]
    Launch(String),
    #[error("{0}")]
    Failed(String),
}
