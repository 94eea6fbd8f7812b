use async_trait::async_trait;

/// Picks the archive a worker run should read from.
#[async_trait]
pub trait BuildSourceResolver: Send + Sync {
    async fn resolve_latest_source(&self) -> Result<String, BuildSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BuildSourceError {
    #[error("failed to fetch builds metadata: {0}")]
    Unreachable(String),
    #[error("failed to fetch builds metadata: {0}")]
    BadStatus(String),
    #[error("failed to decode builds metadata: {0}")]
    Malformed(String),
    #[error("no builds found")]
    Empty,
}
