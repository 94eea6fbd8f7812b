use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{ExtractionEngine, ExtractionEngineError};

const DOWNLOAD_THREADS: u32 = 4;
const OVERFETCH: f32 = 0.05;

/// Drives the `pmtiles` command line tool.
pub struct PmtilesCliEngine {
    binary: PathBuf,
}

impl PmtilesCliEngine {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn run(&self, args: Vec<OsString>) -> Result<String, ExtractionEngineError> {
        tracing::debug!(binary = %self.binary.display(), ?args, "Running pmtiles");

        let output = Command::new(&self.binary)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ExtractionEngineError::Launch(format!("{}: {}", self.binary.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("pmtiles exited with {}", output.status)
            } else {
                stderr
            };
            return Err(ExtractionEngineError::Failed(message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl ExtractionEngine for PmtilesCliEngine {
    async fn extract(
        &self,
        source: &str,
        bbox: &str,
        destination: &Path,
    ) -> Result<(), ExtractionEngineError> {
        self.run(vec![
            "extract".into(),
            source.into(),
            destination.into(),
            format!("--bbox={}", bbox).into(),
            format!("--download-threads={}", DOWNLOAD_THREADS).into(),
            format!("--overfetch={}", OVERFETCH).into(),
        ])
        .await
        .map(|_| ())
    }

    async fn sync(&self, destination: &Path, source: &str) -> Result<(), ExtractionEngineError> {
        self.run(vec!["sync".into(), destination.into(), source.into()])
            .await
            .map(|_| ())
    }

    async fn show(&self, path: &Path) -> Result<String, ExtractionEngineError> {
        self.run(vec!["show".into(), path.into(), "--header-json".into()])
            .await
    }
}
