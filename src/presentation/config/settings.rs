use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File, Map};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub database: DatabaseSettings,
    pub source: SourceSettings,
    pub extraction: ExtractionSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers `appsettings.<environment>.*` (optional) under `APP_`-prefixed environment
    /// variables, e.g. `APP_SERVER__PORT=9000`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::load_with_vars(environment, None)
    }

    /// Same as [`Settings::load`], reading `APP_` variables from `vars` instead of the
    /// process environment when given.
    pub fn load_with_vars(
        environment: Environment,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .source(vars),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8090,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
    pub extension: String,
}

impl StorageSettings {
    pub fn maps_dir(&self) -> PathBuf {
        self.data_dir.join("maps")
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            extension: "pmtiles".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Postgres URL. Without one, job records live in memory only.
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Alternate build server. Empty selects the public protomaps builds.
    pub external_source: String,
    pub request_timeout_secs: u64,
}

impl SourceSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            external_source: String::new(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    pub pmtiles_bin: PathBuf,
    /// Recreating a completed job syncs the existing archive instead of re-extracting.
    pub sync_enabled: bool,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            pmtiles_bin: PathBuf::from("pmtiles"),
            sync_enabled: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub json_format: bool,
}
