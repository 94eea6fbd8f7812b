pub const DEFAULT_FILTER: &str = "info,mapsmith=debug,tower_http=debug";

/// Environment variable that switches log output to JSON when set to `json`.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool) -> Self {
        Self {
            environment: environment.into(),
            json_format,
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }

    /// Turns on JSON output when `log_format` is `json`. Never turns it off.
    pub fn with_log_format(mut self, log_format: Option<&str>) -> Self {
        if log_format.is_some_and(|v| v.eq_ignore_ascii_case("json")) {
            self.json_format = true;
        }
        self
    }

    /// Applies `LOG_FORMAT` from the process environment.
    pub fn with_env_log_format(self) -> Self {
        let log_format = std::env::var(LOG_FORMAT_ENV).ok();
        self.with_log_format(log_format.as_deref())
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(
            std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            false,
        )
        .with_env_log_format()
    }
}
