use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{BuildSourceError, BuildSourceResolver};

pub const DEFAULT_CATALOG_URL: &str = "https://build-metadata.protomaps.dev/builds.json";
pub const DEFAULT_BUILD_BASE_URL: &str = "https://build.protomaps.com";

/// One entry of the published builds catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct Build {
    pub key: String,
    #[serde(default)]
    pub size: i64,
    pub uploaded: DateTime<Utc>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub md5sum: Option<String>,
    #[serde(default)]
    pub b3sum: Option<String>,
}

/// Resolves the newest daily build from a builds catalog served over HTTP.
pub struct CatalogBuildSourceResolver {
    client: Client,
    catalog_url: String,
    build_base_url: String,
}

impl CatalogBuildSourceResolver {
    pub fn new(
        catalog_url: impl Into<String>,
        build_base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BuildSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BuildSourceError::Unreachable(e.to_string()))?;
        Ok(Self {
            client,
            catalog_url: catalog_url.into(),
            build_base_url: build_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Points the resolver at an alternate source server, or the public protomaps
    /// catalog when `external_source` is empty.
    pub fn for_source(external_source: &str, timeout: Duration) -> Result<Self, BuildSourceError> {
        let external_source = external_source.trim_end_matches('/');
        if external_source.is_empty() {
            Self::new(DEFAULT_CATALOG_URL, DEFAULT_BUILD_BASE_URL, timeout)
        } else {
            Self::new(
                format!("{}/builds.json", external_source),
                external_source,
                timeout,
            )
        }
    }

    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    async fn fetch_builds(&self) -> Result<Vec<Build>, BuildSourceError> {
        let response = self
            .client
            .get(&self.catalog_url)
            .send()
            .await
            .map_err(|e| BuildSourceError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BuildSourceError::BadStatus(response.status().to_string()));
        }

        response
            .json::<Vec<Build>>()
            .await
            .map_err(|e| BuildSourceError::Malformed(e.to_string()))
    }
}

/// The most recently uploaded build, if any.
pub fn latest_build(builds: &[Build]) -> Option<&Build> {
    builds.iter().max_by_key(|b| b.uploaded)
}

#[async_trait]
impl BuildSourceResolver for CatalogBuildSourceResolver {
    #[tracing::instrument(skip(self), fields(catalog_url = %self.catalog_url))]
    async fn resolve_latest_source(&self) -> Result<String, BuildSourceError> {
        let builds = self.fetch_builds().await?;
        let latest = latest_build(&builds).ok_or(BuildSourceError::Empty)?;
        let url = format!("{}/{}", self.build_base_url, latest.key);
        tracing::info!(url = %url, version = %latest.version, "Latest build URL");
        Ok(url)
    }
}
