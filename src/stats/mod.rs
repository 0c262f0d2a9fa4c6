use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to build http client: {source}")]
    ClientBuild { source: reqwest::Error },
    #[error("could not set up proxy '{proxy}': {source}")]
    InvalidProxy {
        proxy: String,
        source: reqwest::Error,
    },
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("{url} returned status {status}")]
    BadStatus { url: String, status: u16 },
    #[error("failed to decode response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },
}

/// Optional query parameters shared by every stats endpoint. Unset
/// fields are omitted from the request entirely.
#[derive(Clone, Debug, Default)]
pub struct StatsQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub block: Option<i32>,
    pub site_code: Option<String>,
    pub taxa: Option<String>,
    pub common_name: Option<String>,
}

impl StatsQuery {
    fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(from) = self.from.as_deref() {
            pairs.push(("from", from.to_string()));
        }
        if let Some(to) = self.to.as_deref() {
            pairs.push(("to", to.to_string()));
        }
        if let Some(block) = self.block {
            pairs.push(("block", block.to_string()));
        }
        if let Some(site_code) = self.site_code.as_deref() {
            pairs.push(("siteCode", site_code.to_string()));
        }
        if let Some(taxa) = self.taxa.as_deref() {
            pairs.push(("taxa", taxa.to_string()));
        }
        if let Some(common_name) = self.common_name.as_deref() {
            pairs.push(("commonName", common_name.to_string()));
        }
        pairs
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationStats {
    pub observation_count: i64,
    pub species_count: i64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    #[serde(flatten)]
    pub stats: ObservationStats,
    pub native_species_count: i64,
    #[serde(default)]
    pub count_by_taxa: HashMap<String, String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeseriesPoint {
    #[serde(flatten)]
    pub stats: ObservationStats,
    pub timestamp: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TimeseriesResponse {
    #[serde(default)]
    pub series: HashMap<String, Vec<TimeseriesPoint>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockStats {
    pub block: i32,
    #[serde(flatten)]
    pub stats: ObservationStats,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BlocksResponse {
    #[serde(default)]
    pub blocks: Vec<BlockStats>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SiteStats {
    pub site_code: String,
    #[serde(flatten)]
    pub stats: ObservationStats,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SitesResponse {
    #[serde(default)]
    pub sites: Vec<SiteStats>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub stats: ObservationStats,
    pub native_species_count: i64,
    pub sites_count: i64,
}

#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout_seconds: usize,
    pub proxy: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_seconds: 10,
            proxy: None,
        }
    }
}

/// Typed client for the monitoring stats API.
pub struct StatsClient {
    http: reqwest::Client,
    base_url: String,
}

impl StatsClient {
    pub fn new(options: ClientOptions) -> Result<Self, StatsError> {
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(
            options.timeout_seconds.try_into().unwrap_or(10),
        ));
        if let Some(proxy_url) = options.proxy.as_deref() {
            let proxy =
                reqwest::Proxy::all(proxy_url).map_err(|e| StatsError::InvalidProxy {
                    proxy: proxy_url.to_string(),
                    source: e,
                })?;
            builder = builder.proxy(proxy);
        }
        let http = builder
            .build()
            .map_err(|e| StatsError::ClientBuild { source: e })?;
        let base_url = options.base_url.trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub async fn observations_overview(
        &self,
        query: &StatsQuery,
    ) -> Result<OverviewResponse, StatsError> {
        self.get_json("/stats/observations", query).await
    }

    pub async fn observations_timeseries(
        &self,
        query: &StatsQuery,
    ) -> Result<TimeseriesResponse, StatsError> {
        self.get_json("/stats/observations/timeseries", query).await
    }

    pub async fn observations_blocks(
        &self,
        query: &StatsQuery,
    ) -> Result<BlocksResponse, StatsError> {
        self.get_json("/stats/observations/blocks", query).await
    }

    pub async fn observations_sites(
        &self,
        query: &StatsQuery,
    ) -> Result<SitesResponse, StatsError> {
        self.get_json("/stats/observations/sites", query).await
    }

    pub async fn dashboard_stats(
        &self,
        query: &StatsQuery,
    ) -> Result<DashboardResponse, StatsError> {
        self.get_json("/stats/dashboard", query).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &StatsQuery,
    ) -> Result<T, StatsError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(&query.to_query_pairs())
            .send()
            .await
            .map_err(|e| StatsError::Request {
                url: url.clone(),
                source: e,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::BadStatus {
                url,
                status: status.as_u16(),
            });
        }
        response.json::<T>().await.map_err(|e| StatsError::Decode {
            url,
            source: e,
        })
    }
}
