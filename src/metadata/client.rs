use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;

use super::models::{ContainerStatsMap, TaskMetadata};
use super::{Error, Result};

const TASK_PATH: &str = "task";
const TASK_STATS_PATH: &str = "task/stats";

/// Thin HTTP client for the task metadata endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: Url,
}

impl Client {
    /// Creates a client for the metadata endpoint rooted at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if `endpoint` is not an absolute `http(s)` URL,
    /// or [`Error::ClientBuild`] if the underlying HTTP client cannot be created.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = parse_endpoint(endpoint)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the task metadata document.
    pub async fn task_metadata(&self) -> Result<TaskMetadata> {
        self.request(TASK_PATH).await
    }

    /// Fetches the per-container stats of the task.
    pub async fn task_stats(&self) -> Result<ContainerStatsMap> {
        self.request(TASK_STATS_PATH).await
    }

    async fn request<T: DeserializeOwned>(&self, path: &'static str) -> Result<T> {
        let url = self
            .endpoint
            .join(path)
            .map_err(|err| Error::InvalidEndpoint {
                endpoint: self.endpoint.to_string(),
                reason: err.to_string(),
            })?;

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| Error::Request { path, source })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { path, status });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|source| Error::Request { path, source })?;
        log::debug!(target: "metadata", "{path}: {}", String::from_utf8_lossy(&body));

        serde_json::from_slice(&body).map_err(|source| Error::Decode { path, source })
    }
}

/// Parses the endpoint base URL, making sure relative joins append to it.
fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let invalid = |reason: &str| Error::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        reason: reason.to_owned(),
    };

    let mut url = Url::parse(endpoint).map_err(|err| invalid(&err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
