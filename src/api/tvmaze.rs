/// TVMaze API client implementation.
use super::tvmaze_types::{RawEpisode, RawSearchResult};
use super::{ApiError, ShowApi, ShowId};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Public TVMaze API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`TvMazeClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are appended to
    pub base_url: String,
    /// Upper bound for a single request, connect through body
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Show metadata client for the TVMaze API.
///
/// Uses the `/search/shows` and `/shows/{id}/episodes` endpoints. Every
/// call is a single blocking GET; there is no caching and no retry.
pub struct TvMazeClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl TvMazeClient {
    /// Creates a client for the public TVMaze API.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with explicit connection settings.
    pub fn with_config(config: ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET request and decodes the JSON body.
    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "sending request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response
            .text()
            .map_err(|e| ApiError::Request(e.to_string()))?;
        debug!(%url, bytes = body.len(), "received response");

        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl ShowApi for TvMazeClient {
    fn search_shows(&self, term: &str) -> Result<Vec<RawSearchResult>, ApiError> {
        self.get_json("/search/shows", &[("q", term)])
    }

    fn episodes_of_show(&self, id: ShowId) -> Result<Vec<RawEpisode>, ApiError> {
        self.get_json(&format!("/shows/{}/episodes", id), &[])
    }
}
