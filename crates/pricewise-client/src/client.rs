//! HTTP client for the price-comparison backend.
//!
//! Wraps `reqwest` with the backend's two endpoints. The search endpoint
//! reports application failures inside a JSON envelope on any HTTP status, so
//! [`SearchClient::search`] parses the body before looking at the status.

use std::time::Duration;

use pricewise_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::SearchError;
use crate::types::{HealthStatus, SearchRequest, SearchResponse};

const SEARCH_PATH: &str = "api/search";
const HEALTH_PATH: &str = "api/health";

/// Client for the price-comparison backend.
///
/// Use [`SearchClient::new`] with loaded configuration or
/// [`SearchClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    base_url: Url,
    display_base: String,
}

impl SearchClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::InvalidBaseUrl`] if the
    /// configured API URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, SearchError> {
        Self::with_base_url(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// `timeout_secs = None` leaves reqwest's default, which never times out a
    /// request; the backend drives a browser per search and can be slow.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
    ) -> Result<Self, SearchError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        // Exactly one trailing slash so `Url::join` appends to the base path
        // instead of replacing its last segment.
        let display_base = base_url.trim_end_matches('/').to_owned();
        let base_url =
            Url::parse(&format!("{display_base}/")).map_err(|e| SearchError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            display_base,
        })
    }

    /// The backend address as configured, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.display_base
    }

    /// Sends `query` to `POST /api/search` and returns the parsed envelope.
    ///
    /// The envelope is returned whatever the HTTP status, as long as the body
    /// is JSON: a `400` or `500` carries `success: false` and an `error`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] on network failure.
    /// - [`SearchError::Deserialize`] if the body is not the expected JSON.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let url = self.endpoint(SEARCH_PATH)?;
        tracing::debug!(%url, query, "sending search request");

        let response = self
            .client
            .post(url.clone())
            .json(&SearchRequest { query })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed = serde_json::from_str::<SearchResponse>(&body).map_err(|e| {
            SearchError::Deserialize {
                context: format!("search response from {url} (HTTP {})", status.as_u16()),
                source: e,
            }
        })?;

        tracing::debug!(
            status = status.as_u16(),
            success = parsed.success,
            products = parsed.products.len(),
            "search response received"
        );
        Ok(parsed)
    }

    /// Checks `GET /api/health`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] on network failure.
    /// - [`SearchError::UnexpectedStatus`] on a non-2xx status.
    /// - [`SearchError::Deserialize`] if the body is not the expected JSON.
    pub async fn health(&self) -> Result<HealthStatus, SearchError> {
        let url = self.endpoint(HEALTH_PATH)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SearchError> {
        self.base_url
            .join(path)
            .map_err(|e| SearchError::InvalidBaseUrl {
                base_url: self.display_base.clone(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
