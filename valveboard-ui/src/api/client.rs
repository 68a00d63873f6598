//! HTTP API Client
//!
//! Client for the Valveboard REST API. The base URL is injected at
//! construction so components never reach for ambient globals; the app shell
//! resolves it once from local storage or the default.

use gloo_net::http::Request;

use crate::heatmap::HeatmapPayload;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Local storage key for overriding the API base URL
const API_URL_KEY: &str = "valveboard_api_url";

/// Error from a single fetch attempt
///
/// The dashboard collapses all of these into one fixed failure message; the
/// kind only matters for the console log.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(String),
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item(API_URL_KEY) {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    normalize_base(&url)
}

/// Normalize a base URL: remove trailing slashes
fn normalize_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// API client with an injected base URL
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base(&base_url.into()),
        }
    }

    fn heatmap_url(&self) -> String {
        format!("{}/api/hourly-heatmap/", self.base_url)
    }

    /// Fetch the hourly heatmap payload
    ///
    /// One attempt, no retries. Dimension checks happen later, when the
    /// payload is turned into a render spec.
    pub async fn fetch_hourly_heatmap(&self) -> Result<HeatmapPayload, FetchError> {
        let response = Request::get(&self.heatmap_url())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slashes_trimmed() {
        assert_eq!(normalize_base("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_base("http://localhost:8000//"), "http://localhost:8000");
        assert_eq!(normalize_base("http://localhost:8000"), "http://localhost:8000");
    }

    #[test]
    fn test_heatmap_url() {
        let client = ApiClient::new("http://meters.example:9000/");
        assert_eq!(
            client.heatmap_url(),
            "http://meters.example:9000/api/hourly-heatmap/"
        );
    }

    #[test]
    fn test_default_base_builds_contract_url() {
        let client = ApiClient::new(DEFAULT_API_BASE);
        assert_eq!(
            client.heatmap_url(),
            "http://localhost:8000/api/hourly-heatmap/"
        );
    }
}
