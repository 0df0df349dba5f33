//! Watchpost HTTP Client
//!
//! A small, type-safe HTTP client for the security-monitoring platform's
//! public API: log search, signal search, detection and agent rule
//! management, and agent policy download.
//!
//! Every request carries the API and application keys as headers.
//!
//! # Example
//!
//! ```no_run
//! use watchpost_client::{Credentials, MonitoringClient};
//! use watchpost_core::dto::logs::LogsListRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = MonitoringClient::new(
//!         "https://api.datadoghq.com",
//!         Credentials::new("api-key", "app-key"),
//!     );
//!
//!     let logs = client
//!         .list_logs(&LogsListRequest::recent("service:system-probe", "main"))
//!         .await?;
//!
//!     println!("Found {} log event(s)", logs.data.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod logs;
mod policies;
mod rules;
mod signals;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

/// Header carrying the organization API key
pub const API_KEY_HEADER: &str = "DD-API-KEY";
/// Header carrying the application key
pub const APP_KEY_HEADER: &str = "DD-APPLICATION-KEY";

/// API and application keys sent with every request
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    app_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            app_key: app_key.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("app_key", &"<redacted>")
            .finish()
    }
}

/// HTTP client for the monitoring platform API
///
/// Methods are organized into logical groups:
/// - Log and signal search
/// - Detection (signal) rule and agent rule management
/// - Policy bundle download
///
/// The underlying connection pool is released when the client is dropped.
#[derive(Debug, Clone)]
pub struct MonitoringClient {
    /// Base URL of the API (e.g., "https://api.datadoghq.com")
    base_url: String,
    credentials: Credentials,
    /// HTTP client instance
    client: Client,
}

impl MonitoringClient {
    /// Create a new monitoring client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "https://api.datadoghq.com")
    /// * `credentials` - API and application keys
    ///
    /// # Example
    /// ```
    /// use watchpost_client::{Credentials, MonitoringClient};
    ///
    /// let client = MonitoringClient::new("https://api.datadoghq.com", Credentials::new("a", "b"));
    /// ```
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self::with_client(base_url, credentials, Client::new())
    }

    /// Create a new monitoring client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use watchpost_client::{Credentials, MonitoringClient};
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = MonitoringClient::with_client(
    ///     "https://api.datadoghq.com",
    ///     Credentials::new("a", "b"),
    ///     http_client,
    /// );
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        credentials: Credentials,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            client,
        }
    }

    /// Base URL for a platform site (e.g. "datadoghq.eu" -> "https://api.datadoghq.eu")
    pub fn site_url(site: &str) -> String {
        format!("https://api.{}", site.trim_matches('/'))
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start an authenticated request against `path`
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .header(APP_KEY_HEADER, &self.credentials.app_key)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Turn a non-success status into a `ClientError`, consuming the body as the message
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(error_text));
        }
        Err(ClientError::api_error(status.as_u16(), error_text))
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = MonitoringClient::new("https://api.datadoghq.com", Credentials::new("a", "b"));
        assert_eq!(client.base_url(), "https://api.datadoghq.com");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client =
            MonitoringClient::new("https://api.datadoghq.com/", Credentials::new("a", "b"));
        assert_eq!(client.base_url(), "https://api.datadoghq.com");
    }

    #[test]
    fn test_site_url() {
        assert_eq!(MonitoringClient::site_url("datadoghq.eu"), "https://api.datadoghq.eu");
        assert_eq!(
            MonitoringClient::site_url("us5.datadoghq.com/"),
            "https://api.us5.datadoghq.com"
        );
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let rendered = format!("{:?}", Credentials::new("secret-api", "secret-app"));
        assert!(!rendered.contains("secret-api"));
        assert!(!rendered.contains("secret-app"));
    }
}
