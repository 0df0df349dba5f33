//! Fixture configuration
//!
//! Credentials and endpoint of the monitoring platform plus the polling
//! parameters used by `wait_for_*` helpers.

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use watchpost_client::MonitoringClient;
use watchpost_core::dto::logs::DEFAULT_LOG_INDEX;

use crate::poller::RetrySchedule;

/// Fixture configuration
#[derive(Clone)]
pub struct Config {
    /// Platform site (e.g. "datadoghq.com")
    pub site: String,

    pub api_key: String,

    pub app_key: String,

    /// Explicit API base URL; derived from `site` when unset
    pub api_url: Option<String>,

    /// Index searched by log lookups
    pub log_index: String,

    /// Maximum number of lookups per poll
    pub poll_tries: u32,

    /// Fixed wait between two lookups of a poll
    pub poll_delay: Duration,

    /// Per-request HTTP timeout
    pub http_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(
        site: impl Into<String>,
        api_key: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            api_key: api_key.into(),
            app_key: app_key.into(),
            api_url: None,
            log_index: DEFAULT_LOG_INDEX.to_string(),
            poll_tries: RetrySchedule::DEFAULT_MAX_ATTEMPTS,
            poll_delay: RetrySchedule::DEFAULT_DELAY,
            http_timeout: Duration::from_secs(30),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - DD_SITE (required)
    /// - DD_API_KEY (required)
    /// - DD_APP_KEY (required)
    /// - DD_API_URL (optional, overrides `https://api.<DD_SITE>`)
    /// - WATCHPOST_LOG_INDEX (optional, default: main)
    /// - WATCHPOST_POLL_TRIES (optional, default: 30)
    /// - WATCHPOST_POLL_DELAY (optional, seconds, default: 10)
    /// - WATCHPOST_HTTP_TIMEOUT (optional, seconds, default: 30)
    ///
    /// Numeric variables that are set but do not parse are an error.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| anyhow::anyhow!("{} environment variable not set", key))
        };

        let mut config = Self::new(
            required("DD_SITE")?,
            required("DD_API_KEY")?,
            required("DD_APP_KEY")?,
        );

        config.api_url = lookup("DD_API_URL").filter(|url| !url.is_empty());

        if let Some(index) = lookup("WATCHPOST_LOG_INDEX") {
            config.log_index = index;
        }

        if let Some(tries) = parse_var::<u32, _>(&lookup, "WATCHPOST_POLL_TRIES")? {
            config.poll_tries = tries;
        }

        if let Some(delay) = parse_var::<u64, _>(&lookup, "WATCHPOST_POLL_DELAY")? {
            config.poll_delay = Duration::from_secs(delay);
        }

        if let Some(timeout) = parse_var::<u64, _>(&lookup, "WATCHPOST_HTTP_TIMEOUT")? {
            config.http_timeout = Duration::from_secs(timeout);
        }

        Ok(config)
    }

    /// Overrides the API base URL (e.g. to target a mock server)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| MonitoringClient::site_url(&self.site))
    }

    /// Poll schedule built from `poll_tries` and `poll_delay`
    pub fn poll_schedule(&self) -> crate::Result<RetrySchedule> {
        RetrySchedule::new(self.poll_tries, self.poll_delay)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.site.is_empty() && self.api_url.is_none() {
            anyhow::bail!("site cannot be empty");
        }

        if self.api_key.is_empty() {
            anyhow::bail!("api_key cannot be empty");
        }

        if self.app_key.is_empty() {
            anyhow::bail!("app_key cannot be empty");
        }

        let base_url = self.base_url();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("api url must start with http:// or https://");
        }

        if self.log_index.is_empty() {
            anyhow::bail!("log_index cannot be empty");
        }

        if self.poll_tries == 0 {
            anyhow::bail!("poll_tries must be greater than 0");
        }

        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .with_context(|| format!("{} must be a non-negative integer, got {:?}", key, value))
        })
        .transpose()
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("site", &self.site)
            .field("api_url", &self.api_url)
            .field("log_index", &self.log_index)
            .field("poll_tries", &self.poll_tries)
            .field("poll_delay", &self.poll_delay)
            .field("http_timeout", &self.http_timeout)
            .finish_non_exhaustive()
    }
}
