//! End-to-end fixture
//!
//! `App` is what test cases hold: it owns the API backend, creates and tears
//! down rules, waits for logs and signals, and downloads the policy bundle.

use std::path::PathBuf;

use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use watchpost_client::{Credentials, MonitoringClient};
use watchpost_core::dto::logs::{LogsListRequest, LogsListResponse, DEFAULT_LOG_INDEX};
use watchpost_core::dto::rules::{AgentRuleCreateRequest, SignalRuleCreatePayload};
use watchpost_core::dto::signals::{SignalListRequest, SignalListResponse};

use crate::config::Config;
use crate::error::{FixtureError, Result};
use crate::poller::{Poller, RetryOn, RetrySchedule};
use crate::repository::{PolicyRepository, RuleRepository, SearchRepository};

/// Prefix of downloaded policy files
pub const POLICY_FILE_PREFIX: &str = "e2e-test-";

/// Test fixture bound to one API backend
///
/// Acquire with [`App::new`] or [`App::from_env`] and release with
/// [`App::close`] during teardown.
pub struct App<B = MonitoringClient> {
    backend: B,
    log_index: String,
    poller: Poller,
}

impl App<MonitoringClient> {
    /// Builds a fixture talking to the platform described by `config`
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(watchpost_client::ClientError::from)?;
        let client = MonitoringClient::with_client(
            config.base_url(),
            Credentials::new(config.api_key.clone(), config.app_key.clone()),
            http,
        );

        info!(base_url = client.base_url(), "monitoring client initialized");

        Ok(Self::with_backend(client)
            .with_log_index(config.log_index.clone())
            .with_poller(Poller::new(config.poll_schedule()?)))
    }

    /// Builds a fixture from `DD_SITE`, `DD_API_KEY`, `DD_APP_KEY` and the
    /// optional tuning variables
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        config.validate()?;
        Ok(Self::new(&config)?)
    }
}

impl<B> App<B>
where
    B: SearchRepository + RuleRepository + PolicyRepository,
{
    /// Wraps an arbitrary backend with the default index and schedule
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            log_index: DEFAULT_LOG_INDEX.to_string(),
            poller: Poller::default(),
        }
    }

    pub fn with_log_index(mut self, index: impl Into<String>) -> Self {
        self.log_index = index.into();
        self
    }

    pub fn with_poller(mut self, poller: Poller) -> Self {
        self.poller = poller;
        self
    }

    /// Retry classification used by `wait_for_*`
    pub fn with_retry_on(mut self, retry_on: RetryOn) -> Self {
        self.poller = self.poller.with_retry_on(retry_on);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Releases the backend and its connection pool
    pub fn close(self) {
        info!("closing fixture");
        drop(self.backend);
    }

    // =============================================================================
    // Rule Lifecycle
    // =============================================================================

    /// Creates a detection rule firing on every match of agent rule
    /// `agent_rule_id`, returning its identifier
    pub async fn create_signal_rule(
        &self,
        name: &str,
        message: &str,
        agent_rule_id: &str,
        tags: &[&str],
    ) -> Result<String> {
        let payload = SignalRuleCreatePayload::for_agent_rule(
            name,
            message,
            agent_rule_id,
            tags.iter().map(|t| t.to_string()).collect(),
        );
        let id = self.backend.create_signal_rule(&payload).await?;

        info!(rule_id = %id, name, "created signal rule");
        Ok(id)
    }

    /// Creates an agent rule evaluating `expression`, returning its identifier
    pub async fn create_agent_rule(
        &self,
        name: &str,
        message: &str,
        expression: &str,
    ) -> Result<String> {
        let request = AgentRuleCreateRequest::new(name, message, expression);
        let id = self.backend.create_agent_rule(&request).await?;

        info!(rule_id = %id, name, "created agent rule");
        Ok(id)
    }

    /// Deletes a detection rule. Failures are logged, never returned.
    pub async fn delete_signal_rule(&self, rule_id: &str) {
        match self.backend.delete_signal_rule(rule_id).await {
            Ok(()) => info!(rule_id, "deleted signal rule"),
            Err(e) => warn!(rule_id, "failed to delete signal rule: {}", e),
        }
    }

    /// Deletes an agent rule. Failures are logged, never returned.
    pub async fn delete_agent_rule(&self, rule_id: &str) {
        match self.backend.delete_agent_rule(rule_id).await {
            Ok(()) => info!(rule_id, "deleted agent rule"),
            Err(e) => warn!(rule_id, "failed to delete agent rule: {}", e),
        }
    }

    // =============================================================================
    // Logs & Signals
    // =============================================================================

    /// Single search of the last 15 minutes of logs
    ///
    /// Fails with `LookupFailed` when nothing matched.
    pub async fn get_log(&self, query: &str) -> Result<LogsListResponse> {
        let request = LogsListRequest::recent(query, self.log_index.as_str());
        let response = self.backend.list_logs(&request).await?;

        if response.is_empty() {
            return Err(FixtureError::lookup_failed(query, 1));
        }
        Ok(response)
    }

    /// Single search of all signals
    ///
    /// Fails with `LookupFailed` when nothing matched.
    pub async fn get_signal(&self, query: &str) -> Result<SignalListResponse> {
        let request = SignalListRequest::all_time(query);
        let response = self.backend.search_signals(&request).await?;

        if response.is_empty() {
            return Err(FixtureError::lookup_failed(query, 1));
        }
        Ok(response)
    }

    /// Waits for a log matching `query` using the fixture's schedule
    pub async fn wait_for_log(&self, query: &str) -> Result<LogsListResponse> {
        self.poller
            .poll_until_non_empty(query, || self.get_log(query))
            .await
    }

    /// Waits for a log matching `query` with an explicit schedule
    pub async fn wait_for_log_with(
        &self,
        query: &str,
        schedule: RetrySchedule,
    ) -> Result<LogsListResponse> {
        self.poller_with(schedule)
            .poll_until_non_empty(query, || self.get_log(query))
            .await
    }

    /// Waits for a signal matching `query` using the fixture's schedule
    pub async fn wait_for_signal(&self, query: &str) -> Result<SignalListResponse> {
        self.poller
            .poll_until_non_empty(query, || self.get_signal(query))
            .await
    }

    /// Waits for a signal matching `query` with an explicit schedule
    pub async fn wait_for_signal_with(
        &self,
        query: &str,
        schedule: RetrySchedule,
    ) -> Result<SignalListResponse> {
        self.poller_with(schedule)
            .poll_until_non_empty(query, || self.get_signal(query))
            .await
    }

    fn poller_with(&self, schedule: RetrySchedule) -> Poller {
        Poller::new(schedule).with_retry_on(self.poller.retry_on())
    }

    // =============================================================================
    // Policies
    // =============================================================================

    /// Downloads the agent policy bundle into a new temp file and returns its path
    ///
    /// The file is kept on disk; the caller owns its removal.
    pub async fn download_policies(&self) -> Result<PathBuf> {
        let temp = tempfile::Builder::new()
            .prefix(POLICY_FILE_PREFIX)
            .tempfile()?;

        let mut file = tokio::fs::File::from_std(temp.reopen()?);
        let written = self.backend.download_policies(&mut file).await?;
        file.flush().await?;
        drop(file);

        let path = temp
            .into_temp_path()
            .keep()
            .map_err(|e| FixtureError::Io(e.error))?;

        info!(path = %path.display(), bytes = written, "downloaded policies");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::io::AsyncWrite;
    use watchpost_client::ClientError;

    /// Backend whose remote calls all fail
    struct FailingBackend;

    fn unavailable() -> FixtureError {
        ClientError::api_error(503, "service unavailable").into()
    }

    #[async_trait]
    impl SearchRepository for FailingBackend {
        async fn list_logs(&self, _: &LogsListRequest) -> Result<LogsListResponse> {
            Err(unavailable())
        }

        async fn search_signals(&self, _: &SignalListRequest) -> Result<SignalListResponse> {
            Err(unavailable())
        }
    }

    #[async_trait]
    impl RuleRepository for FailingBackend {
        async fn create_signal_rule(&self, _: &SignalRuleCreatePayload) -> Result<String> {
            Err(unavailable())
        }

        async fn create_agent_rule(&self, _: &AgentRuleCreateRequest) -> Result<String> {
            Err(unavailable())
        }

        async fn delete_signal_rule(&self, _: &str) -> Result<()> {
            Err(unavailable())
        }

        async fn delete_agent_rule(&self, _: &str) -> Result<()> {
            Err(unavailable())
        }
    }

    #[async_trait]
    impl PolicyRepository for FailingBackend {
        async fn download_policies(&self, _: &mut (dyn AsyncWrite + Unpin + Send)) -> Result<u64> {
            Err(unavailable())
        }
    }

    /// Backend recording requests and answering from canned pages
    #[derive(Default)]
    struct RecordingBackend {
        log_requests: Mutex<Vec<LogsListRequest>>,
        signal_requests: Mutex<Vec<SignalListRequest>>,
        log_pages: Mutex<Vec<LogsListResponse>>,
        signal_rules: Mutex<Vec<SignalRuleCreatePayload>>,
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchRepository for RecordingBackend {
        async fn list_logs(&self, request: &LogsListRequest) -> Result<LogsListResponse> {
            self.log_requests.lock().unwrap().push(request.clone());
            let mut pages = self.log_pages.lock().unwrap();
            if pages.is_empty() {
                Ok(LogsListResponse::default())
            } else {
                Ok(pages.remove(0))
            }
        }

        async fn search_signals(&self, request: &SignalListRequest) -> Result<SignalListResponse> {
            self.signal_requests.lock().unwrap().push(request.clone());
            Ok(SignalListResponse::default())
        }
    }

    #[async_trait]
    impl RuleRepository for RecordingBackend {
        async fn create_signal_rule(&self, payload: &SignalRuleCreatePayload) -> Result<String> {
            self.signal_rules.lock().unwrap().push(payload.clone());
            Ok("signal-rule-1".to_string())
        }

        async fn create_agent_rule(&self, request: &AgentRuleCreateRequest) -> Result<String> {
            Ok(format!("agent-{}", request.data.attributes.name))
        }

        async fn delete_signal_rule(&self, rule_id: &str) -> Result<()> {
            self.deleted.lock().unwrap().push(rule_id.to_string());
            Ok(())
        }

        async fn delete_agent_rule(&self, rule_id: &str) -> Result<()> {
            self.deleted.lock().unwrap().push(rule_id.to_string());
            Ok(())
        }
    }

    #[async_trait]
    impl PolicyRepository for RecordingBackend {
        async fn download_policies(
            &self,
            dest: &mut (dyn AsyncWrite + Unpin + Send),
        ) -> Result<u64> {
            let bundle = b"version: 1\nrules: []\n";
            dest.write_all(bundle).await?;
            Ok(bundle.len() as u64)
        }
    }

    fn log_page(id: &str) -> LogsListResponse {
        serde_json::from_value(json!({ "data": [{ "id": id, "attributes": {} }] })).unwrap()
    }

    #[tokio::test]
    async fn test_deletion_failures_are_swallowed() {
        let app = App::with_backend(FailingBackend);

        app.delete_signal_rule("signal-rule-1").await;
        app.delete_agent_rule("agent-rule-1").await;
    }

    #[tokio::test]
    async fn test_creation_failures_propagate() {
        let app = App::with_backend(FailingBackend);

        let err = app
            .create_agent_rule("e2e", "msg", "open.file.path == \"/tmp/x\"")
            .await
            .unwrap_err();
        assert!(matches!(err, FixtureError::Client(_)));

        let err = app.create_signal_rule("sig", "msg", "e2e", &[]).await.unwrap_err();
        assert!(!err.is_lookup_failure());

        assert!(app.download_policies().await.is_err());
    }

    #[tokio::test]
    async fn test_rule_lifecycle() {
        let app = App::with_backend(RecordingBackend::default());

        let agent_id = app
            .create_agent_rule("e2e_open", "msg", "open.file.name == \"x\"")
            .await
            .unwrap();
        let signal_id = app
            .create_signal_rule("sig", "msg", &agent_id, &["team:e2e"])
            .await
            .unwrap();

        assert_eq!(agent_id, "agent-e2e_open");
        assert_eq!(signal_id, "signal-rule-1");

        let payloads = app.backend().signal_rules.lock().unwrap().clone();
        assert_eq!(payloads[0].queries[0].query, "@agent.rule_id:agent-e2e_open");
        assert_eq!(payloads[0].tags, vec!["team:e2e".to_string()]);

        app.delete_signal_rule(&signal_id).await;
        app.delete_agent_rule(&agent_id).await;
        assert_eq!(
            *app.backend().deleted.lock().unwrap(),
            vec!["signal-rule-1".to_string(), "agent-e2e_open".to_string()]
        );
    }

    #[tokio::test]
    async fn test_get_log_empty_is_lookup_failure() {
        let app = App::with_backend(RecordingBackend::default()).with_log_index("cws");

        let err = app.get_log("@agent.rule_id:e2e").await.unwrap_err();
        assert!(matches!(err, FixtureError::LookupFailed { attempts: 1, .. }));

        let requests = app.backend().log_requests.lock().unwrap().clone();
        assert_eq!(requests[0].filter.indexes, vec!["cws".to_string()]);
        assert_eq!(requests[0].filter.from, "now-15m");
        assert_eq!(requests[0].page.limit, 25);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_log_retries_until_data() {
        let backend = RecordingBackend::default();
        backend
            .log_pages
            .lock()
            .unwrap()
            .extend([LogsListResponse::default(), LogsListResponse::default(), log_page("hit")]);
        let app = App::with_backend(backend);

        let logs = app
            .wait_for_log_with(
                "@agent.rule_id:e2e",
                RetrySchedule::new(5, Duration::from_secs(10)).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(logs.data[0].id, "hit");
        assert_eq!(app.backend().log_requests.lock().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_signal_exhausts_budget() {
        let app = App::with_backend(RecordingBackend::default())
            .with_poller(Poller::new(RetrySchedule::new(3, Duration::from_secs(10)).unwrap()));

        let err = app.wait_for_signal("@workflow.rule.id:never").await.unwrap_err();

        assert!(matches!(err, FixtureError::LookupFailed { attempts: 3, .. }));
        let requests = app.backend().signal_requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.filter.query == "@workflow.rule.id:never"));
    }

    #[tokio::test]
    async fn test_exhausted_wait_surfaces_last_api_error() {
        let app = App::with_backend(FailingBackend).with_retry_on(RetryOn::TransientOnly);

        let err = app
            .wait_for_log_with("*", RetrySchedule::once())
            .await
            .unwrap_err();
        assert!(matches!(err, FixtureError::Client(ClientError::ApiError { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_download_policies_keeps_file() {
        let app = App::with_backend(RecordingBackend::default());

        let path = app.download_policies().await.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(POLICY_FILE_PREFIX));
        assert_eq!(std::fs::read(&path).unwrap(), b"version: 1\nrules: []\n");

        std::fs::remove_file(&path).unwrap();
        app.close();
    }
}
