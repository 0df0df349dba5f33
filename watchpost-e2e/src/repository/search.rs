//! Search repository
//!
//! One-shot log and signal searches. Retrying is the poller's job.

use async_trait::async_trait;
use watchpost_client::MonitoringClient;
use watchpost_core::dto::logs::{LogsListRequest, LogsListResponse};
use watchpost_core::dto::signals::{SignalListRequest, SignalListResponse};

use crate::error::Result;

/// Repository trait for log and signal searches
#[async_trait]
pub trait SearchRepository: Send + Sync {
    /// Runs a single log search and returns the first page
    async fn list_logs(&self, request: &LogsListRequest) -> Result<LogsListResponse>;

    /// Runs a single signal search and returns the first page
    async fn search_signals(&self, request: &SignalListRequest) -> Result<SignalListResponse>;
}

#[async_trait]
impl SearchRepository for MonitoringClient {
    async fn list_logs(&self, request: &LogsListRequest) -> Result<LogsListResponse> {
        Ok(MonitoringClient::list_logs(self, request).await?)
    }

    async fn search_signals(&self, request: &SignalListRequest) -> Result<SignalListResponse> {
        Ok(MonitoringClient::search_signals(self, request).await?)
    }
}
