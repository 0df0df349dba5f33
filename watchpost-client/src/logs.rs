//! Log search endpoint

use crate::MonitoringClient;
use crate::error::Result;
use reqwest::Method;
use tracing::debug;
use watchpost_core::dto::logs::{LogsListRequest, LogsListResponse};

impl MonitoringClient {
    // =============================================================================
    // Log Search
    // =============================================================================

    /// Search indexed logs
    ///
    /// Returns the first page only; an empty `data` collection means nothing
    /// matched (yet).
    ///
    /// # Arguments
    /// * `req` - The search request (time window, indexes, query, page, sort)
    pub async fn list_logs(&self, req: &LogsListRequest) -> Result<LogsListResponse> {
        debug!(query = %req.filter.query, "searching logs");
        let response = self
            .request(Method::POST, "/api/v2/logs/events/search")
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
