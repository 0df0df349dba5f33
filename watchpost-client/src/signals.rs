//! Security signal search endpoint

use crate::MonitoringClient;
use crate::error::Result;
use reqwest::Method;
use tracing::debug;
use watchpost_core::dto::signals::{SignalListRequest, SignalListResponse};

impl MonitoringClient {
    /// Search security signals
    ///
    /// # Arguments
    /// * `req` - The search request (absolute time range, query, page, sort)
    pub async fn search_signals(&self, req: &SignalListRequest) -> Result<SignalListResponse> {
        debug!(query = %req.filter.query, "searching signals");
        let response = self
            .request(Method::POST, "/api/v2/security_monitoring/signals/search")
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
