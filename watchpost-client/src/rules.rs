//! Rule management endpoints

use crate::MonitoringClient;
use crate::error::{ClientError, Result};
use reqwest::Method;
use watchpost_core::dto::rules::{
    AgentRuleCreateRequest, AgentRuleResponse, SignalRuleCreatePayload, SignalRuleResponse,
};

const SIGNAL_RULES_PATH: &str = "/api/v2/security_monitoring/rules";
const AGENT_RULES_PATH: &str = "/api/v2/security_monitoring/cloud_workload_security/agent_rules";

impl MonitoringClient {
    // =============================================================================
    // Detection (Signal) Rules
    // =============================================================================

    /// Create a detection rule
    ///
    /// # Arguments
    /// * `payload` - The rule definition
    ///
    /// # Returns
    /// The created rule, including its identifier
    ///
    /// # Example
    /// ```no_run
    /// # use watchpost_client::{Credentials, MonitoringClient};
    /// # use watchpost_core::dto::rules::SignalRuleCreatePayload;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = MonitoringClient::new("https://api.datadoghq.com", Credentials::new("a", "b"));
    /// let rule = client
    ///     .create_signal_rule(&SignalRuleCreatePayload::for_agent_rule(
    ///         "e2e signal",
    ///         "signal fired",
    ///         "e2e_open",
    ///         vec![],
    ///     ))
    ///     .await?;
    /// println!("created rule {}", rule.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_signal_rule(
        &self,
        payload: &SignalRuleCreatePayload,
    ) -> Result<SignalRuleResponse> {
        let response = self
            .request(Method::POST, SIGNAL_RULES_PATH)
            .json(payload)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a detection rule
    ///
    /// # Arguments
    /// * `rule_id` - The rule identifier returned at creation
    pub async fn delete_signal_rule(&self, rule_id: &str) -> Result<()> {
        let path = format!("{}/{}", SIGNAL_RULES_PATH, non_empty_id(rule_id)?);
        let response = self.request(Method::DELETE, &path).send().await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Agent Rules
    // =============================================================================

    /// Create an agent-side expression rule
    ///
    /// # Returns
    /// The created rule, including its identifier
    pub async fn create_agent_rule(
        &self,
        req: &AgentRuleCreateRequest,
    ) -> Result<AgentRuleResponse> {
        let response = self
            .request(Method::POST, AGENT_RULES_PATH)
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete an agent rule
    ///
    /// # Arguments
    /// * `rule_id` - The agent rule identifier returned at creation
    pub async fn delete_agent_rule(&self, rule_id: &str) -> Result<()> {
        let path = format!("{}/{}", AGENT_RULES_PATH, non_empty_id(rule_id)?);
        let response = self.request(Method::DELETE, &path).send().await?;

        self.handle_empty_response(response).await
    }
}

fn non_empty_id(rule_id: &str) -> Result<&str> {
    if rule_id.trim().is_empty() {
        return Err(ClientError::InvalidRequest("rule id cannot be empty".to_string()));
    }
    Ok(rule_id)
}
