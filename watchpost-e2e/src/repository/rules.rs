//! Rule repository
//!
//! Creates and deletes detection rules and agent rules, exposing only their
//! identifiers.

use async_trait::async_trait;
use watchpost_client::MonitoringClient;
use watchpost_core::dto::rules::{AgentRuleCreateRequest, SignalRuleCreatePayload};

use crate::error::Result;

/// Repository trait for rule lifecycle operations
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Creates a detection rule and returns its identifier
    async fn create_signal_rule(&self, payload: &SignalRuleCreatePayload) -> Result<String>;

    /// Creates an agent rule and returns its identifier
    async fn create_agent_rule(&self, request: &AgentRuleCreateRequest) -> Result<String>;

    async fn delete_signal_rule(&self, rule_id: &str) -> Result<()>;

    async fn delete_agent_rule(&self, rule_id: &str) -> Result<()>;
}

#[async_trait]
impl RuleRepository for MonitoringClient {
    async fn create_signal_rule(&self, payload: &SignalRuleCreatePayload) -> Result<String> {
        let rule = MonitoringClient::create_signal_rule(self, payload).await?;
        Ok(rule.id)
    }

    async fn create_agent_rule(&self, request: &AgentRuleCreateRequest) -> Result<String> {
        let rule = MonitoringClient::create_agent_rule(self, request).await?;
        Ok(rule.data.id)
    }

    async fn delete_signal_rule(&self, rule_id: &str) -> Result<()> {
        Ok(MonitoringClient::delete_signal_rule(self, rule_id).await?)
    }

    async fn delete_agent_rule(&self, rule_id: &str) -> Result<()> {
        Ok(MonitoringClient::delete_agent_rule(self, rule_id).await?)
    }
}
