//! Rule management DTOs

use serde::{Deserialize, Serialize};

use crate::domain::rule::{AgentRuleType, DetectionMethod, QueryAggregation, RuleSeverity, RuleType};

/// Query name referenced by the signal rule's case condition
pub const AGENT_RULE_QUERY_NAME: &str = "a";

/// Body of a detection (signal) rule creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRuleCreatePayload {
    pub name: String,
    pub message: String,
    pub is_enabled: bool,
    pub has_extended_title: bool,
    pub cases: Vec<RuleCase>,
    pub options: RuleOptions,
    pub queries: Vec<RuleQuery>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleCase {
    pub condition: String,
    pub status: RuleSeverity,
}

/// Evaluation options. Durations are in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOptions {
    pub detection_method: DetectionMethod,
    pub evaluation_window: u32,
    pub keep_alive: u32,
    pub max_signal_duration: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleQuery {
    pub name: String,
    pub aggregation: QueryAggregation,
    pub query: String,
}

impl SignalRuleCreatePayload {
    /// Threshold rule raising an info signal as soon as the agent rule
    /// `agent_rule_id` fires once, with no evaluation window or keep-alive.
    pub fn for_agent_rule(
        name: impl Into<String>,
        message: impl Into<String>,
        agent_rule_id: &str,
        tags: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            is_enabled: true,
            has_extended_title: true,
            cases: vec![RuleCase {
                condition: format!("{} > 0", AGENT_RULE_QUERY_NAME),
                status: RuleSeverity::Info,
            }],
            options: RuleOptions {
                detection_method: DetectionMethod::Threshold,
                evaluation_window: 0,
                keep_alive: 0,
                max_signal_duration: 0,
            },
            queries: vec![RuleQuery {
                name: AGENT_RULE_QUERY_NAME.to_string(),
                aggregation: QueryAggregation::Count,
                query: format!("@agent.rule_id:{}", agent_rule_id),
            }],
            tags,
            rule_type: RuleType::WorkloadSecurity,
        }
    }
}

/// Detection rule as returned by the creation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRuleResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "isEnabled")]
    pub is_enabled: Option<bool>,
}

/// Body of an agent rule creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRuleCreateRequest {
    pub data: AgentRuleCreateData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRuleCreateData {
    pub attributes: AgentRuleCreateAttributes,
    #[serde(rename = "type")]
    pub kind: AgentRuleType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRuleCreateAttributes {
    pub name: String,
    pub description: String,
    pub expression: String,
    pub enabled: bool,
}

impl AgentRuleCreateRequest {
    /// Enabled agent rule evaluating `expression` on the host
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            data: AgentRuleCreateData {
                attributes: AgentRuleCreateAttributes {
                    name: name.into(),
                    description: description.into(),
                    expression: expression.into(),
                    enabled: true,
                },
                kind: AgentRuleType::AgentRule,
            },
        }
    }
}

/// Agent rule as returned by the creation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRuleResponse {
    pub data: AgentRuleData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRuleData {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub attributes: serde_json::Value,
}
