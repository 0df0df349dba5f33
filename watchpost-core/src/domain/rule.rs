//! Rule domain types
//!
//! Enumerations used by detection rule payloads. Values serialize to the
//! lowercase strings the platform expects.

use serde::{Deserialize, Serialize};

/// Severity assigned to a rule case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

/// How a detection rule turns query matches into signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Threshold,
    NewValue,
    AnomalyDetection,
    ImpossibleTravel,
}

/// Aggregation applied to a rule query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryAggregation {
    Count,
    Cardinality,
    Sum,
    Max,
    NewValue,
}

/// Kind of detection rule being created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    WorkloadSecurity,
    LogDetection,
}

/// Resource type tag for agent-side expression rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRuleType {
    AgentRule,
}
