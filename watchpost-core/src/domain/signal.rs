//! Security signal domain types

use serde::{Deserialize, Serialize};

/// A security signal produced when a signal rule's condition is met
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub attributes: serde_json::Value,
}

impl Signal {
    /// Signal title or message as rendered by the platform
    pub fn message(&self) -> Option<&str> {
        self.attributes.get("message").and_then(|m| m.as_str())
    }

    pub fn tags(&self) -> Vec<&str> {
        self.attributes
            .get("tags")
            .and_then(|t| t.as_array())
            .map(|tags| tags.iter().filter_map(|t| t.as_str()).collect())
            .unwrap_or_default()
    }
}
