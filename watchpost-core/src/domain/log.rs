//! Log domain types

use serde::{Deserialize, Serialize};

/// A single indexed log event as returned by the log search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub attributes: serde_json::Value,
}

impl LogEvent {
    /// The event's `message` attribute, if any
    pub fn message(&self) -> Option<&str> {
        self.attributes.get("message").and_then(|m| m.as_str())
    }

    /// Looks up a nested attribute by dotted path (e.g. `attributes.agent.rule_id`)
    pub fn attribute(&self, path: &str) -> Option<&serde_json::Value> {
        path.split('.')
            .try_fold(&self.attributes, |value, key| value.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_lookup() {
        let event: LogEvent = serde_json::from_value(json!({
            "id": "AQAAAYx",
            "type": "log",
            "attributes": {
                "message": "rule matched",
                "attributes": { "agent": { "rule_id": "selftest_open" } }
            }
        }))
        .unwrap();

        assert_eq!(event.message(), Some("rule matched"));
        assert_eq!(
            event.attribute("attributes.agent.rule_id"),
            Some(&json!("selftest_open"))
        );
        assert!(event.attribute("attributes.missing").is_none());
    }
}
