//! Log search DTOs

use serde::{Deserialize, Serialize};

use crate::domain::log::LogEvent;

/// Start of the relative lookback window used for recent-log searches
pub const RECENT_WINDOW_FROM: &str = "now-15m";
/// End of the relative lookback window used for recent-log searches
pub const RECENT_WINDOW_TO: &str = "now";
/// Page size used by fixture searches
pub const DEFAULT_PAGE_LIMIT: u32 = 25;
/// Index searched when none is configured
pub const DEFAULT_LOG_INDEX: &str = "main";

/// Body of a log search request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsListRequest {
    pub filter: LogsQueryFilter,
    pub page: LogsListRequestPage,
    pub sort: LogsSort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsQueryFilter {
    pub from: String,
    pub to: String,
    pub indexes: Vec<String>,
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsListRequestPage {
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Sort order for log search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogsSort {
    #[serde(rename = "timestamp")]
    TimestampAscending,
    #[serde(rename = "-timestamp")]
    TimestampDescending,
}

impl LogsListRequest {
    /// Search `index` for `query` over the last 15 minutes, oldest first,
    /// one page of 25 events.
    pub fn recent(query: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            filter: LogsQueryFilter {
                from: RECENT_WINDOW_FROM.to_string(),
                to: RECENT_WINDOW_TO.to_string(),
                indexes: vec![index.into()],
                query: query.into(),
            },
            page: LogsListRequestPage {
                limit: DEFAULT_PAGE_LIMIT,
                cursor: None,
            },
            sort: LogsSort::TimestampAscending,
        }
    }
}

/// Response of a log search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogsListResponse {
    #[serde(default)]
    pub data: Vec<LogEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<serde_json::Value>,
}

impl LogsListResponse {
    /// True when the first page carries no events
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recent_request_has_fixed_window() {
        for query in ["", "@agent.rule_id:selftest_open", "service:system-probe"] {
            let request = LogsListRequest::recent(query, DEFAULT_LOG_INDEX);
            let body = serde_json::to_value(request).unwrap();

            assert_eq!(body["filter"]["from"], "now-15m");
            assert_eq!(body["filter"]["to"], "now");
            assert_eq!(body["filter"]["indexes"], json!(["main"]));
            assert_eq!(body["filter"]["query"], query);
            assert_eq!(body["page"], json!({ "limit": 25 }));
            assert_eq!(body["sort"], "timestamp");
        }
    }

    #[test]
    fn test_response_without_data_is_empty() {
        let response: LogsListResponse = serde_json::from_value(json!({ "meta": {} })).unwrap();
        assert!(response.is_empty());

        let response: LogsListResponse = serde_json::from_value(json!({
            "data": [{ "id": "abc", "type": "log", "attributes": {} }]
        }))
        .unwrap();
        assert!(!response.is_empty());
        assert_eq!(response.data[0].id, "abc");
    }
}
