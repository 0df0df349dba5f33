//! Security signal search DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::signal::Signal;
use crate::dto::logs::DEFAULT_PAGE_LIMIT;

/// 2021-01-01T00:00:00Z, lower bound of the "all time" signal search
pub const ALL_TIME_START_SECS: i64 = 1_609_459_200;
/// 2050-01-01T00:00:00Z, upper bound of the "all time" signal search
pub const ALL_TIME_END_SECS: i64 = 2_524_608_000;

/// Body of a signal search request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalListRequest {
    pub filter: SignalListRequestFilter,
    pub page: SignalListRequestPage,
    pub sort: SignalsSort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalListRequestFilter {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalListRequestPage {
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalsSort {
    #[serde(rename = "timestamp")]
    TimestampAscending,
    #[serde(rename = "-timestamp")]
    TimestampDescending,
}

impl SignalListRequest {
    /// Search every signal matching `query` between 2021-01-01 and
    /// 2050-01-01, one page of 25.
    pub fn all_time(query: impl Into<String>) -> Self {
        Self {
            filter: SignalListRequestFilter {
                from: DateTime::from_timestamp(ALL_TIME_START_SECS, 0)
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
                to: DateTime::from_timestamp(ALL_TIME_END_SECS, 0)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
                query: query.into(),
            },
            page: SignalListRequestPage {
                limit: DEFAULT_PAGE_LIMIT,
                cursor: None,
            },
            sort: SignalsSort::TimestampAscending,
        }
    }
}

/// Response of a signal search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalListResponse {
    #[serde(default)]
    pub data: Vec<Signal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<serde_json::Value>,
}

impl SignalListResponse {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
