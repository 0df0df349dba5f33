//! Core domain types
//!
//! Entities the platform returns from its search endpoints, plus the
//! enumerations used when describing detection rules. Shared between the
//! HTTP client (deserializes them) and the end-to-end fixture (inspects them).

pub mod log;
pub mod rule;
pub mod signal;
