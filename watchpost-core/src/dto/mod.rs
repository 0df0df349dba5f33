//! Data Transfer Objects for the platform API
//!
//! Request bodies sent to, and response bodies received from, the search and
//! rule management endpoints. Requests with fixed parameters expose named
//! constructors so callers only supply the query.

pub mod logs;
pub mod rules;
pub mod signals;
