//! Watchpost Core
//!
//! Wire types for the security-monitoring platform API.
//!
//! This crate contains:
//! - Domain types: Entities returned by the platform (log events, signals, rule enums)
//! - DTOs: Request and response bodies for the search and rule endpoints

pub mod domain;
pub mod dto;
