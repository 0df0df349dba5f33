//! Repository layer
//!
//! Repositories are the seam between the fixture and the platform API. Each
//! trait covers one group of endpoints; `MonitoringClient` implements all of
//! them, and tests substitute in-memory stubs.

mod policies;
mod rules;
mod search;

// Re-export traits
pub use policies::PolicyRepository;
pub use rules::RuleRepository;
pub use search::SearchRepository;
