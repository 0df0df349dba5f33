//! Watchpost end-to-end fixture
//!
//! Support library for end-to-end security-monitoring tests. A test creates
//! an agent rule and a signal rule, triggers activity on a monitored host,
//! then waits for the resulting logs and signals to be indexed:
//!
//! ```no_run
//! use watchpost_e2e::App;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let app = App::from_env()?;
//!
//! let agent_rule = app
//!     .create_agent_rule("e2e_open", "open of /tmp/e2e", r#"open.file.path == "/tmp/e2e""#)
//!     .await?;
//! let signal_rule = app.create_signal_rule("e2e signal", "e2e open", &agent_rule, &[]).await?;
//!
//! // ... trigger the rule on the host ...
//!
//! let logs = app.wait_for_log("@agent.rule_id:e2e_open").await?;
//! assert!(!logs.data.is_empty());
//!
//! app.delete_signal_rule(&signal_rule).await;
//! app.delete_agent_rule(&agent_rule).await;
//! app.close();
//! # Ok(())
//! # }
//! ```
//!
//! Layout:
//! - Configuration: credentials and polling parameters from the environment
//! - Repositories: trait seams over the platform API
//! - Poller: bounded fixed-interval retry of lookups
//! - App: the fixture test cases hold

pub mod app;
pub mod config;
pub mod error;
pub mod poller;
pub mod repository;

pub use app::App;
pub use config::Config;
pub use error::{FixtureError, Result};
pub use poller::{PollResult, Poller, RetryOn, RetrySchedule, poll_until_non_empty};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a test-friendly tracing subscriber
///
/// Honors `RUST_LOG`; defaults to info for the fixture and client. Safe to
/// call from every test, only the first call installs anything.
pub fn init_test_logging() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "watchpost_e2e=info,watchpost_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
