//! # tern-node — Node-side checkpoint plumbing.
//!
//! Wires the checkpoint subsystem into a node process:
//! - [`config::NodeConfig`] — network, sync span, and logging settings
//! - [`guard::ChainGuard`] — typed accept/reorg decisions for the chain code
//! - [`logging::init_logging`] — tracing subscriber setup

pub mod config;
pub mod error;
pub mod guard;
pub mod logging;

pub use config::NodeConfig;
pub use error::{ConfigError, GuardError};
pub use guard::ChainGuard;
pub use logging::init_logging;
