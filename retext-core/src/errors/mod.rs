//! Error handling for retext.
//! One enum per subsystem, all `thiserror`; pipeline-internal failures are
//! recovered values and never cross their per-rule or per-line boundary.

pub mod config_error;
pub mod log_error;
pub mod parse_error;

pub use config_error::ConfigError;
pub use log_error::{LogError, ReplayError};
pub use parse_error::RuleParseError;
