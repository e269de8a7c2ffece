//! Ordered rule application with change tracking.

pub mod engine;
pub mod stats;
pub mod template;

pub use engine::{apply, ApplyContext, ApplyOutcome};
pub use stats::RunStats;
pub use template::{ExpandError, Template};
