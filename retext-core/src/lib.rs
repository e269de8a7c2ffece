//! retext-core: Core types for the retext transformation engine
//!
//! This crate carries everything the algorithm crate and the editing shell
//! share:
//! - Span: half-open byte intervals, tagged highlights, and range merging
//! - Cancel: cooperative cancellation token
//! - Errors: one error enum per subsystem
//! - Config: TOML-based configuration with environment overrides
//! - Events: progress handler trait and synchronous dispatcher
//! - Changelog: append-only change records, JSONL persistence, replay

pub mod cancel;
pub mod changelog;
pub mod config;
pub mod errors;
pub mod events;
pub mod span;
pub mod trace;

// Re-exports for convenience
pub use cancel::CancelToken;
pub use changelog::{
    now_utc_iso, read_log, replay, ChangeKind, ChangeLog, ChangeRecord, LogWriter, Provenance,
};
pub use config::{RefineConfig, RetextConfig, TransformConfig};
pub use errors::{ConfigError, LogError, ReplayError, RuleParseError};
pub use events::{EventDispatcher, EventHandler};
pub use span::{merge_spans, Span, SpanKind, TaggedSpan};
