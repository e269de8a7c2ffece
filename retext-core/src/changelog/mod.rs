//! Append-only change tracking: records, JSONL persistence, replay.

pub mod replay;
pub mod store;
pub mod types;

pub use replay::replay;
pub use store::{read_log, ChangeLog, LogWriter};
pub use types::{now_utc_iso, ChangeKind, ChangeRecord, Provenance};
