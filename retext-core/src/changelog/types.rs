//! Change records: one insert or delete event with provenance.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Whether a record inserted or deleted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Delete,
}

/// Rule provenance shared by the records of one match.
///
/// All fields are `None` for manual-edit records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    pub round: Option<u32>,
    pub pattern_index: Option<usize>,
    pub pattern: Option<String>,
    pub replacement: Option<String>,
}

/// One insert/delete event produced during rule application or edit
/// capture. Append-only; never mutated after emission.
///
/// `pos` is a byte offset into the text the producing pass scanned (the
/// document as transformed by all prior rules of the round); `length` is
/// the byte length of `text`. Both always fall on char boundaries.
/// The ordered record stream is sufficient to reconstruct the output from
/// the input without re-running any regex (see [`crate::changelog::replay`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
    /// Application round, if rule-driven.
    pub round: Option<u32>,
    /// Zero-based index of the rule in its file, if rule-driven.
    pub pattern_index: Option<usize>,
    /// Source pattern text, if rule-driven.
    pub pattern: Option<String>,
    /// Replacement template text, if rule-driven.
    pub replacement: Option<String>,
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub pos: usize,
    pub length: usize,
    pub text: String,
}

impl ChangeRecord {
    /// Delete record for `text` removed at `pos`.
    pub fn delete(timestamp: &str, provenance: &Provenance, pos: usize, text: &str) -> Self {
        Self::record(timestamp, provenance, ChangeKind::Delete, pos, text)
    }

    /// Insert record for `text` added at `pos`.
    pub fn insert(timestamp: &str, provenance: &Provenance, pos: usize, text: &str) -> Self {
        Self::record(timestamp, provenance, ChangeKind::Insert, pos, text)
    }

    fn record(
        timestamp: &str,
        provenance: &Provenance,
        kind: ChangeKind,
        pos: usize,
        text: &str,
    ) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            round: provenance.round,
            pattern_index: provenance.pattern_index,
            pattern: provenance.pattern.clone(),
            replacement: provenance.replacement.clone(),
            kind,
            pos,
            length: text.len(),
            text: text.to_string(),
        }
    }
}

/// Current UTC time in RFC 3339 with microseconds and a `Z` suffix.
pub fn now_utc_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
