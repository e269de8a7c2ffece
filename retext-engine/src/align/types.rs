//! Alignment opcodes.

use retext_core::span::Span;
use serde::{Deserialize, Serialize};

/// Classification of one aligned region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Equal,
    Insert,
    Delete,
    Replace,
}

/// One edit-script operation between source text `a` and destination
/// text `b`.
///
/// Opcode lists cover `[0, a.len())` and `[0, b.len())` exactly and
/// contiguously. Both ranges are always present; the inactive side of an
/// insert or delete is an empty span at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignOp {
    pub kind: OpKind,
    /// Byte range into `a`.
    pub source: Span,
    /// Byte range into `b`.
    pub dest: Span,
}
