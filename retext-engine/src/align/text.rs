//! Character-level text alignment with byte-offset opcodes.

use retext_core::span::Span;

use super::matcher::SequenceAligner;
use super::types::{AlignOp, OpKind};

/// Align two texts.
///
/// The returned opcodes cover `[0, a.len())` and `[0, b.len())` exactly
/// and contiguously, as byte ranges that always fall on char boundaries.
/// Identical texts short-circuit to a single Equal op; two empty texts
/// yield an empty list.
pub fn align(a: &str, b: &str) -> Vec<AlignOp> {
    if a == b {
        if a.is_empty() {
            return Vec::new();
        }
        return vec![AlignOp {
            kind: OpKind::Equal,
            source: Span::new(0, a.len()),
            dest: Span::new(0, b.len()),
        }];
    }

    let (a_chars, a_offsets) = decompose(a);
    let (b_chars, b_offsets) = decompose(b);
    let aligner = SequenceAligner::new(&a_chars, &b_chars);
    aligner
        .opcodes()
        .into_iter()
        .map(|op| AlignOp {
            kind: op.kind,
            source: Span::new(a_offsets[op.a.start], a_offsets[op.a.end]),
            dest: Span::new(b_offsets[op.b.start], b_offsets[op.b.end]),
        })
        .collect()
}

/// Char values plus a byte-offset table with a trailing sentinel, so any
/// char-index range maps directly to a byte range.
fn decompose(text: &str) -> (Vec<char>, Vec<usize>) {
    let mut chars = Vec::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len() + 1);
    for (offset, c) in text.char_indices() {
        offsets.push(offset);
        chars.push(c);
    }
    offsets.push(text.len());
    (chars, offsets)
}
