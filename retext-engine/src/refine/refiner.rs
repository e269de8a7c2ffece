//! Intraline refinement with global and per-pair cost guards.

use retext_core::cancel::CancelToken;
use retext_core::config::RefineConfig;
use retext_core::span::{merge_spans, Span};
use rustc_hash::FxHashSet;
use tracing::debug;

use super::lines::LineTable;
use crate::align::{align, AlignOp, OpKind};

/// Refinement statistics for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefineStats {
    /// Changed-line budget consumed: Σ max(old, new) line counts over all
    /// non-equal coarse opcodes.
    pub changed_lines: usize,
    /// Line pairs aligned intraline.
    pub refined_pairs: usize,
    /// Line pairs skipped by the per-pair length guard.
    pub skipped_pairs: usize,
    /// True when the global guard (or prior cancellation) returned the
    /// coarse spans unmodified.
    pub coarse_fallback: bool,
}

/// Refined highlight spans.
///
/// Delete spans address `a`; insert spans address `b`. Both lists are
/// sorted, coalesced, and free of empty spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refined {
    pub del_spans: Vec<Span>,
    pub ins_spans: Vec<Span>,
    pub stats: RefineStats,
}

/// Refine a coarse alignment into intraline highlight spans.
///
/// When the changed-line budget exceeds `config.max_changed_lines`,
/// refinement is skipped entirely and the coarse spans come back
/// unmodified. An individual pair with a line longer than
/// `config.max_line_len` is not aligned; its destination line is tagged
/// as inserted whole. Cancellation is honored at line-pair boundaries
/// only and returns the spans accumulated so far.
pub fn refine(
    a: &str,
    b: &str,
    ops: &[AlignOp],
    config: &RefineConfig,
    cancel: &CancelToken,
) -> Refined {
    let max_changed = config.effective_max_changed_lines();
    let changed_lines: usize = ops
        .iter()
        .filter(|op| op.kind != OpKind::Equal)
        .map(|op| {
            let old = count_lines(&a[op.source.start..op.source.end]);
            let new = count_lines(&b[op.dest.start..op.dest.end]);
            old.max(new)
        })
        .sum();

    let mut stats = RefineStats {
        changed_lines,
        ..RefineStats::default()
    };

    if changed_lines > max_changed || cancel.is_cancelled() {
        stats.coarse_fallback = true;
        debug!(changed_lines, max_changed, "intraline refinement skipped");
        let (del_spans, ins_spans) = coarse_spans(ops);
        return Refined {
            del_spans: merge_spans(del_spans),
            ins_spans: merge_spans(ins_spans),
            stats,
        };
    }

    let max_line_len = config.effective_max_line_len();
    let a_table = LineTable::new(a);
    let b_table = LineTable::new(b);
    let mut del_spans = Vec::new();
    let mut ins_spans = Vec::new();
    // A line pair can surface from several opcodes; align it once.
    let mut seen_pairs: FxHashSet<(usize, usize)> = FxHashSet::default();

    'ops: for op in ops {
        match op.kind {
            OpKind::Equal => {}
            OpKind::Delete => del_spans.push(op.source),
            OpKind::Insert => ins_spans.push(op.dest),
            OpKind::Replace => {
                let old_block: Vec<&str> =
                    a[op.source.start..op.source.end].split_inclusive('\n').collect();
                let new_block: Vec<&str> =
                    b[op.dest.start..op.dest.end].split_inclusive('\n').collect();
                let pair_count = old_block.len().max(new_block.len());
                let mut old_cursor = op.source.start;
                let mut new_cursor = op.dest.start;

                for idx in 0..pair_count {
                    // Safe point: between line pairs only.
                    if cancel.is_cancelled() {
                        break 'ops;
                    }
                    match (old_block.get(idx).copied(), new_block.get(idx).copied()) {
                        (Some(old_piece), Some(new_piece)) => {
                            if let (Some(a_idx), Some(b_idx)) =
                                (a_table.line_at(old_cursor), b_table.line_at(new_cursor))
                            {
                                if seen_pairs.insert((a_idx, b_idx)) {
                                    refine_pair(
                                        &a_table,
                                        &b_table,
                                        a_idx,
                                        b_idx,
                                        max_line_len,
                                        &mut del_spans,
                                        &mut ins_spans,
                                        &mut stats,
                                    );
                                }
                            }
                            old_cursor += old_piece.len();
                            new_cursor += new_piece.len();
                        }
                        (Some(old_piece), None) => {
                            del_spans.push(Span::new(old_cursor, old_cursor + old_piece.len()));
                            old_cursor += old_piece.len();
                        }
                        (None, Some(new_piece)) => {
                            ins_spans.push(Span::new(new_cursor, new_cursor + new_piece.len()));
                            new_cursor += new_piece.len();
                        }
                        (None, None) => {}
                    }
                }
            }
        }
    }

    del_spans.retain(|span| !span.is_empty());
    ins_spans.retain(|span| !span.is_empty());
    Refined {
        del_spans: merge_spans(del_spans),
        ins_spans: merge_spans(ins_spans),
        stats,
    }
}

/// Align one changed line pair (full lines, not just the changed block)
/// and accumulate absolute-offset spans.
#[allow(clippy::too_many_arguments)]
fn refine_pair(
    a_table: &LineTable<'_>,
    b_table: &LineTable<'_>,
    a_idx: usize,
    b_idx: usize,
    max_line_len: usize,
    del_spans: &mut Vec<Span>,
    ins_spans: &mut Vec<Span>,
    stats: &mut RefineStats,
) {
    let (Some(old_line), Some(new_line)) = (a_table.line(a_idx), b_table.line(b_idx)) else {
        return;
    };
    let (Some(base_old), Some(base_new)) = (a_table.start(a_idx), b_table.start(b_idx)) else {
        return;
    };

    if old_line.len() > max_line_len || new_line.len() > max_line_len {
        // Too long to align; tag the whole destination line as inserted.
        ins_spans.push(Span::new(base_new, base_new + new_line.len()));
        stats.skipped_pairs += 1;
        return;
    }

    stats.refined_pairs += 1;
    for op in align(old_line, new_line) {
        match op.kind {
            OpKind::Equal => {}
            OpKind::Delete => del_spans.push(op.source.shifted(base_old)),
            OpKind::Insert => ins_spans.push(op.dest.shifted(base_new)),
            OpKind::Replace => {
                del_spans.push(op.source.shifted(base_old));
                ins_spans.push(op.dest.shifted(base_new));
            }
        }
    }
}

/// Coarse spans straight from the opcodes: delete/replace source ranges
/// and insert/replace dest ranges.
fn coarse_spans(ops: &[AlignOp]) -> (Vec<Span>, Vec<Span>) {
    let mut del_spans = Vec::new();
    let mut ins_spans = Vec::new();
    for op in ops {
        match op.kind {
            OpKind::Equal => {}
            OpKind::Delete => del_spans.push(op.source),
            OpKind::Insert => ins_spans.push(op.dest),
            OpKind::Replace => {
                del_spans.push(op.source);
                ins_spans.push(op.dest);
            }
        }
    }
    (del_spans, ins_spans)
}

fn count_lines(text: &str) -> usize {
    text.split_inclusive('\n').count()
}
