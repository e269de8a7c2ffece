//! Capture manual edits as provenance-free change records.

use retext_core::changelog::{now_utc_iso, ChangeRecord, Provenance};

use crate::align::{align, OpKind};

/// Diff a manually edited text against the text it was derived from and
/// emit replayable records.
///
/// Provenance fields are `None` and positions are expressed in `before`,
/// so the records replay as one pass (see `retext_core::changelog::replay`).
pub fn record_edits(before: &str, after: &str) -> Vec<ChangeRecord> {
    let provenance = Provenance::default();
    let mut records = Vec::new();
    for op in align(before, after) {
        let timestamp = now_utc_iso();
        let deleted = &before[op.source.start..op.source.end];
        let inserted = &after[op.dest.start..op.dest.end];
        match op.kind {
            OpKind::Equal => {}
            OpKind::Delete => {
                records.push(ChangeRecord::delete(
                    &timestamp,
                    &provenance,
                    op.source.start,
                    deleted,
                ));
            }
            OpKind::Insert => {
                records.push(ChangeRecord::insert(
                    &timestamp,
                    &provenance,
                    op.source.start,
                    inserted,
                ));
            }
            OpKind::Replace => {
                records.push(ChangeRecord::delete(
                    &timestamp,
                    &provenance,
                    op.source.start,
                    deleted,
                ));
                records.push(ChangeRecord::insert(
                    &timestamp,
                    &provenance,
                    op.source.start,
                    inserted,
                ));
            }
        }
    }
    records
}
