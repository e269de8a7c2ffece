//! Replay: reconstruct transformed text from the change log alone.

use super::types::{ChangeKind, ChangeRecord};
use crate::errors::ReplayError;

/// Reapply every record's `(pos, length, text)` in emission order,
/// rebuilding the output a rule run produced from `input` without
/// re-running any regex.
///
/// Record positions are expressed in the text their pass scanned, so the
/// accumulated offset delta resets whenever the `(round, pattern_index)`
/// provenance changes. The delete and insert records of one match share a
/// position; the insert lands where the deleted text was removed.
///
/// Fails only when the log does not belong to `input` (out-of-bounds
/// offsets, non-boundary offsets, or mismatched deleted text).
pub fn replay(input: &str, records: &[ChangeRecord]) -> Result<String, ReplayError> {
    let mut working = input.to_string();
    let mut delta: isize = 0;
    let mut pass: Option<(Option<u32>, Option<usize>)> = None;

    let mut i = 0;
    while i < records.len() {
        let record = &records[i];
        let key = (record.round, record.pattern_index);
        if pass != Some(key) {
            delta = 0;
            pass = Some(key);
        }

        match record.kind {
            ChangeKind::Delete => {
                let at = resolve(record.pos, delta, &working, i)?;
                let end = at + record.length;
                if end > working.len() {
                    return Err(ReplayError::OutOfBounds {
                        index: i,
                        pos: end,
                        len: working.len(),
                    });
                }
                if !working.is_char_boundary(end) {
                    return Err(ReplayError::NotCharBoundary { index: i, pos: end });
                }
                if working[at..end] != record.text {
                    return Err(ReplayError::TextMismatch { index: i });
                }
                working.replace_range(at..end, "");

                // The paired insert of the same match replaces the deleted
                // text in place, before this delete's delta applies.
                let paired = records.get(i + 1).filter(|next| {
                    next.kind == ChangeKind::Insert
                        && next.pos == record.pos
                        && (next.round, next.pattern_index) == key
                });
                if let Some(next) = paired {
                    working.insert_str(at, &next.text);
                    delta += next.length as isize - record.length as isize;
                    i += 2;
                    continue;
                }
                delta -= record.length as isize;
            }
            ChangeKind::Insert => {
                let at = resolve(record.pos, delta, &working, i)?;
                working.insert_str(at, &record.text);
                delta += record.length as isize;
            }
        }
        i += 1;
    }
    Ok(working)
}

fn resolve(pos: usize, delta: isize, working: &str, index: usize) -> Result<usize, ReplayError> {
    let at = pos as isize + delta;
    if at < 0 || at as usize > working.len() {
        return Err(ReplayError::OutOfBounds {
            index,
            pos,
            len: working.len(),
        });
    }
    let at = at as usize;
    if !working.is_char_boundary(at) {
        return Err(ReplayError::NotCharBoundary { index, pos: at });
    }
    Ok(at)
}
