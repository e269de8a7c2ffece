//! Longest-matching-block sequence alignment.
//!
//! Recursively partitions both sequences around the longest common block.
//! Generic over the element type so the same core serves char-level text
//! alignment and line-level classification for the export table.

use std::hash::Hash;
use std::ops::Range;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::types::OpKind;

/// A maximal common block:
/// `a[a_start..a_start + len] == b[b_start..b_start + len]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

/// An index-space opcode over two element sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opcode {
    pub kind: OpKind,
    pub a: Range<usize>,
    pub b: Range<usize>,
}

/// Aligner over two element slices.
pub struct SequenceAligner<'s, T> {
    a: &'s [T],
    b: &'s [T],
    /// Positions of each distinct element within `b`, ascending.
    b_index: FxHashMap<&'s T, SmallVec<[usize; 4]>>,
}

impl<'s, T: Eq + Hash> SequenceAligner<'s, T> {
    pub fn new(a: &'s [T], b: &'s [T]) -> Self {
        let mut b_index: FxHashMap<&'s T, SmallVec<[usize; 4]>> = FxHashMap::default();
        for (j, item) in b.iter().enumerate() {
            b_index.entry(item).or_default().push(j);
        }
        Self { a, b, b_index }
    }

    /// Longest block common to `a[a_range]` and `b[b_range]`.
    ///
    /// Among equal-length candidates the block starting earliest in `a`,
    /// then earliest in `b`, wins. A zero-length result means the ranges
    /// share no element.
    pub fn find_longest_match(&self, a_range: Range<usize>, b_range: Range<usize>) -> MatchBlock {
        let mut best = MatchBlock {
            a_start: a_range.start,
            b_start: b_range.start,
            len: 0,
        };
        // Lengths of the common runs ending at each `j` of the previous row.
        let mut runs: FxHashMap<usize, usize> = FxHashMap::default();
        for i in a_range {
            let mut next_runs = FxHashMap::default();
            if let Some(positions) = self.b_index.get(&self.a[i]) {
                for &j in positions {
                    if j < b_range.start {
                        continue;
                    }
                    if j >= b_range.end {
                        break;
                    }
                    let len = if j > b_range.start {
                        runs.get(&(j - 1)).copied().unwrap_or(0) + 1
                    } else {
                        1
                    };
                    next_runs.insert(j, len);
                    if len > best.len {
                        best = MatchBlock {
                            a_start: i + 1 - len,
                            b_start: j + 1 - len,
                            len,
                        };
                    }
                }
            }
            runs = next_runs;
        }
        best
    }

    /// All matching blocks, ascending in both sequences, with abutting
    /// blocks coalesced so opcode boundaries are maximal.
    pub fn matching_blocks(&self) -> Vec<MatchBlock> {
        let mut pending = vec![(0..self.a.len(), 0..self.b.len())];
        let mut blocks = Vec::new();
        while let Some((a_range, b_range)) = pending.pop() {
            let block = self.find_longest_match(a_range.clone(), b_range.clone());
            if block.len == 0 {
                continue;
            }
            if a_range.start < block.a_start && b_range.start < block.b_start {
                pending.push((a_range.start..block.a_start, b_range.start..block.b_start));
            }
            let (a_end, b_end) = (block.a_start + block.len, block.b_start + block.len);
            if a_end < a_range.end && b_end < b_range.end {
                pending.push((a_end..a_range.end, b_end..b_range.end));
            }
            blocks.push(block);
        }
        blocks.sort_unstable_by_key(|block| (block.a_start, block.b_start));

        let mut merged: Vec<MatchBlock> = Vec::with_capacity(blocks.len());
        for block in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.len == block.a_start
                        && last.b_start + last.len == block.b_start =>
                {
                    last.len += block.len;
                }
                _ => merged.push(block),
            }
        }
        merged
    }

    /// Contiguous opcodes partitioning `[0, a.len())` and `[0, b.len())`.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let blocks = self.matching_blocks();
        let sentinel = MatchBlock {
            a_start: self.a.len(),
            b_start: self.b.len(),
            len: 0,
        };
        let mut ops = Vec::with_capacity(blocks.len() * 2 + 1);
        let (mut i, mut j) = (0usize, 0usize);
        for block in blocks.iter().chain(std::iter::once(&sentinel)) {
            let kind = if i < block.a_start && j < block.b_start {
                Some(OpKind::Replace)
            } else if i < block.a_start {
                Some(OpKind::Delete)
            } else if j < block.b_start {
                Some(OpKind::Insert)
            } else {
                None
            };
            if let Some(kind) = kind {
                ops.push(Opcode {
                    kind,
                    a: i..block.a_start,
                    b: j..block.b_start,
                });
            }
            if block.len > 0 {
                ops.push(Opcode {
                    kind: OpKind::Equal,
                    a: block.a_start..block.a_start + block.len,
                    b: block.b_start..block.b_start + block.len,
                });
            }
            i = block.a_start + block.len;
            j = block.b_start + block.len;
        }
        ops
    }
}
