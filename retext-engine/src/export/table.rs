//! Line-level tabular diff rows.

use serde::{Deserialize, Serialize};

use crate::align::{OpKind, SequenceAligner};

/// One two-column row of the tabular diff artifact.
///
/// `kind` preserves the alignment engine's line-level classification.
/// Either side may be absent; line numbers are 1-based. A single-column
/// view is a presentation-layer filter over the same rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRow {
    pub kind: OpKind,
    pub old_line: Option<usize>,
    pub old_text: Option<String>,
    pub new_line: Option<usize>,
    pub new_text: Option<String>,
}

/// Build the two-column diff table between two texts.
///
/// Replace blocks pair lines positionally; unpaired lines on either side
/// keep their own delete/insert classification.
pub fn build_table(a: &str, b: &str) -> Vec<DiffRow> {
    let old_lines: Vec<&str> = a.lines().collect();
    let new_lines: Vec<&str> = b.lines().collect();
    let aligner = SequenceAligner::new(&old_lines, &new_lines);

    let mut rows = Vec::new();
    for op in aligner.opcodes() {
        match op.kind {
            OpKind::Equal => {
                for (i, j) in op.a.clone().zip(op.b.clone()) {
                    rows.push(row(OpKind::Equal, Some(i), Some(j), &old_lines, &new_lines));
                }
            }
            OpKind::Delete => {
                for i in op.a.clone() {
                    rows.push(row(OpKind::Delete, Some(i), None, &old_lines, &new_lines));
                }
            }
            OpKind::Insert => {
                for j in op.b.clone() {
                    rows.push(row(OpKind::Insert, None, Some(j), &old_lines, &new_lines));
                }
            }
            OpKind::Replace => {
                let count = op.a.len().max(op.b.len());
                for k in 0..count {
                    let i = op.a.start + k;
                    let j = op.b.start + k;
                    let (kind, old, new) = if i < op.a.end && j < op.b.end {
                        (OpKind::Replace, Some(i), Some(j))
                    } else if i < op.a.end {
                        (OpKind::Delete, Some(i), None)
                    } else {
                        (OpKind::Insert, None, Some(j))
                    };
                    rows.push(row(kind, old, new, &old_lines, &new_lines));
                }
            }
        }
    }
    rows
}

fn row(
    kind: OpKind,
    old: Option<usize>,
    new: Option<usize>,
    old_lines: &[&str],
    new_lines: &[&str],
) -> DiffRow {
    DiffRow {
        kind,
        old_line: old.map(|i| i + 1),
        old_text: old.and_then(|i| old_lines.get(i).map(|line| (*line).to_string())),
        new_line: new.map(|j| j + 1),
        new_text: new.and_then(|j| new_lines.get(j).map(|line| (*line).to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_texts_all_equal_rows() {
        let rows = build_table("a\nb\n", "a\nb\n");
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.kind == OpKind::Equal));
        assert_eq!(rows[1].old_line, Some(2));
        assert_eq!(rows[1].new_line, Some(2));
    }

    #[test]
    fn test_replace_pairs_lines() {
        let rows = build_table("one\ntwo\nthree\n", "one\n2\nthree\n");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].kind, OpKind::Replace);
        assert_eq!(rows[1].old_text.as_deref(), Some("two"));
        assert_eq!(rows[1].new_text.as_deref(), Some("2"));
    }

    #[test]
    fn test_unbalanced_replace_classifies_leftovers() {
        let rows = build_table("x\ny\n", "z\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind, OpKind::Replace);
        assert_eq!(rows[1].kind, OpKind::Delete);
        assert_eq!(rows[1].old_text.as_deref(), Some("y"));
        assert_eq!(rows[1].new_line, None);
    }

    #[test]
    fn test_insertion_rows() {
        let rows = build_table("a\nc\n", "a\nb\nc\n");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].kind, OpKind::Insert);
        assert_eq!(rows[1].old_line, None);
        assert_eq!(rows[1].new_line, Some(2));
        assert_eq!(rows[1].new_text.as_deref(), Some("b"));
    }
}
