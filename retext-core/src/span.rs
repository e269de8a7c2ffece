//! Half-open byte spans, tagged highlights, and range merging.

use serde::{Deserialize, Serialize};

/// Half-open byte interval `[start, end)` into a reference text.
///
/// Offsets always fall on char boundaries of that text, so a span can be
/// sliced out of its reference without further checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span. `start` must not exceed `end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} exceeds end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shift both bounds right by `offset`.
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

/// Highlight classification for a tagged span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Insert,
    Delete,
}

/// A span tagged as inserted or deleted content.
///
/// Recomputed on every run, never persisted. Delete spans address the
/// merged buffer; insert spans address the live transformed text (see the
/// merge view builder in the engine crate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSpan {
    pub kind: SpanKind,
    pub span: Span,
}

/// Coalesce spans into a sorted, ascending, non-overlapping list.
///
/// Touching spans (`next.start == current.end`) merge as well. Idempotent:
/// merging an already merged list returns it unchanged.
pub fn merge_spans(mut spans: Vec<Span>) -> Vec<Span> {
    if spans.is_empty() {
        return spans;
    }
    spans.sort_unstable();
    let mut merged = Vec::with_capacity(spans.len());
    let mut current = spans[0];
    for span in spans.into_iter().skip(1) {
        if span.start <= current.end {
            current.end = current.end.max(span.end);
        } else {
            merged.push(current);
            current = span;
        }
    }
    merged.push(current);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_empty() {
        assert!(merge_spans(vec![]).is_empty());
    }

    #[test]
    fn test_merge_overlapping() {
        let spans = vec![Span::new(0, 3), Span::new(2, 5), Span::new(7, 9)];
        assert_eq!(
            merge_spans(spans),
            vec![Span::new(0, 5), Span::new(7, 9)]
        );
    }

    #[test]
    fn test_merge_touching() {
        let spans = vec![Span::new(0, 1), Span::new(1, 2), Span::new(3, 4)];
        assert_eq!(
            merge_spans(spans),
            vec![Span::new(0, 2), Span::new(3, 4)]
        );
    }

    #[test]
    fn test_merge_unsorted_input() {
        let spans = vec![Span::new(5, 6), Span::new(0, 2), Span::new(1, 4)];
        assert_eq!(
            merge_spans(spans),
            vec![Span::new(0, 4), Span::new(5, 6)]
        );
    }

    #[test]
    fn test_merge_contained() {
        let spans = vec![Span::new(0, 10), Span::new(2, 4)];
        assert_eq!(merge_spans(spans), vec![Span::new(0, 10)]);
    }

    #[test]
    fn test_merge_idempotent() {
        let spans = vec![Span::new(0, 3), Span::new(3, 5), Span::new(8, 9)];
        let once = merge_spans(spans);
        let twice = merge_spans(once.clone());
        assert_eq!(once, twice);
    }
}
