//! Merged view: one buffer retaining both removed and inserted content.

use retext_core::span::{Span, SpanKind, TaggedSpan};

use crate::align::{AlignOp, OpKind};

/// The combined text plus highlight spans.
///
/// Delete spans address `text` (the merged buffer, for strike-through
/// rendering); insert spans address the live transformed text `b`, so an
/// editor can highlight insertions without re-deriving alignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedView {
    pub text: String,
    pub spans: Vec<TaggedSpan>,
}

impl MergedView {
    /// Deletion spans, merged-buffer coordinates.
    pub fn delete_spans(&self) -> Vec<Span> {
        self.spans
            .iter()
            .filter(|tagged| tagged.kind == SpanKind::Delete)
            .map(|tagged| tagged.span)
            .collect()
    }

    /// Insertion spans, live-text coordinates.
    pub fn insert_spans(&self) -> Vec<Span> {
        self.spans
            .iter()
            .filter(|tagged| tagged.kind == SpanKind::Insert)
            .map(|tagged| tagged.span)
            .collect()
    }
}

/// Build the merged view from `a`, `b`, and their alignment.
///
/// Equal copies `a`'s slice untagged. Delete copies `a`'s slice and tags
/// its position in the merged buffer. Insert copies `b`'s slice and tags
/// it with the span into `b` itself. Replace emits the delete then the
/// insert, slices appended in that order.
pub fn build_merged(a: &str, b: &str, ops: &[AlignOp]) -> MergedView {
    let mut text = String::with_capacity(a.len() + b.len() / 4);
    let mut spans = Vec::new();
    for op in ops {
        match op.kind {
            OpKind::Equal => text.push_str(&a[op.source.start..op.source.end]),
            OpKind::Delete => push_delete(&mut text, &mut spans, &a[op.source.start..op.source.end]),
            OpKind::Insert => push_insert(&mut text, &mut spans, &b[op.dest.start..op.dest.end], op.dest),
            OpKind::Replace => {
                push_delete(&mut text, &mut spans, &a[op.source.start..op.source.end]);
                push_insert(&mut text, &mut spans, &b[op.dest.start..op.dest.end], op.dest);
            }
        }
    }
    MergedView { text, spans }
}

fn push_delete(text: &mut String, spans: &mut Vec<TaggedSpan>, slice: &str) {
    let start = text.len();
    text.push_str(slice);
    spans.push(TaggedSpan {
        kind: SpanKind::Delete,
        span: Span::new(start, text.len()),
    });
}

fn push_insert(text: &mut String, spans: &mut Vec<TaggedSpan>, slice: &str, dest: Span) {
    text.push_str(slice);
    spans.push(TaggedSpan {
        kind: SpanKind::Insert,
        span: dest,
    });
}

/// Translate sorted spans expressed in `a` coordinates into merged-buffer
/// coordinates.
///
/// The merged buffer contains all of `a` in order with `b`'s insertions
/// spliced in, so an `a` position shifts right by the length of every
/// insertion emitted before it. An insertion point splits exactly between
/// a span ending there (kept before the insertion) and a span starting
/// there (pushed after it).
pub fn translate_to_merged(ops: &[AlignOp], spans: &[Span]) -> Vec<Span> {
    // (a-position, inserted length emitted once `a` is copied up to it)
    let inserts: Vec<(usize, usize)> = ops
        .iter()
        .filter(|op| {
            matches!(op.kind, OpKind::Insert | OpKind::Replace) && !op.dest.is_empty()
        })
        .map(|op| (op.source.end, op.dest.len()))
        .collect();

    spans
        .iter()
        .map(|span| {
            let end_shift: usize = inserts
                .iter()
                .take_while(|(at, _)| *at < span.end)
                .map(|(_, len)| len)
                .sum();
            if span.is_empty() {
                return Span::new(span.start + end_shift, span.end + end_shift);
            }
            let start_shift: usize = inserts
                .iter()
                .take_while(|(at, _)| *at <= span.start)
                .map(|(_, len)| len)
                .sum();
            Span::new(span.start + start_shift, span.end + end_shift)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::align::align;

    use super::*;

    #[test]
    fn test_merged_keeps_deleted_content_visible() {
        let a = "keep old keep";
        let b = "keep new keep";
        let ops = align(a, b);
        let view = build_merged(a, b, &ops);

        assert!(view.text.contains("old"));
        assert!(view.text.contains("new"));
        for span in view.delete_spans() {
            // Deletion spans slice the merged buffer.
            let _ = &view.text[span.start..span.end];
        }
        for span in view.insert_spans() {
            // Insertion spans slice the live text.
            let _ = &b[span.start..span.end];
        }
    }

    #[test]
    fn test_replace_orders_delete_before_insert() {
        let a = "abc";
        let b = "xyz";
        let ops = align(a, b);
        let view = build_merged(a, b, &ops);
        assert_eq!(view.text, "abcxyz");
        assert_eq!(view.spans.len(), 2);
        assert_eq!(view.spans[0].kind, SpanKind::Delete);
        assert_eq!(view.spans[0].span, Span::new(0, 3));
        assert_eq!(view.spans[1].kind, SpanKind::Insert);
        assert_eq!(view.spans[1].span, Span::new(0, 3));
    }

    #[test]
    fn test_pure_insertion_span_addresses_live_text() {
        let a = "ac";
        let b = "abc";
        let ops = align(a, b);
        let view = build_merged(a, b, &ops);
        assert_eq!(view.text, "abc");
        let ins = view.insert_spans();
        assert_eq!(ins, vec![Span::new(1, 2)]);
        assert_eq!(&b[ins[0].start..ins[0].end], "b");
    }

    #[test]
    fn test_translate_shifts_past_insertions() {
        let a = "foo123 and foo9";
        let b = "bar123 and bar9";
        let ops = align(a, b);
        // Deletions of both "foo" occurrences, in `a` coordinates.
        let spans = vec![Span::new(0, 3), Span::new(11, 14)];
        let translated = translate_to_merged(&ops, &spans);

        let view = build_merged(a, b, &ops);
        assert_eq!(view.text, "foobar123 and foobar9");
        assert_eq!(translated, vec![Span::new(0, 3), Span::new(14, 17)]);
        assert_eq!(&view.text[14..17], "foo");
    }

    #[test]
    fn test_translate_without_insertions_is_identity() {
        let a = "abcdef";
        let b = "abef";
        let ops = align(a, b);
        let spans = vec![Span::new(2, 4)];
        assert_eq!(translate_to_merged(&ops, &spans), spans);
    }
}
