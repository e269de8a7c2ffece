//! End-to-end pipeline tests: rule source in, renderable views out.

use retext_core::cancel::CancelToken;
use retext_core::changelog::{read_log, replay, LogWriter};
use retext_core::config::RetextConfig;
use retext_core::events::EventDispatcher;
use retext_core::span::Span;
use retext_engine::align::OpKind;
use retext_engine::export::build_table;
use retext_engine::pipeline::{run, PipelineContext, PipelineOutput};
use retext_engine::rules::parse_rules;

fn run_pipeline(rule_source: &str, input: &str) -> PipelineOutput {
    let config = RetextConfig::default();
    let cancel = CancelToken::new();
    let events = EventDispatcher::new();
    let parsed = parse_rules(rule_source);
    assert!(parsed.errors.is_empty());
    let ctx = PipelineContext {
        round: 1,
        config: &config,
        cancel: &cancel,
        events: &events,
    };
    run(&parsed.rules, input, &ctx)
}

#[test]
fn test_full_pass_produces_renderable_views() {
    let input = "foo123 and foo9";
    let out = run_pipeline(r"foo(\d+) -> bar\1", input);

    assert_eq!(out.output, "bar123 and bar9");
    assert!(!out.cancelled);

    // Merged buffer keeps deleted content in place, before each insertion.
    assert_eq!(out.merged_text, "foobar123 and foobar9");
    assert_eq!(out.del_spans, vec![Span::new(0, 3), Span::new(14, 17)]);
    for span in &out.del_spans {
        assert_eq!(&out.merged_text[span.start..span.end], "foo");
    }

    // Insertion spans address the live output text.
    assert_eq!(out.ins_spans, vec![Span::new(0, 3), Span::new(11, 14)]);
    for span in &out.ins_spans {
        assert_eq!(&out.output[span.start..span.end], "bar");
    }
}

#[test]
fn test_records_replay_and_persist() {
    let input = "alpha 12\nbeta 34\n";
    let out = run_pipeline("(\\d)(\\d) -> \\2\\1\nalpha -> ALPHA\n", input);

    assert_eq!(out.output, "ALPHA 21\nbeta 43\n");
    assert_eq!(replay(input, &out.records).unwrap(), out.output);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("changes.jsonl");
    LogWriter::open(&path).unwrap().write_batch(&out.records).unwrap();
    assert_eq!(read_log(&path).unwrap(), out.records);
}

#[test]
fn test_export_table_preserves_line_classification() {
    let input = "keep\nfoo123\nkeep\n";
    let out = run_pipeline(r"foo(\d+) -> bar\1", input);
    let rows = build_table(input, &out.output);

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].kind, OpKind::Equal);
    assert_eq!(rows[1].kind, OpKind::Replace);
    assert_eq!(rows[1].old_text.as_deref(), Some("foo123"));
    assert_eq!(rows[1].new_text.as_deref(), Some("bar123"));
    assert_eq!(rows[2].kind, OpKind::Equal);

    // Rows serialize for the shell's export writer.
    let json = serde_json::to_string(&rows[1]).unwrap();
    assert!(json.contains(r#""kind":"replace""#));
}

#[test]
fn test_no_op_rules_yield_clean_views() {
    let input = "nothing matches here";
    let out = run_pipeline("zzz -> yyy", input);
    assert_eq!(out.output, input);
    assert_eq!(out.merged_text, input);
    assert!(out.records.is_empty());
    assert!(out.del_spans.is_empty());
    assert!(out.ins_spans.is_empty());
    assert_eq!(out.ops.len(), 1);
    assert_eq!(out.ops[0].kind, OpKind::Equal);
}

#[test]
fn test_cancelled_run_is_well_formed() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let config = RetextConfig::default();
    let events = EventDispatcher::new();
    let parsed = parse_rules("a -> X");
    let ctx = PipelineContext {
        round: 1,
        config: &config,
        cancel: &cancel,
        events: &events,
    };
    let out = run(&parsed.rules, "aaa", &ctx);

    assert!(out.cancelled);
    assert_eq!(out.output, "aaa");
    assert_eq!(out.merged_text, "aaa");
    assert!(out.records.is_empty());
    assert!(out.del_spans.is_empty());
    assert!(out.ins_spans.is_empty());
}

#[test]
fn test_run_source_surfaces_bad_lines_without_aborting() {
    let config = RetextConfig::default();
    let cancel = CancelToken::new();
    let events = EventDispatcher::new();
    let ctx = PipelineContext {
        round: 1,
        config: &config,
        cancel: &cancel,
        events: &events,
    };
    let (out, parsed) = retext_engine::pipeline::run_source("-> bad\nfoo -> bar\n", "foo", &ctx);
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.rules.len(), 1);
    assert_eq!(out.output, "bar");
}

#[test]
fn test_multiline_edit_views_stay_consistent() {
    let input = "one\ntwo\nthree\n";
    let out = run_pipeline("two -> 2\nthree -> ", input);
    assert_eq!(out.output, "one\n2\n\n");

    // Every span must slice its reference text cleanly.
    for span in &out.del_spans {
        let _ = &out.merged_text[span.start..span.end];
    }
    for span in &out.ins_spans {
        let _ = &out.output[span.start..span.end];
    }
    assert_eq!(replay(input, &out.records).unwrap(), out.output);
}
