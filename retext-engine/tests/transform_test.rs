//! Transformation engine tests: ordered application, records, recovery,
//! and cooperative cancellation.

use std::sync::Arc;

use retext_core::cancel::CancelToken;
use retext_core::changelog::{replay, ChangeKind};
use retext_core::config::TransformConfig;
use retext_core::events::{EventDispatcher, EventHandler, RuleProgressEvent};
use retext_engine::rules::parse_rules;
use retext_engine::transform::{apply, ApplyContext, ApplyOutcome};

fn run(rule_source: &str, input: &str) -> ApplyOutcome {
    let cancel = CancelToken::new();
    let events = EventDispatcher::new();
    let config = TransformConfig::default();
    let parsed = parse_rules(rule_source);
    assert!(parsed.errors.is_empty(), "unexpected parse errors");
    let ctx = ApplyContext {
        round: 1,
        cancel: &cancel,
        events: &events,
        config: &config,
    };
    apply(&parsed.rules, input, &ctx)
}

#[test]
fn test_empty_rule_set_is_identity() {
    let outcome = run("", "any text\nat all");
    assert_eq!(outcome.output, "any text\nat all");
    assert!(outcome.records.is_empty());
    assert!(!outcome.cancelled);
}

#[test]
fn test_backreference_replacement() {
    let outcome = run(r"foo(\d+) -> bar\1", "foo123 and foo9");
    assert_eq!(outcome.output, "bar123 and bar9");

    let kinds: Vec<(ChangeKind, &str)> = outcome
        .records
        .iter()
        .map(|r| (r.kind, r.text.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (ChangeKind::Delete, "foo123"),
            (ChangeKind::Insert, "bar123"),
            (ChangeKind::Delete, "foo9"),
            (ChangeKind::Insert, "bar9"),
        ]
    );
    // Positions refer to the text this rule scanned.
    assert_eq!(outcome.records[0].pos, 0);
    assert_eq!(outcome.records[2].pos, 11);
    // Both records of one match share provenance and position.
    assert_eq!(outcome.records[0].pos, outcome.records[1].pos);
    assert_eq!(outcome.records[0].pattern_index, Some(0));
    assert_eq!(outcome.records[0].round, Some(1));
}

#[test]
fn test_empty_replacement_removes_match_case_insensitively() {
    let outcome = run("TODO:.* -> ## flags: IGNORECASE", "x\ntodo: fix\ny");
    assert_eq!(outcome.output, "x\n\ny");
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].kind, ChangeKind::Delete);
    assert_eq!(outcome.records[0].text, "todo: fix");
}

#[test]
fn test_rules_apply_in_order_over_prior_output() {
    let outcome = run("a+ -> (\\0)\n\\d+ -> num\n", "aa1 b22");
    assert_eq!(outcome.output, "(aa)num bnum");
}

#[test]
fn test_compile_error_skips_rule_and_continues() {
    let outcome = run("[ -> broken\nb -> c\n", "ab");
    assert_eq!(outcome.output, "ac");
    assert_eq!(outcome.stats.rules_skipped, 1);
    assert_eq!(outcome.stats.rules_applied, 1);
}

#[test]
fn test_unmatched_group_falls_back_to_literal_template() {
    let outcome = run(r"(a)(b)? -> \2x", "a");
    assert_eq!(outcome.output, r"\2x");
    assert_eq!(outcome.stats.template_fallbacks, 1);
}

#[test]
fn test_line_anchors_match_at_line_boundaries() {
    // `^` matches every line start even though no flag was written.
    let outcome = run("^ -> >", "one\ntwo");
    assert_eq!(outcome.output, ">one\n>two");
}

#[test]
fn test_replay_reconstructs_output_without_regex() {
    let input = "foo1 foo22 bar\nTODO: drop\nfoo3";
    let outcome = run("foo(\\d+) -> bar\\1\nTODO:.* -> \nbar -> BAR\n", input);
    assert_eq!(replay(input, &outcome.records).unwrap(), outcome.output);
}

#[test]
fn test_empty_match_emits_insert_only() {
    let outcome = run("^ -> >", "x");
    assert_eq!(outcome.output, ">x");
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].kind, ChangeKind::Insert);
    assert_eq!(outcome.records[0].length, 1);
    assert_eq!(replay("x", &outcome.records).unwrap(), ">x");
}

struct CancelOnProgress {
    token: CancelToken,
    after: usize,
}

impl EventHandler for CancelOnProgress {
    fn on_rule_progress(&self, event: &RuleProgressEvent) {
        if event.processed >= self.after {
            self.token.cancel();
        }
    }
}

#[test]
fn test_cancellation_at_match_boundary_returns_partial_result() {
    let cancel = CancelToken::new();
    let mut events = EventDispatcher::new();
    events.register(Arc::new(CancelOnProgress {
        token: cancel.clone(),
        after: 1,
    }));
    let config = TransformConfig {
        progress_interval: Some(1),
    };
    let parsed = parse_rules("a -> X");
    let ctx = ApplyContext {
        round: 1,
        cancel: &cancel,
        events: &events,
        config: &config,
    };

    let outcome = apply(&parsed.rules, "a a a", &ctx);
    assert!(outcome.cancelled);
    // First match processed, remainder passed through unchanged.
    assert_eq!(outcome.output, "X a a");
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.stats.matches, 1);
}

#[test]
fn test_cancellation_before_start_is_identity() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let events = EventDispatcher::new();
    let config = TransformConfig::default();
    let parsed = parse_rules("a -> X");
    let ctx = ApplyContext {
        round: 1,
        cancel: &cancel,
        events: &events,
        config: &config,
    };

    let outcome = apply(&parsed.rules, "aaa", &ctx);
    assert!(outcome.cancelled);
    assert_eq!(outcome.output, "aaa");
    assert!(outcome.records.is_empty());
}
