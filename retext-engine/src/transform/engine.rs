//! Ordered rule application over a single owned buffer per pass.

use regex::{Regex, RegexBuilder};
use retext_core::cancel::CancelToken;
use retext_core::changelog::{now_utc_iso, ChangeRecord, Provenance};
use retext_core::config::TransformConfig;
use retext_core::events::{
    EventDispatcher, RuleProgressEvent, RuleSkippedEvent, TransformCompleteEvent,
    TransformStartedEvent,
};
use tracing::{debug, warn};

use super::stats::RunStats;
use super::template::Template;
use crate::rules::{Rule, RuleFlag};

/// Inputs shared by every rule in one application pass.
pub struct ApplyContext<'a> {
    /// Round identifier attributed to every emitted record.
    pub round: u32,
    pub cancel: &'a CancelToken,
    pub events: &'a EventDispatcher,
    pub config: &'a TransformConfig,
}

/// Result of one application pass.
#[derive(Debug)]
pub struct ApplyOutcome {
    /// The transformed text. When `cancelled` is set this is the text
    /// built up to the cancellation point with the unprocessed remainder
    /// passed through unchanged.
    pub output: String,
    /// Insert/delete records in emission order.
    pub records: Vec<ChangeRecord>,
    pub stats: RunStats,
    pub cancelled: bool,
}

/// Apply `rules` in file order to `input`.
///
/// Each rule performs one left-to-right scan of the text as transformed by
/// all prior rules, splicing matches into a fresh owned buffer. A rule
/// whose pattern fails to compile is skipped with a warning; the remaining
/// rules still run. Cancellation is honored only at match boundaries and
/// between rules, never mid-match.
pub fn apply(rules: &[Rule], input: &str, ctx: &ApplyContext<'_>) -> ApplyOutcome {
    let mut stats = RunStats {
        rules_total: rules.len(),
        ..RunStats::default()
    };
    let mut records = Vec::new();
    let mut current = input.to_string();
    let mut cancelled = false;

    ctx.events.emit_transform_started(&TransformStartedEvent {
        round: ctx.round,
        rule_count: rules.len(),
        input_len: input.len(),
    });

    for (index, rule) in rules.iter().enumerate() {
        if ctx.cancel.is_cancelled() {
            cancelled = true;
            break;
        }

        let regex = match compile(rule) {
            Ok(regex) => regex,
            Err(err) => {
                warn!(
                    rule = index,
                    pattern = %rule.pattern,
                    error = %err,
                    "pattern failed to compile; rule skipped"
                );
                ctx.events.emit_rule_skipped(&RuleSkippedEvent {
                    rule_index: index,
                    pattern: rule.pattern.clone(),
                    message: err.to_string(),
                });
                stats.rules_skipped += 1;
                continue;
            }
        };

        // A malformed template forces the literal fallback for every
        // match of this rule, matching the per-match expansion fallback.
        let template = Template::parse(&rule.replacement).ok();

        let provenance = Provenance {
            round: Some(ctx.round),
            pattern_index: Some(index),
            pattern: Some(rule.pattern.clone()),
            replacement: Some(rule.replacement.clone()),
        };

        let (next, rule_cancelled) = apply_rule(
            &regex,
            template.as_ref(),
            rule,
            &provenance,
            &current,
            index,
            ctx,
            &mut records,
            &mut stats,
        );
        if let Some(next) = next {
            current = next;
        }
        if rule_cancelled {
            cancelled = true;
            break;
        }
        stats.rules_applied += 1;
    }

    ctx.events.emit_transform_complete(&TransformCompleteEvent {
        round: ctx.round,
        output_len: current.len(),
        record_count: records.len(),
        cancelled,
    });
    debug!(
        round = ctx.round,
        rules = rules.len(),
        matches = stats.matches,
        records = records.len(),
        cancelled,
        "transformation pass finished"
    );

    ApplyOutcome {
        output: current,
        records,
        stats,
        cancelled,
    }
}

/// Run one rule over `current`. Returns the rebuilt text (`None` when the
/// rule matched nothing) and whether cancellation interrupted the scan.
#[allow(clippy::too_many_arguments)]
fn apply_rule(
    regex: &Regex,
    template: Option<&Template>,
    rule: &Rule,
    provenance: &Provenance,
    current: &str,
    rule_index: usize,
    ctx: &ApplyContext<'_>,
    records: &mut Vec<ChangeRecord>,
    stats: &mut RunStats,
) -> (Option<String>, bool) {
    // The scan is resolved before splicing so the rule sees one stable
    // snapshot of the text and progress can report a total.
    let matches: Vec<regex::Captures<'_>> = regex.captures_iter(current).collect();
    let total = matches.len();
    if total == 0 {
        ctx.events.emit_rule_progress(&RuleProgressEvent {
            rule_index,
            processed: 0,
            total: 0,
        });
        return (None, false);
    }

    let progress_every = ctx.config.effective_progress_interval();
    let mut next = String::with_capacity(current.len());
    let mut last_end = 0usize;
    let mut processed = 0usize;

    ctx.events.emit_rule_progress(&RuleProgressEvent {
        rule_index,
        processed: 0,
        total,
    });

    for caps in &matches {
        // Safe point: between matches only, never mid-match.
        if ctx.cancel.is_cancelled() {
            next.push_str(&current[last_end..]);
            ctx.events.emit_rule_progress(&RuleProgressEvent {
                rule_index,
                processed,
                total,
            });
            return (Some(next), true);
        }

        let Some(matched) = caps.get(0) else { continue };
        let (start, end) = (matched.start(), matched.end());
        next.push_str(&current[last_end..start]);

        let replacement = match template {
            Some(template) => template.expand(caps).unwrap_or_else(|err| {
                stats.template_fallbacks += 1;
                debug!(
                    rule = rule_index,
                    error = %err,
                    "template expansion failed; literal replacement used"
                );
                rule.replacement.clone()
            }),
            None => {
                stats.template_fallbacks += 1;
                rule.replacement.clone()
            }
        };

        let timestamp = now_utc_iso();
        if start < end {
            records.push(ChangeRecord::delete(
                &timestamp,
                provenance,
                start,
                matched.as_str(),
            ));
            stats.deletes += 1;
        }
        if !replacement.is_empty() {
            records.push(ChangeRecord::insert(
                &timestamp,
                provenance,
                start,
                &replacement,
            ));
            stats.inserts += 1;
        }

        next.push_str(&replacement);
        last_end = end;
        processed += 1;
        stats.matches += 1;

        if processed % progress_every == 0 || processed == total {
            ctx.events.emit_rule_progress(&RuleProgressEvent {
                rule_index,
                processed,
                total,
            });
        }
    }

    next.push_str(&current[last_end..]);
    (Some(next), false)
}

/// Compile a rule's pattern with its flags applied.
fn compile(rule: &Rule) -> Result<Regex, regex::Error> {
    let mut builder = RegexBuilder::new(&rule.pattern);
    for flag in rule.flags.iter() {
        match flag {
            RuleFlag::IgnoreCase => builder.case_insensitive(true),
            RuleFlag::MultiLine => builder.multi_line(true),
            RuleFlag::DotAll => builder.dot_matches_new_line(true),
            RuleFlag::Verbose => builder.ignore_whitespace(true),
            RuleFlag::Ascii => builder.unicode(false),
        };
    }
    builder.build()
}
