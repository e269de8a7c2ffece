//! The full transformation pipeline: rules in, renderable spans out.
//!
//! Rule Parser → Transformation Engine → {Change Log, output text} →
//! Alignment Engine → Merge View Builder → Intraline Refiner →
//! Range Merger → renderer-facing spans.
//!
//! Every stage is a pure function of its explicit inputs. Callers own
//! threading and must not run more than one pass against a document at a
//! time; the change log expects a single writer per document.

use retext_core::cancel::CancelToken;
use retext_core::changelog::ChangeRecord;
use retext_core::config::RetextConfig;
use retext_core::events::{EventDispatcher, RefineSkippedEvent};
use retext_core::span::Span;
use tracing::debug;

use crate::align::{align, AlignOp};
use crate::merge::{build_merged, translate_to_merged};
use crate::refine::{refine, RefineStats};
use crate::rules::{parse_rules, ParsedRules, Rule};
use crate::transform::{apply, ApplyContext, RunStats};

/// Everything a shell supplies for one pass against one document.
pub struct PipelineContext<'a> {
    /// Round identifier attributed to this pass's records.
    pub round: u32,
    pub config: &'a RetextConfig,
    pub cancel: &'a CancelToken,
    pub events: &'a EventDispatcher,
}

/// Renderer-facing result of one pass.
#[derive(Debug)]
pub struct PipelineOutput {
    /// The transformed text.
    pub output: String,
    /// Ordered change records; persist via `retext_core::changelog::LogWriter`.
    pub records: Vec<ChangeRecord>,
    /// Merged buffer retaining deleted content.
    pub merged_text: String,
    /// Deletion highlights, merged-buffer coordinates.
    pub del_spans: Vec<Span>,
    /// Insertion highlights, `output` coordinates.
    pub ins_spans: Vec<Span>,
    /// Whole-document alignment, for downstream consumers.
    pub ops: Vec<AlignOp>,
    pub stats: RunStats,
    pub refine_stats: RefineStats,
    pub cancelled: bool,
}

/// Parse rule source text and run the whole pipeline for one document.
///
/// The shell's entry point: it hands over rule source, input text, the
/// cancellation signal, and a round identifier. Unparseable rule lines
/// are returned alongside the output; they never abort the pass.
pub fn run_source(
    rule_source: &str,
    input: &str,
    ctx: &PipelineContext<'_>,
) -> (PipelineOutput, ParsedRules) {
    let parsed = parse_rules(rule_source);
    let output = run(&parsed.rules, input, ctx);
    (output, parsed)
}

/// Run the whole pipeline for one document.
///
/// Never fails: compile errors skip their rule, expansion errors fall
/// back to the literal template, and cancellation yields a well-formed
/// partial result.
pub fn run(rules: &[Rule], input: &str, ctx: &PipelineContext<'_>) -> PipelineOutput {
    let apply_ctx = ApplyContext {
        round: ctx.round,
        cancel: ctx.cancel,
        events: ctx.events,
        config: &ctx.config.transform,
    };
    let outcome = apply(rules, input, &apply_ctx);

    let ops = align(input, &outcome.output);
    let merged = build_merged(input, &outcome.output, &ops);

    let refined = refine(input, &outcome.output, &ops, &ctx.config.refine, ctx.cancel);
    if refined.stats.coarse_fallback {
        ctx.events.emit_refine_skipped(&RefineSkippedEvent {
            changed_lines: refined.stats.changed_lines,
            threshold: ctx.config.refine.effective_max_changed_lines(),
        });
    }

    // Refined deletions address `input`; the renderer strikes them
    // through in the merged buffer.
    let del_spans = translate_to_merged(&ops, &refined.del_spans);

    debug!(
        round = ctx.round,
        output_len = outcome.output.len(),
        records = outcome.records.len(),
        del_spans = del_spans.len(),
        ins_spans = refined.ins_spans.len(),
        cancelled = outcome.cancelled,
        "pipeline pass complete"
    );

    PipelineOutput {
        output: outcome.output,
        records: outcome.records,
        merged_text: merged.text,
        del_spans,
        ins_spans: refined.ins_spans,
        ops,
        stats: outcome.stats,
        refine_stats: refined.stats,
        cancelled: outcome.cancelled,
    }
}
