//! retext-engine: Pattern-based text transformation with change tracking
//! and a diff/merge visualization pipeline.
//!
//! - Rules: line-oriented rule parsing (`pattern -> replacement ## flags`)
//! - Transform: ordered rule application emitting per-match change records
//! - Align: longest-matching-block edit scripts between two texts
//! - Merge: combined "merged" view with deletion/insertion highlights
//! - Refine: guarded intraline second-pass alignment
//! - Export: line-level tabular diff rows
//! - Edits: capture of manual edits as provenance-free records
//! - Pipeline: rules in, renderer-facing text and spans out

pub mod align;
pub mod edits;
pub mod export;
pub mod merge;
pub mod pipeline;
pub mod refine;
pub mod rules;
pub mod transform;

// Re-exports for convenience
pub use align::{align, AlignOp, OpKind, SequenceAligner};
pub use edits::record_edits;
pub use export::{build_table, DiffRow};
pub use merge::{build_merged, translate_to_merged, MergedView};
pub use pipeline::{run, run_source, PipelineContext, PipelineOutput};
pub use refine::{refine, Refined, RefineStats};
pub use rules::{load_rules, parse_rule, parse_rules, FlagSet, ParsedRules, Rule, RuleFlag};
pub use transform::{apply, ApplyContext, ApplyOutcome, RunStats};
