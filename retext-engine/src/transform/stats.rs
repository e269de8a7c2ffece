//! Run statistics accumulators.

use serde::{Deserialize, Serialize};

/// Counters for one transformation pass.
///
/// Each pass returns its own accumulator; callers fold accumulators
/// together across rounds instead of sharing mutable state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Rules in the pass, including skipped ones.
    pub rules_total: usize,
    /// Rules that compiled and ran to completion.
    pub rules_applied: usize,
    /// Rules skipped because their pattern failed to compile.
    pub rules_skipped: usize,
    /// Matches processed.
    pub matches: usize,
    /// Insert records emitted.
    pub inserts: usize,
    /// Delete records emitted.
    pub deletes: usize,
    /// Matches whose replacement fell back to the literal template.
    pub template_fallbacks: usize,
}

impl RunStats {
    /// Fold another pass's counters into this one.
    pub fn merge(&mut self, other: &RunStats) {
        self.rules_total += other.rules_total;
        self.rules_applied += other.rules_applied;
        self.rules_skipped += other.rules_skipped;
        self.matches += other.matches;
        self.inserts += other.inserts;
        self.deletes += other.deletes;
        self.template_fallbacks += other.template_fallbacks;
    }
}
