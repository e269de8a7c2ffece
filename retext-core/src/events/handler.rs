//! Progress event handler trait.

use super::types::*;

/// Receiver for progress events from a transformation pass.
///
/// All methods default to no-ops so handlers implement only what they
/// observe.
pub trait EventHandler: Send + Sync {
    fn on_transform_started(&self, _event: &TransformStartedEvent) {}
    fn on_rule_progress(&self, _event: &RuleProgressEvent) {}
    fn on_rule_skipped(&self, _event: &RuleSkippedEvent) {}
    fn on_transform_complete(&self, _event: &TransformCompleteEvent) {}
    fn on_refine_skipped(&self, _event: &RefineSkippedEvent) {}
}
