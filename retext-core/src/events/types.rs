//! Event payload types.

/// Payload for `on_transform_started`.
#[derive(Debug, Clone)]
pub struct TransformStartedEvent {
    pub round: u32,
    pub rule_count: usize,
    pub input_len: usize,
}

/// Payload for `on_rule_progress`.
///
/// `total` is the number of matches the current rule will process; 0 means
/// the rule produced no measurable work.
#[derive(Debug, Clone)]
pub struct RuleProgressEvent {
    pub rule_index: usize,
    pub processed: usize,
    pub total: usize,
}

/// Payload for `on_rule_skipped` (compile failure).
#[derive(Debug, Clone)]
pub struct RuleSkippedEvent {
    pub rule_index: usize,
    pub pattern: String,
    pub message: String,
}

/// Payload for `on_transform_complete`.
#[derive(Debug, Clone)]
pub struct TransformCompleteEvent {
    pub round: u32,
    pub output_len: usize,
    pub record_count: usize,
    pub cancelled: bool,
}

/// Payload for `on_refine_skipped` (global cost guard tripped).
#[derive(Debug, Clone)]
pub struct RefineSkippedEvent {
    pub changed_lines: usize,
    pub threshold: usize,
}
