//! Intraline refinement configuration.

use serde::{Deserialize, Serialize};

/// Cost guards for the intraline refinement pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RefineConfig {
    /// Changed-line budget above which refinement is skipped entirely and
    /// coarse spans are returned. Default: 300.
    pub max_changed_lines: Option<usize>,
    /// Line length (bytes) above which an individual pair is not aligned
    /// and its destination line is tagged as inserted whole. Default: 2000.
    pub max_line_len: Option<usize>,
}

impl RefineConfig {
    /// Effective global changed-line budget, defaulting to 300.
    pub fn effective_max_changed_lines(&self) -> usize {
        self.max_changed_lines.unwrap_or(300)
    }

    /// Effective per-line length cap, defaulting to 2000.
    pub fn effective_max_line_len(&self) -> usize {
        self.max_line_len.unwrap_or(2000)
    }
}
