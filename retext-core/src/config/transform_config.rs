//! Transformation pass configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the transformation engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TransformConfig {
    /// Emit a progress event every this many matches. Default: 200.
    pub progress_interval: Option<usize>,
}

impl TransformConfig {
    /// Effective progress interval, defaulting to 200 matches.
    pub fn effective_progress_interval(&self) -> usize {
        self.progress_interval.unwrap_or(200).max(1)
    }
}
