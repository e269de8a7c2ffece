//! Parsed rule definitions.

use serde::{Deserialize, Serialize};

use super::flags::FlagSet;

/// One ordered transformation rule: pattern, replacement template, flags.
///
/// Immutable once parsed. Rules apply strictly in file order and each rule
/// re-scans the text as transformed by all prior rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Regex pattern source.
    pub pattern: String,
    /// Replacement template; `\1`..`\99` reference capture groups.
    pub replacement: String,
    /// Option tags. `MultiLine` is always present (see the parser).
    pub flags: FlagSet,
    /// 1-based source line in the rule file, for shell round-tripping.
    pub line: usize,
}
