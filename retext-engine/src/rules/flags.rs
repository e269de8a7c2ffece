//! Rule flags: a closed set of regex option tags.

use serde::{Deserialize, Serialize};

/// A single regex option tag.
///
/// The tag set is closed and matched exhaustively; string aliases exist
/// only at the parsing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleFlag {
    /// Case-insensitive matching (`i`, `IGNORECASE`).
    IgnoreCase,
    /// `^`/`$` match at line boundaries (`m`, `MULTILINE`). Enabled for
    /// every rule regardless of what the rule file says.
    MultiLine,
    /// `.` matches newlines (`s`, `DOTALL`).
    DotAll,
    /// Whitespace-insensitive pattern syntax (`x`, `VERBOSE`).
    Verbose,
    /// ASCII-only character classes (`a`, `ASCII`).
    Ascii,
}

impl RuleFlag {
    /// All flags, in canonical display order.
    pub const ALL: [RuleFlag; 5] = [
        RuleFlag::IgnoreCase,
        RuleFlag::MultiLine,
        RuleFlag::DotAll,
        RuleFlag::Verbose,
        RuleFlag::Ascii,
    ];

    /// Parse one flag token.
    ///
    /// Tokens are case-insensitive and accept the short alias, the long
    /// name, and a `re.`-prefixed variant of either (`re.I`, `RE.DOTALL`).
    pub fn from_token(token: &str) -> Option<Self> {
        let upper = token.trim().to_ascii_uppercase();
        let name = upper.strip_prefix("RE.").unwrap_or(&upper);
        match name {
            "IGNORECASE" | "I" => Some(Self::IgnoreCase),
            "MULTILINE" | "M" => Some(Self::MultiLine),
            "DOTALL" | "S" => Some(Self::DotAll),
            "VERBOSE" | "X" => Some(Self::Verbose),
            "ASCII" | "A" => Some(Self::Ascii),
            _ => None,
        }
    }

    /// Canonical long name.
    pub fn name(self) -> &'static str {
        match self {
            Self::IgnoreCase => "IGNORECASE",
            Self::MultiLine => "MULTILINE",
            Self::DotAll => "DOTALL",
            Self::Verbose => "VERBOSE",
            Self::Ascii => "ASCII",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::IgnoreCase => 1 << 0,
            Self::MultiLine => 1 << 1,
            Self::DotAll => 1 << 2,
            Self::Verbose => 1 << 3,
            Self::Ascii => 1 << 4,
        }
    }
}

/// A set of rule flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet {
    bits: u8,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, flag: RuleFlag) {
        self.bits |= flag.bit();
    }

    /// Builder-style insert.
    pub fn with(mut self, flag: RuleFlag) -> Self {
        self.insert(flag);
        self
    }

    pub fn contains(&self, flag: RuleFlag) -> bool {
        self.bits & flag.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Flags present, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = RuleFlag> + '_ {
        RuleFlag::ALL.into_iter().filter(|flag| self.contains(*flag))
    }
}
