//! Rule definitions and the line-oriented rule parser.

pub mod flags;
pub mod parser;
pub mod types;

pub use flags::{FlagSet, RuleFlag};
pub use parser::{load_rules, parse_rule, parse_rules, ParsedRules};
pub use types::Rule;
