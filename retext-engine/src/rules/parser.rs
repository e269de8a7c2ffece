//! Line-oriented rule parsing.
//!
//! Syntax: `pattern -> replacement ## flags: IGNORECASE, DOTALL`
//! The `->` and the whole `##` section are optional; without `->` the
//! replacement is empty. Lines starting with `#` are comments.

use std::path::Path;

use retext_core::errors::RuleParseError;
use tracing::warn;

use super::flags::{FlagSet, RuleFlag};
use super::types::Rule;

/// Result of parsing a whole rule source: rules plus per-line errors.
///
/// A line that fails to parse never aborts the remaining lines.
#[derive(Debug, Default)]
pub struct ParsedRules {
    pub rules: Vec<Rule>,
    pub errors: Vec<RuleParseError>,
}

/// Parse one rule line.
///
/// `MultiLine` is OR'd into the flag set unconditionally, whatever the
/// user wrote after `##`.
pub fn parse_rule(line: &str, line_no: usize) -> Result<Rule, RuleParseError> {
    let (rule_part, flags_part) = match line.split_once("##") {
        Some((rule, flags)) => (rule.trim(), flags.trim()),
        None => (line.trim(), ""),
    };

    let (pattern, replacement) = match rule_part.split_once("->") {
        Some((left, right)) => (left.trim(), right.trim()),
        None => (rule_part, ""),
    };

    if pattern.is_empty() {
        return Err(RuleParseError::EmptyPattern { line: line_no });
    }

    let mut flags = parse_flag_tokens(strip_flags_prefix(flags_part), line_no);
    flags.insert(RuleFlag::MultiLine);

    Ok(Rule {
        pattern: pattern.to_string(),
        replacement: replacement.to_string(),
        flags,
        line: line_no,
    })
}

/// Strip an optional case-insensitive `flags:` introducer, keeping
/// everything after the colon. Without one, the whole section is treated
/// as the token list.
fn strip_flags_prefix(flags_part: &str) -> &str {
    // ASCII lowercasing preserves byte offsets.
    let lower = flags_part.to_ascii_lowercase();
    if let Some(idx) = lower.find("flags") {
        let after = flags_part[idx + "flags".len()..].trim_start();
        if let Some(rest) = after.strip_prefix(':') {
            return rest.trim_start();
        }
    }
    flags_part
}

/// Split a token list on commas, pipes, semicolons, or whitespace.
/// Unknown tokens warn and are ignored.
fn parse_flag_tokens(text: &str, line_no: usize) -> FlagSet {
    let mut flags = FlagSet::new();
    for token in text.split(|c: char| c == ',' || c == '|' || c == ';' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        match RuleFlag::from_token(token) {
            Some(flag) => flags.insert(flag),
            None => warn!(token, line = line_no, "unknown flag token ignored"),
        }
    }
    flags
}

/// Parse rule source text, skipping blank lines and `#` comments.
pub fn parse_rules(source: &str) -> ParsedRules {
    let mut parsed = ParsedRules::default();
    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let stripped = raw.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }
        match parse_rule(raw, line_no) {
            Ok(rule) => parsed.rules.push(rule),
            Err(err) => {
                warn!(line = line_no, error = %err, "rule line skipped");
                parsed.errors.push(err);
            }
        }
    }
    parsed
}

/// Load and parse a rule file.
pub fn load_rules(path: impl AsRef<Path>) -> Result<ParsedRules, RuleParseError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| RuleParseError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_rules(&source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_rule() {
        let rule = parse_rule(r"foo(\d+) -> bar\1", 1).unwrap();
        assert_eq!(rule.pattern, r"foo(\d+)");
        assert_eq!(rule.replacement, r"bar\1");
        assert!(rule.flags.contains(RuleFlag::MultiLine));
        assert_eq!(rule.line, 1);
    }

    #[test]
    fn test_missing_arrow_means_empty_replacement() {
        let rule = parse_rule(r"TODO:.*", 3).unwrap();
        assert_eq!(rule.pattern, "TODO:.*");
        assert_eq!(rule.replacement, "");
    }

    #[test]
    fn test_flags_section_with_prefix() {
        let rule = parse_rule("a -> b ## flags: IGNORECASE, DOTALL", 1).unwrap();
        assert!(rule.flags.contains(RuleFlag::IgnoreCase));
        assert!(rule.flags.contains(RuleFlag::DotAll));
    }

    #[test]
    fn test_flags_section_without_prefix() {
        let rule = parse_rule("a -> b ## i|s;x", 1).unwrap();
        assert!(rule.flags.contains(RuleFlag::IgnoreCase));
        assert!(rule.flags.contains(RuleFlag::DotAll));
        assert!(rule.flags.contains(RuleFlag::Verbose));
    }

    #[test]
    fn test_multiline_is_always_on() {
        let rule = parse_rule("a -> b", 1).unwrap();
        assert!(rule.flags.contains(RuleFlag::MultiLine));
        let rule = parse_rule("a -> b ## flags: i", 1).unwrap();
        assert!(rule.flags.contains(RuleFlag::MultiLine));
    }

    #[test]
    fn test_unknown_flag_is_ignored() {
        let rule = parse_rule("a -> b ## flags: i, BOGUS", 1).unwrap();
        assert!(rule.flags.contains(RuleFlag::IgnoreCase));
        assert_eq!(rule.flags.iter().count(), 2); // IgnoreCase + MultiLine
    }

    #[test]
    fn test_empty_pattern_is_an_error() {
        assert!(matches!(
            parse_rule(" -> b", 7),
            Err(RuleParseError::EmptyPattern { line: 7 })
        ));
    }

    #[test]
    fn test_parse_rules_skips_blanks_and_comments() {
        let source = "# comment\n\nfoo -> bar\n   \nbaz -> qux ## flags: i\n";
        let parsed = parse_rules(source);
        assert_eq!(parsed.rules.len(), 2);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.rules[0].line, 3);
        assert_eq!(parsed.rules[1].line, 5);
    }

    #[test]
    fn test_parse_rules_collects_errors_without_aborting() {
        let source = "-> oops\nok -> fine\n";
        let parsed = parse_rules(source);
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.errors.len(), 1);
    }
}
