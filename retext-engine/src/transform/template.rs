//! Replacement templates with numbered backreferences.

use regex::Captures;

/// Reasons template parsing or expansion can fail.
///
/// Both recover at the call site by substituting the literal template
/// text; neither aborts the rule or the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    #[error("bad escape \\{escape} in replacement template")]
    BadEscape { escape: char },

    #[error("backreference to group {group} out of range")]
    GroupOutOfRange { group: usize },

    #[error("backreference to unmatched group {group}")]
    GroupUnmatched { group: usize },
}

/// A parsed replacement template.
///
/// `\1`..`\99` reference capture groups, `\0` the whole match; `\\`,
/// `\n`, `\t`, `\r` are escapes. A trailing lone backslash stays literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Group(usize),
}

impl Template {
    /// Parse a template. Any escape outside the supported set is an error.
    pub fn parse(source: &str) -> Result<Self, ExpandError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '\\' {
                literal.push(c);
                continue;
            }
            match chars.peek().copied() {
                Some(d) if d.is_ascii_digit() => {
                    // Up to two digits, like the original engine.
                    let mut group = 0usize;
                    for _ in 0..2 {
                        match chars.peek().copied() {
                            Some(d) if d.is_ascii_digit() => {
                                group = group * 10 + (d as usize - '0' as usize);
                                chars.next();
                            }
                            _ => break,
                        }
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Group(group));
                }
                Some('\\') => {
                    literal.push('\\');
                    chars.next();
                }
                Some('n') => {
                    literal.push('\n');
                    chars.next();
                }
                Some('t') => {
                    literal.push('\t');
                    chars.next();
                }
                Some('r') => {
                    literal.push('\r');
                    chars.next();
                }
                Some(other) => return Err(ExpandError::BadEscape { escape: other }),
                None => literal.push('\\'),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Expand against one match's captures.
    pub fn expand(&self, caps: &Captures<'_>) -> Result<String, ExpandError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Group(group) => {
                    if *group >= caps.len() {
                        return Err(ExpandError::GroupOutOfRange { group: *group });
                    }
                    match caps.get(*group) {
                        Some(m) => out.push_str(m.as_str()),
                        None => return Err(ExpandError::GroupUnmatched { group: *group }),
                    }
                }
            }
        }
        Ok(out)
    }
}
