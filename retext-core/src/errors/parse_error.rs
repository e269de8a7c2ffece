//! Rule parsing errors.

/// Errors produced while parsing rule definitions.
///
/// Per-line errors are collected by the caller and never abort the
/// remaining lines; only file-level IO failures stop a load.
#[derive(Debug, thiserror::Error)]
pub enum RuleParseError {
    #[error("line {line}: empty pattern")]
    EmptyPattern { line: usize },

    #[error("failed to read rule file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
