//! Change log errors.

/// Errors raised while persisting or reading the change log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to serialize change record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to open change log {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to append to change log {path}: {source}")]
    Append {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read change log {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed change log entry at line {line}: {message}")]
    Malformed { line: usize, message: String },
}

/// Errors raised while replaying change records against a text.
///
/// Any of these means the log does not belong to the given input text.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("record {index}: offset {pos} out of bounds (text length {len})")]
    OutOfBounds { index: usize, pos: usize, len: usize },

    #[error("record {index}: offset {pos} is not a char boundary")]
    NotCharBoundary { index: usize, pos: usize },

    #[error("record {index}: deleted text does not match the log")]
    TextMismatch { index: usize },
}
