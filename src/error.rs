//! Error types for sparse_life.

use thiserror::Error;

/// Errors produced while reading Life 1.06 text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input has no non-empty line at all.
    #[error("invalid Life 1.06 file: empty or missing header")]
    MissingHeader,

    /// First non-empty line is not `#Life 1.06`.
    #[error("invalid Life 1.06 file: missing or invalid header (expected '#Life 1.06', got '{line}')")]
    InvalidHeader {
        /// The offending line.
        line: String,
    },

    /// A coordinate line that does not hold two `i64` values.
    #[error("invalid Life 1.06 file: malformed coordinate line {line_no}: '{line}'")]
    MalformedLine {
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        line: String,
    },

    /// A coordinate line with something after the second coordinate.
    #[error("invalid Life 1.06 file: unexpected content after coordinates on line {line_no}: '{line}'")]
    UnexpectedContent {
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        line: String,
    },
}

/// Errors that can occur in sparse_life.
#[derive(Debug, Error)]
pub enum Error {
    /// Engine name not recognised.
    #[error("unknown engine type '{0}'. Valid options: hashtable, sorted, hashlife")]
    UnknownEngine(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for sparse_life operations.
pub type Result<T> = std::result::Result<T, Error>;
