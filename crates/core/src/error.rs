//! Error types for the vector-generation system.
//!
//! Recoverable per-record issues (a bad token, a short chunk, an A/B
//! count mismatch) are logged and skipped by the components themselves
//! so a batch of packets keeps making forward progress. The variants
//! here cover structural failures where no meaningful partial result
//! exists and the run must abort.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all operations in the system.
#[derive(Debug, Error)]
pub enum Error {
    /// Stream decoding failed structurally (tolerant recovery was not possible)
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Golden reduction could not run at all
    #[error("reduce error: {0}")]
    Reduce(#[from] ReduceError),

    /// A mandatory input file is absent or unreadable; no output is written
    #[error("missing required input {path}: {source}")]
    MissingInput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Stream decoding errors.
///
/// The parser is forward-tolerant; these fire only when the stream as a
/// whole cannot yield anything usable.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Fewer values than one full operand tile
    #[error("stream too short: need at least {required} values, got {actual}")]
    StreamTooShort { required: usize, actual: usize },

    /// A zero-area tile shape was requested
    #[error("empty tile shape: {rows}x{cols}")]
    EmptyShape { rows: usize, cols: usize },
}

/// Golden reduction errors.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// One operand stream decoded to nothing
    #[error("no valid {side} operands to reduce")]
    NoOperands { side: &'static str },

    /// A zero dimension in the reduction shape
    #[error("invalid tile shape: rows_a={rows_a}, cols_a={cols_a}, cols_b={cols_b}")]
    InvalidShape {
        rows_a: usize,
        cols_a: usize,
        cols_b: usize,
    },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
