//! Error types shared by estimation, decoding and the text formats.

use crate::labels::Label;
use thiserror::Error;

/// Unified error type for all `hmm_dp` operations.
#[derive(Debug, Error)]
pub enum HmmError {
    /// A training sequence whose state and observation lists differ in length.
    #[error("training sequence has {states} states but {observations} observations")]
    LengthMismatch { states: usize, observations: usize },

    /// Matrix or vector dimensions disagree with the number of states.
    #[error("shape mismatch: {what} has {found} entries, expected {expected}")]
    Shape {
        what: String,
        expected: usize,
        found: usize,
    },

    /// Decoding a non-empty sequence against a model with no states.
    #[error("model has no states; cannot decode {len} observations")]
    EmptyModel { len: usize },

    /// A decoder was built without an initial-state distribution.
    #[error("no start distribution supplied")]
    MissingStart,

    /// A raw label that is absent from a model's label index.
    #[error("label {0} is not part of the model")]
    UnknownLabel(Label),

    /// A dense state index past the end of a model's state labels.
    #[error("state index {index} is out of range for {len} states")]
    UnknownState { index: usize, len: usize },

    /// Malformed text input.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HmmError {
    pub(crate) fn shape(what: impl Into<String>, expected: usize, found: usize) -> Self {
        HmmError::Shape {
            what: what.into(),
            expected,
            found,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        HmmError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HmmError>;
