//! Error types for the transformation engine.

use thiserror::Error;

/// Why an input was rejected. Only the first violation found is reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A point coordinate is missing or not a finite number.
    #[error("invalid point: {reason}")]
    InvalidPoint {
        /// What was wrong with the point.
        reason: String,
    },

    /// The operation list is present but not an array.
    #[error("invalid operation list: {reason}")]
    InvalidOperationList {
        /// What was wrong with the list.
        reason: String,
    },

    /// The entry is not an object, or its tag is not `translate`, `rotate`
    /// or `scale`.
    #[error("invalid operation type at index {index}: {kind}")]
    InvalidOperationType {
        /// Position in the operation list.
        index: usize,
        /// The offending tag (or the whole entry if it is not an object),
        /// rendered as JSON.
        kind: String,
    },

    /// A required parameter is missing, non-finite, or the axis is unrecognized.
    #[error("invalid parameters for {kind} at index {index}: {reason}")]
    InvalidOperationParams {
        /// Position in the operation list.
        index: usize,
        /// The operation tag.
        kind: &'static str,
        /// What was wrong with the parameters.
        reason: String,
    },
}

impl ValidationError {
    pub(crate) fn point(reason: impl Into<String>) -> Self {
        Self::InvalidPoint {
            reason: reason.into(),
        }
    }

    pub(crate) fn params(index: usize, kind: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOperationParams {
            index,
            kind,
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, ValidationError>;
