//! Error types for identifier resolution
//!
//! [`ResolutionError`] is the taxonomy every lookup path reports in. Lower
//! layers (the identifier codec, SQL construction, the store) define their
//! own error enums and convert into it. We use `thiserror` for automatic
//! `Display` and `Error` trait implementations.

use crate::identifier::IdentifierError;
use thiserror::Error;

/// Result type alias for resolution operations
pub type ResolutionResult<T> = std::result::Result<T, ResolutionError>;

/// Why an identifier could not be resolved to a row
///
/// | Variant | Raised when |
/// |---------|-------------|
/// | `MalformedIdentifier` | the token does not decode |
/// | `UnknownTypeTag` | the decoded tag names no registered row type |
/// | `TypeMismatch` | the tag names a different row type than the call site expects |
/// | `InvalidIdentifier` | the key tuple has the wrong arity or a key value cannot address its column |
/// | `ExecutionFailure` | the store rejected or failed the statement |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Token is not a decodable identifier
    #[error("Malformed ID: {reason}")]
    MalformedIdentifier {
        /// What failed while decoding
        reason: String,
    },

    /// Tag does not resolve to any registered row type
    #[error("Unknown type: {tag}")]
    UnknownTypeTag {
        /// The decoded tag
        tag: String,
    },

    /// Tag resolves to a different row type than expected
    #[error("Mismatched type: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Row type the call site was generated for
        expected: String,
        /// Tag found in the identifier
        actual: String,
    },

    /// Key tuple does not fit the row type's primary key
    #[error("Invalid ID: {reason}")]
    InvalidIdentifier {
        /// What was wrong with the key tuple
        reason: String,
    },

    /// Store or transport failure while executing the statement
    #[error("Execution failed: {reason}")]
    ExecutionFailure {
        /// Error reported by the execution context
        reason: String,
    },
}

impl ResolutionError {
    /// Create a malformed identifier error
    pub fn malformed(reason: impl Into<String>) -> Self {
        ResolutionError::MalformedIdentifier {
            reason: reason.into(),
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(reason: impl Into<String>) -> Self {
        ResolutionError::InvalidIdentifier {
            reason: reason.into(),
        }
    }

    /// Create an arity mismatch error
    pub fn arity_mismatch(expected: usize, actual: usize) -> Self {
        ResolutionError::InvalidIdentifier {
            reason: format!("expected {} key values, got {}", expected, actual),
        }
    }

    /// Create an execution failure
    pub fn execution(reason: impl Into<String>) -> Self {
        ResolutionError::ExecutionFailure {
            reason: reason.into(),
        }
    }

    /// Stable name of the error kind, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ResolutionError::MalformedIdentifier { .. } => "malformed_identifier",
            ResolutionError::UnknownTypeTag { .. } => "unknown_type_tag",
            ResolutionError::TypeMismatch { .. } => "type_mismatch",
            ResolutionError::InvalidIdentifier { .. } => "invalid_identifier",
            ResolutionError::ExecutionFailure { .. } => "execution_failure",
        }
    }
}

impl From<IdentifierError> for ResolutionError {
    fn from(err: IdentifierError) -> Self {
        match err {
            IdentifierError::Malformed { reason } => ResolutionError::MalformedIdentifier { reason },
            IdentifierError::NonFiniteKey { index } => ResolutionError::InvalidIdentifier {
                reason: format!("key value {} is not a finite number", index),
            },
        }
    }
}
