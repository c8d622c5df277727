//! Error types for SQL construction and execution.

use rownode_core::ResolutionError;

/// Failures while building a statement
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SqlError {
    /// A value cannot be rendered as a literal of the target type
    #[error("cannot use {value_type} value as {type_name}")]
    UnsupportedValue {
        /// Qualified name of the target type
        type_name: String,
        /// Variant name of the offending value
        value_type: String,
    },
}

/// Failures reported by an [`ExecutionContext`](crate::ExecutionContext)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The store rejected the statement
    #[error("query failed: {0}")]
    Query(String),

    /// The connection or transport failed
    #[error("connection error: {0}")]
    Connection(String),
}

impl From<SqlError> for ResolutionError {
    fn from(err: SqlError) -> Self {
        ResolutionError::invalid_identifier(err.to_string())
    }
}

impl From<ExecutionError> for ResolutionError {
    fn from(err: ExecutionError) -> Self {
        ResolutionError::execution(err.to_string())
    }
}
