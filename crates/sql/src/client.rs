//! Store execution interface
//!
//! The resolver never owns a connection. Each lookup borrows an
//! [`ExecutionContext`] from its caller (a pooled client, an open
//! transaction...) for the duration of one statement.

use crate::error::ExecutionError;
use async_trait::async_trait;
use rownode_core::{Row, Value};
use std::sync::Arc;

/// Something that can run a parameterized statement
///
/// Implementations decide how values are encoded on the wire. Statements
/// issued through one context run in submission order if the context wraps a
/// single connection; no ordering is implied across contexts.
#[async_trait]
pub trait ExecutionContext: Send + Sync {
    /// Run `text` with `params` bound to `$1..$n` and return every row.
    async fn query(&self, text: &str, params: &[Value]) -> Result<Vec<Row>, ExecutionError>;
}

#[async_trait]
impl<T: ExecutionContext + ?Sized> ExecutionContext for Arc<T> {
    async fn query(&self, text: &str, params: &[Value]) -> Result<Vec<Row>, ExecutionError> {
        (**self).query(text, params).await
    }
}
