//! The Executor - single entry point for identifier lookups.
//!
//! Three lookup paths, all ending in [`NodeFetcher::fetch`]:
//!
//! | Path | Input | On failure |
//! |------|-------|------------|
//! | [`Executor::fetch_node`] | any identifier | error propagated |
//! | [`Executor::resolve_field`] | identifier for the field's row type | `None` |
//! | [`Executor::fetch_by_key`] | type name + raw key values | error propagated |
//!
//! The field path collapses every [`ResolutionError`] to `None`: the root
//! field is nullable and a foreign or malformed identifier simply reads as
//! "no such row". The generic node path keeps the error so callers can tell
//! a bad identifier from a missing row.

use crate::fetch::NodeFetcher;
use crate::projection::{derive_projection, RequestedFields};
use crate::schema::Schema;
use rownode_core::{decode, ResolutionError, ResolutionResult, Row, Value};
use rownode_sql::{ExecutionContext, PgScalarConverter, Projection, ScalarConverter};
use std::sync::Arc;
use tracing::debug;

/// A lookup request
#[derive(Debug, Clone)]
pub enum Lookup {
    /// Fetch any row by identifier
    Node {
        /// Opaque identifier
        node_id: String,
        /// Fields requested on the returned object
        fields: RequestedFields,
    },
    /// Resolve a per-type root field
    Field {
        /// Root field name
        field: String,
        /// Opaque identifier passed as the field argument
        node_id: String,
        /// Fields requested on the returned object
        fields: RequestedFields,
    },
    /// Fetch a row of a known type by raw key values
    ByKey {
        /// Row type name
        type_name: String,
        /// Key values in primary key order
        key_values: Vec<Value>,
        /// Select list
        projection: Projection,
    },
}

/// Lookup result
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// The addressed row
    Row(Row),
    /// No row matched (or, on the field path, the lookup failed)
    NotFound,
}

impl Output {
    /// Convert to an option
    pub fn into_row(self) -> Option<Row> {
        match self {
            Output::Row(row) => Some(row),
            Output::NotFound => None,
        }
    }
}

impl From<Option<Row>> for Output {
    fn from(row: Option<Row>) -> Self {
        row.map_or(Output::NotFound, Output::Row)
    }
}

/// Identifier lookup dispatcher.
///
/// The Executor is **stateless**: it holds the immutable schema and the
/// literal converter. Execution contexts are borrowed per call and never
/// retained.
///
/// # Example
///
/// ```ignore
/// let executor = Executor::new(Arc::new(schema));
/// let row = executor
///     .resolve_field("widget", &node_id, &RequestedFields::new(["id", "name"]), &client)
///     .await;
/// ```
#[derive(Clone)]
pub struct Executor {
    schema: Arc<Schema>,
    converter: Arc<dyn ScalarConverter>,
}

impl Executor {
    /// Create an executor using the PostgreSQL literal converter
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::with_converter(schema, Arc::new(PgScalarConverter))
    }

    /// Create an executor with a custom literal converter
    pub fn with_converter(schema: Arc<Schema>, converter: Arc<dyn ScalarConverter>) -> Self {
        Self { schema, converter }
    }

    /// The schema lookups resolve against
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Execute a single lookup.
    pub async fn execute<C>(&self, lookup: Lookup, ctx: &C) -> ResolutionResult<Output>
    where
        C: ExecutionContext + ?Sized,
    {
        let row = match lookup {
            Lookup::Node { node_id, fields } => self.fetch_node(&node_id, &fields, ctx).await?,
            Lookup::Field {
                field,
                node_id,
                fields,
            } => self.resolve_field(&field, &node_id, &fields, ctx).await,
            Lookup::ByKey {
                type_name,
                key_values,
                projection,
            } => {
                self.fetch_by_key(&type_name, &key_values, projection, ctx)
                    .await?
            }
        };
        Ok(row.into())
    }

    /// Fetch any row by identifier, propagating every error.
    ///
    /// # Errors
    ///
    /// `MalformedIdentifier`, `UnknownTypeTag`, `InvalidIdentifier` or
    /// `ExecutionFailure`.
    pub async fn fetch_node<C>(
        &self,
        node_id: &str,
        fields: &RequestedFields,
        ctx: &C,
    ) -> ResolutionResult<Option<Row>>
    where
        C: ExecutionContext + ?Sized,
    {
        let (tag, key_values) = decode(node_id)?.into_parts();
        let fetcher = self
            .schema
            .fetcher(&tag)
            .ok_or(ResolutionError::UnknownTypeTag { tag })?;
        self.fetch_with(fetcher, &key_values, fields, ctx).await
    }

    /// Fetch a row of `type_name` by raw key values.
    ///
    /// Used once an identifier has already been checked against a concrete
    /// type, e.g. when following a relation.
    pub async fn fetch_by_key<C>(
        &self,
        type_name: &str,
        key_values: &[Value],
        projection: Projection,
        ctx: &C,
    ) -> ResolutionResult<Option<Row>>
    where
        C: ExecutionContext + ?Sized,
    {
        let fetcher = self
            .schema
            .fetcher(type_name)
            .ok_or_else(|| ResolutionError::UnknownTypeTag {
                tag: type_name.to_string(),
            })?;
        fetcher
            .fetch(key_values, projection, self.converter.as_ref(), ctx)
            .await
    }

    /// Resolve a per-type root field. Any failure yields `None`.
    pub async fn resolve_field<C>(
        &self,
        field: &str,
        node_id: &str,
        fields: &RequestedFields,
        ctx: &C,
    ) -> Option<Row>
    where
        C: ExecutionContext + ?Sized,
    {
        let result = self.try_resolve_field(field, node_id, fields, ctx).await;
        collapse_to_null(field, result)
    }

    /// The field path before the null collapse.
    pub async fn try_resolve_field<C>(
        &self,
        field: &str,
        node_id: &str,
        fields: &RequestedFields,
        ctx: &C,
    ) -> ResolutionResult<Option<Row>>
    where
        C: ExecutionContext + ?Sized,
    {
        let root = self
            .schema
            .root_field(field)
            .ok_or_else(|| ResolutionError::UnknownTypeTag {
                tag: field.to_string(),
            })?;
        let expected = root.row_type();

        let (tag, key_values) = decode(node_id)?.into_parts();
        match self.schema.node_type(&tag) {
            Some(actual) if Arc::ptr_eq(actual, expected) => {}
            _ => {
                return Err(ResolutionError::TypeMismatch {
                    expected: expected.name.clone(),
                    actual: tag,
                })
            }
        }
        self.fetch_with(root.fetcher(), &key_values, fields, ctx).await
    }

    async fn fetch_with<C>(
        &self,
        fetcher: &NodeFetcher,
        key_values: &[Value],
        fields: &RequestedFields,
        ctx: &C,
    ) -> ResolutionResult<Option<Row>>
    where
        C: ExecutionContext + ?Sized,
    {
        let projection = derive_projection(fetcher.row_type(), fields);
        fetcher
            .fetch(key_values, projection, self.converter.as_ref(), ctx)
            .await
    }
}

/// Field-path policy: every error kind reads as "no row".
fn collapse_to_null(field: &str, result: ResolutionResult<Option<Row>>) -> Option<Row> {
    match result {
        Ok(row) => row,
        Err(e) => {
            debug!(
                target: "rownode::resolve",
                field,
                kind = e.kind(),
                error = %e,
                "Field lookup resolved to null"
            );
            None
        }
    }
}
