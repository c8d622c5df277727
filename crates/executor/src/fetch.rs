//! Row fetch by primary key
//!
//! The one place that touches the store:
//!
//! 1. check the key tuple arity against the row type's primary key
//! 2. build `alias."key_i" = <literal_i>` for every key column, joined by `and`
//! 3. combine with the projection into a SELECT on the row type's table
//! 4. compile to `$n` text plus parameters and execute
//! 5. return the first row, if any
//!
//! Uniqueness comes from the primary key; extra rows are not re-checked.

use rownode_core::{
    PrimaryKeyColumn, QualifiedName, ResolutionError, ResolutionResult, Row, RowType, Value,
};
use rownode_sql::{
    build_query, ExecutionContext, Projection, ScalarConverter, SelectQuery, SqlFragment,
};
use std::sync::Arc;
use tracing::debug;

/// Fail unless `key_values` has one value per key column.
pub fn check_arity(row_type: &RowType, key_values: &[Value]) -> ResolutionResult<()> {
    if key_values.len() != row_type.key_arity() {
        return Err(ResolutionError::arity_mismatch(
            row_type.key_arity(),
            key_values.len(),
        ));
    }
    Ok(())
}

/// Equality predicate on every key column, combined with `and`.
///
/// # Errors
///
/// `InvalidIdentifier` if the arity is wrong or a value cannot be rendered
/// for its column.
pub fn build_base_predicate(
    table_alias: &SqlFragment,
    key_columns: &[PrimaryKeyColumn],
    key_values: &[Value],
    converter: &dyn ScalarConverter,
) -> ResolutionResult<SqlFragment> {
    if key_values.len() != key_columns.len() {
        return Err(ResolutionError::arity_mismatch(
            key_columns.len(),
            key_values.len(),
        ));
    }
    let conditions = key_columns
        .iter()
        .zip(key_values)
        .map(|(column, value)| -> ResolutionResult<SqlFragment> {
            let literal =
                converter.render_literal(value, &column.scalar_type, column.type_modifier)?;
            Ok(table_alias
                .clone()
                .push_raw(".")
                .push(SqlFragment::identifier(&[&column.name]))
                .push_raw(" = ")
                .push(literal))
        })
        .collect::<ResolutionResult<Vec<_>>>()?;
    Ok(SqlFragment::join(conditions, " and "))
}

/// Fetch entry point registered for one addressable row type
#[derive(Debug, Clone)]
pub struct NodeFetcher {
    row_type: Arc<RowType>,
    table: QualifiedName,
}

impl NodeFetcher {
    /// Create a fetcher. Returns None if the row type has no namespace.
    pub fn new(row_type: Arc<RowType>) -> Option<Self> {
        let table = row_type.qualified_name()?;
        Some(Self { row_type, table })
    }

    /// The row type this fetcher reads
    pub fn row_type(&self) -> &Arc<RowType> {
        &self.row_type
    }

    /// Fully-qualified table
    pub fn table(&self) -> &QualifiedName {
        &self.table
    }

    /// Build the single-row query for `key_values`.
    pub fn build_query(
        &self,
        key_values: &[Value],
        projection: Projection,
        converter: &dyn ScalarConverter,
    ) -> ResolutionResult<SelectQuery> {
        check_arity(&self.row_type, key_values)?;
        build_query(self.table.clone(), projection, |alias| {
            build_base_predicate(alias, &self.row_type.primary_key, key_values, converter)
        })
    }

    /// Fetch the row addressed by `key_values`.
    ///
    /// Returns `Ok(None)` when no row matches.
    pub async fn fetch<C>(
        &self,
        key_values: &[Value],
        projection: Projection,
        converter: &dyn ScalarConverter,
        ctx: &C,
    ) -> ResolutionResult<Option<Row>>
    where
        C: ExecutionContext + ?Sized,
    {
        let compiled = self.build_query(key_values, projection, converter)?.compile();
        debug!(
            target: "rownode::sql",
            table = %self.table,
            params = compiled.values.len(),
            sql = %compiled.text,
            "Fetching row by key"
        );
        let rows = ctx.query(&compiled.text, &compiled.values).await?;
        Ok(rows.into_iter().next())
    }
}
