//! Projection derivation
//!
//! Maps the fields a caller asked for on a row type's object onto a select
//! list. Fields that are not plain attributes (type names, identifiers,
//! relations resolved elsewhere) contribute nothing here. The primary key is
//! always selected as one `__identifiers` array so the row's identifier can
//! be re-encoded from the result.

use rownode_core::RowType;
use rownode_sql::{Projection, SqlFragment};

/// Alias carrying the primary key values of every derived projection
pub const IDENTIFIERS_ALIAS: &str = "__identifiers";

/// The caller's field selection for one object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedFields {
    fields: Vec<String>,
}

impl RequestedFields {
    /// Request the given fields, in order
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Request every attribute of `row_type`
    pub fn all(row_type: &RowType) -> Self {
        Self::new(row_type.attributes.iter().map(|a| a.field_name.clone()))
    }

    /// Requested field names
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Build the select list for `requested` on `row_type`.
pub fn derive_projection(row_type: &RowType, requested: &RequestedFields) -> Projection {
    let projection = requested
        .fields()
        .iter()
        .filter_map(|field| row_type.attribute(field))
        .fold(Projection::new(), |projection, attr| {
            projection.column(attr.column.clone(), attr.field_name.clone())
        });
    with_identifiers(projection, row_type)
}

/// Append the `__identifiers` selection: `json_build_array(pk_0, pk_1, ...)`.
pub fn with_identifiers(projection: Projection, row_type: &RowType) -> Projection {
    if row_type.primary_key.is_empty() {
        return projection;
    }
    let columns: Vec<String> = row_type.primary_key.iter().map(|c| c.name.clone()).collect();
    projection.expression(IDENTIFIERS_ALIAS, move |alias| {
        SqlFragment::raw("json_build_array(")
            .push(SqlFragment::join(
                columns.iter().map(|column| {
                    alias
                        .clone()
                        .push_raw(".")
                        .push(SqlFragment::identifier(&[column]))
                }),
                ", ",
            ))
            .push_raw(")")
    })
}
