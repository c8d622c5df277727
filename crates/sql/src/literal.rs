//! Scalar literal conversion
//!
//! Turns a raw key value into a SQL fragment typed for its column. The value
//! is always bound as a parameter and cast to the column type; it is never
//! spliced into the statement text.

use crate::error::SqlError;
use crate::fragment::SqlFragment;
use rownode_core::{TypeCategory, TypeRef, Value};

/// Renders raw values as typed SQL literals
pub trait ScalarConverter: Send + Sync {
    /// Render `value` as a literal of `scalar_type` / `type_modifier`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::UnsupportedValue`] if the value can never be a
    /// literal of that type.
    fn render_literal(
        &self,
        value: &Value,
        scalar_type: &TypeRef,
        type_modifier: Option<i32>,
    ) -> Result<SqlFragment, SqlError>;
}

/// PostgreSQL converter: `$n::"namespace"."type"`
///
/// Strings are accepted for every category so that keys the client only
/// knows as text (bigints, uuids, timestamps) still resolve; the store's own
/// input function does the parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgScalarConverter;

impl PgScalarConverter {
    fn accepts(category: TypeCategory, value: &Value) -> bool {
        match (category, value) {
            (_, Value::Null) => true,
            (TypeCategory::Json, _) => true,
            (TypeCategory::Array, Value::Array(items)) => items.iter().all(Value::is_scalar),
            (_, Value::String(_)) => category != TypeCategory::Array,
            (TypeCategory::Boolean, Value::Bool(_)) => true,
            (TypeCategory::Numeric, Value::Int(_) | Value::Float(_)) => true,
            (TypeCategory::Other, v) => v.is_scalar(),
            _ => false,
        }
    }

    fn cast(scalar_type: &TypeRef, type_modifier: Option<i32>) -> SqlFragment {
        let cast = SqlFragment::raw("::").push(SqlFragment::identifier(&[
            scalar_type.namespace.as_str(),
            scalar_type.name.as_str(),
        ]));
        match modifier_suffix(scalar_type, type_modifier) {
            Some(suffix) => cast.push(SqlFragment::trusted(suffix)),
            None => cast,
        }
    }
}

impl ScalarConverter for PgScalarConverter {
    fn render_literal(
        &self,
        value: &Value,
        scalar_type: &TypeRef,
        type_modifier: Option<i32>,
    ) -> Result<SqlFragment, SqlError> {
        if !Self::accepts(scalar_type.category, value) {
            return Err(SqlError::UnsupportedValue {
                type_name: format!("{}.{}", scalar_type.namespace, scalar_type.name),
                value_type: value.type_name().to_string(),
            });
        }

        let literal = match value {
            Value::Null => SqlFragment::value(Value::Null),
            // json/jsonb input parses its text, so every value is bound as JSON
            v if scalar_type.category == TypeCategory::Json => SqlFragment::value(v.to_json_text()),
            Value::Array(items) if scalar_type.category == TypeCategory::Array => {
                SqlFragment::raw("array[")
                    .push(SqlFragment::join(
                        items.iter().cloned().map(SqlFragment::value),
                        ", ",
                    ))
                    .push_raw("]")
            }
            scalar => SqlFragment::value(scalar.clone()),
        };
        Ok(literal.push(Self::cast(scalar_type, type_modifier)))
    }
}

/// Type modifier suffix for types whose modifier changes comparison
/// semantics. `varchar(n)` is never cast to its length: the cast truncates,
/// so a longer key would match a shorter one.
fn modifier_suffix(scalar_type: &TypeRef, type_modifier: Option<i32>) -> Option<String> {
    let typmod = type_modifier.filter(|m| *m >= 0)?;
    if scalar_type.namespace != "pg_catalog" {
        return None;
    }
    match scalar_type.name.as_str() {
        "bpchar" if typmod >= 4 => Some(format!("({})", typmod - 4)),
        "numeric" if typmod >= 4 => {
            let packed = typmod - 4;
            Some(format!("({},{})", (packed >> 16) & 0xffff, packed & 0xffff))
        }
        "bit" | "varbit" => Some(format!("({})", typmod)),
        _ => None,
    }
}
