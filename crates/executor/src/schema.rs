//! Row type registration
//!
//! [`SchemaBuilder`] takes every introspected [`RowType`] and registers the
//! addressable ones into two lookup tables:
//!
//! - **node types**: type tag -> fetcher, used by the generic node lookup
//! - **root fields**: field name -> fetcher, one per row type, each taking a
//!   single identifier argument
//!
//! A row type is addressable when it has a namespace, a primary key and is
//! not omitted from reads. Anything else is skipped silently: a relation
//! without a key is simply not individually addressable.
//!
//! The built [`Schema`] is immutable and shared behind an `Arc`.

use crate::config::NodeConfig;
use crate::error::SchemaError;
use crate::fetch::NodeFetcher;
use crate::inflection::table_node_field;
use crate::projection::IDENTIFIERS_ALIAS;
use rownode_core::{encode, ResolutionError, ResolutionResult, Row, RowType, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// A generated root field: look up one row type by identifier
#[derive(Debug, Clone)]
pub struct RootField {
    name: String,
    argument: String,
    fetcher: Arc<NodeFetcher>,
}

impl RootField {
    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the identifier argument
    pub fn argument(&self) -> &str {
        &self.argument
    }

    /// Row type returned by the field
    pub fn row_type(&self) -> &Arc<RowType> {
        self.fetcher.row_type()
    }

    /// Description shown to schema consumers
    pub fn description(&self) -> String {
        format!(
            "Reads a single `{}` using its globally unique `ID`.",
            self.row_type().name
        )
    }

    pub(crate) fn fetcher(&self) -> &Arc<NodeFetcher> {
        &self.fetcher
    }
}

/// Collects row types and registers the addressable ones
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    config: NodeConfig,
    row_types: Vec<RowType>,
}

impl SchemaBuilder {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config`
    pub fn config(mut self, config: NodeConfig) -> Self {
        self.config = config;
        self
    }

    /// Add one row type
    pub fn row_type(mut self, row_type: RowType) -> Self {
        self.row_types.push(row_type);
        self
    }

    /// Add several row types
    pub fn row_types(mut self, row_types: impl IntoIterator<Item = RowType>) -> Self {
        self.row_types.extend(row_types);
        self
    }

    /// Register every addressable row type.
    ///
    /// # Errors
    ///
    /// Fails when two addressable row types share a name or a root field
    /// name, or on an invalid configuration. Skipped row types never
    /// collide.
    pub fn build(self) -> Result<Schema, SchemaError> {
        self.config.validate()?;
        let omitted = self.config.omitted_tables()?;

        let mut node_types: HashMap<String, Arc<NodeFetcher>> = HashMap::new();
        let mut root_fields: BTreeMap<String, RootField> = BTreeMap::new();

        for row_type in self.row_types {
            let omitted_by_config = row_type
                .qualified_name()
                .map_or(false, |name| omitted.contains(&name));
            if row_type.omit_read || omitted_by_config {
                debug!(target: "rownode::schema", row_type = %row_type.name, "Skipping read-omitted row type");
                continue;
            }
            if row_type.primary_key.is_empty() {
                debug!(target: "rownode::schema", row_type = %row_type.name, "Skipping row type without primary key");
                continue;
            }

            let field = table_node_field(&row_type, &self.config.inflection);
            let type_name = row_type.name.clone();
            let fetcher = match NodeFetcher::new(Arc::new(row_type)) {
                Some(fetcher) => Arc::new(fetcher),
                None => {
                    debug!(target: "rownode::schema", row_type = %type_name, "Skipping row type without namespace");
                    continue;
                }
            };

            if node_types.contains_key(&type_name) {
                return Err(SchemaError::DuplicateType { name: type_name });
            }
            if field == self.config.node_field_name {
                return Err(SchemaError::ReservedField { field, type_name });
            }
            if let Some(existing) = root_fields.get(&field) {
                return Err(SchemaError::DuplicateField {
                    first: existing.row_type().name.clone(),
                    second: type_name,
                    field,
                });
            }

            node_types.insert(type_name, fetcher.clone());
            root_fields.insert(
                field.clone(),
                RootField {
                    name: field,
                    argument: self.config.node_id_field_name.clone(),
                    fetcher,
                },
            );
        }

        info!(
            target: "rownode::schema",
            node_types = node_types.len(),
            "Registered addressable row types"
        );

        Ok(Schema {
            config: self.config,
            node_types,
            root_fields,
        })
    }
}

/// Immutable registry of addressable row types
#[derive(Debug)]
pub struct Schema {
    config: NodeConfig,
    node_types: HashMap<String, Arc<NodeFetcher>>,
    root_fields: BTreeMap<String, RootField>,
}

impl Schema {
    /// Start building a schema
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Configuration the schema was built with
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Resolve a type tag to its row type
    pub fn node_type(&self, tag: &str) -> Option<&Arc<RowType>> {
        self.node_types.get(tag).map(|f| f.row_type())
    }

    pub(crate) fn fetcher(&self, tag: &str) -> Option<&Arc<NodeFetcher>> {
        self.node_types.get(tag)
    }

    /// Root field by name
    pub fn root_field(&self, name: &str) -> Option<&RootField> {
        self.root_fields.get(name)
    }

    /// Root fields in name order
    pub fn root_fields(&self) -> impl Iterator<Item = &RootField> {
        self.root_fields.values()
    }

    /// Number of addressable row types
    pub fn len(&self) -> usize {
        self.node_types.len()
    }

    /// Whether no row type is addressable
    pub fn is_empty(&self) -> bool {
        self.node_types.is_empty()
    }

    /// Encode the identifier of a fetched row.
    ///
    /// Key values come from the row's `__identifiers` array when present,
    /// otherwise from the primary key columns by name.
    ///
    /// # Errors
    ///
    /// `UnknownTypeTag` if `type_name` is not addressable; `InvalidIdentifier`
    /// if the row does not carry the key values.
    pub fn node_id(&self, type_name: &str, row: &Row) -> ResolutionResult<String> {
        let row_type = self
            .node_type(type_name)
            .ok_or_else(|| ResolutionError::UnknownTypeTag {
                tag: type_name.to_string(),
            })?;

        let key_values: Vec<Value> = match row.get(IDENTIFIERS_ALIAS).and_then(Value::as_array) {
            Some(values) => values.to_vec(),
            None => row_type
                .primary_key
                .iter()
                .map(|column| {
                    row.get(&column.name).cloned().ok_or_else(|| {
                        ResolutionError::invalid_identifier(format!(
                            "row has no value for key column {}",
                            column.name
                        ))
                    })
                })
                .collect::<ResolutionResult<_>>()?,
        };
        if key_values.len() != row_type.key_arity() {
            return Err(ResolutionError::arity_mismatch(
                row_type.key_arity(),
                key_values.len(),
            ));
        }
        Ok(encode(&row_type.name, &key_values)?)
    }
}
