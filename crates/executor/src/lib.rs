//! # rownode Executor
//!
//! Global object identification over a relational store.
//!
//! Every addressable row type (namespace + primary key, not omitted) gets an
//! opaque identifier: `base64(json([TypeName, key_0, key_1, ...]))`. This
//! crate registers row types into a [`Schema`] and resolves identifiers back
//! into rows through an [`Executor`].
//!
//! ## Quick Start
//!
//! ```text
//! use rownode_executor::{Executor, RequestedFields, Schema};
//!
//! let schema = Schema::builder().row_types(introspected).build()?;
//! let executor = Executor::new(Arc::new(schema));
//!
//! // Per-type root field: null on any failure
//! let row = executor.resolve_field("widget", &node_id, &fields, &client).await;
//!
//! // Generic node lookup: errors propagate
//! let row = executor.fetch_node(&node_id, &fields, &client).await?;
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod executor;
mod fetch;
mod inflection;
mod projection;
mod schema;

pub use config::{InflectionConfig, NodeConfig, CONFIG_FILE_NAME};
pub use error::{ConfigError, SchemaError};
pub use executor::{Executor, Lookup, Output};
pub use fetch::{build_base_predicate, check_arity, NodeFetcher};
pub use inflection::{lower_camel, table_node_field};
pub use projection::{derive_projection, with_identifiers, RequestedFields, IDENTIFIERS_ALIAS};
pub use schema::{RootField, Schema, SchemaBuilder};

// Re-export the types callers need alongside the executor
pub use rownode_core::{
    decode, encode, Attribute, GlobalIdentifier, IdentifierError, PrimaryKeyColumn, QualifiedName,
    ResolutionError, ResolutionResult, Row, RowType, TypeCategory, TypeRef, Value,
};
pub use rownode_sql::{
    CompiledQuery, ExecutionContext, ExecutionError, PgScalarConverter, Projection,
    ScalarConverter, SelectQuery, Selection, SqlError, SqlFragment,
};

/// Result type for schema construction
pub type Result<T> = std::result::Result<T, SchemaError>;
