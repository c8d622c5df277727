//! Schema descriptor types
//!
//! This module defines the introspected shapes the resolver works from:
//! - QualifiedName: namespace + relation name
//! - TypeRef: handle into the store's type catalogue
//! - PrimaryKeyColumn: one ordered key column
//! - Attribute: one exposed column of a row type
//! - RowType: a relation exposed to callers as an addressable object type
//!
//! All of these are created once while the schema is built and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified relation name (`namespace.name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Storage namespace (schema)
    pub namespace: String,
    /// Relation name inside the namespace
    pub name: String,
}

impl QualifiedName {
    /// Create a new qualified name
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parse `namespace.name`.
    ///
    /// Returns None when either part is missing or empty.
    pub fn parse(s: &str) -> Option<Self> {
        let (namespace, name) = s.split_once('.')?;
        if namespace.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(namespace, name))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Broad category of a store type
///
/// Used by literal conversion to reject values that can never address a
/// column of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCategory {
    /// `bool`
    Boolean,
    /// integers, `numeric`, floating point
    Numeric,
    /// `text`, `varchar`, `char`, `citext`...
    String,
    /// dates, times, timestamps, intervals
    DateTime,
    /// `uuid`
    Uuid,
    /// `json`, `jsonb`
    Json,
    /// any array type
    Array,
    /// everything else (enums, domains, user-defined types)
    Other,
}

/// Handle into the store's type catalogue
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Catalogue identifier (oid)
    pub id: u32,
    /// Namespace the type lives in
    pub namespace: String,
    /// Type name
    pub name: String,
    /// Broad category
    pub category: TypeCategory,
}

impl TypeRef {
    /// Create a new type reference
    pub fn new(
        id: u32,
        namespace: impl Into<String>,
        name: impl Into<String>,
        category: TypeCategory,
    ) -> Self {
        Self {
            id,
            namespace: namespace.into(),
            name: name.into(),
            category,
        }
    }

    /// `pg_catalog.int4`
    pub fn int4() -> Self {
        Self::new(23, "pg_catalog", "int4", TypeCategory::Numeric)
    }

    /// `pg_catalog.int8`
    pub fn int8() -> Self {
        Self::new(20, "pg_catalog", "int8", TypeCategory::Numeric)
    }

    /// `pg_catalog.text`
    pub fn text() -> Self {
        Self::new(25, "pg_catalog", "text", TypeCategory::String)
    }

    /// `pg_catalog.varchar`
    pub fn varchar() -> Self {
        Self::new(1043, "pg_catalog", "varchar", TypeCategory::String)
    }

    /// `pg_catalog.bool`
    pub fn bool() -> Self {
        Self::new(16, "pg_catalog", "bool", TypeCategory::Boolean)
    }

    /// `pg_catalog.uuid`
    pub fn uuid() -> Self {
        Self::new(2950, "pg_catalog", "uuid", TypeCategory::Uuid)
    }

    /// `pg_catalog.numeric`
    pub fn numeric() -> Self {
        Self::new(1700, "pg_catalog", "numeric", TypeCategory::Numeric)
    }
}

/// One column of a primary key, in key order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKeyColumn {
    /// Column name in storage
    pub name: String,
    /// Column type
    pub scalar_type: TypeRef,
    /// Store type modifier (e.g. `varchar(n)` length), if any
    pub type_modifier: Option<i32>,
}

impl PrimaryKeyColumn {
    /// Create a key column without a type modifier
    pub fn new(name: impl Into<String>, scalar_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            scalar_type,
            type_modifier: None,
        }
    }

    /// Set the type modifier
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.type_modifier = Some(modifier);
        self
    }
}

/// An exposed column of a row type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Column name in storage
    pub column: String,
    /// Field name exposed to callers
    pub field_name: String,
}

impl Attribute {
    /// Create an attribute
    pub fn new(column: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            field_name: field_name.into(),
        }
    }
}

/// A relation exposed to callers as an object type
///
/// A row type is individually addressable (and so gets a global identifier)
/// only when it has a namespace, a non-empty primary key and is not omitted
/// from reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowType {
    /// Display name, unique across the schema; doubles as the identifier tag
    pub name: String,
    /// Storage namespace; `None` for namespace-less relations
    pub namespace: Option<String>,
    /// Storage relation name
    pub table: String,
    /// Ordered primary key columns (empty when the relation has no key)
    pub primary_key: Vec<PrimaryKeyColumn>,
    /// Exposed columns, in declaration order
    pub attributes: Vec<Attribute>,
    /// Invisible to both lookup paths
    pub omit_read: bool,
}

impl RowType {
    /// Create a row type with no key and no attributes
    pub fn new(name: impl Into<String>, namespace: Option<&str>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.map(str::to_string),
            table: table.into(),
            primary_key: Vec::new(),
            attributes: Vec::new(),
            omit_read: false,
        }
    }

    /// Append a primary key column
    pub fn with_key(mut self, column: PrimaryKeyColumn) -> Self {
        self.primary_key.push(column);
        self
    }

    /// Append an exposed attribute
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Mark the type as omitted from reads
    pub fn omitted(mut self) -> Self {
        self.omit_read = true;
        self
    }

    /// Fully-qualified storage name, when the relation has a namespace
    pub fn qualified_name(&self) -> Option<QualifiedName> {
        self.namespace
            .as_ref()
            .map(|ns| QualifiedName::new(ns.clone(), self.table.clone()))
    }

    /// Number of key values an identifier for this type must carry
    pub fn key_arity(&self) -> usize {
        self.primary_key.len()
    }

    /// Attribute exposed under `field_name`
    pub fn attribute(&self, field_name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.field_name == field_name)
    }
}
