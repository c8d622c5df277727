//! Core types for rownode
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: Unified value enum for key values, parameters and columns
//! - Row: One fetched row keyed by alias
//! - RowType / PrimaryKeyColumn / TypeRef: introspected schema descriptors
//! - GlobalIdentifier: the opaque identifier codec (`encode` / `decode`)
//! - ResolutionError: error taxonomy shared by every lookup path

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod identifier;
pub mod row;
pub mod types;
pub mod value;

pub use error::{ResolutionError, ResolutionResult};
pub use identifier::{decode, encode, GlobalIdentifier, IdentifierError};
pub use row::Row;
pub use types::{Attribute, PrimaryKeyColumn, QualifiedName, RowType, TypeCategory, TypeRef};
pub use value::Value;
