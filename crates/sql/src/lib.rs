//! SQL construction and execution interface for rownode
//!
//! - [`SqlFragment`]: immutable text/identifier/value sequences compiled to
//!   `$n` placeholders plus an ordered parameter list
//! - [`SelectQuery`] / [`Projection`]: single-relation SELECT with
//!   `and`-combined predicates
//! - [`ScalarConverter`]: typed literal rendering for key values
//! - [`ExecutionContext`]: the async seam store drivers implement

#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod fragment;
pub mod literal;
pub mod query;

pub use client::ExecutionContext;
pub use error::{ExecutionError, SqlError};
pub use fragment::{quote_identifier, CompiledQuery, SqlFragment};
pub use literal::{PgScalarConverter, ScalarConverter};
pub use query::{build_query, ExpressionBuilder, Projection, SelectQuery, Selection, TABLE_ALIAS};
