//! rownode - Global object identification for relational row types
//!
//! Every addressable row (one whose type has a namespace and a primary key)
//! can be named by a single opaque identifier and read back through it.
//!
//! # Quick Start
//!
//! ```ignore
//! use rownode::{encode, Executor, RequestedFields, Schema, Value};
//!
//! let schema = Schema::builder().row_types(introspected).build()?;
//! let executor = Executor::new(Arc::new(schema));
//!
//! let node_id = encode("Widget", &[Value::Int(42)])?;
//! let row = executor
//!     .fetch_node(&node_id, &RequestedFields::new(["id", "name"]), &client)
//!     .await?;
//! ```
//!
//! # Architecture
//!
//! All lookups go through the [`Executor`]. The identifier codec, the SQL
//! fragment builder and the execution interface are re-exported for callers
//! that need them directly; storage is always supplied by the caller through
//! [`ExecutionContext`].

// Re-export the public API from rownode-executor
pub use rownode_executor::*;
