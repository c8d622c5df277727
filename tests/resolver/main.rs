//! Resolver Tests
//!
//! End-to-end tests of identifier resolution against an in-memory store:
//! - identifier codec: encoding, decoding, malformed tokens
//! - registration: which row types become addressable
//! - generic node lookup: errors propagate
//! - per-type root fields: every failure reads as null
//! - Lookup dispatch through `Executor::execute`

mod common;

mod codec;
mod node_lookup;
mod registration;
