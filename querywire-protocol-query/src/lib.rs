//! querywire-protocol-query
//!
//! Query-string protocol family mapping for querywire.
//!
//! This crate owns the flattening of a nested parameter value into the flat
//! `Key=Value` set sent by query-protocol services:
//! - scalar coercion to wire strings
//! - the naming policy (`Query` and `Ec2` variants)
//! - the recursive parameter builder (`QuerySerializer`)
#![deny(unsafe_code)]

// Re-export the querywire-spec modules so that `crate::types::*` paths work here too.
pub use querywire_spec::{QueryError, Result, error, types};

pub mod standards;
