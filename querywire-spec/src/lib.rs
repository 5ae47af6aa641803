//! querywire-spec
//!
//! Protocol-agnostic model types for querywire.
//!
//! This crate intentionally contains only *model-level* types: the shape model
//! describing an operation's input, the native values a caller supplies, the flat
//! parameter mapping produced by serialization, and the shared error type.
//! The flattening algorithm itself lives in `querywire-protocol-query`.
#![deny(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{QueryError, Result};
