//! Query protocol standard.
//!
//! The `Query` variant inserts a `Member` level for non-flattened lists and an
//! `Entry` level for non-flattened maps. The `Ec2` variant flattens everything
//! and prefers a member's explicit query name.

pub mod coercion;
pub mod config;
pub mod naming;
pub mod serializer;

pub use coercion::{coerce_scalar, map_key_value};
pub use config::{QueryProtocol, SerializerConfig, SerializerConfigBuilder};
pub use naming::{Ec2Naming, NamingPolicy, QueryNaming, join};
pub use serializer::QuerySerializer;
