//! # querywire
//!
//! Shape-driven parameter serialization for query-string cloud APIs.
//!
//! Given a shape model describing an operation's input and a nested caller
//! value, querywire produces the flat `Key=Value` parameter set that
//! query-protocol services (including the EC2 variant) expect.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use querywire::prelude::*;
//!
//! let ec2 = ServiceModel::builder("ec2")
//!     .api_version("2014-06-15")
//!     .protocol(QueryProtocol::Ec2)
//!     .operation(
//!         "DescribeInstances",
//!         Shape::structure([(
//!             "InstanceIds",
//!             Shape::list(Shape::string()).with_wire_name("InstanceId"),
//!         )]),
//!     )
//!     .build()?;
//!
//! let op = ec2.operation("DescribeInstances")?;
//! let params = op.build_parameters_from_args(serde_json::json!({
//!     "instance_ids": ["i-12345678", "i-87654321"]
//! }))?;
//! assert_eq!(params.get("InstanceId.2"), Some("i-87654321"));
//! ```
//!
//! Transport, signing, retries and response parsing are owned by the
//! surrounding client; this crate only produces the parameter mapping.
#![deny(unsafe_code)]

// Workspace split facade:
// - querywire-spec: shape model, values, parameters, errors
// - querywire-protocol-query: coercion, naming policy, serializer
pub use querywire_spec::{QueryError, Result, error, types};

pub use querywire_protocol_query::standards;

pub mod arguments;
pub mod operation;
pub mod prelude;
pub mod registry;
pub mod service;

#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use operation::Operation;
pub use registry::ModelRegistry;
pub use service::{ServiceDefinition, ServiceModel};
