//! Common imports.
//!
//! ```rust,ignore
//! use querywire::prelude::*;
//! ```

pub use crate::arguments::{ArgumentNameResolver, SnakeCaseArguments, xform_name};
pub use crate::error::{ErrorCategory, QueryError, Result};
pub use crate::operation::Operation;
pub use crate::registry::ModelRegistry;
pub use crate::service::{ServiceDefinition, ServiceModel};
pub use crate::standards::query::{QueryProtocol, QuerySerializer, SerializerConfig};
pub use crate::types::{ParamValue, Parameters, ScalarType, Shape, ShapeType, TimestampFormat};
