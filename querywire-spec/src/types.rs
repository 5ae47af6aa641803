//! Core Data Type Definitions
//!
//! - **`shape`** - Shape model (`Shape`, `ShapeKind`, scalar types)
//! - **`value`** - Native caller values (`ParamValue`)
//! - **`parameters`** - Flat wire output (`Parameters`)
//! - **`timestamp`** - Timestamp wire formats
//!
//! Everything is re-exported at the module root:
//!
//! ```rust,ignore
//! use querywire_spec::types::{ParamValue, Parameters, Shape};
//! ```

pub mod parameters;
pub mod shape;
pub mod timestamp;
pub mod value;

pub use parameters::*;
pub use shape::*;
pub use timestamp::*;
pub use value::*;
