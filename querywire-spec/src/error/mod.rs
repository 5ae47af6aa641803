//! Error handling types for querywire.
//!
//! This module is intentionally dependency-light and shared across crates.
//!
//! # Example
//!
//! ```rust,ignore
//! use querywire_spec::error::{ErrorCategory, QueryError};
//!
//! let error = QueryError::unknown_parameter("InstanceIdz", "");
//! assert_eq!(error.category(), ErrorCategory::Caller);
//! assert!(!error.is_retryable());
//! ```

mod conversions;
mod helpers;
pub mod types;

pub use types::*;
