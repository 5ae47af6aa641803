//! Constructors and classification helpers for `QueryError`.

use super::types::{ErrorCategory, QueryError};

impl QueryError {
    /// Build a `TypeMismatch` for the wire key `path`.
    pub fn type_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Build an `UnknownParameter` for field `name` under the wire prefix `path`.
    pub fn unknown_parameter(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UnknownParameter {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TypeMismatch { .. }
            | Self::UnknownParameter { .. }
            | Self::DuplicateArgument(_)
            | Self::JsonError(_) => ErrorCategory::Caller,
            Self::ModelInconsistency { .. } | Self::InvalidModel(_) => ErrorCategory::Model,
            Self::UnknownService(_)
            | Self::UnknownOperation { .. }
            | Self::RegistryAlreadyInstalled => ErrorCategory::Registry,
        }
    }

    /// Serialization is deterministic, so retrying never changes the outcome.
    pub const fn is_retryable(&self) -> bool {
        false
    }

    /// True when the error points at a defect in the shape model rather than the input.
    pub fn is_model_error(&self) -> bool {
        self.category() == ErrorCategory::Model
    }
}
