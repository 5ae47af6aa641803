//! Core error type.

use thiserror::Error;

/// Errors produced while resolving or serializing operation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A native value cannot be represented as the type its shape declares.
    #[error("type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// The caller supplied a structure field the shape does not define.
    #[error("unknown parameter '{name}' at '{path}'")]
    UnknownParameter { name: String, path: String },

    /// Two caller arguments resolve to the same structure member.
    #[error("argument for member '{0}' supplied more than once")]
    DuplicateArgument(String),

    /// Two parts of the shape model produced the same wire key.
    #[error("model inconsistency: duplicate parameter key '{key}'")]
    ModelInconsistency { key: String },

    /// No service with this name is registered.
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// The service does not define this operation.
    #[error("unknown operation '{operation}' for service '{service}'")]
    UnknownOperation { service: String, operation: String },

    /// The process-wide registry can be installed only once.
    #[error("global model registry is already installed")]
    RegistryAlreadyInstalled,

    /// A service definition violates the shape model invariants.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type for querywire operations
pub type Result<T> = std::result::Result<T, QueryError>;

/// Who has to act on an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The caller passed bad input.
    Caller,
    /// The shape model or service definition is broken.
    Model,
    /// Registry setup or lookup failed.
    Registry,
}
