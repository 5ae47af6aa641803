//! Type Conversions for QueryError

use super::types::QueryError;

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: QueryError = json_err.into();
        assert!(matches!(err, QueryError::JsonError(_)));
    }
}
