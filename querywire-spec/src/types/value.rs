//! Native parameter values supplied by callers.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// A caller-supplied value, before it is checked against a shape.
///
/// `Map` carries both structure values (keyed by logical member name) and map
/// values (keyed by map key). Iteration order is the caller's order and drives
/// index assignment during serialization.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParamValue {
    /// Absent. Treated as "not supplied".
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Blob(Vec<u8>),
    Timestamp(DateTime<Utc>),
    List(Vec<ParamValue>),
    Map(IndexMap<String, ParamValue>),
}

impl ParamValue {
    /// Build a `Map` from `(key, value)` pairs, keeping their order.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short runtime type name, used in `TypeMismatch` errors.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Blob(_) => "blob",
            Self::Timestamp(_) => "timestamp",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, ParamValue>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(value: Vec<T>) -> Self {
        Self::list(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<IndexMap<String, ParamValue>> for ParamValue {
    fn from(value: IndexMap<String, ParamValue>) -> Self {
        Self::Map(value)
    }
}

/// JSON numbers that fit `i64` become `Integer`, everything else `Float`.
/// Strings stay strings; a blob or timestamp shape accepts them as input.
impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_conversion_keeps_structure() {
        let value = ParamValue::from(serde_json::json!({
            "Name": "group-name",
            "Values": ["foobar", "fiebaz"],
            "Count": 3,
            "Ratio": 0.5,
            "Enabled": true,
            "Missing": null
        }));
        let map = value.as_map().unwrap();
        assert_eq!(map["Name"], ParamValue::from("group-name"));
        assert_eq!(map["Values"].as_list().unwrap().len(), 2);
        assert_eq!(map["Count"], ParamValue::Integer(3));
        assert_eq!(map["Ratio"], ParamValue::Float(0.5));
        assert_eq!(map["Enabled"], ParamValue::Boolean(true));
        assert!(map["Missing"].is_null());
    }

    #[test]
    fn huge_unsigned_becomes_float() {
        let value = ParamValue::from(serde_json::json!(u64::MAX));
        assert_eq!(value.type_name(), "float");
    }

    #[test]
    fn option_none_is_null() {
        let value: ParamValue = Option::<i32>::None.into();
        assert!(value.is_null());
        let value: ParamValue = Some(5).into();
        assert_eq!(value, ParamValue::Integer(5));
    }

    #[test]
    fn map_builder_preserves_order() {
        let value = ParamValue::map([("b", 1), ("a", 2)]);
        let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["b", "a"]);
    }
}
