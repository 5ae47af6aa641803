//! Shape model.
//!
//! A `Shape` describes one node of an operation's parameter tree. The tree is
//! built once when a service model is loaded and is read-only afterwards, so
//! it can be shared freely between threads.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::timestamp::TimestampFormat;

/// Wire type of a scalar shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    String,
    Integer,
    /// Covers both `float` and `double` model types.
    #[serde(alias = "double")]
    Float,
    Boolean,
    Timestamp,
    Blob,
}

impl ScalarType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Blob => "blob",
        }
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminant of `ShapeKind`, used for `Shape::is`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Scalar,
    Structure,
    List,
    Map,
}

impl ShapeType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Structure => "structure",
            Self::List => "list",
            Self::Map => "map",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarShape {
    pub scalar_type: ScalarType,
    /// Overrides the serializer's default for `timestamp` scalars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_format: Option<TimestampFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureShape {
    /// Logical member name to member shape, in model order.
    #[serde(default)]
    pub members: IndexMap<String, Shape>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListShape {
    pub member: Box<Shape>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapShape {
    pub key: Box<Shape>,
    pub value: Box<Shape>,
}

/// Kind-specific payload of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeKind {
    Scalar(ScalarShape),
    Structure(StructureShape),
    List(ListShape),
    Map(MapShape),
}

/// One node of a parameter tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(flatten)]
    pub kind: ShapeKind,

    /// Name used on the wire instead of the logical member name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_name: Option<String>,

    /// Explicit EC2 query name; wins over `wire_name` for the EC2 variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_name: Option<String>,

    /// Lists and maps only: omit the `Member` / `Entry` level.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub flattened: bool,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            wire_name: None,
            query_name: None,
            flattened: false,
        }
    }

    pub fn scalar(scalar_type: ScalarType) -> Self {
        Self::new(ShapeKind::Scalar(ScalarShape {
            scalar_type,
            timestamp_format: None,
        }))
    }

    pub fn string() -> Self {
        Self::scalar(ScalarType::String)
    }

    pub fn integer() -> Self {
        Self::scalar(ScalarType::Integer)
    }

    pub fn float() -> Self {
        Self::scalar(ScalarType::Float)
    }

    pub fn boolean() -> Self {
        Self::scalar(ScalarType::Boolean)
    }

    pub fn timestamp() -> Self {
        Self::scalar(ScalarType::Timestamp)
    }

    pub fn blob() -> Self {
        Self::scalar(ScalarType::Blob)
    }

    /// Create a structure shape from `(logical name, shape)` pairs.
    pub fn structure<I, K>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, Shape)>,
        K: Into<String>,
    {
        Self::new(ShapeKind::Structure(StructureShape {
            members: members
                .into_iter()
                .map(|(name, shape)| (name.into(), shape))
                .collect(),
        }))
    }

    /// A structure without members, for operations that take no input.
    pub fn empty_structure() -> Self {
        Self::new(ShapeKind::Structure(StructureShape::default()))
    }

    pub fn list(member: Shape) -> Self {
        Self::new(ShapeKind::List(ListShape {
            member: Box::new(member),
        }))
    }

    pub fn map(key: Shape, value: Shape) -> Self {
        Self::new(ShapeKind::Map(MapShape {
            key: Box::new(key),
            value: Box::new(value),
        }))
    }

    pub fn with_wire_name(mut self, name: impl Into<String>) -> Self {
        self.wire_name = Some(name.into());
        self
    }

    pub fn with_query_name(mut self, name: impl Into<String>) -> Self {
        self.query_name = Some(name.into());
        self
    }

    pub fn with_flattened(mut self, flattened: bool) -> Self {
        self.flattened = flattened;
        self
    }

    /// Pin the timestamp format. Has no effect on non-scalar shapes.
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        if let ShapeKind::Scalar(scalar) = &mut self.kind {
            scalar.timestamp_format = Some(format);
        }
        self
    }

    pub fn shape_type(&self) -> ShapeType {
        match self.kind {
            ShapeKind::Scalar(_) => ShapeType::Scalar,
            ShapeKind::Structure(_) => ShapeType::Structure,
            ShapeKind::List(_) => ShapeType::List,
            ShapeKind::Map(_) => ShapeType::Map,
        }
    }

    pub fn is(&self, shape_type: ShapeType) -> bool {
        self.shape_type() == shape_type
    }

    /// Look up a structure member by logical name.
    pub fn member(&self, name: &str) -> Option<&Shape> {
        self.members().and_then(|members| members.get(name))
    }

    pub fn members(&self) -> Option<&IndexMap<String, Shape>> {
        match &self.kind {
            ShapeKind::Structure(structure) => Some(&structure.members),
            _ => None,
        }
    }

    pub fn scalar_type(&self) -> Option<ScalarType> {
        match &self.kind {
            ShapeKind::Scalar(scalar) => Some(scalar.scalar_type),
            _ => None,
        }
    }

    /// The wire name, or `default` when the model does not override it.
    pub fn serialized_name<'a>(&'a self, default: &'a str) -> &'a str {
        self.wire_name.as_deref().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_shape() -> Shape {
        Shape::structure([
            ("Name", Shape::string()),
            (
                "Values",
                Shape::list(Shape::string()).with_wire_name("Value"),
            ),
        ])
    }

    #[test]
    fn accessors_follow_kind() {
        let shape = filter_shape();
        assert!(shape.is(ShapeType::Structure));
        assert!(shape.member("Name").unwrap().is(ShapeType::Scalar));
        assert_eq!(
            shape.member("Name").unwrap().scalar_type(),
            Some(ScalarType::String)
        );
        assert!(shape.member("Values").unwrap().is(ShapeType::List));
        assert!(shape.member("Missing").is_none());
        assert!(Shape::string().member("Name").is_none());
        assert_eq!(Shape::list(Shape::string()).scalar_type(), None);
    }

    #[test]
    fn serialized_name_defaults_to_logical_name() {
        let shape = filter_shape();
        let values = shape.member("Values").unwrap();
        assert_eq!(values.serialized_name("Values"), "Value");
        assert_eq!(shape.member("Name").unwrap().serialized_name("Name"), "Name");
    }

    #[test]
    fn members_keep_model_order() {
        let shape = Shape::structure([
            ("Zeta", Shape::string()),
            ("Alpha", Shape::string()),
            ("Mid", Shape::string()),
        ]);
        let names: Vec<_> = shape.members().unwrap().keys().cloned().collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn timestamp_format_only_applies_to_scalars() {
        let ts = Shape::timestamp().with_timestamp_format(TimestampFormat::Rfc822);
        let ShapeKind::Scalar(scalar) = &ts.kind else {
            panic!("expected scalar");
        };
        assert_eq!(scalar.timestamp_format, Some(TimestampFormat::Rfc822));

        let list = Shape::list(Shape::string()).with_timestamp_format(TimestampFormat::Rfc822);
        assert_eq!(list, Shape::list(Shape::string()));
    }

    #[test]
    fn deserializes_model_json() {
        let json = serde_json::json!({
            "kind": "structure",
            "members": {
                "InstanceIds": {
                    "kind": "list",
                    "wire_name": "InstanceId",
                    "flattened": true,
                    "member": { "kind": "scalar", "scalar_type": "string" }
                },
                "Attributes": {
                    "kind": "map",
                    "key": { "kind": "scalar", "scalar_type": "string", "wire_name": "Name" },
                    "value": { "kind": "scalar", "scalar_type": "double" }
                }
            }
        });
        let shape: Shape = serde_json::from_value(json).unwrap();

        let ids = shape.member("InstanceIds").unwrap();
        assert!(ids.flattened);
        assert_eq!(ids.wire_name.as_deref(), Some("InstanceId"));

        let ShapeKind::Map(map) = &shape.member("Attributes").unwrap().kind else {
            panic!("expected map");
        };
        assert_eq!(map.key.wire_name.as_deref(), Some("Name"));
        assert_eq!(map.value.scalar_type(), Some(ScalarType::Float));
    }

    #[test]
    fn serialization_omits_defaults() {
        let value = serde_json::to_value(Shape::boolean()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "kind": "scalar", "scalar_type": "boolean" })
        );
    }
}
