//! Parameter builder.
//!
//! Recursive descent over a shape and a caller value. Each scalar reached
//! contributes exactly one `key=value` pair; containers only contribute
//! through their elements, so an empty list or map produces no keys at all.
//! The walk is a pure function of `(shape, value)` and keeps no state between
//! calls.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{QueryError, Result};
use crate::types::{
    ListShape, MapShape, ParamValue, Parameters, Shape, ShapeKind, StructureShape,
};

use super::coercion::{coerce_scalar, map_key_value};
use super::config::SerializerConfig;
use super::naming::{NamingPolicy, join, policy_for};

/// Flattens parameter values for one query protocol variant.
#[derive(Debug, Clone)]
pub struct QuerySerializer {
    config: SerializerConfig,
    naming: Arc<dyn NamingPolicy>,
}

impl Default for QuerySerializer {
    fn default() -> Self {
        Self::new(SerializerConfig::default())
    }
}

impl QuerySerializer {
    pub fn new(config: SerializerConfig) -> Self {
        let naming = Arc::from(policy_for(&config));
        Self { config, naming }
    }

    /// Use a custom naming policy instead of the one implied by `config.protocol`.
    pub fn with_naming(config: SerializerConfig, naming: Arc<dyn NamingPolicy>) -> Self {
        Self { config, naming }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    pub fn naming(&self) -> &dyn NamingPolicy {
        self.naming.as_ref()
    }

    /// Serialize a top-level input value (no key prefix).
    pub fn serialize(&self, shape: &Shape, value: &ParamValue) -> Result<Parameters> {
        self.build(shape, value, "")
    }

    /// Serialize `value` against `shape`, with every key placed under `prefix`.
    pub fn build(&self, shape: &Shape, value: &ParamValue, prefix: &str) -> Result<Parameters> {
        let mut out = Parameters::new();
        self.walk(shape, value, prefix, &mut out)?;
        Ok(out)
    }

    fn walk(
        &self,
        shape: &Shape,
        value: &ParamValue,
        prefix: &str,
        out: &mut Parameters,
    ) -> Result<()> {
        if value.is_null() {
            return Ok(());
        }

        match &shape.kind {
            ShapeKind::Scalar(scalar) => {
                let wire = coerce_scalar(scalar, value, self.config.timestamp_format, prefix)?;
                tracing::trace!(key = %prefix, "emitting query parameter");
                out.insert_unique(prefix.to_string(), wire)
            }
            ShapeKind::Structure(structure) => {
                let fields = expect_map(shape, value, prefix)?;
                self.walk_structure(structure, fields, prefix, out)
            }
            ShapeKind::List(list) => {
                let ParamValue::List(items) = value else {
                    return Err(container_mismatch(shape, value, prefix));
                };
                self.walk_list(shape, list, items, prefix, out)
            }
            ShapeKind::Map(map) => {
                let entries = expect_map(shape, value, prefix)?;
                self.walk_map(shape, map, entries, prefix, out)
            }
        }
    }

    fn walk_structure(
        &self,
        structure: &StructureShape,
        fields: &IndexMap<String, ParamValue>,
        prefix: &str,
        out: &mut Parameters,
    ) -> Result<()> {
        for (name, field) in fields {
            let member = structure
                .members
                .get(name)
                .ok_or_else(|| QueryError::unknown_parameter(name.as_str(), prefix))?;
            let segment = self.naming.member_name(name, member);
            self.walk(member, field, &join(prefix, &segment), out)?;
        }
        Ok(())
    }

    fn walk_list(
        &self,
        shape: &Shape,
        list: &ListShape,
        items: &[ParamValue],
        prefix: &str,
        out: &mut Parameters,
    ) -> Result<()> {
        for (offset, item) in items.iter().enumerate() {
            let key = self.naming.list_element(prefix, shape, offset + 1);
            if item.is_null() {
                return Err(null_element(&list.member, &key));
            }
            self.walk(&list.member, item, &key, out)?;
        }
        Ok(())
    }

    fn walk_map(
        &self,
        shape: &Shape,
        map: &MapShape,
        entries: &IndexMap<String, ParamValue>,
        prefix: &str,
        out: &mut Parameters,
    ) -> Result<()> {
        for (offset, (key, value)) in entries.iter().enumerate() {
            let index = offset + 1;
            let key_prefix = self.naming.map_key(prefix, shape, &map.key, index);
            let key_value = match &map.key.kind {
                ShapeKind::Scalar(scalar) => map_key_value(scalar, key, &key_prefix)?,
                _ => ParamValue::String(key.clone()),
            };
            self.walk(&map.key, &key_value, &key_prefix, out)?;

            let value_prefix = self.naming.map_value(prefix, shape, &map.value, index);
            if value.is_null() {
                return Err(null_element(&map.value, &value_prefix));
            }
            self.walk(&map.value, value, &value_prefix, out)?;
        }
        Ok(())
    }
}

fn expect_map<'v>(
    shape: &Shape,
    value: &'v ParamValue,
    prefix: &str,
) -> Result<&'v IndexMap<String, ParamValue>> {
    value
        .as_map()
        .ok_or_else(|| container_mismatch(shape, value, prefix))
}

fn container_mismatch(shape: &Shape, value: &ParamValue, prefix: &str) -> QueryError {
    QueryError::type_mismatch(prefix, shape.shape_type().as_str(), value.type_name())
}

fn null_element(shape: &Shape, key: &str) -> QueryError {
    let expected = shape
        .scalar_type()
        .map_or_else(|| shape.shape_type().as_str(), |t| t.as_str());
    QueryError::type_mismatch(key, expected, "null")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::query::config::QueryProtocol;
    use tracing_test::traced_test;

    fn ec2() -> QuerySerializer {
        QuerySerializer::new(SerializerConfig::for_protocol(QueryProtocol::Ec2))
    }

    fn params(pairs: &[(&str, &str)]) -> Parameters {
        pairs.iter().copied().collect()
    }

    fn value(json: serde_json::Value) -> ParamValue {
        ParamValue::from(json)
    }

    #[test]
    fn absent_and_empty_inputs_contribute_nothing() {
        let shape = Shape::structure([
            ("Names", Shape::list(Shape::string())),
            ("Attrs", Shape::map(Shape::string(), Shape::string())),
            ("DryRun", Shape::boolean()),
        ]);
        let serializer = QuerySerializer::default();

        assert!(serializer.serialize(&shape, &ParamValue::Null).unwrap().is_empty());
        assert!(serializer.serialize(&shape, &value(serde_json::json!({}))).unwrap().is_empty());
        let empty = value(serde_json::json!({ "Names": [], "Attrs": {}, "DryRun": null }));
        assert!(serializer.serialize(&shape, &empty).unwrap().is_empty());
    }

    #[test]
    fn nested_structures_join_with_dots() {
        let shape = Shape::structure([(
            "LaunchSpecification",
            Shape::structure([
                ("ImageId", Shape::string()),
                ("Monitoring", Shape::structure([("Enabled", Shape::boolean())])),
            ]),
        )]);
        let input = value(serde_json::json!({
            "LaunchSpecification": {
                "ImageId": "ami-33ec795a",
                "Monitoring": { "Enabled": false }
            }
        }));
        assert_eq!(
            ec2().serialize(&shape, &input).unwrap(),
            params(&[
                ("LaunchSpecification.ImageId", "ami-33ec795a"),
                ("LaunchSpecification.Monitoring.Enabled", "false"),
            ])
        );
    }

    #[test]
    fn query_lists_and_maps_use_structural_levels() {
        let shape = Shape::structure([
            ("Names", Shape::list(Shape::string())),
            ("Attrs", Shape::map(Shape::string(), Shape::integer())),
        ]);
        let input = value(serde_json::json!({
            "Names": ["a", "b"],
            "Attrs": { "z": 1, "y": 2 }
        }));
        assert_eq!(
            QuerySerializer::default().serialize(&shape, &input).unwrap(),
            params(&[
                ("Names.Member.1", "a"),
                ("Names.Member.2", "b"),
                ("Attrs.Entry.1.Key", "z"),
                ("Attrs.Entry.1.Value", "1"),
                ("Attrs.Entry.2.Key", "y"),
                ("Attrs.Entry.2.Value", "2"),
            ])
        );
    }

    #[test]
    fn map_values_can_be_structures() {
        let shape = Shape::structure([(
            "Routes",
            Shape::map(
                Shape::string(),
                Shape::structure([("Target", Shape::string())]),
            )
            .with_flattened(true),
        )]);
        let input = value(serde_json::json!({ "Routes": { "r1": { "Target": "igw-1" } } }));
        assert_eq!(
            QuerySerializer::default().serialize(&shape, &input).unwrap(),
            params(&[("Routes.1.Key", "r1"), ("Routes.1.Value.Target", "igw-1")])
        );
    }

    #[test]
    fn integer_map_keys_are_parsed_from_strings() {
        let shape = Shape::structure([("Ports", Shape::map(Shape::integer(), Shape::string()))]);
        let input = value(serde_json::json!({ "Ports": { "22": "ssh", "443": "https" } }));
        assert_eq!(
            QuerySerializer::default().serialize(&shape, &input).unwrap(),
            params(&[
                ("Ports.Entry.1.Key", "22"),
                ("Ports.Entry.1.Value", "ssh"),
                ("Ports.Entry.2.Key", "443"),
                ("Ports.Entry.2.Value", "https"),
            ])
        );

        let bad = value(serde_json::json!({ "Ports": { "ssh": "22" } }));
        let err = QuerySerializer::default().serialize(&shape, &bad).unwrap_err();
        assert_eq!(
            err,
            QueryError::type_mismatch("Ports.Entry.1.Key", "integer", "unparseable map key")
        );
    }

    #[test]
    fn prefix_is_applied_to_every_key() {
        let shape = Shape::structure([("Name", Shape::string())]);
        let input = value(serde_json::json!({ "Name": "x" }));
        let out = QuerySerializer::default()
            .build(&shape, &input, "Outer.3")
            .unwrap();
        assert_eq!(out, params(&[("Outer.3.Name", "x")]));
    }

    #[test]
    fn unknown_member_is_rejected_with_its_location() {
        let shape = Shape::structure([(
            "Placement",
            Shape::structure([("AvailabilityZone", Shape::string())]),
        )]);
        let input = value(serde_json::json!({ "Placement": { "AvailabiltyZone": "us-east-1a" } }));
        let err = ec2().serialize(&shape, &input).unwrap_err();
        assert_eq!(
            err,
            QueryError::unknown_parameter("AvailabiltyZone", "Placement")
        );
    }

    #[test]
    fn container_type_mismatch_reports_kind() {
        let shape = Shape::structure([("InstanceIds", Shape::list(Shape::string()))]);
        let err = ec2()
            .serialize(&shape, &value(serde_json::json!({ "InstanceIds": "i-1" })))
            .unwrap_err();
        assert_eq!(err, QueryError::type_mismatch("InstanceIds", "list", "string"));

        let err = ec2()
            .serialize(&shape, &value(serde_json::json!(["i-1"])))
            .unwrap_err();
        assert_eq!(err, QueryError::type_mismatch("", "structure", "list"));
    }

    #[test]
    fn null_list_element_is_rejected() {
        let shape = Shape::structure([("Ids", Shape::list(Shape::string()))]);
        let err = ec2()
            .serialize(&shape, &value(serde_json::json!({ "Ids": ["a", null] })))
            .unwrap_err();
        assert_eq!(err, QueryError::type_mismatch("Ids.2", "string", "null"));
    }

    #[test]
    fn colliding_wire_names_are_a_model_error() {
        let shape = Shape::structure([
            ("GroupName", Shape::string()),
            ("Name", Shape::string().with_wire_name("GroupName")),
        ]);
        let input = value(serde_json::json!({ "GroupName": "a", "Name": "b" }));
        let err = QuerySerializer::default().serialize(&shape, &input).unwrap_err();
        assert!(err.is_model_error());
    }

    #[test]
    #[traced_test]
    fn emitted_keys_are_traced_without_values() {
        let shape = Shape::structure([("Secret", Shape::string())]);
        QuerySerializer::default()
            .serialize(&shape, &value(serde_json::json!({ "Secret": "hunter2" })))
            .unwrap();
        assert!(logs_contain("emitting query parameter"));
        assert!(!logs_contain("hunter2"));
    }
}
