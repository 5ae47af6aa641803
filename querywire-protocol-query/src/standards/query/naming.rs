//! Naming policy.
//!
//! Every protocol-variant quirk about wire names lives here: which name a
//! member uses, whether a list inserts a `Member` level, whether a map inserts
//! an `Entry` level, and the field names of map entries. The serializer only
//! asks the policy for the next key prefix.

use std::borrow::Cow;

use crate::types::Shape;

use super::config::{
    DEFAULT_LIST_MEMBER_LABEL, DEFAULT_MAP_ENTRY_LABEL, DEFAULT_MAP_KEY_NAME,
    DEFAULT_MAP_VALUE_NAME, QueryProtocol, SerializerConfig,
};

/// Computes the wire key contributed by one step of the tree walk.
///
/// Indexes are 1-based. `prefix` is the full key of the list or map itself.
pub trait NamingPolicy: Send + Sync + std::fmt::Debug {
    /// Segment for structure member `logical_name` whose shape is `member`.
    fn member_name<'a>(&self, logical_name: &'a str, member: &'a Shape) -> Cow<'a, str>;

    /// Key prefix of element `index` of the list shape `list`.
    fn list_element(&self, prefix: &str, list: &Shape, index: usize) -> String;

    /// Key of the key half of entry `index` of the map shape `map`.
    fn map_key(&self, prefix: &str, map: &Shape, key: &Shape, index: usize) -> String;

    /// Key prefix of the value half of entry `index` of the map shape `map`.
    fn map_value(&self, prefix: &str, map: &Shape, value: &Shape, index: usize) -> String;
}

/// Join two key segments with `.`; an empty prefix contributes nothing.
pub fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// Build the naming policy matching a serializer configuration.
pub fn policy_for(config: &SerializerConfig) -> Box<dyn NamingPolicy> {
    match config.protocol {
        QueryProtocol::Query => Box::new(QueryNaming {
            list_member_label: config.list_member_label.clone(),
            map_entry_label: config.map_entry_label.clone(),
        }),
        QueryProtocol::Ec2 => Box::new(Ec2Naming),
    }
}

fn entry_field(prefix: &str, index: usize, field: &Shape, default: &str) -> String {
    join(&join(prefix, &index.to_string()), field.serialized_name(default))
}

/// Generic query protocol naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryNaming {
    pub list_member_label: String,
    pub map_entry_label: String,
}

impl Default for QueryNaming {
    fn default() -> Self {
        Self {
            list_member_label: DEFAULT_LIST_MEMBER_LABEL.to_string(),
            map_entry_label: DEFAULT_MAP_ENTRY_LABEL.to_string(),
        }
    }
}

impl QueryNaming {
    fn map_base(&self, prefix: &str, map: &Shape) -> String {
        if map.flattened {
            prefix.to_string()
        } else {
            join(prefix, &self.map_entry_label)
        }
    }
}

impl NamingPolicy for QueryNaming {
    fn member_name<'a>(&self, logical_name: &'a str, member: &'a Shape) -> Cow<'a, str> {
        Cow::Borrowed(member.serialized_name(logical_name))
    }

    fn list_element(&self, prefix: &str, list: &Shape, index: usize) -> String {
        if list.flattened {
            join(prefix, &index.to_string())
        } else {
            join(&join(prefix, &self.list_member_label), &index.to_string())
        }
    }

    fn map_key(&self, prefix: &str, map: &Shape, key: &Shape, index: usize) -> String {
        entry_field(&self.map_base(prefix, map), index, key, DEFAULT_MAP_KEY_NAME)
    }

    fn map_value(&self, prefix: &str, map: &Shape, value: &Shape, index: usize) -> String {
        entry_field(
            &self.map_base(prefix, map),
            index,
            value,
            DEFAULT_MAP_VALUE_NAME,
        )
    }
}

/// Compute-instance style naming.
///
/// Lists and maps never carry a `Member`/`Entry` level, and members prefer an
/// explicit query name, then the wire name with its first letter capitalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ec2Naming;

impl NamingPolicy for Ec2Naming {
    fn member_name<'a>(&self, logical_name: &'a str, member: &'a Shape) -> Cow<'a, str> {
        if let Some(query_name) = member.query_name.as_deref() {
            return Cow::Borrowed(query_name);
        }
        match member.wire_name.as_deref() {
            Some(wire_name) => upper_first(wire_name),
            None => Cow::Borrowed(logical_name),
        }
    }

    fn list_element(&self, prefix: &str, _list: &Shape, index: usize) -> String {
        join(prefix, &index.to_string())
    }

    fn map_key(&self, prefix: &str, _map: &Shape, key: &Shape, index: usize) -> String {
        let field = upper_first(key.serialized_name(DEFAULT_MAP_KEY_NAME));
        join(&join(prefix, &index.to_string()), &field)
    }

    fn map_value(&self, prefix: &str, _map: &Shape, value: &Shape, index: usize) -> String {
        let field = upper_first(value.serialized_name(DEFAULT_MAP_VALUE_NAME));
        join(&join(prefix, &index.to_string()), &field)
    }
}

fn upper_first(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            Cow::Owned(first.to_uppercase().chain(chars).collect())
        }
        _ => Cow::Borrowed(name),
    }
}
