//! Serializer configuration.

use serde::{Deserialize, Serialize};

use crate::types::TimestampFormat;

/// Label inserted between a non-flattened list's name and the element index.
pub const DEFAULT_LIST_MEMBER_LABEL: &str = "Member";
/// Label inserted between a non-flattened map's name and the entry index.
pub const DEFAULT_MAP_ENTRY_LABEL: &str = "Entry";
/// Field names used for map entries unless the key/value shape overrides them.
pub const DEFAULT_MAP_KEY_NAME: &str = "Key";
pub const DEFAULT_MAP_VALUE_NAME: &str = "Value";

/// Protocol variant of the query family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryProtocol {
    /// Generic query protocol; only shapes marked `flattened` drop the extra level.
    #[default]
    Query,
    /// Compute-instance style: every list and map is flattened.
    Ec2,
}

impl QueryProtocol {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Ec2 => "ec2",
        }
    }
}

/// Configuration for `QuerySerializer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    pub protocol: QueryProtocol,
    /// Used for timestamp shapes that do not pin their own format.
    pub timestamp_format: TimestampFormat,
    pub list_member_label: String,
    pub map_entry_label: String,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            protocol: QueryProtocol::Query,
            timestamp_format: TimestampFormat::Iso8601,
            list_member_label: DEFAULT_LIST_MEMBER_LABEL.to_string(),
            map_entry_label: DEFAULT_MAP_ENTRY_LABEL.to_string(),
        }
    }
}

impl SerializerConfig {
    pub fn builder() -> SerializerConfigBuilder {
        SerializerConfigBuilder::default()
    }

    pub fn for_protocol(protocol: QueryProtocol) -> Self {
        Self {
            protocol,
            ..Self::default()
        }
    }
}

/// Builder for SerializerConfig
#[derive(Debug, Default)]
pub struct SerializerConfigBuilder {
    protocol: Option<QueryProtocol>,
    timestamp_format: Option<TimestampFormat>,
    list_member_label: Option<String>,
    map_entry_label: Option<String>,
}

impl SerializerConfigBuilder {
    pub fn protocol(mut self, protocol: QueryProtocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = Some(format);
        self
    }

    pub fn list_member_label(mut self, label: impl Into<String>) -> Self {
        self.list_member_label = Some(label.into());
        self
    }

    pub fn map_entry_label(mut self, label: impl Into<String>) -> Self {
        self.map_entry_label = Some(label.into());
        self
    }

    pub fn build(self) -> SerializerConfig {
        let defaults = SerializerConfig::default();
        SerializerConfig {
            protocol: self.protocol.unwrap_or(defaults.protocol),
            timestamp_format: self.timestamp_format.unwrap_or(defaults.timestamp_format),
            list_member_label: self
                .list_member_label
                .unwrap_or(defaults.list_member_label),
            map_entry_label: self.map_entry_label.unwrap_or(defaults.map_entry_label),
        }
    }
}
