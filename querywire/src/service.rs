//! Service models.
//!
//! A `ServiceModel` is built once (programmatically or from a deserialized
//! `ServiceDefinition`) and never mutated afterwards. All of its operations
//! share one serializer configured for the service's protocol variant.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::arguments::{ArgumentNameResolver, SnakeCaseArguments};
use crate::error::{QueryError, Result};
use crate::operation::Operation;
use crate::standards::query::{QueryProtocol, QuerySerializer, SerializerConfig};
use crate::types::{Shape, TimestampFormat};

/// Serde form of a service model.
///
/// ```json
/// {
///   "metadata": { "service_name": "ec2", "api_version": "2014-06-15", "protocol": "ec2" },
///   "operations": { "DescribeInstances": { "input": { "kind": "structure", "members": {} } } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub metadata: ServiceMetadata,
    #[serde(default)]
    pub operations: IndexMap<String, OperationDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceMetadata {
    pub service_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default)]
    pub protocol: QueryProtocol,
    /// Service-wide default for timestamp shapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_format: Option<TimestampFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationDefinition {
    /// Operations without input take no parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Shape>,
}

/// Immutable model of one service.
#[derive(Debug, Clone)]
pub struct ServiceModel {
    name: String,
    api_version: Option<String>,
    serializer: Arc<QuerySerializer>,
    operations: IndexMap<String, Operation>,
}

impl ServiceModel {
    pub fn builder(name: impl Into<String>) -> ServiceModelBuilder {
        ServiceModelBuilder::new(name)
    }

    /// Build from a deserialized definition, resolving snake_case arguments.
    pub fn from_definition(definition: ServiceDefinition) -> Result<Self> {
        let ServiceDefinition {
            metadata,
            operations,
        } = definition;

        let mut config = SerializerConfig::for_protocol(metadata.protocol);
        if let Some(format) = metadata.timestamp_format {
            config.timestamp_format = format;
        }

        let mut builder = Self::builder(metadata.service_name).config(config);
        if let Some(version) = metadata.api_version {
            builder = builder.api_version(version);
        }
        for (name, operation) in operations {
            let input = operation.input.unwrap_or_else(Shape::empty_structure);
            builder = builder.operation(name, input);
        }
        builder.build()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let definition: ServiceDefinition = serde_json::from_str(json)?;
        Self::from_definition(definition)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    pub fn protocol(&self) -> QueryProtocol {
        self.serializer.config().protocol
    }

    pub fn operation(&self, name: &str) -> Result<&Operation> {
        self.operations
            .get(name)
            .ok_or_else(|| QueryError::UnknownOperation {
                service: self.name.clone(),
                operation: name.to_string(),
            })
    }

    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }
}

/// Builder for ServiceModel
#[derive(Debug)]
pub struct ServiceModelBuilder {
    name: String,
    api_version: Option<String>,
    config: SerializerConfig,
    resolver: Arc<dyn ArgumentNameResolver>,
    operations: Vec<(String, Shape)>,
}

impl ServiceModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_version: None,
            config: SerializerConfig::default(),
            resolver: Arc::new(SnakeCaseArguments),
            operations: Vec::new(),
        }
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn protocol(mut self, protocol: QueryProtocol) -> Self {
        self.config.protocol = protocol;
        self
    }

    /// Replace the whole serializer configuration.
    pub fn config(mut self, config: SerializerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn argument_resolver(mut self, resolver: Arc<dyn ArgumentNameResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn operation(mut self, name: impl Into<String>, input: Shape) -> Self {
        self.operations.push((name.into(), input));
        self
    }

    pub fn build(self) -> Result<ServiceModel> {
        let serializer = Arc::new(QuerySerializer::new(self.config));
        let mut operations = IndexMap::with_capacity(self.operations.len());

        for (name, input) in self.operations {
            if operations.contains_key(&name) {
                return Err(QueryError::InvalidModel(format!(
                    "operation '{name}' is defined more than once in service '{}'",
                    self.name
                )));
            }
            let operation = Operation::new(
                name.clone(),
                input,
                Arc::clone(&serializer),
                self.resolver.as_ref(),
            )?
            .with_api_version(self.api_version.clone());
            operations.insert(name, operation);
        }

        tracing::debug!(
            service = %self.name,
            operation_count = operations.len(),
            "built service model"
        );

        Ok(ServiceModel {
            name: self.name,
            api_version: self.api_version,
            serializer,
            operations,
        })
    }
}
