//! Model registry.
//!
//! Service models are loaded once and read everywhere. A `ModelRegistry` is
//! immutable after `build()`; the process-wide instance is installed at most
//! once through `install_global` and needs no locking to read.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::error::{QueryError, Result};
use crate::operation::Operation;
use crate::service::ServiceModel;

/// Immutable set of service models keyed by service name.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    services: HashMap<String, Arc<ServiceModel>>,
}

impl ModelRegistry {
    pub fn builder() -> ModelRegistryBuilder {
        ModelRegistryBuilder::default()
    }

    pub fn service(&self, name: &str) -> Result<&ServiceModel> {
        self.services
            .get(name)
            .map(Arc::as_ref)
            .ok_or_else(|| QueryError::UnknownService(name.to_string()))
    }

    /// Shared handle to a service, for callers that outlive the registry borrow.
    pub fn service_handle(&self, name: &str) -> Result<Arc<ServiceModel>> {
        self.services
            .get(name)
            .cloned()
            .ok_or_else(|| QueryError::UnknownService(name.to_string()))
    }

    pub fn operation(&self, service: &str, operation: &str) -> Result<&Operation> {
        self.service(service)?.operation(operation)
    }

    pub fn service_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.services.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Builder for ModelRegistry
#[derive(Debug, Default)]
pub struct ModelRegistryBuilder {
    services: HashMap<String, Arc<ServiceModel>>,
}

impl ModelRegistryBuilder {
    /// Add a service; a later service with the same name replaces the earlier one.
    pub fn service(mut self, model: ServiceModel) -> Self {
        let name = model.name().to_string();
        if self.services.insert(name.clone(), Arc::new(model)).is_some() {
            tracing::warn!(service = %name, "replacing previously registered service model");
        }
        self
    }

    pub fn build(self) -> ModelRegistry {
        ModelRegistry {
            services: self.services,
        }
    }
}

static GLOBAL_REGISTRY: OnceLock<ModelRegistry> = OnceLock::new();

/// Install the process-wide registry. Succeeds only once.
pub fn install_global(registry: ModelRegistry) -> Result<&'static ModelRegistry> {
    let count = registry.len();
    GLOBAL_REGISTRY
        .set(registry)
        .map_err(|_| QueryError::RegistryAlreadyInstalled)?;
    tracing::debug!(service_count = count, "installed global model registry");
    GLOBAL_REGISTRY
        .get()
        .ok_or(QueryError::RegistryAlreadyInstalled)
}

/// The process-wide registry, if one was installed.
pub fn global() -> Option<&'static ModelRegistry> {
    GLOBAL_REGISTRY.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::query::QueryProtocol;
    use crate::types::Shape;

    fn registry() -> ModelRegistry {
        let ec2 = ServiceModel::builder("ec2")
            .protocol(QueryProtocol::Ec2)
            .operation(
                "DescribeInstances",
                Shape::structure([("DryRun", Shape::boolean())]),
            )
            .build()
            .unwrap();
        let sqs = ServiceModel::builder("sqs")
            .operation("ListQueues", Shape::empty_structure())
            .build()
            .unwrap();
        ModelRegistry::builder().service(ec2).service(sqs).build()
    }

    #[test]
    fn looks_up_services_and_operations() {
        let registry = registry();
        assert_eq!(registry.service_names(), ["ec2", "sqs"]);
        assert_eq!(
            registry.service("ec2").unwrap().protocol(),
            QueryProtocol::Ec2
        );
        assert_eq!(
            registry
                .operation("ec2", "DescribeInstances")
                .unwrap()
                .name(),
            "DescribeInstances"
        );
    }

    #[test]
    fn misses_are_typed() {
        let registry = registry();
        assert_eq!(
            registry.service("s3").unwrap_err(),
            QueryError::UnknownService("s3".into())
        );
        assert!(matches!(
            registry.operation("sqs", "Nope").unwrap_err(),
            QueryError::UnknownOperation { .. }
        ));
    }

    #[test]
    fn later_service_replaces_earlier() {
        let first = ServiceModel::builder("sqs").build().unwrap();
        let second = ServiceModel::builder("sqs")
            .api_version("2012-11-05")
            .build()
            .unwrap();
        let registry = ModelRegistry::builder().service(first).service(second).build();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.service_handle("sqs").unwrap().api_version(),
            Some("2012-11-05")
        );
    }
}
