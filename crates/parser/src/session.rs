//! Session capability
//!
//! A [`Session`] loads the per-service documents and builds client and
//! service-resource handles from them. [`FileSession`](crate::FileSession)
//! reads an SDK data directory; [`MemorySession`] holds documents in memory.

use crate::factory::{
    placeholder_identifiers, ResourceFactory, ResourceInstance, ServiceContext, SERVICE_RESOURCE,
};
use crate::model::{ResourceModelDocument, ServiceModel, WaiterModel};
use sdk_stubs_builder_common::{GeneratorError, Result, ServiceName};
use std::collections::HashMap;
use std::sync::Arc;

/// Lightweight service client handle
///
/// Carries the service model for introspection; it never issues calls.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    pub service_name: String,
    pub service_model: Arc<ServiceModel>,
}

impl ClientHandle {
    pub fn new(service_name: &str, service_model: Arc<ServiceModel>) -> Self {
        Self {
            service_name: service_name.to_string(),
            service_model,
        }
    }
}

/// Source of per-service SDK documents
pub trait Session {
    /// Resource model document; `None` when the service has no resources
    fn load_resource_model(&self, service_name: &str) -> Result<Option<Arc<ResourceModelDocument>>>;

    /// Service model document; fails with
    /// [`GeneratorError::ServiceNotFound`] for a service the session does not
    /// know
    fn load_service_model(&self, service_name: &str) -> Result<Arc<ServiceModel>>;

    /// Waiter model; fails with [`GeneratorError::UnknownService`] when the
    /// service ships no waiters
    fn get_waiter_model(&self, service_name: &str) -> Result<Arc<WaiterModel>>;

    /// Low-level client handle
    fn client(&self, service_name: &ServiceName) -> Result<ClientHandle> {
        let service_model = self.load_service_model(service_name.boto3_name())?;
        Ok(ClientHandle::new(service_name.boto3_name(), service_model))
    }

    /// Service resource handle; `None` when the service declares no resources
    fn resource(&self, service_name: &ServiceName) -> Result<Option<ResourceInstance>> {
        let name = service_name.boto3_name();
        let document = match self.load_resource_model(name)? {
            Some(document) if !document.is_empty() => document,
            _ => return Ok(None),
        };

        let client = self.client(service_name)?;
        let context = Arc::new(ServiceContext {
            service_name: name.to_string(),
            resource_json_definitions: document.clone(),
            service_model: client.service_model.clone(),
            service_waiter_model: load_optional_waiter_model(self, name)?,
        });

        let root_definition = document.service.clone().unwrap_or_default();
        let class =
            ResourceFactory::load_from_definition(SERVICE_RESOURCE, &root_definition, context)?;
        let identifier_values = placeholder_identifiers(class.model().identifiers.len());
        ResourceInstance::new(class, identifier_values, client).map(Some)
    }
}

/// Load the waiter model, treating an unknown service as "no waiters"
pub fn load_optional_waiter_model<S: Session + ?Sized>(
    session: &S,
    service_name: &str,
) -> Result<Option<Arc<WaiterModel>>> {
    match session.get_waiter_model(service_name) {
        Ok(model) => Ok(Some(model)),
        Err(GeneratorError::UnknownService(_)) => {
            tracing::debug!("{} has no waiter model", service_name);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Documents of one service held by a [`MemorySession`]
#[derive(Debug, Clone)]
pub struct ServiceDocuments {
    pub service_model: Arc<ServiceModel>,
    pub resource_model: Option<Arc<ResourceModelDocument>>,
    pub waiter_model: Option<Arc<WaiterModel>>,
}

/// Session over in-memory documents
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    services: HashMap<String, ServiceDocuments>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service from its JSON documents
    pub fn with_service(
        mut self,
        service_name: &str,
        service_json: &str,
        resources_json: Option<&str>,
        waiters_json: Option<&str>,
    ) -> Result<Self> {
        let documents = ServiceDocuments {
            service_model: Arc::new(ServiceModel::from_json(service_json, service_name)?),
            resource_model: resources_json
                .map(ResourceModelDocument::from_json)
                .transpose()?
                .map(Arc::new),
            waiter_model: waiters_json
                .map(WaiterModel::from_json)
                .transpose()?
                .map(Arc::new),
        };
        self.insert(service_name, documents);
        Ok(self)
    }

    /// Register already parsed documents
    pub fn insert(&mut self, service_name: &str, documents: ServiceDocuments) {
        self.services.insert(service_name.to_string(), documents);
    }

    fn documents(&self, service_name: &str) -> Result<&ServiceDocuments> {
        self.services
            .get(service_name)
            .ok_or_else(|| GeneratorError::ServiceNotFound(service_name.to_string()))
    }
}

impl Session for MemorySession {
    fn load_resource_model(&self, service_name: &str) -> Result<Option<Arc<ResourceModelDocument>>> {
        Ok(self.documents(service_name)?.resource_model.clone())
    }

    fn load_service_model(&self, service_name: &str) -> Result<Arc<ServiceModel>> {
        Ok(self.documents(service_name)?.service_model.clone())
    }

    fn get_waiter_model(&self, service_name: &str) -> Result<Arc<WaiterModel>> {
        self.documents(service_name)?
            .waiter_model
            .clone()
            .ok_or_else(|| GeneratorError::UnknownService(service_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE_JSON: &str = r#"{ "metadata": { "serviceId": "Widget" } }"#;

    #[test]
    fn test_resource_is_none_without_resource_model() {
        let session = MemorySession::new()
            .with_service("widget", SERVICE_JSON, None, None)
            .unwrap();
        let service = ServiceName::new("widget", "Widget");
        assert!(session.resource(&service).unwrap().is_none());

        let session = MemorySession::new()
            .with_service("widget", SERVICE_JSON, Some("{}"), None)
            .unwrap();
        assert!(session.resource(&service).unwrap().is_none());
    }

    #[test]
    fn test_resource_without_waiters() {
        let session = MemorySession::new()
            .with_service(
                "widget",
                SERVICE_JSON,
                Some(r#"{ "service": { "has": {} }, "resources": {} }"#),
                None,
            )
            .unwrap();
        let service = ServiceName::new("widget", "Widget");
        let resource = session.resource(&service).unwrap().unwrap();
        assert_eq!(resource.class().type_name(), "widget.ServiceResource");
        assert!(resource.class().context().service_waiter_model.is_none());
        assert!(resource.identifier_values().is_empty());
    }

    #[test]
    fn test_unregistered_service_is_not_found() {
        let session = MemorySession::new();
        let service = ServiceName::new("nope", "Nope");
        assert!(matches!(
            session.client(&service),
            Err(GeneratorError::ServiceNotFound(_))
        ));
        assert!(matches!(
            load_optional_waiter_model(&session, "nope"),
            Err(GeneratorError::ServiceNotFound(_))
        ));
    }

    #[test]
    fn test_missing_waiter_model_is_unknown_service() {
        let session = MemorySession::new()
            .with_service("widget", SERVICE_JSON, None, None)
            .unwrap();
        assert!(matches!(
            session.get_waiter_model("widget"),
            Err(GeneratorError::UnknownService(_))
        ));
        assert!(load_optional_waiter_model(&session, "widget")
            .unwrap()
            .is_none());
    }
}
