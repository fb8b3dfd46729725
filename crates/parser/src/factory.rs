//! Resource classes built from resource definitions
//!
//! A [`ResourceClass`] pairs a resolved [`ResourceModel`] with the shared
//! [`ServiceContext`] it was built from. A [`ResourceInstance`] is a class
//! bound to identifier values and a client handle; it is only ever
//! introspected, never used to call the service.

use crate::model::{ResourceDefinition, ResourceModelDocument, ServiceModel, WaiterModel};
use crate::resource_model::ResourceModel;
use crate::session::ClientHandle;
use sdk_stubs_builder_common::{GeneratorError, Result};
use std::sync::Arc;

/// Name of the root resource type
pub const SERVICE_RESOURCE: &str = "ServiceResource";

/// Identifier value used for instances that are only introspected
pub const PLACEHOLDER_IDENTIFIER: &str = "foo";

/// `count` placeholder identifier values
pub fn placeholder_identifiers(count: usize) -> Vec<String> {
    vec![PLACEHOLDER_IDENTIFIER.to_string(); count]
}

/// Everything resource classes of one service share
#[derive(Debug, Clone)]
pub struct ServiceContext {
    pub service_name: String,

    /// The whole resource model document classes are resolved against
    pub resource_json_definitions: Arc<ResourceModelDocument>,

    pub service_model: Arc<ServiceModel>,

    /// `None` when the service ships no waiters
    pub service_waiter_model: Option<Arc<WaiterModel>>,
}

/// Resource type built from its definition
#[derive(Debug, Clone)]
pub struct ResourceClass {
    name: String,
    model: ResourceModel,
    context: Arc<ServiceContext>,
}

impl ResourceClass {
    /// Short type name (e.g., "Queue")
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type name qualified with the service (e.g., "sqs.Queue")
    pub fn type_name(&self) -> String {
        format!("{}.{}", self.context.service_name, self.name)
    }

    pub fn model(&self) -> &ResourceModel {
        &self.model
    }

    pub fn context(&self) -> &Arc<ServiceContext> {
        &self.context
    }
}

/// Builds resource classes
pub struct ResourceFactory;

impl ResourceFactory {
    /// Build a resource class from one definition and the shared service context
    pub fn load_from_definition(
        resource_name: &str,
        single_resource_json_definition: &ResourceDefinition,
        service_context: Arc<ServiceContext>,
    ) -> Result<ResourceClass> {
        let model = ResourceModel::new(
            resource_name,
            single_resource_json_definition,
            &service_context.resource_json_definitions.resources,
        )?;

        Ok(ResourceClass {
            name: resource_name.to_string(),
            model,
            context: service_context,
        })
    }
}

/// Resource class bound to identifier values and a client
#[derive(Debug, Clone)]
pub struct ResourceInstance {
    class: ResourceClass,
    identifier_values: Vec<String>,
    client: ClientHandle,
}

impl ResourceInstance {
    /// Instantiate a class; exactly one value per declared identifier is required
    pub fn new(
        class: ResourceClass,
        identifier_values: Vec<String>,
        client: ClientHandle,
    ) -> Result<Self> {
        let expected = class.model().identifiers.len();
        if identifier_values.len() != expected {
            return Err(GeneratorError::Introspection(format!(
                "{} requires {} identifier values, got {}",
                class.type_name(),
                expected,
                identifier_values.len()
            )));
        }

        Ok(Self {
            class,
            identifier_values,
            client,
        })
    }

    pub fn class(&self) -> &ResourceClass {
        &self.class
    }

    pub fn model(&self) -> &ResourceModel {
        self.class.model()
    }

    pub fn identifier_values(&self) -> &[String] {
        &self.identifier_values
    }

    pub fn client(&self) -> &ClientHandle {
        &self.client
    }

    /// Service the instance is bound to
    pub fn service_name(&self) -> &str {
        &self.class.context.service_name
    }

    /// Resource model document the instance was built from
    pub fn resource_model_document(&self) -> &Arc<ResourceModelDocument> {
        &self.class.context.resource_json_definitions
    }
}
