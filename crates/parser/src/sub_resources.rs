//! Sub-resource enumeration
//!
//! Every resource type declared by a service is instantiated with placeholder
//! identifier values so it can be introspected like any other resource. The
//! instances never issue calls.

use crate::factory::{placeholder_identifiers, ResourceFactory, ResourceInstance, ServiceContext};
use crate::session::{load_optional_waiter_model, Session};
use sdk_stubs_builder_common::{GeneratorError, Result, ServiceName};
use std::sync::Arc;

/// Position of a resource type in a [`ResourceArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceTypeId(usize);

impl ResourceTypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Placeholder instances in resource model declaration order
#[derive(Debug, Clone, Default)]
pub struct ResourceArena {
    instances: Vec<ResourceInstance>,
}

impl ResourceArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instance: ResourceInstance) -> ResourceTypeId {
        self.instances.push(instance);
        ResourceTypeId(self.instances.len() - 1)
    }

    pub fn get(&self, id: ResourceTypeId) -> Option<&ResourceInstance> {
        self.instances.get(id.0)
    }

    /// Look up an instance by its short type name (e.g., "Queue")
    pub fn find(&self, name: &str) -> Option<(ResourceTypeId, &ResourceInstance)> {
        self.iter().find(|(_, instance)| instance.class().name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceTypeId, &ResourceInstance)> {
        self.instances
            .iter()
            .enumerate()
            .map(|(index, instance)| (ResourceTypeId(index), instance))
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

fn check_service_name(expected: &str, actual: &str) -> Result<()> {
    if expected != actual {
        return Err(GeneratorError::ModelMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Instantiate every resource type of the service with placeholder identifiers
///
/// The resource model document is the one `parent` was built from. A parent
/// bound to another service, or holding another service's model, is a
/// [`GeneratorError::ModelMismatch`].
pub fn get_sub_resources(
    session: &dyn Session,
    service_name: &ServiceName,
    parent: &ResourceInstance,
) -> Result<ResourceArena> {
    let expected = service_name.boto3_name();
    check_service_name(expected, parent.service_name())?;

    let resource_json_definitions = parent.resource_model_document().clone();
    let service_model = parent.client().service_model.clone();
    check_service_name(expected, &service_model.service_name)?;

    let context = Arc::new(ServiceContext {
        service_name: expected.to_string(),
        resource_json_definitions: resource_json_definitions.clone(),
        service_model,
        service_waiter_model: load_optional_waiter_model(session, expected)?,
    });

    let mut result = ResourceArena::new();
    for (name, definition) in &resource_json_definitions.resources {
        let class = ResourceFactory::load_from_definition(name, definition, context.clone())?;
        let identifier_values = placeholder_identifiers(class.model().identifiers.len());
        let client = session.client(service_name)?;
        result.push(ResourceInstance::new(class, identifier_values, client)?);
    }

    tracing::debug!("{} declares {} sub-resources", expected, result.len());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::PLACEHOLDER_IDENTIFIER;
    use crate::session::MemorySession;

    const RESOURCES_JSON: &str = r#"{
        "service": { "has": { "Part": { "resource": { "type": "Part" } } } },
        "resources": {
            "Part": { "identifiers": [ { "name": "WidgetId" }, { "name": "Serial" } ] },
            "Bolt": {}
        }
    }"#;

    fn session() -> MemorySession {
        MemorySession::new()
            .with_service("widget", "{}", Some(RESOURCES_JSON), None)
            .unwrap()
    }

    #[test]
    fn test_enumerates_every_resource_type() {
        let session = session();
        let service_name = ServiceName::new("widget", "Widget");
        let parent = session.resource(&service_name).unwrap().unwrap();

        let arena = get_sub_resources(&session, &service_name, &parent).unwrap();
        assert_eq!(arena.len(), 2);

        let (part_id, part) = arena.find("Part").unwrap();
        assert_eq!(part_id.index(), 0);
        assert_eq!(part.identifier_values(), [PLACEHOLDER_IDENTIFIER, PLACEHOLDER_IDENTIFIER]);
        assert_eq!(part.class().type_name(), "widget.Part");
        assert!(Arc::ptr_eq(
            part.resource_model_document(),
            parent.resource_model_document()
        ));

        let (_, bolt) = arena.find("Bolt").unwrap();
        assert!(bolt.identifier_values().is_empty());
    }

    #[test]
    fn test_parent_of_other_service_is_fatal() {
        let session = session();
        let parent = session
            .resource(&ServiceName::new("widget", "Widget"))
            .unwrap()
            .unwrap();

        let result = get_sub_resources(&session, &ServiceName::new("gadget", "Gadget"), &parent);
        match result {
            Err(error @ GeneratorError::ModelMismatch { .. }) => assert!(error.is_fatal()),
            other => panic!("unexpected {:?}", other.map(|arena| arena.len())),
        }
    }
}
