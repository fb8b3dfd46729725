//! Resolved resource model
//!
//! A [`ResourceModel`] is the declarative schema of one resource type: the
//! public names it exposes (snake_cased where the SDK does so) grouped by kind.
//! Everything the parsers introspect is read from here instead of from a live
//! SDK object.

use crate::model::{
    ActionDefinition, LoadDefinition, ResourceDefinition, ResourceTarget, WaiterDefinition,
};
use indexmap::IndexMap;
use sdk_stubs_builder_common::{xform_name, GeneratorError, Result};

/// Prefix of waiter methods on resources
pub const WAITER_PREFIX: &str = "wait_until";

/// Method listing the names of a resource's sub-resources
pub const AVAILABLE_SUBRESOURCES: &str = "get_available_subresources";

/// Resource identifier with its public name
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// snake_cased name (e.g., "url")
    pub name: String,

    /// Shape member carrying the identifier
    pub member_name: Option<String>,
}

/// Public callable exposed by a resource
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceAction {
    /// Service operation call (`send_message`)
    Action {
        name: String,
        definition: ActionDefinition,
    },

    /// Waiter (`wait_until_exists`)
    Waiter {
        name: String,
        resource_waiter_name: String,
        definition: WaiterDefinition,
    },

    /// Constructor of a related resource (`Queue(url)`)
    SubResource { name: String, target: ResourceTarget },

    /// `load` or `reload`
    Load {
        name: String,
        definition: LoadDefinition,
    },

    /// `get_available_subresources`
    AvailableSubresources {
        name: String,
        /// Sub-resource names, sorted
        subresources: Vec<String>,
    },
}

impl ResourceAction {
    pub fn name(&self) -> &str {
        match self {
            ResourceAction::Action { name, .. }
            | ResourceAction::Waiter { name, .. }
            | ResourceAction::SubResource { name, .. }
            | ResourceAction::Load { name, .. }
            | ResourceAction::AvailableSubresources { name, .. } => name,
        }
    }

    /// Service operation the action calls, if any
    pub fn operation(&self) -> Option<&str> {
        match self {
            ResourceAction::Action { definition, .. } => definition.operation(),
            ResourceAction::Load { definition, .. } => Some(definition.request.operation.as_str()),
            _ => None,
        }
    }
}

/// Related resource reachable through loaded data
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub name: String,
    pub target: ResourceTarget,
}

/// Action applied to every member of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct BatchAction {
    pub name: String,
    pub definition: ActionDefinition,
}

/// `hasMany` collection
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionModel {
    /// snake_cased attribute name (e.g., "queues")
    pub name: String,
    pub definition: ActionDefinition,
    pub batch_actions: Vec<BatchAction>,
}

impl CollectionModel {
    pub fn resource(&self) -> Option<&ResourceTarget> {
        self.definition.resource.as_ref()
    }
}

/// Declarative schema of one resource type
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceModel {
    pub name: String,
    pub shape: Option<String>,
    pub identifiers: Vec<Identifier>,
    pub load: Option<LoadDefinition>,
    pub actions: Vec<ResourceAction>,
    pub waiters: Vec<ResourceAction>,
    pub subresources: Vec<ResourceAction>,
    pub references: Vec<Reference>,
    pub collections: Vec<CollectionModel>,
}

impl ResourceModel {
    /// Resolve a resource definition against all definitions of the service
    pub fn new(
        name: &str,
        definition: &ResourceDefinition,
        resource_defs: &IndexMap<String, ResourceDefinition>,
    ) -> Result<Self> {
        let identifiers = definition
            .identifiers
            .iter()
            .map(|identifier| Identifier {
                name: xform_name(&identifier.name),
                member_name: identifier.member_name.clone(),
            })
            .collect();

        let actions = definition
            .actions
            .iter()
            .map(|(action_name, action)| ResourceAction::Action {
                name: xform_name(action_name),
                definition: action.clone(),
            })
            .collect();

        let waiters = definition
            .waiters
            .iter()
            .map(|(waiter_name, waiter)| ResourceAction::Waiter {
                name: format!("{}_{}", WAITER_PREFIX, xform_name(waiter_name)),
                resource_waiter_name: waiter_name.clone(),
                definition: waiter.clone(),
            })
            .collect();

        let mut subresources = Vec::new();
        let mut references = Vec::new();
        for (has_name, has) in &definition.has {
            if has.resource.requires_data() {
                references.push(Reference {
                    name: xform_name(has_name),
                    target: has.resource.clone(),
                });
            } else {
                subresources.push(ResourceAction::SubResource {
                    name: has_name.clone(),
                    target: has.resource.clone(),
                });
            }
        }

        let collections = definition
            .has_many
            .iter()
            .map(|(collection_name, collection)| {
                Self::resolve_collection(collection_name, collection, resource_defs)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            shape: definition.shape.clone(),
            identifiers,
            load: definition.load.clone(),
            actions,
            waiters,
            subresources,
            references,
            collections,
        })
    }

    fn resolve_collection(
        collection_name: &str,
        collection: &ActionDefinition,
        resource_defs: &IndexMap<String, ResourceDefinition>,
    ) -> Result<CollectionModel> {
        let batch_actions = match &collection.resource {
            Some(target) => {
                let element = resource_defs.get(&target.type_name).ok_or_else(|| {
                    GeneratorError::Introspection(format!(
                        "Collection {} targets unknown resource {}",
                        collection_name, target.type_name
                    ))
                })?;
                element
                    .batch_actions
                    .iter()
                    .map(|(batch_name, batch)| BatchAction {
                        name: xform_name(batch_name),
                        definition: batch.clone(),
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        Ok(CollectionModel {
            name: xform_name(collection_name),
            definition: collection.clone(),
            batch_actions,
        })
    }

    /// Every callable the resource exposes, in declaration order
    ///
    /// `load` and `reload` are the same operation exposed under two names.
    /// A resource declaring any callable also gets
    /// [`AVAILABLE_SUBRESOURCES`].
    pub fn all_actions(&self) -> Vec<ResourceAction> {
        let mut result: Vec<ResourceAction> = Vec::new();
        result.extend(self.actions.iter().cloned());
        result.extend(self.waiters.iter().cloned());
        result.extend(self.subresources.iter().cloned());
        if let Some(load) = &self.load {
            for name in ["load", "reload"] {
                result.push(ResourceAction::Load {
                    name: name.to_string(),
                    definition: load.clone(),
                });
            }
        }
        if !result.is_empty() {
            result.push(ResourceAction::AvailableSubresources {
                name: AVAILABLE_SUBRESOURCES.to_string(),
                subresources: self.subresource_names(),
            });
        }
        result
    }

    /// Names of the `has` sub-resources, sorted
    pub fn subresource_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .subresources
            .iter()
            .map(|action| action.name().to_string())
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceModelDocument;

    fn document() -> ResourceModelDocument {
        ResourceModelDocument::from_json(
            r#"{
            "resources": {
                "Instance": {
                    "identifiers": [ { "name": "Id", "memberName": "InstanceId" } ],
                    "shape": "Instance",
                    "load": {
                        "request": {
                            "operation": "DescribeInstances",
                            "params": [ { "target": "InstanceIds[0]", "source": "identifier", "name": "Id" } ]
                        },
                        "path": "Reservations[0].Instances[0]"
                    },
                    "actions": {
                        "Terminate": { "request": { "operation": "TerminateInstances" } }
                    },
                    "waiters": {
                        "Running": { "waiterName": "InstanceRunning", "params": [] }
                    },
                    "has": {
                        "Vpc": {
                            "resource": {
                                "type": "Vpc",
                                "identifiers": [ { "target": "Id", "source": "data", "path": "VpcId" } ]
                            }
                        },
                        "Tag": {
                            "resource": {
                                "type": "Tag",
                                "identifiers": [
                                    { "target": "ResourceId", "source": "identifier", "name": "Id" },
                                    { "target": "Key", "source": "input" }
                                ]
                            }
                        }
                    },
                    "hasMany": {
                        "VolumeAttachments": {
                            "request": { "operation": "DescribeVolumes" },
                            "resource": { "type": "Volume", "identifiers": [] }
                        }
                    },
                    "batchActions": {
                        "Terminate": { "request": { "operation": "TerminateInstances" } }
                    }
                },
                "Vpc": { "identifiers": [ { "name": "Id" } ] },
                "Tag": { "identifiers": [ { "name": "ResourceId" }, { "name": "Key" } ] },
                "Volume": {
                    "identifiers": [ { "name": "Id" } ],
                    "batchActions": {
                        "CreateSnapshots": { "request": { "operation": "CreateSnapshot" } }
                    }
                }
            }
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_model() {
        let document = document();
        let model =
            ResourceModel::new("Instance", &document.resources["Instance"], &document.resources)
                .unwrap();

        assert_eq!(model.identifiers[0].name, "id");
        assert_eq!(model.identifiers[0].member_name.as_deref(), Some("InstanceId"));
        assert_eq!(model.actions[0].name(), "terminate");
        assert_eq!(model.waiters[0].name(), "wait_until_running");
        assert_eq!(model.subresources[0].name(), "Tag");
        assert_eq!(model.references[0].name, "vpc");
        assert_eq!(model.collections[0].name, "volume_attachments");
        assert_eq!(model.collections[0].batch_actions[0].name, "create_snapshots");
    }

    #[test]
    fn test_all_actions_include_load_and_reload() {
        let document = document();
        let model =
            ResourceModel::new("Instance", &document.resources["Instance"], &document.resources)
                .unwrap();
        let names: Vec<String> = model
            .all_actions()
            .iter()
            .map(|action| action.name().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "terminate",
                "wait_until_running",
                "Tag",
                "load",
                "reload",
                "get_available_subresources"
            ]
        );
        assert_eq!(model.all_actions()[3].operation(), Some("DescribeInstances"));
        assert_eq!(model.all_actions()[5].operation(), None);
    }

    #[test]
    fn test_available_subresources_lists_sorted_names() {
        let document = ResourceModelDocument::from_json(
            r#"{ "service": {
                "has": {
                    "Topic": { "resource": { "type": "Topic", "identifiers": [ { "target": "Arn", "source": "input" } ] } },
                    "PlatformApplication": { "resource": { "type": "PlatformApplication", "identifiers": [ { "target": "Arn", "source": "input" } ] } }
                }
            } }"#,
        )
        .unwrap();
        let service = document.service.clone().unwrap();
        let model = ResourceModel::new("ServiceResource", &service, &document.resources).unwrap();

        match model.all_actions().pop() {
            Some(ResourceAction::AvailableSubresources { name, subresources }) => {
                assert_eq!(name, AVAILABLE_SUBRESOURCES);
                assert_eq!(subresources, ["PlatformApplication", "Topic"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_no_callables_means_no_actions() {
        let document = ResourceModelDocument::from_json(
            r#"{ "resources": { "Queue": { "identifiers": [ { "name": "Url" } ] } } }"#,
        )
        .unwrap();
        let model =
            ResourceModel::new("Queue", &document.resources["Queue"], &document.resources).unwrap();
        assert!(model.all_actions().is_empty());
    }

    #[test]
    fn test_collection_with_unknown_target_fails() {
        let document = ResourceModelDocument::from_json(
            r#"{ "resources": { "A": { "hasMany": { "Bs": { "resource": { "type": "B" } } } } } }"#,
        )
        .unwrap();
        let result = ResourceModel::new("A", &document.resources["A"], &document.resources);
        assert!(matches!(result, Err(GeneratorError::Introspection(_))));
    }
}
