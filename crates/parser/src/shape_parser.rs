//! Shape oracle built from the service model
//!
//! Resource action signatures are derived from the input and output shapes of
//! the operations the actions call. Members filled in by the resource itself
//! (request `params`) are left out of the signature.

use crate::factory::SERVICE_RESOURCE;
use crate::model::{
    ActionDefinition, ParameterBinding, ResourceDefinition, ResourceModelDocument, ServiceModel,
    WaiterModel,
};
use crate::resource_model::WAITER_PREFIX;
use crate::session::{load_optional_waiter_model, Session};
use crate::shape_oracle::ShapeOracle;
use crate::type_mapper::TypeMapper;
use indexmap::IndexMap;
use sdk_stubs_builder_common::{
    get_class_prefix, xform_name, Argument, Method, Result, ServiceName, TypeAnnotation,
};
use std::sync::Arc;

/// Default value rendered for optional keyword arguments
const OPTIONAL_DEFAULT: &str = "...";

/// Oracle over the service model and resource model document of one service
#[derive(Debug, Clone)]
pub struct ShapeParser {
    service_name: String,
    service_model: Arc<ServiceModel>,
    resource_document: Arc<ResourceModelDocument>,
    waiter_model: Option<Arc<WaiterModel>>,
}

impl ShapeParser {
    pub fn new(
        service_name: &str,
        service_model: Arc<ServiceModel>,
        resource_document: Arc<ResourceModelDocument>,
        waiter_model: Option<Arc<WaiterModel>>,
    ) -> Self {
        Self {
            service_name: service_name.to_string(),
            service_model,
            resource_document,
            waiter_model,
        }
    }

    /// Load every document the oracle needs from a session
    pub fn from_session(session: &dyn Session, service_name: &ServiceName) -> Result<Self> {
        let name = service_name.boto3_name();
        let service_model = session.load_service_model(name)?;
        let resource_document = session.load_resource_model(name)?.unwrap_or_default();
        let waiter_model = load_optional_waiter_model(session, name)?;
        tracing::debug!("Building shape parser for {}", name);
        Ok(Self::new(name, service_model, resource_document, waiter_model))
    }

    /// Resource definitions paired with the names collections are keyed by
    fn definitions(&self) -> impl Iterator<Item = (&str, &ResourceDefinition)> {
        self.resource_document
            .service
            .iter()
            .map(|definition| (SERVICE_RESOURCE, definition))
            .chain(
                self.resource_document
                    .resources
                    .iter()
                    .map(|(name, definition)| (name.as_str(), definition)),
            )
    }

    /// `self`, then keyword-only members of the operation input
    ///
    /// Members bound by `params` are skipped. Required members come first and
    /// have no default unless `all_optional` is set.
    fn input_arguments(
        &self,
        operation: &str,
        params: &[ParameterBinding],
        all_optional: bool,
    ) -> Result<Vec<Argument>> {
        let mut arguments = vec![Argument::self_arg()];
        let input = match &self.service_model.operation_model(operation)?.input {
            Some(input) => input,
            None => return Ok(arguments),
        };

        let mapper = TypeMapper::new(&self.service_model);
        let mut required = Vec::new();
        let mut optional = Vec::new();
        for (member_name, member, is_required) in
            self.service_model.structure_members(&input.shape)?
        {
            if params
                .iter()
                .any(|param| param.top_level_target() == member_name)
            {
                continue;
            }

            let argument = Argument::new(member_name, mapper.map_shape(&member.shape)?);
            if is_required && !all_optional {
                required.push(argument);
            } else {
                optional.push(argument.with_default(OPTIONAL_DEFAULT));
            }
        }

        if !required.is_empty() || !optional.is_empty() {
            arguments.push(Argument::kwonly_marker());
        }
        arguments.extend(required);
        arguments.extend(optional);
        Ok(arguments)
    }

    fn output_type(&self, operation: &str) -> Result<TypeAnnotation> {
        match &self.service_model.operation_model(operation)?.output {
            Some(output) => TypeMapper::new(&self.service_model).map_shape(&output.shape),
            None => Ok(TypeAnnotation::None),
        }
    }

    fn action_method(&self, name: &str, action: &ActionDefinition) -> Result<Option<Method>> {
        let request = match &action.request {
            Some(request) => request,
            None => return Ok(None),
        };

        let arguments = self.input_arguments(&request.operation, &request.params, false)?;
        let return_type = match &action.resource {
            Some(target) => {
                let internal = TypeAnnotation::internal(&target.type_name, &self.service_name);
                if target.is_list() {
                    TypeAnnotation::list(internal)
                } else {
                    internal
                }
            }
            None => self.output_type(&request.operation)?,
        };

        Ok(Some(Method::new(name, arguments, return_type)))
    }

    fn definition_method_map(
        &self,
        definition: &ResourceDefinition,
    ) -> Result<IndexMap<String, Method>> {
        let mut result = IndexMap::new();

        if definition.load.is_some() {
            for name in ["load", "reload"] {
                result.insert(
                    name.to_string(),
                    Method::new(name, vec![Argument::self_arg()], TypeAnnotation::None),
                );
            }
        }

        for (action_name, action) in &definition.actions {
            let name = xform_name(action_name);
            if let Some(method) = self.action_method(&name, action)? {
                result.insert(name, method);
            }
        }

        for (waiter_name, waiter) in &definition.waiters {
            let Some(config) = self
                .waiter_model
                .as_ref()
                .and_then(|model| model.get_waiter(&waiter.waiter_name))
            else {
                continue;
            };
            let name = format!("{}_{}", WAITER_PREFIX, xform_name(waiter_name));
            let arguments = self.input_arguments(&config.operation, &waiter.params, false)?;
            result.insert(
                name.clone(),
                Method::new(&name, arguments, TypeAnnotation::None),
            );
        }

        Ok(result)
    }

    fn collection_method_map(
        &self,
        collection_class: &str,
    ) -> Result<Option<IndexMap<String, Method>>> {
        for (parent_name, definition) in self.definitions() {
            for (collection_name, collection) in &definition.has_many {
                let class_name = format!(
                    "{}{}Collection",
                    parent_name,
                    get_class_prefix(&xform_name(collection_name))
                );
                if class_name != collection_class {
                    continue;
                }

                let mut result = IndexMap::new();
                if let Some(request) = &collection.request {
                    let arguments =
                        self.input_arguments(&request.operation, &request.params, true)?;
                    result.insert(
                        "filter".to_string(),
                        Method::new(
                            "filter",
                            arguments,
                            TypeAnnotation::internal_unquoted(&class_name, &self.service_name),
                        ),
                    );
                }

                let element = collection
                    .resource
                    .as_ref()
                    .and_then(|target| self.resource_document.get_resource(&target.type_name));
                if let Some(element) = element {
                    for (batch_name, batch) in &element.batch_actions {
                        let Some(request) = &batch.request else {
                            continue;
                        };
                        let name = xform_name(batch_name);
                        let arguments =
                            self.input_arguments(&request.operation, &request.params, false)?;
                        let return_type = match &self
                            .service_model
                            .operation_model(&request.operation)?
                            .output
                        {
                            Some(_) => TypeAnnotation::list(self.output_type(&request.operation)?),
                            None => TypeAnnotation::None,
                        };
                        result.insert(name.clone(), Method::new(&name, arguments, return_type));
                    }
                }

                return Ok(Some(result));
            }
        }

        Ok(None)
    }
}

impl ShapeOracle for ShapeParser {
    fn get_resource_method_map(&self, resource_name: &str) -> Result<IndexMap<String, Method>> {
        if let Some(definition) = self.resource_document.get_resource(resource_name) {
            return self.definition_method_map(definition);
        }
        Ok(self
            .collection_method_map(resource_name)?
            .unwrap_or_default())
    }

    fn get_service_resource_method_map(&self) -> Result<IndexMap<String, Method>> {
        match &self.resource_document.service {
            Some(definition) => self.definition_method_map(definition),
            None => Ok(IndexMap::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE_JSON: &str = r#"{
        "operations": {
            "CreateQueue": {
                "input": { "shape": "CreateQueueRequest" },
                "output": { "shape": "CreateQueueResult" }
            },
            "DeleteQueue": { "input": { "shape": "DeleteQueueRequest" } },
            "ListQueues": { "input": { "shape": "ListQueuesRequest" } },
            "DeleteMessageBatch": {
                "input": { "shape": "DeleteMessageBatchRequest" },
                "output": { "shape": "DeleteMessageBatchResult" }
            },
            "GetQueueAttributes": { "input": { "shape": "DeleteQueueRequest" } }
        },
        "shapes": {
            "String": { "type": "string" },
            "Integer": { "type": "integer" },
            "CreateQueueRequest": {
                "type": "structure",
                "required": ["QueueName"],
                "members": {
                    "Attributes": { "shape": "String" },
                    "QueueName": { "shape": "String" }
                }
            },
            "CreateQueueResult": { "type": "structure", "members": {} },
            "DeleteQueueRequest": {
                "type": "structure",
                "required": ["QueueUrl"],
                "members": { "QueueUrl": { "shape": "String" } }
            },
            "ListQueuesRequest": {
                "type": "structure",
                "required": ["QueueNamePrefix"],
                "members": {
                    "QueueNamePrefix": { "shape": "String" },
                    "MaxResults": { "shape": "Integer" }
                }
            },
            "DeleteMessageBatchRequest": {
                "type": "structure",
                "required": ["QueueUrl", "Entries"],
                "members": {
                    "QueueUrl": { "shape": "String" },
                    "Entries": { "shape": "String" }
                }
            },
            "DeleteMessageBatchResult": { "type": "structure", "members": {} }
        }
    }"#;

    const RESOURCES_JSON: &str = r#"{
        "service": {
            "actions": {
                "CreateQueue": {
                    "request": {
                        "operation": "CreateQueue",
                        "params": [ { "target": "Attributes.Policy", "source": "string", "value": "x" } ]
                    },
                    "resource": {
                        "type": "Queue",
                        "identifiers": [ { "target": "Url", "source": "response", "path": "QueueUrl" } ]
                    }
                }
            },
            "hasMany": {
                "Queues": {
                    "request": { "operation": "ListQueues" },
                    "resource": { "type": "Queue", "identifiers": [] }
                }
            }
        },
        "resources": {
            "Queue": {
                "identifiers": [ { "name": "Url" } ],
                "load": {
                    "request": {
                        "operation": "GetQueueAttributes",
                        "params": [ { "target": "QueueUrl", "source": "identifier", "name": "Url" } ]
                    }
                },
                "actions": {
                    "Delete": {
                        "request": {
                            "operation": "DeleteQueue",
                            "params": [ { "target": "QueueUrl", "source": "identifier", "name": "Url" } ]
                        }
                    }
                }
            },
            "Message": {
                "identifiers": [ { "name": "QueueUrl" } ],
                "batchActions": {
                    "Delete": {
                        "request": {
                            "operation": "DeleteMessageBatch",
                            "params": [ { "target": "QueueUrl", "source": "identifier", "name": "QueueUrl" } ]
                        }
                    }
                }
            }
        }
    }"#;

    fn parser() -> ShapeParser {
        ShapeParser::new(
            "sqs",
            Arc::new(ServiceModel::from_json(SERVICE_JSON, "sqs").unwrap()),
            Arc::new(ResourceModelDocument::from_json(RESOURCES_JSON).unwrap()),
            None,
        )
    }

    fn argument_names(method: &Method) -> Vec<&str> {
        method
            .arguments
            .iter()
            .map(|argument| argument.name.as_str())
            .collect()
    }

    #[test]
    fn test_service_resource_method_map() {
        let methods = parser().get_service_resource_method_map().unwrap();
        let create_queue = &methods["create_queue"];
        assert_eq!(argument_names(create_queue), ["self", "", "QueueName"]);
        assert!(create_queue.arguments[2].required());
        assert_eq!(
            create_queue.return_type,
            TypeAnnotation::internal("Queue", "sqs")
        );
    }

    #[test]
    fn test_resource_method_map() {
        let methods = parser().get_resource_method_map("Queue").unwrap();
        assert_eq!(
            methods.keys().collect::<Vec<_>>(),
            ["load", "reload", "delete"]
        );
        assert_eq!(argument_names(&methods["delete"]), ["self"]);
        assert_eq!(methods["delete"].return_type, TypeAnnotation::None);
    }

    #[test]
    fn test_collection_method_map() {
        let methods = parser()
            .get_resource_method_map("ServiceResourceQueuesCollection")
            .unwrap();
        let filter = &methods["filter"];
        assert_eq!(
            argument_names(filter),
            ["self", "", "QueueNamePrefix", "MaxResults"]
        );
        assert!(filter.arguments[2..].iter().all(|argument| !argument.required()));
        assert_eq!(filter.return_type.to_string(), "ServiceResourceQueuesCollection");
    }

    #[test]
    fn test_unknown_name_is_empty() {
        assert!(parser().get_resource_method_map("Nope").unwrap().is_empty());
    }
}
