//! Method resolution for resource actions
//!
//! A method is resolved by trying an ordered list of [`MethodStrategy`]
//! implementations; the first one that returns a method wins. The usual order
//! is the shape oracle first, then the signature derived from the resource
//! model, which always succeeds.

use crate::factory::ResourceInstance;
use crate::model::ResourceTarget;
use crate::resource_model::ResourceAction;
use indexmap::IndexMap;
use sdk_stubs_builder_common::{
    get_short_docstring_with_limit, strip_html_tags, xform_name, Argument, DocFile,
    GeneratorError, Method, Result, ServiceName, TypeAnnotation, MAX_DOCSTRING_LENGTH,
};

/// Options shared by the resource parsers
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Character budget of the summary attached to each method
    pub max_docstring_length: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_docstring_length: MAX_DOCSTRING_LENGTH,
        }
    }
}

/// Action being resolved and the resource it belongs to
pub struct MethodContext<'a> {
    /// SDK-side name of the owning resource (e.g., "Queue", "ServiceResource")
    pub resource_name: &'a str,
    pub action: &'a ResourceAction,
    pub resource: &'a ResourceInstance,
}

/// One way of producing a method signature
pub trait MethodStrategy {
    /// `Ok(None)` when the strategy has nothing for this action
    fn resolve(&self, context: &MethodContext<'_>) -> Result<Option<Method>>;
}

/// Signatures supplied by a shape oracle
pub struct OracleStrategy {
    methods: IndexMap<String, Method>,
}

impl OracleStrategy {
    pub fn new(methods: IndexMap<String, Method>) -> Self {
        Self { methods }
    }
}

impl MethodStrategy for OracleStrategy {
    fn resolve(&self, context: &MethodContext<'_>) -> Result<Option<Method>> {
        Ok(self.methods.get(context.action.name()).cloned())
    }
}

/// Best-effort signatures derived from the resource model
pub struct ModelSignatureStrategy;

impl ModelSignatureStrategy {
    fn target_type(target: &ResourceTarget, service: &str) -> TypeAnnotation {
        let internal = TypeAnnotation::internal(&target.type_name, service);
        if target.is_list() {
            TypeAnnotation::list(internal)
        } else {
            internal
        }
    }
}

impl MethodStrategy for ModelSignatureStrategy {
    fn resolve(&self, context: &MethodContext<'_>) -> Result<Option<Method>> {
        let service = context.resource.service_name();

        let method = match context.action {
            ResourceAction::Action { name, definition } => {
                let return_type = match (&definition.resource, definition.operation()) {
                    (Some(target), _) => Self::target_type(target, service),
                    (None, Some(operation)) => {
                        let operation = context
                            .resource
                            .client()
                            .service_model
                            .operation_model(operation)?;
                        if operation.output.is_some() {
                            TypeAnnotation::dict(TypeAnnotation::Str, TypeAnnotation::Any)
                        } else {
                            TypeAnnotation::None
                        }
                    }
                    (None, None) => TypeAnnotation::None,
                };
                Method::new(
                    name,
                    vec![Argument::self_arg(), Argument::kwargs()],
                    return_type,
                )
            }
            ResourceAction::Waiter { name, .. } => Method::new(
                name,
                vec![Argument::self_arg(), Argument::kwargs()],
                TypeAnnotation::None,
            ),
            ResourceAction::SubResource { name, target } => {
                let mut arguments = vec![Argument::self_arg()];
                arguments.extend(
                    target
                        .identifiers
                        .iter()
                        .filter(|identifier| identifier.is_input())
                        .map(|identifier| {
                            Argument::new(&xform_name(&identifier.target), TypeAnnotation::Str)
                        }),
                );
                Method::new(
                    name,
                    arguments,
                    TypeAnnotation::internal(&target.type_name, service),
                )
            }
            ResourceAction::Load { name, .. } => {
                Method::new(name, vec![Argument::self_arg()], TypeAnnotation::None)
            }
            ResourceAction::AvailableSubresources { name, .. } => Method::new(
                name,
                vec![Argument::self_arg()],
                TypeAnnotation::list(TypeAnnotation::Str),
            ),
        };

        Ok(Some(method))
    }
}

/// Ordered list of strategies
pub struct MethodResolver {
    strategies: Vec<Box<dyn MethodStrategy>>,
}

impl MethodResolver {
    pub fn new(strategies: Vec<Box<dyn MethodStrategy>>) -> Self {
        Self { strategies }
    }

    /// Oracle methods first, model-derived signature second
    pub fn with_oracle_methods(methods: IndexMap<String, Method>) -> Self {
        Self::new(vec![
            Box::new(OracleStrategy::new(methods)),
            Box::new(ModelSignatureStrategy),
        ])
    }

    pub fn resolve(&self, context: &MethodContext<'_>) -> Result<Method> {
        for strategy in &self.strategies {
            if let Some(method) = strategy.resolve(context)? {
                return Ok(method);
            }
        }

        Err(GeneratorError::Introspection(format!(
            "No signature found for {}.{}",
            context.resource_name,
            context.action.name()
        )))
    }
}

/// Documentation text of an action, before shortening
pub fn action_documentation(context: &MethodContext<'_>) -> Result<String> {
    let resource = context.resource;
    let class_name = resource.client().service_model.metadata.service_id.clone();
    let class_name = class_name.unwrap_or_else(|| resource.service_name().to_string());

    let text = match context.action {
        ResourceAction::Action { definition, .. } => match definition.operation() {
            Some(operation) => {
                let operation = resource.client().service_model.operation_model(operation)?;
                operation
                    .documentation
                    .as_deref()
                    .map(strip_html_tags)
                    .unwrap_or_default()
            }
            None => String::new(),
        },
        ResourceAction::Waiter {
            resource_waiter_name,
            definition,
            ..
        } => {
            let waiter_model = resource.class().context().service_waiter_model.as_ref();
            match waiter_model.and_then(|model| model.get_waiter(&definition.waiter_name)) {
                Some(waiter) => format!(
                    "Waits until this {} is {}. This method calls `{}.Waiter.{}.wait()` which polls `{}.Client.{}()` every {} seconds until a successful state is reached. An error is returned after {} failed checks.",
                    context.resource_name,
                    xform_name(resource_waiter_name).replace('_', " "),
                    class_name,
                    xform_name(&definition.waiter_name),
                    class_name,
                    xform_name(&waiter.operation),
                    waiter.delay,
                    waiter.max_attempts
                ),
                None => String::new(),
            }
        }
        ResourceAction::SubResource { target, .. } => {
            format!("Creates a {} resource.", target.type_name)
        }
        ResourceAction::Load { definition, .. } => format!(
            "Calls `{}.Client.{}()` to update the attributes of the {} resource.",
            class_name,
            xform_name(&definition.request.operation),
            context.resource_name
        ),
        ResourceAction::AvailableSubresources { .. } => String::new(),
    };

    Ok(text)
}

/// Docstring made of the short summary and links to SDK and stub docs
///
/// `sdk_name` keys the SDK documentation link, `stub_name` the generated stub
/// documentation link.
pub fn build_docstring(
    documentation: &str,
    service_name: &ServiceName,
    sdk_name: &str,
    stub_name: &str,
    method_name: &str,
    options: &ParseOptions,
) -> String {
    let summary = get_short_docstring_with_limit(documentation, options.max_docstring_length);
    let mut result = String::new();
    if !summary.is_empty() {
        result.push_str(&summary);
        result.push_str("\n\n");
    }

    let stub_anchor = format!("{} method", method_name);
    result.push_str(&format!(
        "[Show boto3 documentation]({})\n[Show boto3-stubs documentation]({})",
        service_name.get_boto3_doc_link(&[sdk_name, method_name]),
        service_name.get_doc_link(DocFile::ServiceResource, &[stub_name, stub_anchor.as_str()])
    ));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySession, Session};

    const SERVICE_JSON: &str = r#"{
        "metadata": { "serviceId": "Widget" },
        "operations": {
            "ActivateWidget": {
                "input": { "shape": "ActivateWidgetRequest" },
                "output": { "shape": "ActivateWidgetResult" },
                "documentation": "<p>Activates a widget. Needs a code.</p>"
            },
            "DescribeWidget": { "documentation": "<p>Describes a widget.</p>" }
        },
        "shapes": {
            "ActivateWidgetRequest": { "type": "structure", "members": {} },
            "ActivateWidgetResult": { "type": "structure", "members": {} }
        }
    }"#;

    const RESOURCES_JSON: &str = r#"{
        "service": {
            "identifiers": [ { "name": "Id" } ],
            "load": { "request": { "operation": "DescribeWidget" } },
            "actions": {
                "Activate": { "request": { "operation": "ActivateWidget" } },
                "CreateParts": {
                    "request": { "operation": "ActivateWidget" },
                    "resource": { "type": "Part", "path": "Parts[]" }
                }
            },
            "waiters": {
                "Ready": { "waiterName": "WidgetReady" }
            },
            "has": {
                "Part": {
                    "resource": {
                        "type": "Part",
                        "identifiers": [
                            { "target": "WidgetId", "source": "identifier", "name": "Id" },
                            { "target": "Serial", "source": "input" }
                        ]
                    }
                }
            }
        },
        "resources": {
            "Part": { "identifiers": [ { "name": "WidgetId" }, { "name": "Serial" } ] }
        }
    }"#;

    const WAITERS_JSON: &str = r#"{
        "version": 2,
        "waiters": {
            "WidgetReady": { "operation": "DescribeWidget", "delay": 15, "maxAttempts": 40 }
        }
    }"#;

    fn root() -> ResourceInstance {
        let session = MemorySession::new()
            .with_service(
                "widget",
                SERVICE_JSON,
                Some(RESOURCES_JSON),
                Some(WAITERS_JSON),
            )
            .unwrap();
        session
            .resource(&ServiceName::new("widget", "Widget"))
            .unwrap()
            .unwrap()
    }

    fn find_action(resource: &ResourceInstance, name: &str) -> ResourceAction {
        resource
            .model()
            .all_actions()
            .into_iter()
            .find(|action| action.name() == name)
            .unwrap()
    }

    fn resolve(resolver: &MethodResolver, resource: &ResourceInstance, name: &str) -> Method {
        let action = find_action(resource, name);
        let context = MethodContext {
            resource_name: "ServiceResource",
            action: &action,
            resource,
        };
        resolver.resolve(&context).unwrap()
    }

    #[test]
    fn test_model_signatures() {
        let resource = root();
        let resolver = MethodResolver::new(vec![Box::new(ModelSignatureStrategy)]);

        let activate = resolve(&resolver, &resource, "activate");
        assert_eq!(activate.arguments.len(), 2);
        assert!(activate.arguments[1].is_kwargs());
        assert_eq!(activate.return_type.to_string(), "Dict[str, Any]");

        let create_parts = resolve(&resolver, &resource, "create_parts");
        assert_eq!(create_parts.return_type.to_string(), "List[\"Part\"]");

        let part = resolve(&resolver, &resource, "Part");
        let names: Vec<&str> = part.arguments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["self", "serial"]);
        assert_eq!(part.return_type, TypeAnnotation::internal("Part", "widget"));

        let load = resolve(&resolver, &resource, "reload");
        assert_eq!(load.arguments, vec![Argument::self_arg()]);
        assert_eq!(load.return_type, TypeAnnotation::None);

        let waiter = resolve(&resolver, &resource, "wait_until_ready");
        assert_eq!(waiter.return_type, TypeAnnotation::None);

        let available = resolve(&resolver, &resource, "get_available_subresources");
        assert_eq!(available.arguments, vec![Argument::self_arg()]);
        assert_eq!(available.return_type.to_string(), "List[str]");
    }

    #[test]
    fn test_oracle_takes_precedence() {
        let resource = root();
        let mut methods = IndexMap::new();
        methods.insert(
            "activate".to_string(),
            Method::new(
                "activate",
                vec![
                    Argument::self_arg(),
                    Argument::new("code", TypeAnnotation::Str),
                ],
                TypeAnnotation::Bool,
            ),
        );
        let resolver = MethodResolver::with_oracle_methods(methods);

        let activate = resolve(&resolver, &resource, "activate");
        assert_eq!(activate.return_type, TypeAnnotation::Bool);
        assert!(activate.get_argument("code").is_some());

        let load = resolve(&resolver, &resource, "load");
        assert_eq!(load.return_type, TypeAnnotation::None);
    }

    #[test]
    fn test_empty_resolver_fails() {
        let resource = root();
        let resolver = MethodResolver::new(Vec::new());
        let action = find_action(&resource, "activate");
        let context = MethodContext {
            resource_name: "ServiceResource",
            action: &action,
            resource: &resource,
        };
        assert!(matches!(
            resolver.resolve(&context),
            Err(GeneratorError::Introspection(_))
        ));
    }

    #[test]
    fn test_action_documentation() {
        let resource = root();
        let doc = |name: &str| {
            let action = find_action(&resource, name);
            action_documentation(&MethodContext {
                resource_name: "ServiceResource",
                action: &action,
                resource: &resource,
            })
            .unwrap()
        };

        assert_eq!(doc("activate"), "Activates a widget. Needs a code.");
        assert_eq!(doc("Part"), "Creates a Part resource.");
        assert!(doc("load").starts_with("Calls `Widget.Client.describe_widget()`"));
        assert!(doc("wait_until_ready").starts_with("Waits until this ServiceResource is ready."));
        assert!(doc("wait_until_ready").contains("every 15 seconds"));
        assert_eq!(doc("get_available_subresources"), "");
    }

    #[test]
    fn test_build_docstring() {
        let service_name = ServiceName::new("widget", "Widget");
        let docstring = build_docstring(
            "Activates a widget. Needs a code.",
            &service_name,
            "ServiceResource",
            "WidgetServiceResource",
            "activate",
            &ParseOptions::default(),
        );
        let lines: Vec<&str> = docstring.lines().collect();
        assert_eq!(lines[0], "Activates a widget.");
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("[Show boto3 documentation]("));
        assert!(lines[2].ends_with(".ServiceResource.activate)"));
        assert!(lines[3].ends_with("service_resource.html#widgetserviceresourceactivate-method)"));

        let bare = build_docstring(
            "",
            &service_name,
            "Part",
            "Part",
            "load",
            &ParseOptions::default(),
        );
        assert!(bare.starts_with("[Show boto3 documentation]"));
    }
}
