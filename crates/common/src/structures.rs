//! Stub IR nodes produced by the parser and consumed by renderers

use crate::{ServiceName, TypeAnnotation};
use serde::{Deserialize, Serialize};

/// Method argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,

    /// `None` for `self`
    pub type_annotation: Option<TypeAnnotation>,

    /// Rendered default value, if the argument is optional
    pub default: Option<String>,

    /// `*` for variadic positional, `**` for keyword catch-all
    pub prefix: String,
}

impl Argument {
    pub fn new(name: &str, type_annotation: TypeAnnotation) -> Self {
        Self {
            name: name.to_string(),
            type_annotation: Some(type_annotation),
            default: None,
            prefix: String::new(),
        }
    }

    pub fn self_arg() -> Self {
        Self {
            name: "self".to_string(),
            type_annotation: None,
            default: None,
            prefix: String::new(),
        }
    }

    /// `**kwargs: Any`
    pub fn kwargs() -> Self {
        Self {
            name: "kwargs".to_string(),
            type_annotation: Some(TypeAnnotation::Any),
            default: None,
            prefix: "**".to_string(),
        }
    }

    /// Bare `*` separating keyword-only arguments
    pub fn kwonly_marker() -> Self {
        Self {
            name: String::new(),
            type_annotation: None,
            default: None,
            prefix: "*".to_string(),
        }
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn is_kwargs(&self) -> bool {
        self.prefix == "**"
    }

    pub fn required(&self) -> bool {
        self.default.is_none() && self.prefix.is_empty()
    }
}

/// Method of a resource or collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub return_type: TypeAnnotation,
    #[serde(default)]
    pub docstring: String,
}

impl Method {
    pub fn new(name: &str, arguments: Vec<Argument>, return_type: TypeAnnotation) -> Self {
        Self {
            name: name.to_string(),
            arguments,
            return_type,
            docstring: String::new(),
        }
    }

    /// Look up an argument by name
    pub fn get_argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|argument| argument.name == name)
    }

    /// Arguments other than `self`
    pub fn call_arguments(&self) -> impl Iterator<Item = &Argument> {
        self.arguments
            .iter()
            .filter(|argument| argument.name != "self")
    }
}

/// Named, typed attribute of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub type_annotation: TypeAnnotation,
}

impl Attribute {
    pub fn new(name: &str, type_annotation: TypeAnnotation) -> Self {
        Self {
            name: name.to_string(),
            type_annotation,
        }
    }
}

/// Filterable, paginated list of related resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Generated class name (e.g., "ServiceResourceQueuesCollection")
    pub name: String,

    /// Name of the owning resource
    pub parent_name: String,

    /// Attribute binding the collection into its parent (e.g., "queues")
    pub attribute_name: String,

    /// Element resource type name (e.g., "Queue")
    pub object_class_name: String,

    /// Element type reference
    pub type_annotation: TypeAnnotation,

    pub service_name: ServiceName,

    pub methods: Vec<Method>,
}

impl Collection {
    pub fn get_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|method| method.name == name)
    }
}

/// Parsed resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub service_name: ServiceName,
    pub methods: Vec<Method>,
    pub attributes: Vec<Attribute>,
    pub collections: Vec<Collection>,
}

impl Resource {
    pub fn new(name: &str, service_name: &ServiceName) -> Self {
        Self {
            name: name.to_string(),
            service_name: service_name.clone(),
            methods: Vec::new(),
            attributes: Vec::new(),
            collections: Vec::new(),
        }
    }

    pub fn get_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|method| method.name == name)
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|method| method.name.as_str()).collect()
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes
            .iter()
            .map(|attribute| attribute.name.as_str())
            .collect()
    }
}

/// Root resource of a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResource {
    pub name: String,
    pub service_name: ServiceName,
    pub methods: Vec<Method>,
    pub attributes: Vec<Attribute>,
    pub collections: Vec<Collection>,
    pub sub_resources: Vec<Resource>,
}

impl ServiceResource {
    /// Root node named `{ClassName}ServiceResource`
    pub fn new(service_name: &ServiceName) -> Self {
        Self {
            name: format!("{}ServiceResource", service_name.class_name),
            service_name: service_name.clone(),
            methods: Vec::new(),
            attributes: Vec::new(),
            collections: Vec::new(),
            sub_resources: Vec::new(),
        }
    }

    /// Build the root from an already parsed resource body
    pub fn from_resource(resource: Resource, sub_resources: Vec<Resource>) -> Self {
        let mut result = Self::new(&resource.service_name);
        result.methods = resource.methods;
        result.attributes = resource.attributes;
        result.collections = resource.collections;
        result.sub_resources = sub_resources;
        result
    }

    pub fn get_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|method| method.name == name)
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|method| method.name.as_str()).collect()
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes
            .iter()
            .map(|attribute| attribute.name.as_str())
            .collect()
    }

    pub fn get_sub_resource(&self, name: &str) -> Option<&Resource> {
        self.sub_resources.iter().find(|resource| resource.name == name)
    }

    /// Collections of the root and of every sub-resource
    pub fn all_collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.iter().chain(
            self.sub_resources
                .iter()
                .flat_map(|resource| resource.collections.iter()),
        )
    }
}
