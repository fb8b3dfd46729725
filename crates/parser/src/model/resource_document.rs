//! Resource model document (`resources-1.json`) type definitions

use indexmap::IndexMap;
use sdk_stubs_builder_common::{GeneratorError, Result};
use serde::{Deserialize, Serialize};

/// Root resource model document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceModelDocument {
    /// Definition of the service resource (the root)
    #[serde(default)]
    pub service: Option<ResourceDefinition>,

    /// Definitions of every other resource type, keyed by type name
    #[serde(default)]
    pub resources: IndexMap<String, ResourceDefinition>,
}

impl ResourceModelDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            GeneratorError::Parse(format!("Failed to parse resource model JSON: {}", e))
        })
    }

    /// Whether the document declares neither a root nor any resource type
    pub fn is_empty(&self) -> bool {
        self.service.is_none() && self.resources.is_empty()
    }

    pub fn get_resource(&self, name: &str) -> Option<&ResourceDefinition> {
        self.resources.get(name)
    }
}

/// Definition of one resource type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    /// Addressing keys, in constructor order
    #[serde(default)]
    pub identifiers: Vec<IdentifierDefinition>,

    /// Service model structure backing the resource attributes
    #[serde(default)]
    pub shape: Option<String>,

    /// Operation that loads the resource attributes
    #[serde(default)]
    pub load: Option<LoadDefinition>,

    #[serde(default)]
    pub actions: IndexMap<String, ActionDefinition>,

    /// Actions applied to every member of a collection of this type
    #[serde(default)]
    pub batch_actions: IndexMap<String, ActionDefinition>,

    #[serde(default)]
    pub waiters: IndexMap<String, WaiterDefinition>,

    /// Related single resources (sub-resources and references)
    #[serde(default)]
    pub has: IndexMap<String, HasDefinition>,

    /// Related collections
    #[serde(default)]
    pub has_many: IndexMap<String, ActionDefinition>,
}

/// Resource identifier declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierDefinition {
    pub name: String,

    /// Shape member carrying the identifier, when it differs from `name`
    #[serde(default)]
    pub member_name: Option<String>,
}

/// Action, batch action or collection definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    #[serde(default)]
    pub request: Option<RequestDefinition>,

    /// Resource built from the response
    #[serde(default)]
    pub resource: Option<ResourceTarget>,

    /// JMESPath into the response returned to the caller
    #[serde(default)]
    pub path: Option<String>,
}

impl ActionDefinition {
    pub fn operation(&self) -> Option<&str> {
        self.request.as_ref().map(|request| request.operation.as_str())
    }
}

/// Service operation call with bound parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDefinition {
    pub operation: String,

    #[serde(default)]
    pub params: Vec<ParameterBinding>,
}

/// Value bound into a request or a target identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterBinding {
    pub target: String,

    /// `identifier`, `data`, `input`, `response`, `requestParameter`, `string`, ...
    pub source: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl ParameterBinding {
    pub fn is_data(&self) -> bool {
        self.source == "data"
    }

    pub fn is_input(&self) -> bool {
        self.source == "input"
    }

    /// Top-level request member the binding fills (`Filters[0].Name` -> `Filters`)
    pub fn top_level_target(&self) -> &str {
        self.target
            .split(['.', '['])
            .next()
            .unwrap_or(&self.target)
    }
}

/// Target resource of an action, reference or collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceTarget {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub identifiers: Vec<ParameterBinding>,

    #[serde(default)]
    pub path: Option<String>,
}

impl ResourceTarget {
    /// Whether the action yields a list of resources
    pub fn is_list(&self) -> bool {
        self.path.as_deref().is_some_and(|path| path.contains("[]"))
    }

    /// Whether any identifier is taken from the parent's loaded data
    pub fn requires_data(&self) -> bool {
        self.identifiers.iter().any(ParameterBinding::is_data)
    }
}

/// `load` definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadDefinition {
    pub request: RequestDefinition,

    #[serde(default)]
    pub path: Option<String>,
}

/// Resource waiter definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaiterDefinition {
    /// Name of the waiter in the waiter model
    pub waiter_name: String,

    #[serde(default)]
    pub params: Vec<ParameterBinding>,

    #[serde(default)]
    pub path: Option<String>,
}

/// `has` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HasDefinition {
    pub resource: ResourceTarget,
}
