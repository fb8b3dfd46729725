//! Service model document (`service-2.json`) type definitions

use indexmap::IndexMap;
use sdk_stubs_builder_common::{GeneratorError, Result};
use serde::{Deserialize, Serialize};

/// Operations and shapes of one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceModel {
    /// Name the model was loaded for; not part of the document
    #[serde(skip)]
    pub service_name: String,

    #[serde(default)]
    pub metadata: ServiceMetadata,

    #[serde(default)]
    pub operations: IndexMap<String, OperationModel>,

    #[serde(default)]
    pub shapes: IndexMap<String, ShapeModel>,

    #[serde(default)]
    pub documentation: Option<String>,
}

/// Service metadata block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetadata {
    #[serde(default)]
    pub api_version: Option<String>,

    #[serde(default)]
    pub endpoint_prefix: Option<String>,

    #[serde(default)]
    pub service_id: Option<String>,

    #[serde(default)]
    pub service_full_name: Option<String>,

    #[serde(default)]
    pub protocol: Option<String>,
}

/// Single operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationModel {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub input: Option<ShapeRef>,

    #[serde(default)]
    pub output: Option<ShapeRef>,

    #[serde(default)]
    pub documentation: Option<String>,
}

/// Reference to a named shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRef {
    pub shape: String,

    #[serde(default)]
    pub documentation: Option<String>,
}

/// Shape definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeModel {
    Structure {
        #[serde(default)]
        members: IndexMap<String, ShapeRef>,

        #[serde(default)]
        required: Vec<String>,
    },

    List {
        member: ShapeRef,
    },

    Map {
        key: ShapeRef,
        value: ShapeRef,
    },

    String {
        #[serde(default, rename = "enum")]
        values: Option<Vec<String>>,
    },

    Integer {},

    Long {},

    Boolean {},

    Double {},

    Float {},

    Timestamp {},

    Blob {},

    /// Fallback for other shape types
    #[serde(other)]
    Other,
}

impl ServiceModel {
    /// Parse a service model loaded for `service_name`
    pub fn from_json(json: &str, service_name: &str) -> Result<Self> {
        let mut model: ServiceModel = serde_json::from_str(json).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to parse service model JSON for {}: {}",
                service_name, e
            ))
        })?;
        model.service_name = service_name.to_string();
        Ok(model)
    }

    pub fn shape_for(&self, name: &str) -> Result<&ShapeModel> {
        self.shapes.get(name).ok_or_else(|| {
            GeneratorError::Introspection(format!(
                "Shape {} is not defined in {} service model",
                name, self.service_name
            ))
        })
    }

    pub fn operation_model(&self, name: &str) -> Result<&OperationModel> {
        self.operations.get(name).ok_or_else(|| {
            GeneratorError::Introspection(format!(
                "Operation {} is not defined in {} service model",
                name, self.service_name
            ))
        })
    }

    /// Members of a structure shape, with their required flags
    pub fn structure_members(&self, name: &str) -> Result<Vec<(&str, &ShapeRef, bool)>> {
        match self.shape_for(name)? {
            ShapeModel::Structure { members, required } => Ok(members
                .iter()
                .map(|(member_name, member)| {
                    let is_required = required.iter().any(|r| r == member_name);
                    (member_name.as_str(), member, is_required)
                })
                .collect()),
            _ => Err(GeneratorError::Introspection(format!(
                "Shape {} is not a structure",
                name
            ))),
        }
    }
}
