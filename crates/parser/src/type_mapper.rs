//! Type mapping from service model shapes to stub type annotations

use crate::model::{ServiceModel, ShapeModel};
use sdk_stubs_builder_common::{Result, TypeAnnotation};

/// Maps service model shapes to `TypeAnnotation`
pub struct TypeMapper<'a> {
    service_model: &'a ServiceModel,
}

impl<'a> TypeMapper<'a> {
    pub fn new(service_model: &'a ServiceModel) -> Self {
        Self { service_model }
    }

    /// Map a named shape
    ///
    /// - `string` → `str`, or a `Literal` named `{Shape}Type` for enums
    /// - `integer`, `long` → `int`; `float`, `double` → `float`
    /// - `boolean` → `bool`; `timestamp` → `datetime`; `blob` → `bytes`
    /// - `list` → `List[...]`; `map` → `Dict[..., ...]`
    /// - `structure` → `{Shape}TypeDef`
    /// - anything else → `Any`
    pub fn map_shape(&self, shape_name: &str) -> Result<TypeAnnotation> {
        let shape = self.service_model.shape_for(shape_name)?;

        let result = match shape {
            ShapeModel::String {
                values: Some(values),
            } if !values.is_empty() => {
                let values: Vec<&str> = values.iter().map(String::as_str).collect();
                TypeAnnotation::literal(&format!("{}Type", shape_name), &values)?
            }
            ShapeModel::String { .. } => TypeAnnotation::Str,
            ShapeModel::Integer {} | ShapeModel::Long {} => TypeAnnotation::Int,
            ShapeModel::Float {} | ShapeModel::Double {} => TypeAnnotation::Float,
            ShapeModel::Boolean {} => TypeAnnotation::Bool,
            ShapeModel::Timestamp {} => TypeAnnotation::DateTime,
            ShapeModel::Blob {} => TypeAnnotation::Bytes,
            ShapeModel::List { member } => TypeAnnotation::list(self.map_shape(&member.shape)?),
            ShapeModel::Map { key, value } => {
                TypeAnnotation::dict(self.map_shape(&key.shape)?, self.map_shape(&value.shape)?)
            }
            ShapeModel::Structure { .. } => {
                TypeAnnotation::TypeDef(format!("{}TypeDef", shape_name))
            }
            ShapeModel::Other => TypeAnnotation::Any,
        };

        Ok(result)
    }
}
