//! Type annotations carried by the stub IR

use crate::strings::{get_class_prefix, is_reserved};
use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of an argument, return value or attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypeAnnotation {
    Any,
    None,
    Str,
    Int,
    Float,
    Bool,
    Bytes,
    DateTime,
    List(Box<TypeAnnotation>),
    Dict(Box<TypeAnnotation>, Box<TypeAnnotation>),
    Iterator(Box<TypeAnnotation>),
    /// Named set of string literals
    Literal { name: String, values: Vec<String> },
    /// Reference to a generated `TypedDict`
    TypeDef(String),
    /// Forward reference to a class generated for the same service
    Internal {
        name: String,
        service: String,
        stringify: bool,
    },
}

impl TypeAnnotation {
    pub fn list(item: TypeAnnotation) -> Self {
        TypeAnnotation::List(Box::new(item))
    }

    pub fn dict(key: TypeAnnotation, value: TypeAnnotation) -> Self {
        TypeAnnotation::Dict(Box::new(key), Box::new(value))
    }

    pub fn iterator(item: TypeAnnotation) -> Self {
        TypeAnnotation::Iterator(Box::new(item))
    }

    /// Internal reference rendered as a quoted forward reference
    pub fn internal(name: &str, service: &str) -> Self {
        TypeAnnotation::Internal {
            name: name.to_string(),
            service: service.to_string(),
            stringify: true,
        }
    }

    /// Internal reference rendered without quotes
    pub fn internal_unquoted(name: &str, service: &str) -> Self {
        TypeAnnotation::Internal {
            name: name.to_string(),
            service: service.to_string(),
            stringify: false,
        }
    }

    /// Build a literal type, fixing names that would shadow reserved names
    ///
    /// # Examples
    /// ```
    /// use sdk_stubs_builder_common::TypeAnnotation;
    ///
    /// let literal = TypeAnnotation::literal("__stringType", &["a", "b"]).unwrap();
    /// assert_eq!(literal.to_string(), "ABType");
    /// ```
    pub fn literal(name: &str, values: &[&str]) -> Result<Self> {
        if values.is_empty() {
            return Err(GeneratorError::Parse(format!(
                "Literal {} has no values",
                name
            )));
        }

        let mut unique: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            if !unique.iter().any(|known| known == value) {
                unique.push(value.to_string());
            }
        }

        let name = if name.starts_with("__string") {
            let prefix: String = unique.iter().map(|value| get_class_prefix(value)).collect();
            format!("{}Type", prefix)
        } else if is_reserved(name) {
            format!("{}Type", name)
        } else {
            name.to_string()
        };

        Ok(TypeAnnotation::Literal {
            name,
            values: unique,
        })
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, TypeAnnotation::Literal { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TypeAnnotation::List(_))
    }

    pub fn is_dict(&self) -> bool {
        matches!(self, TypeAnnotation::Dict(..))
    }

    /// Name of the same-service class this annotation points at, if any
    pub fn internal_name(&self) -> Option<&str> {
        match self {
            TypeAnnotation::Internal { name, .. } => Some(name),
            TypeAnnotation::List(inner) | TypeAnnotation::Iterator(inner) => inner.internal_name(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeAnnotation::Any => write!(f, "Any"),
            TypeAnnotation::None => write!(f, "None"),
            TypeAnnotation::Str => write!(f, "str"),
            TypeAnnotation::Int => write!(f, "int"),
            TypeAnnotation::Float => write!(f, "float"),
            TypeAnnotation::Bool => write!(f, "bool"),
            TypeAnnotation::Bytes => write!(f, "bytes"),
            TypeAnnotation::DateTime => write!(f, "datetime"),
            TypeAnnotation::List(item) => write!(f, "List[{}]", item),
            TypeAnnotation::Dict(key, value) => write!(f, "Dict[{}, {}]", key, value),
            TypeAnnotation::Iterator(item) => write!(f, "Iterator[{}]", item),
            TypeAnnotation::Literal { name, values } => {
                if values.len() == 1 {
                    write!(f, "Literal['{}']", values[0])
                } else {
                    write!(f, "{}", name)
                }
            }
            TypeAnnotation::TypeDef(name) => write!(f, "{}", name),
            TypeAnnotation::Internal {
                name, stringify, ..
            } => {
                if *stringify {
                    write!(f, "\"{}\"", name)
                } else {
                    write!(f, "{}", name)
                }
            }
        }
    }
}
