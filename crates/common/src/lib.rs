//! Common types and utilities for the SDK Stubs Builder
//!
//! This crate contains the stub IR (`Resource`, `ServiceResource`, `Method`,
//! ...), service naming rules, error types, configuration and string helpers
//! shared by the parser and CLI components.

mod config;
mod reserved;
mod service_name;
mod strings;
mod structures;
mod type_annotations;

pub use config::{GeneratorConfig, ServiceEntry};
pub use service_name::{DocFile, ServiceName, ServiceNameCatalog};
pub use strings::{
    get_anchor_link, get_class_prefix, get_short_docstring, get_short_docstring_with_limit,
    is_reserved, strip_html_tags, xform_name, MAX_DOCSTRING_LENGTH,
};
pub use structures::{Argument, Attribute, Collection, Method, Resource, ServiceResource};
pub use type_annotations::TypeAnnotation;

use thiserror::Error;

/// Errors that can occur while building the stub IR
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Unknown service {0}")]
    ServiceNotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Introspection error: {0}")]
    Introspection(String),

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Service model mismatch: expected {expected}, got {actual}")]
    ModelMismatch { expected: String, actual: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GeneratorError {
    /// Whether the error signals a misconfigured run rather than a bad service.
    ///
    /// Fatal errors must abort the whole run; everything else may be handled
    /// by skipping the service that produced it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GeneratorError::ModelMismatch { .. })
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_model_mismatch_is_fatal() {
        let mismatch = GeneratorError::ModelMismatch {
            expected: "sqs".to_string(),
            actual: "sns".to_string(),
        };
        assert!(mismatch.is_fatal());
        assert!(!GeneratorError::Introspection("boom".to_string()).is_fatal());
        assert!(!GeneratorError::UnknownService("sqs".to_string()).is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = GeneratorError::ServiceNotFound("nope".to_string());
        assert_eq!(err.to_string(), "Unknown service nope");
    }
}
