//! Generator configuration loaded from YAML
//!
//! ```yaml
//! max_docstring_length: 200
//! services:
//!   - name: widget
//!     class_name: Widget
//! only: [sqs, widget]
//! ```

use crate::strings::MAX_DOCSTRING_LENGTH;
use crate::{GeneratorError, Result, ServiceNameCatalog};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Catalog entry added or overridden by configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceEntry {
    pub name: String,
    pub class_name: String,
}

/// Root structure of the generator configuration file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Character budget for method summaries
    #[serde(default = "default_max_docstring_length")]
    pub max_docstring_length: usize,

    /// Extra or overridden catalog entries
    #[serde(default)]
    pub services: Vec<ServiceEntry>,

    /// Restrict parsing to these services (empty means all)
    #[serde(default)]
    pub only: Vec<String>,
}

fn default_max_docstring_length() -> usize {
    MAX_DOCSTRING_LENGTH
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_docstring_length: MAX_DOCSTRING_LENGTH,
            services: Vec::new(),
            only: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            GeneratorError::Parse(format!("Failed to parse config YAML from {:?}: {}", path, e))
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration if the file exists, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                tracing::debug!("Config {:?} not found, using defaults", path);
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Register configured services in the catalog
    pub fn apply_to_catalog(&self, catalog: &mut ServiceNameCatalog) {
        for entry in &self.services {
            catalog.add(&entry.name, &entry.class_name);
        }
    }

    /// Whether a service passes the `only` filter
    pub fn is_selected(&self, service: &str) -> bool {
        self.only.is_empty() || self.only.iter().any(|name| name == service)
    }
}
