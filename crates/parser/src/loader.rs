//! File-backed session over an SDK data directory
//!
//! Layout: `<root>/<service>/<api-version>/<document>.json`, where the
//! document is one of `service-2`, `resources-1` or `waiters-2`. When a
//! service ships several API versions the lexicographically greatest one wins,
//! independently for every document type.

use crate::model::{ResourceModelDocument, ServiceModel, WaiterModel};
use crate::session::Session;
use sdk_stubs_builder_common::{GeneratorError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SERVICE_MODEL: &str = "service-2.json";
const RESOURCE_MODEL: &str = "resources-1.json";
const WAITER_MODEL: &str = "waiters-2.json";

/// Session reading JSON documents from disk
#[derive(Debug, Clone)]
pub struct FileSession {
    root: PathBuf,
}

impl FileSession {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of services that ship a service model, sorted
    pub fn available_services(&self) -> Result<Vec<String>> {
        let mut services = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if self.find_document(&name, SERVICE_MODEL)?.is_some() {
                services.push(name);
            }
        }
        services.sort();
        Ok(services)
    }

    /// Path of the latest version of a document, if the service ships one
    fn find_document(&self, service_name: &str, document: &str) -> Result<Option<PathBuf>> {
        let service_dir = self.root.join(service_name);
        if !service_dir.is_dir() {
            return Ok(None);
        }

        let mut versions: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(&service_dir)? {
            let path = entry?.path();
            if path.join(document).is_file() {
                versions.push(path);
            }
        }
        versions.sort();

        Ok(versions.pop().map(|version| version.join(document)))
    }

    fn read_document(&self, service_name: &str, document: &str) -> Result<Option<String>> {
        match self.find_document(service_name, document)? {
            Some(path) => {
                tracing::debug!("Loading {}", path.display());
                Ok(Some(fs::read_to_string(path)?))
            }
            None => Ok(None),
        }
    }

    fn ensure_service(&self, service_name: &str) -> Result<()> {
        match self.find_document(service_name, SERVICE_MODEL)? {
            Some(_) => Ok(()),
            None => Err(GeneratorError::ServiceNotFound(service_name.to_string())),
        }
    }
}

impl Session for FileSession {
    fn load_resource_model(&self, service_name: &str) -> Result<Option<Arc<ResourceModelDocument>>> {
        self.ensure_service(service_name)?;
        self.read_document(service_name, RESOURCE_MODEL)?
            .map(|json| ResourceModelDocument::from_json(&json).map(Arc::new))
            .transpose()
    }

    fn load_service_model(&self, service_name: &str) -> Result<Arc<ServiceModel>> {
        let json = self
            .read_document(service_name, SERVICE_MODEL)?
            .ok_or_else(|| GeneratorError::ServiceNotFound(service_name.to_string()))?;
        Ok(Arc::new(ServiceModel::from_json(&json, service_name)?))
    }

    fn get_waiter_model(&self, service_name: &str) -> Result<Arc<WaiterModel>> {
        self.ensure_service(service_name)?;
        let json = self
            .read_document(service_name, WAITER_MODEL)?
            .ok_or_else(|| GeneratorError::UnknownService(service_name.to_string()))?;
        Ok(Arc::new(WaiterModel::from_json(&json)?))
    }
}
