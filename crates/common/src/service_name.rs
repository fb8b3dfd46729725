//! Service naming and the service catalog
//!
//! A [`ServiceName`] identifies one SDK service and derives every name the
//! generated stubs use for it. The [`ServiceNameCatalog`] is built once at
//! startup and then passed by reference through the pipeline.

use crate::strings::{get_anchor_link, is_reserved};
use crate::{GeneratorError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Module name prefix of generated service packages
pub const MODULE_NAME: &str = "mypy_boto3";

/// Package index name prefix of generated service packages
pub const PYPI_NAME: &str = "mypy-boto3";

const SDK_DOCS_URL: &str = "https://boto3.amazonaws.com/v1/documentation/api";
const LOCAL_DOCS_URL: &str = "https://vemel.github.io/boto3_stubs_docs";

/// Services bundled into the `essential` extra
const ESSENTIAL: &[&str] = &[
    "ec2",
    "rds",
    "s3",
    "lambda",
    "sqs",
    "cloudformation",
    "dynamodb",
];

/// Generated documentation page a link points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocFile {
    Client,
    ServiceResource,
    Waiters,
    Paginators,
    TypeDefs,
    Literals,
}

impl DocFile {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocFile::Client => "client",
            DocFile::ServiceResource => "service_resource",
            DocFile::Waiters => "waiters",
            DocFile::Paginators => "paginators",
            DocFile::TypeDefs => "type_defs",
            DocFile::Literals => "literals",
        }
    }
}

/// Description of one SDK service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceName {
    /// SDK service name (e.g., "sqs", "cloudsearch-domain")
    pub name: String,

    /// Class name prefix (e.g., "SQS", "CloudWatchLogs")
    pub class_name: String,

    /// SDK documentation version tag
    pub boto3_version: String,
}

impl ServiceName {
    pub const LATEST: &'static str = "latest";

    pub fn new(name: &str, class_name: &str) -> Self {
        Self {
            name: name.to_string(),
            class_name: class_name.to_string(),
            boto3_version: Self::LATEST.to_string(),
        }
    }

    /// Python-friendly service name
    pub fn underscore_name(&self) -> String {
        self.name.replace('-', "_")
    }

    /// Name the SDK itself uses for the service
    pub fn boto3_name(&self) -> &str {
        &self.name
    }

    /// Safe module import name
    pub fn import_name(&self) -> String {
        let name = self.underscore_name();
        if is_reserved(&name) {
            return format!("{}_", name);
        }
        name
    }

    /// Package module name for the service
    pub fn module_name(&self) -> String {
        format!("{}_{}", MODULE_NAME, self.underscore_name())
    }

    /// Name of the package on the package index
    pub fn pypi_name(&self) -> String {
        format!("{}-{}", PYPI_NAME, self.name)
    }

    pub fn pypi_link(&self) -> String {
        format!("https://pypi.org/project/{}/", self.pypi_name())
    }

    /// Extras name for subpackage installation
    pub fn extras_name(&self) -> &str {
        &self.name
    }

    /// Whether the service belongs to the `essential` extra
    pub fn is_essential(&self) -> bool {
        ESSENTIAL.contains(&self.name.as_str())
    }

    pub fn boto3_doc_link(&self) -> String {
        format!(
            "{}/{}/reference/services/{}.html#{}",
            SDK_DOCS_URL,
            self.boto3_version,
            self.boto3_name(),
            self.class_name
        )
    }

    pub fn local_doc_link(&self) -> String {
        format!("{}/{}/", LOCAL_DOCS_URL, self.module_name())
    }

    /// Link to SDK docs with anchor parts joined by `.`
    pub fn get_boto3_doc_link(&self, parts: &[&str]) -> String {
        std::iter::once(self.boto3_doc_link())
            .chain(parts.iter().map(|part| part.to_string()))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Relative link to markdown docs with an anchor
    pub fn get_md_doc_link(file: DocFile, parts: &[&str]) -> String {
        let link = format!("./{}.md", file.as_str());
        if parts.is_empty() {
            return link;
        }
        format!("{}#{}", link, Self::anchor(parts))
    }

    /// Link to generated stub docs with an anchor
    pub fn get_doc_link(&self, file: DocFile, parts: &[&str]) -> String {
        let link = format!("{}{}.html", self.local_doc_link(), file.as_str());
        if parts.is_empty() {
            return link;
        }
        format!("{}#{}", link, Self::anchor(parts))
    }

    fn anchor(parts: &[&str]) -> String {
        parts.iter().map(|part| get_anchor_link(part)).collect()
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<ServiceName {} {}>", self.name, self.class_name)
    }
}

/// Lookup of services by SDK name
///
/// Entries are added while the catalog is built; afterwards it is shared
/// read-only.
#[derive(Debug, Clone, Default)]
pub struct ServiceNameCatalog {
    items: IndexMap<String, ServiceName>,
}

impl ServiceNameCatalog {
    /// Catalog without entries
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the services that ship a resource model
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for (name, class_name) in [
            ("ec2", "EC2"),
            ("iam", "IAM"),
            ("s3", "S3"),
            ("cloudwatch", "CloudWatch"),
            ("opsworks", "OpsWorks"),
            ("sns", "SNS"),
            ("glacier", "Glacier"),
            ("dynamodb", "DynamoDB"),
            ("sqs", "SQS"),
            ("cloudformation", "CloudFormation"),
            ("cloudsearchdomain", "CloudSearchDomain"),
            ("logs", "CloudWatchLogs"),
            ("lambda", "Lambda"),
        ] {
            catalog.add(name, class_name);
        }
        catalog
    }

    /// Get a `ServiceName` by SDK name
    pub fn find(&self, name: &str) -> Result<&ServiceName> {
        self.items
            .get(name)
            .ok_or_else(|| GeneratorError::ServiceNotFound(name.to_string()))
    }

    /// Add a new service or update the class name of an existing one
    pub fn add(&mut self, name: &str, class_name: &str) -> &ServiceName {
        let entry = self
            .items
            .entry(name.to_string())
            .or_insert_with(|| ServiceName::new(name, class_name));
        entry.class_name = class_name.to_string();
        entry
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceName> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
