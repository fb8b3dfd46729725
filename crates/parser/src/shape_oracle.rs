//! Shape oracle seam
//!
//! An oracle supplies pre-parsed method signatures keyed by method name. When
//! it has an entry for a method, that entry is authoritative.

use indexmap::IndexMap;
use sdk_stubs_builder_common::{Method, Result};
use std::collections::HashMap;

/// Source of precise method signatures
#[cfg_attr(test, mockall::automock)]
pub trait ShapeOracle {
    /// Methods of a resource or collection class, keyed by method name
    fn get_resource_method_map(&self, resource_name: &str) -> Result<IndexMap<String, Method>>;

    /// Methods of the service resource, keyed by method name
    fn get_service_resource_method_map(&self) -> Result<IndexMap<String, Method>>;
}

/// Map-backed oracle
///
/// Unknown resource names resolve to an empty map.
#[derive(Debug, Clone, Default)]
pub struct StaticShapeOracle {
    resources: HashMap<String, IndexMap<String, Method>>,
    service_resource: IndexMap<String, Method>,
}

impl StaticShapeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method of a resource or collection class
    pub fn with_resource_method(mut self, resource_name: &str, method: Method) -> Self {
        self.resources
            .entry(resource_name.to_string())
            .or_default()
            .insert(method.name.clone(), method);
        self
    }

    /// Register a method of the service resource
    pub fn with_service_resource_method(mut self, method: Method) -> Self {
        self.service_resource.insert(method.name.clone(), method);
        self
    }
}

impl ShapeOracle for StaticShapeOracle {
    fn get_resource_method_map(&self, resource_name: &str) -> Result<IndexMap<String, Method>> {
        Ok(self
            .resources
            .get(resource_name)
            .cloned()
            .unwrap_or_default())
    }

    fn get_service_resource_method_map(&self) -> Result<IndexMap<String, Method>> {
        Ok(self.service_resource.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdk_stubs_builder_common::{Argument, TypeAnnotation};

    #[test]
    fn test_static_oracle() {
        let oracle = StaticShapeOracle::new()
            .with_resource_method(
                "Queue",
                Method::new("delete", vec![Argument::self_arg()], TypeAnnotation::None),
            )
            .with_service_resource_method(Method::new(
                "create_queue",
                vec![Argument::self_arg()],
                TypeAnnotation::internal("Queue", "sqs"),
            ));

        let queue = oracle.get_resource_method_map("Queue").unwrap();
        assert!(queue.contains_key("delete"));
        assert!(oracle.get_resource_method_map("Message").unwrap().is_empty());

        let root = oracle.get_service_resource_method_map().unwrap();
        assert_eq!(root.keys().collect::<Vec<_>>(), ["create_queue"]);
    }

    #[test]
    fn test_mock_oracle() {
        let mut oracle = MockShapeOracle::new();
        oracle
            .expect_get_resource_method_map()
            .withf(|name| name == "Queue")
            .times(1)
            .returning(|_| Ok(IndexMap::new()));

        assert!(oracle.get_resource_method_map("Queue").unwrap().is_empty());
    }
}
