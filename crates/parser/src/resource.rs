//! Resource parser
//!
//! Builds the `Resource` IR node of one resource type: resolved methods with
//! doc links, data attributes, identifiers, references and collections.

use crate::attributes::{parse_attributes, parse_identifiers, parse_references};
use crate::collections::parse_collections;
use crate::factory::ResourceInstance;
use crate::methods::{
    action_documentation, build_docstring, MethodContext, MethodResolver, ParseOptions,
};
use crate::resource_model::{ResourceAction, ResourceModel};
use crate::shape_oracle::ShapeOracle;
use indexmap::IndexMap;
use sdk_stubs_builder_common::{Attribute, Method, Resource, Result, ServiceName, TypeAnnotation};
use std::collections::BTreeMap;

/// Public actions of a resource keyed by name, sorted by name
///
/// Names starting with `_` are never public.
pub fn get_resource_public_methods(model: &ResourceModel) -> BTreeMap<String, ResourceAction> {
    model
        .all_actions()
        .into_iter()
        .filter(|action| !action.name().starts_with('_'))
        .map(|action| (action.name().to_string(), action))
        .collect()
}

/// Parse one resource type
pub fn parse_resource(
    name: &str,
    resource: &ResourceInstance,
    service_name: &ServiceName,
    shape_oracle: &dyn ShapeOracle,
) -> Result<Resource> {
    parse_resource_with_options(
        name,
        resource,
        service_name,
        shape_oracle,
        &ParseOptions::default(),
    )
}

/// [`parse_resource`] with explicit options
pub fn parse_resource_with_options(
    name: &str,
    resource: &ResourceInstance,
    service_name: &ServiceName,
    shape_oracle: &dyn ShapeOracle,
    options: &ParseOptions,
) -> Result<Resource> {
    let shape_method_map = shape_oracle.get_resource_method_map(name)?;
    parse_resource_body(
        name,
        name,
        resource,
        service_name,
        shape_method_map,
        shape_oracle,
        options,
    )
}

/// Shared body of the resource and service-resource parsers
///
/// `name` is the SDK-side resource name: it keys the SDK doc links and names
/// collections. `stub_name` keys the stub doc links.
pub(crate) fn parse_resource_body(
    name: &str,
    stub_name: &str,
    resource: &ResourceInstance,
    service_name: &ServiceName,
    shape_method_map: IndexMap<String, Method>,
    shape_oracle: &dyn ShapeOracle,
    options: &ParseOptions,
) -> Result<Resource> {
    let mut result = Resource::new(name, service_name);
    let resolver = MethodResolver::with_oracle_methods(shape_method_map);

    for (method_name, action) in get_resource_public_methods(resource.model()) {
        let context = MethodContext {
            resource_name: name,
            action: &action,
            resource,
        };
        tracing::debug!("Resolving {}.{}", name, method_name);
        let mut method = resolver.resolve(&context)?;
        let documentation = action_documentation(&context)?;
        method.docstring = build_docstring(
            &documentation,
            service_name,
            name,
            stub_name,
            &method_name,
            options,
        );
        result.methods.push(method);
    }

    result.attributes.extend(parse_attributes(resource)?);
    result.attributes.extend(parse_identifiers(resource));
    result.attributes.extend(parse_references(resource));

    for collection in parse_collections(name, resource, service_name, shape_oracle)? {
        result.attributes.push(Attribute::new(
            &collection.attribute_name,
            TypeAnnotation::internal_unquoted(&collection.name, service_name.boto3_name()),
        ));
        result.collections.push(collection);
    }

    Ok(result)
}
