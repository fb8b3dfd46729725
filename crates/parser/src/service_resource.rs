//! Service resource parser
//!
//! Root of the resource pipeline: parses the service resource of a service,
//! then every sub-resource the service declares.

use crate::factory::SERVICE_RESOURCE;
use crate::methods::ParseOptions;
use crate::resource::{parse_resource_body, parse_resource_with_options};
use crate::session::Session;
use crate::shape_oracle::ShapeOracle;
use crate::sub_resources::get_sub_resources;
use sdk_stubs_builder_common::{Result, ServiceName, ServiceResource};

/// Parse the service resource of a service
///
/// Returns `Ok(None)` when the service declares no resources.
pub fn parse_service_resource(
    session: &dyn Session,
    service_name: &ServiceName,
    shape_oracle: &dyn ShapeOracle,
) -> Result<Option<ServiceResource>> {
    parse_service_resource_with_options(
        session,
        service_name,
        shape_oracle,
        &ParseOptions::default(),
    )
}

/// [`parse_service_resource`] with explicit options
pub fn parse_service_resource_with_options(
    session: &dyn Session,
    service_name: &ServiceName,
    shape_oracle: &dyn ShapeOracle,
    options: &ParseOptions,
) -> Result<Option<ServiceResource>> {
    let service_resource = match session.resource(service_name)? {
        Some(service_resource) => service_resource,
        None => return Ok(None),
    };

    tracing::debug!("Parsing {} ServiceResource", service_name);
    let stub_name = format!("{}ServiceResource", service_name.class_name);
    let shape_method_map = shape_oracle.get_service_resource_method_map()?;
    let body = parse_resource_body(
        SERVICE_RESOURCE,
        &stub_name,
        &service_resource,
        service_name,
        shape_method_map,
        shape_oracle,
        options,
    )?;

    let arena = get_sub_resources(session, service_name, &service_resource)?;
    let mut sub_resources = Vec::with_capacity(arena.len());
    for (_, sub_resource) in arena.iter() {
        let type_name = sub_resource.class().type_name();
        let sub_resource_name = type_name
            .split_once('.')
            .map_or(type_name.as_str(), |(_, name)| name);
        tracing::debug!("Parsing {} sub resource", sub_resource_name);
        sub_resources.push(parse_resource_with_options(
            sub_resource_name,
            sub_resource,
            service_name,
            shape_oracle,
            options,
        )?);
    }

    Ok(Some(ServiceResource::from_resource(body, sub_resources)))
}
