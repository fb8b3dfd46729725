//! Resource model parsing for SDK stub generation
//!
//! This crate turns the JSON documents an SDK ships for a service (service
//! model, resource model, waiter model) into the stub IR defined in
//! `sdk-stubs-builder-common`.
//!
//! ## Pipeline
//!
//! - A [`Session`] loads the documents and builds the service resource
//!   instance ([`FileSession`] over a data directory, [`MemorySession`] in
//!   memory)
//! - [`get_sub_resources`] instantiates every declared resource type with
//!   placeholder identifiers
//! - [`parse_resource`] resolves methods (shape oracle first, then the
//!   signature derived from the resource model), attributes and collections
//! - [`parse_service_resource`] ties it together into a `ServiceResource`

mod attributes;
mod collections;
mod factory;
mod loader;
mod methods;
mod model;
mod resource;
mod resource_model;
mod service_resource;
mod session;
mod shape_oracle;
mod shape_parser;
mod sub_resources;
mod type_mapper;

pub use attributes::{parse_attributes, parse_identifiers, parse_references};
pub use collections::parse_collections;
pub use factory::{
    placeholder_identifiers, ResourceClass, ResourceFactory, ResourceInstance, ServiceContext,
    PLACEHOLDER_IDENTIFIER, SERVICE_RESOURCE,
};
pub use loader::FileSession;
pub use methods::{
    action_documentation, build_docstring, MethodContext, MethodResolver, MethodStrategy,
    ModelSignatureStrategy, OracleStrategy, ParseOptions,
};
pub use model::*;
pub use resource::{get_resource_public_methods, parse_resource, parse_resource_with_options};
pub use resource_model::{
    BatchAction, CollectionModel, Identifier, Reference, ResourceAction, ResourceModel,
    AVAILABLE_SUBRESOURCES, WAITER_PREFIX,
};
pub use service_resource::{parse_service_resource, parse_service_resource_with_options};
pub use session::{
    load_optional_waiter_model, ClientHandle, MemorySession, ServiceDocuments, Session,
};
pub use shape_oracle::{ShapeOracle, StaticShapeOracle};
pub use shape_parser::ShapeParser;
pub use sub_resources::{get_sub_resources, ResourceArena, ResourceTypeId};
pub use type_mapper::TypeMapper;
