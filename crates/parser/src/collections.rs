//! Collection parsing
//!
//! Every `hasMany` entry with a target resource becomes a [`Collection`]
//! named `{Parent}{Attribute}Collection`. Its methods mirror the SDK
//! collection manager: `all`, `filter`, batch actions, `limit`, `page_size`,
//! `pages` and `__iter__`.

use crate::factory::ResourceInstance;
use crate::resource_model::CollectionModel;
use crate::shape_oracle::ShapeOracle;
use sdk_stubs_builder_common::{
    get_class_prefix, Argument, Collection, Method, Result, ServiceName, TypeAnnotation,
};

/// Collections of a resource, in declaration order
pub fn parse_collections(
    parent_name: &str,
    resource: &ResourceInstance,
    service_name: &ServiceName,
    shape_oracle: &dyn ShapeOracle,
) -> Result<Vec<Collection>> {
    let mut result = Vec::new();
    for collection in &resource.model().collections {
        let Some(target) = collection.resource() else {
            tracing::debug!(
                "Skipping {}.{} without a target resource",
                parent_name,
                collection.name
            );
            continue;
        };

        let name = format!(
            "{}{}Collection",
            parent_name,
            get_class_prefix(&collection.name)
        );
        let service = service_name.boto3_name();
        let element = TypeAnnotation::internal(&target.type_name, service);
        let methods = collection_methods(&name, collection, &element, service, shape_oracle)?;

        result.push(Collection {
            name,
            parent_name: parent_name.to_string(),
            attribute_name: collection.name.clone(),
            object_class_name: target.type_name.clone(),
            type_annotation: element,
            service_name: service_name.clone(),
            methods,
        });
    }

    Ok(result)
}

fn collection_methods(
    name: &str,
    collection: &CollectionModel,
    element: &TypeAnnotation,
    service: &str,
    shape_oracle: &dyn ShapeOracle,
) -> Result<Vec<Method>> {
    let shape_methods = shape_oracle.get_resource_method_map(name)?;
    let self_type = TypeAnnotation::internal_unquoted(name, service);
    let count = || Argument::new("count", TypeAnnotation::Int);

    let mut result = vec![Method::new(
        "all",
        vec![Argument::self_arg()],
        self_type.clone(),
    )];

    result.push(match shape_methods.get("filter") {
        Some(method) => method.clone(),
        None => Method::new(
            "filter",
            vec![Argument::self_arg(), Argument::kwargs()],
            self_type.clone(),
        ),
    });

    for batch_action in &collection.batch_actions {
        result.push(match shape_methods.get(&batch_action.name) {
            Some(method) => method.clone(),
            None => Method::new(
                &batch_action.name,
                vec![Argument::self_arg(), Argument::kwargs()],
                TypeAnnotation::list(TypeAnnotation::dict(
                    TypeAnnotation::Str,
                    TypeAnnotation::Any,
                )),
            ),
        });
    }

    result.push(Method::new(
        "limit",
        vec![Argument::self_arg(), count()],
        self_type.clone(),
    ));
    result.push(Method::new(
        "page_size",
        vec![Argument::self_arg(), count()],
        self_type,
    ));
    result.push(Method::new(
        "pages",
        vec![Argument::self_arg()],
        TypeAnnotation::iterator(TypeAnnotation::list(element.clone())),
    ));
    result.push(Method::new(
        "__iter__",
        vec![Argument::self_arg()],
        TypeAnnotation::iterator(element.clone()),
    ));

    Ok(result)
}
