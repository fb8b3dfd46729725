//! Attribute, identifier and reference parsing
//!
//! Each function returns its own ordered list. Lists are not deduplicated
//! against each other; a name may appear once per provenance.

use crate::factory::ResourceInstance;
use crate::type_mapper::TypeMapper;
use sdk_stubs_builder_common::{xform_name, Attribute, Result, TypeAnnotation};

/// Data attributes loaded from the resource shape
///
/// Members whose snake_cased name equals an identifier name are skipped; the
/// identifier itself is exposed by [`parse_identifiers`]. Members named by an
/// identifier's `memberName` stay data attributes.
pub fn parse_attributes(resource: &ResourceInstance) -> Result<Vec<Attribute>> {
    let model = resource.model();
    let shape = match &model.shape {
        Some(shape) => shape,
        None => return Ok(Vec::new()),
    };

    let service_model = &resource.client().service_model;
    let mapper = TypeMapper::new(service_model);
    let mut result = Vec::new();
    for (member_name, member, _) in service_model.structure_members(shape)? {
        let name = xform_name(member_name);
        if model
            .identifiers
            .iter()
            .any(|identifier| identifier.name == name)
        {
            continue;
        }

        result.push(Attribute::new(&name, mapper.map_shape(&member.shape)?));
    }

    tracing::debug!(
        "{} has {} data attributes",
        resource.class().type_name(),
        result.len()
    );
    Ok(result)
}

/// Identifier attributes in declared order
pub fn parse_identifiers(resource: &ResourceInstance) -> Vec<Attribute> {
    resource
        .model()
        .identifiers
        .iter()
        .map(|identifier| Attribute::new(&identifier.name, TypeAnnotation::Str))
        .collect()
}

/// Reference attributes typed as forward references to the target resource
pub fn parse_references(resource: &ResourceInstance) -> Vec<Attribute> {
    let service = resource.service_name();
    resource
        .model()
        .references
        .iter()
        .map(|reference| {
            let internal = TypeAnnotation::internal(&reference.target.type_name, service);
            let type_annotation = if reference.target.is_list() {
                TypeAnnotation::list(internal)
            } else {
                internal
            };
            Attribute::new(&reference.name, type_annotation)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySession, Session};
    use sdk_stubs_builder_common::ServiceName;

    const SERVICE_JSON: &str = r#"{
        "shapes": {
            "String": { "type": "string" },
            "Integer": { "type": "integer" },
            "Instance": {
                "type": "structure",
                "members": {
                    "InstanceId": { "shape": "String" },
                    "CoreCount": { "shape": "Integer" },
                    "VpcId": { "shape": "String" },
                    "Region": { "shape": "String" }
                }
            }
        }
    }"#;

    const RESOURCES_JSON: &str = r#"{
        "service": {
            "identifiers": [ { "name": "Id", "memberName": "InstanceId" }, { "name": "Region" } ],
            "shape": "Instance",
            "has": {
                "Vpc": {
                    "resource": {
                        "type": "Vpc",
                        "identifiers": [ { "target": "Id", "source": "data", "path": "VpcId" } ]
                    }
                },
                "SecurityGroups": {
                    "resource": {
                        "type": "SecurityGroup",
                        "identifiers": [ { "target": "Id", "source": "data", "path": "Groups[].Id" } ],
                        "path": "Groups[]"
                    }
                }
            }
        },
        "resources": {
            "Vpc": { "identifiers": [ { "name": "Id" } ] },
            "SecurityGroup": { "identifiers": [ { "name": "Id" } ] }
        }
    }"#;

    fn root() -> ResourceInstance {
        MemorySession::new()
            .with_service("ec2", SERVICE_JSON, Some(RESOURCES_JSON), None)
            .unwrap()
            .resource(&ServiceName::new("ec2", "EC2"))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_parse_attributes() {
        let attributes = parse_attributes(&root()).unwrap();
        assert_eq!(
            attributes,
            vec![
                Attribute::new("instance_id", TypeAnnotation::Str),
                Attribute::new("core_count", TypeAnnotation::Int),
                Attribute::new("vpc_id", TypeAnnotation::Str),
            ]
        );
    }

    #[test]
    fn test_member_name_of_identifier_stays_an_attribute() {
        let session = MemorySession::new()
            .with_service(
                "ec2",
                r#"{ "shapes": {
                    "Vpc": { "type": "structure", "members": {
                        "VpcId": { "shape": "String" },
                        "CidrBlock": { "shape": "String" }
                    } },
                    "String": { "type": "string" }
                } }"#,
                Some(
                    r#"{ "service": {
                        "identifiers": [ { "name": "Id", "memberName": "VpcId" } ],
                        "shape": "Vpc"
                    } }"#,
                ),
                None,
            )
            .unwrap();
        let vpc = session
            .resource(&ServiceName::new("ec2", "EC2"))
            .unwrap()
            .unwrap();

        let names: Vec<String> = parse_attributes(&vpc)
            .unwrap()
            .into_iter()
            .map(|attribute| attribute.name)
            .collect();
        assert_eq!(names, ["vpc_id", "cidr_block"]);
    }

    #[test]
    fn test_parse_identifiers_keeps_order() {
        let names: Vec<String> = parse_identifiers(&root())
            .into_iter()
            .map(|attribute| attribute.name)
            .collect();
        assert_eq!(names, ["id", "region"]);
    }

    #[test]
    fn test_parse_references() {
        let references = parse_references(&root());
        assert_eq!(references[0].name, "vpc");
        assert_eq!(references[0].type_annotation.to_string(), "\"Vpc\"");
        assert_eq!(references[1].name, "security_groups");
        assert_eq!(
            references[1].type_annotation.to_string(),
            "List[\"SecurityGroup\"]"
        );
    }
}
