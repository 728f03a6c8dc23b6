//! Type-graph validation utilities.
//!
//! This module rejects graphs the generator cannot turn into valid Rust:
//! duplicated names and identifiers that are not Rust identifiers.

use crate::error::SchemaError;
use crate::types::{ConstructorStyle, DeclarationKind, TypeGraph};
use std::collections::HashSet;
use syn::Ident;
use syn::ext::IdentExt;
use syn::parse::Parser;

/// Validates a loaded type graph for consistency.
///
/// # Arguments
/// * `graph` - The graph to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the first issue found.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_graph(graph: &TypeGraph) -> Result<(), SchemaError> {
    validate_declarations(graph)?;
    validate_requests(graph)?;
    Ok(())
}

/// Validates declarations and their members.
fn validate_declarations(graph: &TypeGraph) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for declaration in &graph.declarations {
        let name = &declaration.canonical_name;
        if !seen.insert(name.as_str()) {
            return Err(SchemaError::DuplicateDeclaration { name: name.clone() });
        }
        check_path("declaration name", name)?;

        match &declaration.kind {
            DeclarationKind::Enum { variants } => {
                check_unique("variant", name, variants.iter().map(String::as_str))?;
                for variant in variants {
                    check_identifier("variant name", variant)?;
                }
            }
            DeclarationKind::Object => {}
            DeclarationKind::Sealed { subtypes } => {
                check_unique("case", name, subtypes.iter().map(|s| s.name.as_str()))?;
                for subtype in subtypes {
                    check_identifier("case name", &subtype.name)?;
                    check_type_name(&subtype.type_name)?;
                }
            }
            DeclarationKind::Class { constructor, .. } => {
                let Some(ctor) = constructor else {
                    continue;
                };
                check_unique(
                    "property",
                    name,
                    ctor.parameters.iter().map(|p| p.name.as_str()),
                )?;
                for (idx, param) in ctor.parameters.iter().enumerate() {
                    match ctor.style {
                        ConstructorStyle::Named => check_identifier("property name", &param.name)?,
                        ConstructorStyle::Positional if param.name == idx.to_string() => {}
                        ConstructorStyle::Positional => {
                            return Err(SchemaError::InvalidName {
                                what: "positional property",
                                name: param.name.clone(),
                            });
                        }
                    }
                    check_type_name(&param.ty.canonical_name)?;
                }
            }
        }
    }

    Ok(())
}

/// Validates root requests.
fn validate_requests(graph: &TypeGraph) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for request in &graph.requests {
        check_path("host path", &request.host.path)?;
        check_identifier("function name", &request.function_name)?;
        check_type_name(&request.target_type.canonical_name)?;

        if !seen.insert((request.host.path.as_str(), request.function_name.as_str())) {
            return Err(SchemaError::DuplicateRequest {
                host: request.host.path.clone(),
                function: request.function_name.clone(),
            });
        }
    }

    Ok(())
}

fn check_unique<'a>(
    kind: &'static str,
    declaration: &str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for member in names {
        if !seen.insert(member) {
            return Err(SchemaError::DuplicateMember {
                kind,
                member: member.to_string(),
                declaration: declaration.to_string(),
            });
        }
    }
    Ok(())
}

fn check_type_name(name: &str) -> Result<(), SchemaError> {
    check_path("type name", name)
}

fn check_path(what: &'static str, path: &str) -> Result<(), SchemaError> {
    if path.split("::").all(is_identifier) {
        Ok(())
    } else {
        Err(SchemaError::InvalidName {
            what,
            name: path.to_string(),
        })
    }
}

fn check_identifier(what: &'static str, name: &str) -> Result<(), SchemaError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(SchemaError::InvalidName {
            what,
            name: name.to_string(),
        })
    }
}

/// Returns true if `s` is a plain (non-raw) Rust identifier or keyword.
fn is_identifier(s: &str) -> bool {
    if s == "_" || s.starts_with("r#") {
        return false;
    }
    Ident::parse_any.parse_str(s).is_ok_and(|ident| ident == s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::{GenerationRequest, HostObject};
    use crate::types::{Constructor, Declaration, Parameter, SubtypeDef, TypeRef, Visibility};

    fn point() -> Declaration {
        Declaration::class(
            "crate::geo::Point",
            Constructor::named(vec![
                Parameter::new("x", TypeRef::new("i32")),
                Parameter::new("y", TypeRef::new("i32")),
            ]),
        )
    }

    #[test]
    fn test_validate_valid_graph() {
        let mut graph = TypeGraph::new("geo")
            .with_declaration(point())
            .with_declaration(Declaration::value_wrapper(
                "crate::geo::Meters",
                TypeRef::new("f64"),
            ));
        graph.add_request(GenerationRequest::new(
            HostObject::new("crate::forms::GeoForms", Visibility::Public),
            TypeRef::new("crate::geo::Point"),
            "point_editor",
        ));
        assert!(validate_graph(&graph).is_ok());
    }

    #[test]
    fn test_validate_duplicate_declaration() {
        let graph = TypeGraph::new("geo")
            .with_declaration(point())
            .with_declaration(point());
        assert!(matches!(
            validate_graph(&graph),
            Err(SchemaError::DuplicateDeclaration { .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_members() {
        let graph = TypeGraph::new("geo").with_declaration(Declaration::enumeration(
            "crate::geo::Color",
            ["Red", "Red"],
        ));
        assert!(matches!(
            validate_graph(&graph),
            Err(SchemaError::DuplicateMember { kind: "variant", .. })
        ));

        let graph = TypeGraph::new("geo").with_declaration(Declaration::sealed(
            "crate::geo::Shape",
            vec![
                SubtypeDef::new("Circle", "crate::geo::Circle"),
                SubtypeDef::new("Circle", "crate::geo::Circle"),
            ],
        ));
        assert!(matches!(
            validate_graph(&graph),
            Err(SchemaError::DuplicateMember { kind: "case", .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_request() {
        let host = HostObject::new("crate::forms::GeoForms", Visibility::Public);
        let mut graph = TypeGraph::new("geo").with_declaration(point());
        for _ in 0..2 {
            graph.add_request(GenerationRequest::new(
                host.clone(),
                TypeRef::new("crate::geo::Point"),
                "point_editor",
            ));
        }
        assert!(matches!(
            validate_graph(&graph),
            Err(SchemaError::DuplicateRequest { .. })
        ));
    }

    #[test]
    fn test_validate_invalid_names() {
        let graph = TypeGraph::new("geo").with_declaration(Declaration::object("crate::geo::2d"));
        assert!(matches!(
            validate_graph(&graph),
            Err(SchemaError::InvalidName { what: "declaration name", .. })
        ));

        let mut graph = TypeGraph::new("geo").with_declaration(point());
        graph.add_request(GenerationRequest::new(
            HostObject::new("crate::Forms", Visibility::Public),
            TypeRef::new("crate::geo::Point"),
            "point editor",
        ));
        assert!(matches!(
            validate_graph(&graph),
            Err(SchemaError::InvalidName { what: "function name", .. })
        ));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("point_editor"));
        assert!(is_identifier("_hidden"));
        assert!(!is_identifier("_"));
        assert!(!is_identifier("0"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(" padded"));
        assert!(!is_identifier("r#type"));
        assert!(is_identifier("type"));
        assert!(is_identifier("Größe"));
    }

    #[test]
    fn test_unicode_numerics_are_not_identifiers() {
        assert!(!is_identifier("Area²"));
        assert!(!is_identifier("x½"));

        let graph = TypeGraph::new("geo").with_declaration(Declaration::object("crate::geo::Area²"));
        assert!(matches!(
            validate_graph(&graph),
            Err(SchemaError::InvalidName { what: "declaration name", .. })
        ));
    }
}
