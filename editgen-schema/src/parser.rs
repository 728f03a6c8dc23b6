//! Type-graph XML parser.
//!
//! Loads a host type graph and its generation requests from a `<typeGraph>`
//! document:
//!
//! ```xml
//! <typeGraph package="demo">
//!     <declarations>
//!         <class name="crate::geo::Point">
//!             <param name="x" type="i32"/>
//!             <param name="y" type="i32" nullable="true"/>
//!         </class>
//!         <class name="crate::geo::Chain">
//!             <param name="next" type="crate::geo::Chain" nullable="true" boxed="true"/>
//!         </class>
//!         <object name="crate::geo::Origin"/>
//!         <enum name="crate::geo::Color"><variant name="Red"/></enum>
//!         <sealed name="crate::geo::Shape">
//!             <case name="Circle" type="crate::geo::Circle"/>
//!         </sealed>
//!     </declarations>
//!     <requests>
//!         <host name="crate::forms::GeoForms" visibility="public">
//!             <editor function="point_editor" type="crate::geo::Point"/>
//!         </host>
//!     </requests>
//! </typeGraph>
//! ```

use crate::error::ParseError;
use crate::requests::{GenerationRequest, HostObject, LabelPolicy};
use crate::types::{
    Constructor, ConstructorStyle, Declaration, DeclarationKind, Modality, Parameter, SubtypeDef,
    TypeGraph, TypeRef, Visibility,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parses a type graph from an XML string.
///
/// # Arguments
/// * `xml` - Type-graph document
///
/// # Returns
/// Parsed graph or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid elements.
pub fn parse_type_graph(xml: &str) -> Result<TypeGraph, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut graph: Option<TypeGraph> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = tag_name(e)?;
                match (name.as_str(), graph.as_mut()) {
                    ("typeGraph", _) => graph = Some(parse_graph_header(e)?),
                    ("declarations", Some(graph)) => parse_declarations(&mut reader, graph)?,
                    ("requests", Some(graph)) => parse_requests(&mut reader, graph)?,
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                if tag_name(e)? == "typeGraph" {
                    graph = Some(parse_graph_header(e)?);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    graph.ok_or_else(|| ParseError::structure("No typeGraph element found"))
}

/// Parses the typeGraph element attributes.
fn parse_graph_header(e: &BytesStart<'_>) -> Result<TypeGraph, ParseError> {
    let mut package = String::new();
    for (key, value) in attributes(e)? {
        if key == "package" {
            package = value;
        }
    }
    Ok(TypeGraph::new(package))
}

/// Parses the declarations section.
fn parse_declarations(reader: &mut Reader<&[u8]>, graph: &mut TypeGraph) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let declaration = match tag_name(e)?.as_str() {
                    "class" => Some(parse_class(reader, e, true)?),
                    "enum" => Some(parse_enum(reader, e, true)?),
                    "sealed" => Some(parse_sealed(reader, e, true)?),
                    "object" => {
                        let object = parse_object(e)?;
                        skip_to_end(reader)?;
                        Some(object)
                    }
                    _ => {
                        skip_to_end(reader)?;
                        None
                    }
                };
                if let Some(declaration) = declaration {
                    graph.add_declaration(declaration);
                }
            }
            Ok(Event::Empty(ref e)) => {
                let declaration = match tag_name(e)?.as_str() {
                    "class" => Some(parse_class(reader, e, false)?),
                    "enum" => Some(parse_enum(reader, e, false)?),
                    "sealed" => Some(parse_sealed(reader, e, false)?),
                    "object" => Some(parse_object(e)?),
                    _ => None,
                };
                if let Some(declaration) = declaration {
                    graph.add_declaration(declaration);
                }
            }
            Ok(Event::End(_)) | Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses a class declaration and, if it has a body, its parameters.
fn parse_class(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<Declaration, ParseError> {
    let mut name = None;
    let mut modality = Modality::Final;
    let mut style = Some(ConstructorStyle::Named);
    let mut value_wrapper = false;
    let mut description = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "modality" => {
                modality = Modality::parse(&value)
                    .ok_or_else(|| ParseError::invalid_attr("class", "modality", &value))?
            }
            "constructor" if value == "unresolved" => style = None,
            "constructor" => {
                style = Some(
                    ConstructorStyle::parse(&value)
                        .ok_or_else(|| ParseError::invalid_attr("class", "constructor", &value))?,
                )
            }
            "valueWrapper" => value_wrapper = parse_bool("class", "valueWrapper", &value)?,
            "description" => description = Some(value),
            _ => {}
        }
    }
    let name = name.ok_or_else(|| ParseError::missing_attr("class", "name"))?;

    let mut parameters = Vec::new();
    if has_body {
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if tag_name(e)? == "param" {
                        parameters.push(parse_param(e)?);
                    }
                    skip_to_end(reader)?;
                }
                Ok(Event::Empty(ref e)) => {
                    if tag_name(e)? == "param" {
                        parameters.push(parse_param(e)?);
                    }
                }
                Ok(Event::End(_)) | Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }
    }

    let constructor = style.map(|style| Constructor { style, parameters });
    let mut declaration = Declaration::new(
        name,
        DeclarationKind::Class {
            modality,
            constructor,
            value_wrapper,
        },
    );
    declaration.description = description;
    Ok(declaration)
}

/// Parses a constructor parameter.
fn parse_param(e: &BytesStart<'_>) -> Result<Parameter, ParseError> {
    let mut name = None;
    let mut type_name = None;
    let mut nullable = false;
    let mut boxed = false;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "type" => type_name = Some(value),
            "nullable" => nullable = parse_bool("param", "nullable", &value)?,
            "boxed" => boxed = parse_bool("param", "boxed", &value)?,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("param", "name"))?;
    let type_name = type_name.ok_or_else(|| ParseError::missing_attr("param", "type"))?;
    let ty = TypeRef {
        canonical_name: type_name,
        nullable,
    };
    let mut parameter = Parameter::new(name, ty);
    parameter.boxed = boxed;
    Ok(parameter)
}

/// Parses an object (singleton) declaration.
fn parse_object(e: &BytesStart<'_>) -> Result<Declaration, ParseError> {
    let mut name = None;
    let mut description = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "description" => description = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("object", "name"))?;
    let mut declaration = Declaration::object(name);
    declaration.description = description;
    Ok(declaration)
}

/// Parses an enum declaration and its variants.
fn parse_enum(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<Declaration, ParseError> {
    let mut name = None;
    let mut description = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "description" => description = Some(value),
            _ => {}
        }
    }
    let name = name.ok_or_else(|| ParseError::missing_attr("enum", "name"))?;

    let mut variants = Vec::new();
    if has_body {
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if tag_name(e)? == "variant" {
                        variants.push(required_name(e, "variant")?);
                    }
                    skip_to_end(reader)?;
                }
                Ok(Event::Empty(ref e)) => {
                    if tag_name(e)? == "variant" {
                        variants.push(required_name(e, "variant")?);
                    }
                }
                Ok(Event::End(_)) | Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }
    }

    let mut declaration = Declaration::enumeration(name, variants);
    declaration.description = description;
    Ok(declaration)
}

/// Parses a sealed declaration and its cases.
fn parse_sealed(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<Declaration, ParseError> {
    let mut name = None;
    let mut description = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "description" => description = Some(value),
            _ => {}
        }
    }
    let name = name.ok_or_else(|| ParseError::missing_attr("sealed", "name"))?;

    let mut subtypes = Vec::new();
    if has_body {
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if tag_name(e)? == "case" {
                        subtypes.push(parse_case(e)?);
                    }
                    skip_to_end(reader)?;
                }
                Ok(Event::Empty(ref e)) => {
                    if tag_name(e)? == "case" {
                        subtypes.push(parse_case(e)?);
                    }
                }
                Ok(Event::End(_)) | Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }
    }

    let mut declaration = Declaration::sealed(name, subtypes);
    declaration.description = description;
    Ok(declaration)
}

/// Parses a sealed case.
fn parse_case(e: &BytesStart<'_>) -> Result<SubtypeDef, ParseError> {
    let mut name = None;
    let mut type_name = None;
    let mut boxed = false;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "type" => type_name = Some(value),
            "boxed" => boxed = parse_bool("case", "boxed", &value)?,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("case", "name"))?;
    let type_name = type_name.ok_or_else(|| ParseError::missing_attr("case", "type"))?;
    let mut subtype = SubtypeDef::new(name, type_name);
    subtype.boxed = boxed;
    Ok(subtype)
}

/// Parses the requests section.
fn parse_requests(reader: &mut Reader<&[u8]>, graph: &mut TypeGraph) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if tag_name(e)? == "host" {
                    let host = parse_host(e)?;
                    parse_host_editors(reader, &host, graph)?;
                } else {
                    skip_to_end(reader)?;
                }
            }
            Ok(Event::Empty(ref e)) => {
                if tag_name(e)? == "host" {
                    // A host without editors only validates its attributes.
                    parse_host(e)?;
                }
            }
            Ok(Event::End(_)) | Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses a host element's attributes.
fn parse_host(e: &BytesStart<'_>) -> Result<HostObject, ParseError> {
    let mut name = None;
    let mut visibility = Visibility::Public;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "visibility" => {
                visibility = Visibility::parse(&value)
                    .ok_or_else(|| ParseError::invalid_attr("host", "visibility", &value))?
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("host", "name"))?;
    Ok(HostObject::new(name, visibility))
}

/// Parses the editor requests of one host.
fn parse_host_editors(
    reader: &mut Reader<&[u8]>,
    host: &HostObject,
    graph: &mut TypeGraph,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if tag_name(e)? == "editor" {
                    graph.add_request(parse_editor(e, host)?);
                }
                skip_to_end(reader)?;
            }
            Ok(Event::Empty(ref e)) => {
                if tag_name(e)? == "editor" {
                    graph.add_request(parse_editor(e, host)?);
                }
            }
            Ok(Event::End(_)) | Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses one editor request.
fn parse_editor(e: &BytesStart<'_>, host: &HostObject) -> Result<GenerationRequest, ParseError> {
    let mut function = None;
    let mut type_name = None;
    let mut nullable = false;
    let mut label_policy = LabelPolicy::FieldName;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "function" => function = Some(value),
            "type" => type_name = Some(value),
            "nullable" => nullable = parse_bool("editor", "nullable", &value)?,
            "labels" => {
                label_policy = LabelPolicy::parse(&value)
                    .ok_or_else(|| ParseError::invalid_attr("editor", "labels", &value))?
            }
            _ => {}
        }
    }

    let function = function.ok_or_else(|| ParseError::missing_attr("editor", "function"))?;
    let type_name = type_name.ok_or_else(|| ParseError::missing_attr("editor", "type"))?;
    let target = TypeRef {
        canonical_name: type_name,
        nullable,
    };
    Ok(GenerationRequest::new(host.clone(), target, function).with_label_policy(label_policy))
}

/// Returns the element's tag name.
fn tag_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    Ok(std::str::from_utf8(&name_bytes)?.to_string())
}

/// Collects the element's attributes as owned key/value pairs.
fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    let mut pairs = Vec::new();
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        pairs.push((key.to_string(), value.to_string()));
    }
    Ok(pairs)
}

/// Reads the mandatory `name` attribute.
fn required_name(e: &BytesStart<'_>, element: &str) -> Result<String, ParseError> {
    attributes(e)?
        .into_iter()
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value)
        .ok_or_else(|| ParseError::missing_attr(element, "name"))
}

fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
