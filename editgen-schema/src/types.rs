//! Host type-graph definitions.
//!
//! This module contains the data structures the host toolchain hands to the
//! synthesizer: type references, declarations and the in-memory graph that
//! answers shape queries by canonical name.

use crate::requests::GenerationRequest;
use std::collections::HashMap;
use std::fmt;

/// Handle to a type of the host type system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Globally unique canonical name (a Rust path such as `crate::geo::Point`).
    pub canonical_name: String,
    /// Whether the reference admits an absent value.
    pub nullable: bool,
}

impl TypeRef {
    /// Creates a non-null reference.
    #[must_use]
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            nullable: false,
        }
    }

    /// Creates a nullable reference.
    #[must_use]
    pub fn nullable(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            nullable: true,
        }
    }

    /// Returns the same type with nullability removed.
    #[must_use]
    pub fn non_null(&self) -> Self {
        Self {
            canonical_name: self.canonical_name.clone(),
            nullable: false,
        }
    }

    /// Returns the last path segment of the canonical name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        simple_name(&self.canonical_name)
    }

    /// Returns the planner key: the canonical name, suffixed with `?` when nullable.
    #[must_use]
    pub fn key(&self) -> String {
        if self.nullable {
            format!("{}?", self.canonical_name)
        } else {
            self.canonical_name.clone()
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name)?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Returns the last `::` segment of a path.
#[must_use]
pub fn simple_name(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Returns everything before the last `::` segment of a path.
#[must_use]
pub fn module_path(path: &str) -> &str {
    path.rfind("::").map_or("", |idx| &path[..idx])
}

/// Declared visibility of a host object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Visible everywhere.
    #[default]
    Public,
    /// Visible within the compilation unit.
    Internal,
    /// Visible to the enclosing module.
    Protected,
    /// Visible to the declaring module only.
    Private,
}

impl Visibility {
    /// Parses a visibility keyword.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "public" | "pub" => Some(Self::Public),
            "internal" | "crate" => Some(Self::Internal),
            "protected" | "super" => Some(Self::Protected),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

/// Inheritance modality of a class declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Modality {
    /// Cannot be subclassed.
    #[default]
    Final,
    /// Can be subclassed by anyone.
    Open,
    /// Cannot be instantiated directly.
    Abstract,
}

impl Modality {
    /// Parses a modality keyword.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "final" => Some(Self::Final),
            "open" => Some(Self::Open),
            "abstract" => Some(Self::Abstract),
            _ => None,
        }
    }
}

/// How a constructor receives its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConstructorStyle {
    /// Arguments are passed by field name (`Point { x, y }`).
    #[default]
    Named,
    /// Arguments are passed by position (`Meters(value)`).
    Positional,
}

impl ConstructorStyle {
    /// Parses a constructor style keyword.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "named" => Some(Self::Named),
            "positional" | "tuple" => Some(Self::Positional),
            _ => None,
        }
    }
}

/// A primary-constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter (and property) name.
    pub name: String,
    /// Declared type.
    pub ty: TypeRef,
    /// Whether the field stores its value behind a `Box`.
    pub boxed: bool,
}

impl Parameter {
    /// Creates a new parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            boxed: false,
        }
    }

    /// Marks the field as boxed, as recursive fields must be.
    #[must_use]
    pub fn boxed(mut self) -> Self {
        self.boxed = true;
        self
    }
}

/// A resolved primary constructor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Constructor {
    /// Argument passing style.
    pub style: ConstructorStyle,
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
}

impl Constructor {
    /// Creates a constructor with named parameters.
    #[must_use]
    pub fn named(parameters: Vec<Parameter>) -> Self {
        Self {
            style: ConstructorStyle::Named,
            parameters,
        }
    }

    /// Creates a constructor with positional parameters named `0`, `1`, ...
    #[must_use]
    pub fn positional(types: Vec<TypeRef>) -> Self {
        Self {
            style: ConstructorStyle::Positional,
            parameters: types
                .into_iter()
                .enumerate()
                .map(|(idx, ty)| Parameter::new(idx.to_string(), ty))
                .collect(),
        }
    }
}

/// A direct subtype of a sealed declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtypeDef {
    /// Case name within the sealed type.
    pub name: String,
    /// Canonical name of the subtype's own declaration.
    pub type_name: String,
    /// Whether the variant holds its payload behind a `Box`.
    pub boxed: bool,
}

impl SubtypeDef {
    /// Creates a new subtype entry.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            boxed: false,
        }
    }

    /// Marks the variant payload as boxed.
    #[must_use]
    pub fn boxed(mut self) -> Self {
        self.boxed = true;
        self
    }
}

/// Kind-specific declaration details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationKind {
    /// Enumerated variants without payload.
    Enum {
        /// Variant names in declaration order.
        variants: Vec<String>,
    },
    /// A type with exactly one instance.
    Object,
    /// A closed supertype.
    Sealed {
        /// Direct subtypes in declaration order.
        subtypes: Vec<SubtypeDef>,
    },
    /// A regular class.
    Class {
        /// Inheritance modality.
        modality: Modality,
        /// Primary constructor, `None` when it cannot be resolved.
        constructor: Option<Constructor>,
        /// Whether the class is a trivial wrapper around one value.
        value_wrapper: bool,
    },
}

/// A host declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Canonical name.
    pub canonical_name: String,
    /// Kind-specific details.
    pub kind: DeclarationKind,
    /// Description.
    pub description: Option<String>,
}

impl Declaration {
    /// Creates a new declaration.
    #[must_use]
    pub fn new(canonical_name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            kind,
            description: None,
        }
    }

    /// Creates an enum declaration.
    #[must_use]
    pub fn enumeration<S: Into<String>>(
        canonical_name: impl Into<String>,
        variants: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            canonical_name,
            DeclarationKind::Enum {
                variants: variants.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Creates an object (singleton) declaration.
    #[must_use]
    pub fn object(canonical_name: impl Into<String>) -> Self {
        Self::new(canonical_name, DeclarationKind::Object)
    }

    /// Creates a sealed declaration.
    #[must_use]
    pub fn sealed(canonical_name: impl Into<String>, subtypes: Vec<SubtypeDef>) -> Self {
        Self::new(canonical_name, DeclarationKind::Sealed { subtypes })
    }

    /// Creates a final class declaration with a resolved constructor.
    #[must_use]
    pub fn class(canonical_name: impl Into<String>, constructor: Constructor) -> Self {
        Self::new(
            canonical_name,
            DeclarationKind::Class {
                modality: Modality::Final,
                constructor: Some(constructor),
                value_wrapper: false,
            },
        )
    }

    /// Creates a value-wrapper class around a single positional value.
    #[must_use]
    pub fn value_wrapper(canonical_name: impl Into<String>, inner: TypeRef) -> Self {
        Self::new(
            canonical_name,
            DeclarationKind::Class {
                modality: Modality::Final,
                constructor: Some(Constructor::positional(vec![inner])),
                value_wrapper: true,
            },
        )
    }

    /// Returns the last path segment of the canonical name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        simple_name(&self.canonical_name)
    }

    /// Attaches a description, emitted as documentation on generated editors.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Symbol-resolution seam between the host toolchain and the synthesizer.
pub trait TypeResolver {
    /// Resolves a canonical name to its declaration, if the host knows it.
    fn resolve_shape(&self, canonical_name: &str) -> Option<&Declaration>;
}

/// In-memory type graph with the generation requests issued against it.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    /// Package the graph was loaded for.
    pub package: String,
    /// Declarations in load order.
    pub declarations: Vec<Declaration>,
    /// Root generation requests in discovery order.
    pub requests: Vec<GenerationRequest>,
    /// Declaration lookup map.
    index: HashMap<String, usize>,
}

impl TypeGraph {
    /// Creates a new empty graph.
    #[must_use]
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    /// Adds a declaration. A later declaration with the same name shadows the
    /// earlier one in lookups; validation reports the duplicate.
    pub fn add_declaration(&mut self, declaration: Declaration) {
        let name = declaration.canonical_name.clone();
        let index = self.declarations.len();
        self.declarations.push(declaration);
        self.index.insert(name, index);
    }

    /// Builder-style [`TypeGraph::add_declaration`].
    #[must_use]
    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.add_declaration(declaration);
        self
    }

    /// Adds a root generation request.
    pub fn add_request(&mut self, request: GenerationRequest) {
        self.requests.push(request);
    }

    /// Looks up a declaration by canonical name.
    #[must_use]
    pub fn get(&self, canonical_name: &str) -> Option<&Declaration> {
        self.index
            .get(canonical_name)
            .map(|&idx| &self.declarations[idx])
    }

    /// Returns true if a declaration with the given name exists.
    #[must_use]
    pub fn contains(&self, canonical_name: &str) -> bool {
        self.index.contains_key(canonical_name)
    }
}

impl TypeResolver for TypeGraph {
    fn resolve_shape(&self, canonical_name: &str) -> Option<&Declaration> {
        self.get(canonical_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_key() {
        assert_eq!(TypeRef::new("crate::geo::Point").key(), "crate::geo::Point");
        assert_eq!(
            TypeRef::nullable("crate::geo::Point").key(),
            "crate::geo::Point?"
        );
        assert_eq!(TypeRef::nullable("i32").to_string(), "i32?");
    }

    #[test]
    fn test_simple_name_and_module_path() {
        let ty = TypeRef::new("crate::geo::Point");
        assert_eq!(ty.simple_name(), "Point");
        assert_eq!(module_path("crate::geo::Point"), "crate::geo");
        assert_eq!(simple_name("i32"), "i32");
        assert_eq!(module_path("i32"), "");
    }

    #[test]
    fn test_visibility_parse() {
        assert_eq!(Visibility::parse("public"), Some(Visibility::Public));
        assert_eq!(Visibility::parse("Internal"), Some(Visibility::Internal));
        assert_eq!(Visibility::parse("protected"), Some(Visibility::Protected));
        assert_eq!(Visibility::parse("private"), Some(Visibility::Private));
        assert_eq!(Visibility::parse("friend"), None);
    }

    #[test]
    fn test_positional_constructor_names() {
        let ctor = Constructor::positional(vec![TypeRef::new("f64"), TypeRef::new("f64")]);
        assert_eq!(ctor.style, ConstructorStyle::Positional);
        assert_eq!(ctor.parameters[0].name, "0");
        assert_eq!(ctor.parameters[1].name, "1");
    }

    #[test]
    fn test_graph_lookup() {
        let graph = TypeGraph::new("demo")
            .with_declaration(Declaration::object("crate::Origin"))
            .with_declaration(Declaration::enumeration("crate::Color", ["Red", "Green"]));

        assert!(graph.contains("crate::Origin"));
        assert!(graph.resolve_shape("crate::Color").is_some());
        assert!(graph.resolve_shape("crate::Missing").is_none());
        assert_eq!(graph.get("crate::Color").map(Declaration::simple_name), Some("Color"));
    }
}
