//! Shape classification for code generation.
//!
//! This module turns host declarations into a closed set of shapes that the
//! code generator matches on exhaustively. Results are memoized by canonical
//! name in an arena, so nested properties and subtypes refer to their
//! classification by [`ClassId`] and self-referential graphs terminate.

use crate::primitives::{PrimitiveEntry, PrimitiveTable};
use crate::types::{Declaration, DeclarationKind, Modality, TypeRef, TypeResolver};
use std::collections::HashMap;
use thiserror::Error;

/// Index of a classification inside a [`TypeClassifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

impl ClassId {
    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Why a type could not be classified into a generatable shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnsupportedReason {
    /// Neither a primitive nor a known declaration.
    #[error("`{0}` is not a primitive and has no declaration in the type graph")]
    UnknownType(String),

    /// Open, non-sealed class.
    #[error("`{0}` is an open class that is not sealed, so its subtypes cannot be enumerated")]
    OpenClass(String),

    /// Abstract, non-sealed class.
    #[error("`{0}` is abstract and not sealed, so it has no constructible shape")]
    AbstractClass(String),

    /// Product-shaped declaration without a usable primary constructor.
    #[error("the primary constructor of `{0}` cannot be resolved")]
    UnresolvableConstructor(String),

    /// Placeholder held while a classification is in progress.
    #[error("classification of `{0}` did not complete")]
    Incomplete(String),
}

/// A property of a product shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    /// Property name, unique within its product.
    pub name: String,
    /// Declared type, including nullability.
    pub ty: TypeRef,
    /// Classification of the non-null type.
    pub classification: ClassId,
    /// Whether the field stores its value behind a `Box`.
    pub boxed: bool,
}

/// A case of a sum shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubclassInfo {
    /// Case name, unique within its sum.
    pub name: String,
    /// Canonical name of the subtype declaration.
    pub type_name: String,
    /// Classification of the subtype.
    pub classification: ClassId,
    /// Whether the variant holds its payload behind a `Box`.
    pub boxed: bool,
}

impl SubclassInfo {
    /// Returns a non-null reference to the subtype.
    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(self.type_name.clone())
    }
}

/// Closed set of type shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Leaf type from the primitive table.
    Primitive(&'static PrimitiveEntry),
    /// Enumerated variants.
    Enum {
        /// Source declaration.
        declaration: Declaration,
        /// Variant names in declaration order.
        variants: Vec<String>,
    },
    /// Exactly one value.
    Singleton {
        /// Source declaration.
        declaration: Declaration,
    },
    /// Record-like type.
    Product {
        /// Source declaration.
        declaration: Declaration,
        /// Fields in declaration order.
        fields: Vec<PropertyInfo>,
    },
    /// Tagged union.
    Sum {
        /// Source declaration.
        declaration: Declaration,
        /// Cases in declaration order.
        subtypes: Vec<SubclassInfo>,
    },
    /// Nothing the generator can build an editor for.
    Unsupported {
        /// Canonical name of the type.
        type_name: String,
        /// Human-readable cause.
        reason: UnsupportedReason,
    },
}

impl Classification {
    /// Returns a short name for the shape.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Enum { .. } => "enum",
            Self::Singleton { .. } => "singleton",
            Self::Product { .. } => "product",
            Self::Sum { .. } => "sum",
            Self::Unsupported { .. } => "unsupported",
        }
    }

    /// Returns the source declaration, if the shape has one.
    #[must_use]
    pub fn declaration(&self) -> Option<&Declaration> {
        match self {
            Self::Enum { declaration, .. }
            | Self::Singleton { declaration }
            | Self::Product { declaration, .. }
            | Self::Sum { declaration, .. } => Some(declaration),
            Self::Primitive(_) | Self::Unsupported { .. } => None,
        }
    }

    /// Returns true for product and sum shapes.
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Product { .. } | Self::Sum { .. })
    }
}

/// Memoizing classifier over a host type graph.
pub struct TypeClassifier<'a> {
    resolver: &'a dyn TypeResolver,
    slots: Vec<Classification>,
    by_name: HashMap<String, ClassId>,
}

impl<'a> TypeClassifier<'a> {
    /// Creates a classifier with an empty cache.
    #[must_use]
    pub fn new(resolver: &'a dyn TypeResolver) -> Self {
        Self {
            resolver,
            slots: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Classifies the non-null part of a type reference.
    pub fn classify(&mut self, ty: &TypeRef) -> ClassId {
        self.classify_name(&ty.canonical_name)
    }

    /// Classifies a canonical name, at most once per classifier.
    ///
    /// The slot is reserved before nested properties and subtypes are
    /// visited, so a cycle back to a name in progress returns the reserved id
    /// and the slot is filled once the outer call completes.
    pub fn classify_name(&mut self, canonical_name: &str) -> ClassId {
        if let Some(&id) = self.by_name.get(canonical_name) {
            return id;
        }

        let id = ClassId(self.slots.len());
        self.slots.push(Classification::Unsupported {
            type_name: canonical_name.to_string(),
            reason: UnsupportedReason::Incomplete(canonical_name.to_string()),
        });
        self.by_name.insert(canonical_name.to_string(), id);

        let classification = self.derive(canonical_name);
        self.slots[id.0] = classification;
        id
    }

    /// Classifies a reference and returns the shape.
    pub fn classification(&mut self, ty: &TypeRef) -> &Classification {
        let id = self.classify(ty);
        &self.slots[id.0]
    }

    /// Returns a classification by id.
    ///
    /// # Panics
    /// Panics if `id` was produced by a different classifier.
    #[must_use]
    pub fn get(&self, id: ClassId) -> &Classification {
        &self.slots[id.0]
    }

    /// Returns the cached id for a canonical name without classifying.
    #[must_use]
    pub fn lookup(&self, canonical_name: &str) -> Option<ClassId> {
        self.by_name.get(canonical_name).copied()
    }

    /// Number of distinct names classified so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nothing has been classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn derive(&mut self, canonical_name: &str) -> Classification {
        if let Some(entry) = PrimitiveTable::lookup(canonical_name) {
            return Classification::Primitive(entry);
        }

        let resolver = self.resolver;
        let Some(declaration) = resolver.resolve_shape(canonical_name) else {
            return Classification::Unsupported {
                type_name: canonical_name.to_string(),
                reason: UnsupportedReason::UnknownType(canonical_name.to_string()),
            };
        };

        match &declaration.kind {
            DeclarationKind::Enum { variants } => Classification::Enum {
                declaration: declaration.clone(),
                variants: variants.clone(),
            },
            DeclarationKind::Object => Classification::Singleton {
                declaration: declaration.clone(),
            },
            DeclarationKind::Class {
                modality: Modality::Final,
                constructor: Some(ctor),
                ..
            } if ctor.parameters.is_empty() => Classification::Singleton {
                declaration: declaration.clone(),
            },
            DeclarationKind::Sealed { subtypes } => {
                let subtypes = subtypes
                    .iter()
                    .map(|subtype| SubclassInfo {
                        name: subtype.name.clone(),
                        type_name: subtype.type_name.clone(),
                        classification: self.classify_name(&subtype.type_name),
                        boxed: subtype.boxed,
                    })
                    .collect();
                Classification::Sum {
                    declaration: declaration.clone(),
                    subtypes,
                }
            }
            DeclarationKind::Class {
                modality: Modality::Final,
                constructor: Some(ctor),
                ..
            } => {
                let fields = ctor
                    .parameters
                    .iter()
                    .map(|param| PropertyInfo {
                        name: param.name.clone(),
                        ty: param.ty.clone(),
                        classification: self.classify(&param.ty),
                        boxed: param.boxed,
                    })
                    .collect();
                Classification::Product {
                    declaration: declaration.clone(),
                    fields,
                }
            }
            DeclarationKind::Class {
                modality: Modality::Open,
                ..
            } => Classification::Unsupported {
                type_name: canonical_name.to_string(),
                reason: UnsupportedReason::OpenClass(canonical_name.to_string()),
            },
            DeclarationKind::Class {
                modality: Modality::Abstract,
                ..
            } => Classification::Unsupported {
                type_name: canonical_name.to_string(),
                reason: UnsupportedReason::AbstractClass(canonical_name.to_string()),
            },
            DeclarationKind::Class {
                modality: Modality::Final,
                constructor: None,
                ..
            } => Classification::Unsupported {
                type_name: canonical_name.to_string(),
                reason: UnsupportedReason::UnresolvableConstructor(canonical_name.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Constructor, Parameter, SubtypeDef, TypeGraph};

    fn shapes_graph() -> TypeGraph {
        TypeGraph::new("shapes")
            .with_declaration(Declaration::class(
                "crate::shapes::Point",
                Constructor::named(vec![
                    Parameter::new("x", TypeRef::new("i32")),
                    Parameter::new("y", TypeRef::new("i32")),
                ]),
            ))
            .with_declaration(Declaration::class(
                "crate::shapes::Circle",
                Constructor::named(vec![Parameter::new("radius", TypeRef::new("i32"))]),
            ))
            .with_declaration(Declaration::object("crate::shapes::Square"))
            .with_declaration(Declaration::sealed(
                "crate::shapes::Shape",
                vec![
                    SubtypeDef::new("Circle", "crate::shapes::Circle"),
                    SubtypeDef::new("Square", "crate::shapes::Square"),
                ],
            ))
            .with_declaration(Declaration::enumeration(
                "crate::shapes::Color",
                ["Red", "Green", "Blue"],
            ))
            .with_declaration(Declaration::new(
                "crate::shapes::Widget",
                DeclarationKind::Class {
                    modality: Modality::Open,
                    constructor: Some(Constructor::default()),
                    value_wrapper: false,
                },
            ))
            .with_declaration(Declaration::new(
                "crate::shapes::Opaque",
                DeclarationKind::Class {
                    modality: Modality::Final,
                    constructor: None,
                    value_wrapper: false,
                },
            ))
    }

    #[test]
    fn test_classify_primitive() {
        let graph = shapes_graph();
        let mut classifier = TypeClassifier::new(&graph);
        let classification = classifier.classification(&TypeRef::new("i32"));
        assert!(matches!(classification, Classification::Primitive(entry) if entry.rust_type == "i32"));
    }

    #[test]
    fn test_classify_product_fields_in_order() {
        let graph = shapes_graph();
        let mut classifier = TypeClassifier::new(&graph);
        let id = classifier.classify(&TypeRef::new("crate::shapes::Point"));

        let Classification::Product { fields, .. } = classifier.get(id) else {
            panic!("expected product");
        };
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["x", "y"]);
        assert_eq!(fields[0].classification, fields[1].classification);
        assert_eq!(classifier.get(fields[0].classification).kind_name(), "primitive");
    }

    #[test]
    fn test_classify_sum_subtypes() {
        let graph = shapes_graph();
        let mut classifier = TypeClassifier::new(&graph);
        let id = classifier.classify(&TypeRef::new("crate::shapes::Shape"));

        let Classification::Sum { subtypes, .. } = classifier.get(id).clone() else {
            panic!("expected sum");
        };
        assert_eq!(subtypes.len(), 2);
        assert_eq!(subtypes[0].name, "Circle");
        assert_eq!(classifier.get(subtypes[0].classification).kind_name(), "product");
        assert_eq!(subtypes[1].name, "Square");
        assert_eq!(classifier.get(subtypes[1].classification).kind_name(), "singleton");
    }

    #[test]
    fn test_classify_enum_and_unit_class() {
        let graph = shapes_graph().with_declaration(Declaration::class(
            "crate::shapes::Origin",
            Constructor::named(vec![]),
        ));
        let mut classifier = TypeClassifier::new(&graph);

        match classifier.classification(&TypeRef::new("crate::shapes::Color")) {
            Classification::Enum { variants, .. } => assert_eq!(variants, &["Red", "Green", "Blue"]),
            other => panic!("expected enum, got {other:?}"),
        }
        assert_eq!(
            classifier
                .classification(&TypeRef::new("crate::shapes::Origin"))
                .kind_name(),
            "singleton"
        );
    }

    #[test]
    fn test_classify_unsupported_reasons() {
        let graph = shapes_graph();
        let mut classifier = TypeClassifier::new(&graph);

        let open = classifier
            .classification(&TypeRef::new("crate::shapes::Widget"))
            .clone();
        let Classification::Unsupported { reason, .. } = open else {
            panic!("expected unsupported");
        };
        assert!(matches!(reason, UnsupportedReason::OpenClass(_)));
        assert!(reason.to_string().contains("not sealed"));

        let opaque = classifier
            .classification(&TypeRef::new("crate::shapes::Opaque"))
            .clone();
        assert!(matches!(
            opaque,
            Classification::Unsupported {
                reason: UnsupportedReason::UnresolvableConstructor(_),
                ..
            }
        ));

        let unknown = classifier
            .classification(&TypeRef::new("crate::nowhere::Ghost"))
            .clone();
        assert!(matches!(
            unknown,
            Classification::Unsupported {
                reason: UnsupportedReason::UnknownType(_),
                ..
            }
        ));
    }

    #[test]
    fn test_classify_is_memoized_and_deterministic() {
        let graph = shapes_graph();
        let mut classifier = TypeClassifier::new(&graph);

        let first = classifier.classify(&TypeRef::new("crate::shapes::Shape"));
        let snapshot = classifier.get(first).clone();
        let size = classifier.len();

        let second = classifier.classify(&TypeRef::nullable("crate::shapes::Shape"));
        assert_eq!(first, second);
        assert_eq!(classifier.get(second), &snapshot);
        assert_eq!(classifier.len(), size);
    }

    #[test]
    fn test_classify_self_referential_terminates() {
        let graph = TypeGraph::new("tree")
            .with_declaration(Declaration::class(
                "crate::Node",
                Constructor::named(vec![
                    Parameter::new("value", TypeRef::new("i64")),
                    Parameter::new("next", TypeRef::nullable("crate::Node")).boxed(),
                ]),
            ))
            .with_declaration(Declaration::sealed(
                "crate::Expr",
                vec![
                    SubtypeDef::new("Add", "crate::Add"),
                    SubtypeDef::new("Lit", "crate::Lit"),
                ],
            ))
            .with_declaration(Declaration::class(
                "crate::Add",
                Constructor::named(vec![
                    Parameter::new("left", TypeRef::new("crate::Expr")).boxed(),
                    Parameter::new("right", TypeRef::new("crate::Expr")).boxed(),
                ]),
            ))
            .with_declaration(Declaration::class(
                "crate::Lit",
                Constructor::named(vec![Parameter::new("value", TypeRef::new("i64"))]),
            ));
        let mut classifier = TypeClassifier::new(&graph);

        let node = classifier.classify(&TypeRef::new("crate::Node"));
        let Classification::Product { fields, .. } = classifier.get(node) else {
            panic!("expected product");
        };
        assert_eq!(fields[1].classification, node);
        assert!(!fields[0].boxed);
        assert!(fields[1].boxed);

        let expr = classifier.classify(&TypeRef::new("crate::Expr"));
        let add = classifier.lookup("crate::Add").expect("Add classified");
        let Classification::Product { fields, .. } = classifier.get(add) else {
            panic!("expected product");
        };
        assert_eq!(fields[0].classification, expr);
        assert!(fields.iter().all(|field| field.boxed));
        assert_eq!(classifier.get(expr).kind_name(), "sum");
    }

    #[test]
    fn test_classify_empty_sealed_is_sum() {
        let graph = TypeGraph::new("empty")
            .with_declaration(Declaration::sealed("crate::Nothing", vec![]));
        let mut classifier = TypeClassifier::new(&graph);
        let classification = classifier.classification(&TypeRef::new("crate::Nothing"));
        assert!(matches!(classification, Classification::Sum { subtypes, .. } if subtypes.is_empty()));
    }
}
