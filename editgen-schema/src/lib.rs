//! # editgen Schema
//!
//! Host type-graph model and shape classification for editgen.
//!
//! This crate provides:
//! - Type references, declarations and an in-memory type graph
//! - Editor generation requests issued by host objects
//! - XML type-graph loading and validation
//! - The primitive editor table
//! - Memoizing shape classification for code generation

pub mod error;
pub mod ir;
pub mod parser;
pub mod primitives;
pub mod requests;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use ir::{
    ClassId, Classification, PropertyInfo, SubclassInfo, TypeClassifier, UnsupportedReason,
};
pub use parser::parse_type_graph;
pub use primitives::{PrimitiveEntry, PrimitiveTable};
pub use requests::{GenerationRequest, HostObject, LabelPolicy};
pub use types::{
    Constructor, ConstructorStyle, Declaration, DeclarationKind, Modality, Parameter,
    SubtypeDef, TypeGraph, TypeRef, TypeResolver, Visibility,
};
pub use validation::validate_graph;
