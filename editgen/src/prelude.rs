//! Prelude module for convenient imports.
//!
//! ```ignore
//! use editgen::prelude::*;
//! ```

// Type graph
pub use editgen_schema::{
    Classification, Constructor, Declaration, GenerationRequest, HostObject, LabelPolicy,
    Parameter, SubtypeDef, TypeClassifier, TypeGraph, TypeRef, TypeResolver, Visibility,
    parse_type_graph, validate_graph,
};

// Generation
pub use editgen_codegen::{
    CodegenError, DirectorySink, FileSink, GeneratedArtifact, GeneratedFile, GenerationError,
    GenerationPlanner, Generator, GeneratorConfig, MemorySink, generate_from_file,
    generate_from_xml, generate_to_dir,
};
