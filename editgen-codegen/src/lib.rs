//! # editgen Codegen
//!
//! Editor code generation from host type graphs.
//!
//! This crate provides:
//! - Rust editor functions for primitive, enum, singleton, product and sum types
//! - Batch planning that generates every reachable product and sum once
//! - Structured artifacts with sorted imports and inline diagnostics
//! - File sinks for build script integration

pub mod artifact;
pub mod config;
pub mod error;
pub mod generator;
pub mod planner;
pub mod rust;
pub mod sink;

pub use artifact::{ArtifactItem, GeneratedArtifact, GeneratedFile, ImportSet};
pub use config::GeneratorConfig;
pub use error::{CodegenError, GenerationError};
pub use generator::Generator;
pub use planner::{EditorRegistry, GenerationPlanner};
pub use rust::{CodeGenerator, EditorHandle, EditorLookup};
pub use sink::{DirectorySink, FileSink, MemorySink};

/// Generates editor files from a type-graph XML document.
///
/// # Arguments
/// * `xml` - Type-graph XML content
///
/// # Returns
/// One rendered file per generated artifact.
///
/// # Errors
/// Returns `CodegenError` if parsing or validation fails.
pub fn generate_from_xml(xml: &str) -> Result<Vec<GeneratedFile>, CodegenError> {
    generate_from_xml_with_config(xml, GeneratorConfig::default())
}

/// Generates editor files from a type-graph XML document with a custom
/// configuration.
///
/// # Errors
/// Returns `CodegenError` if parsing or validation fails.
pub fn generate_from_xml_with_config(
    xml: &str,
    config: GeneratorConfig,
) -> Result<Vec<GeneratedFile>, CodegenError> {
    let graph = editgen_schema::parse_type_graph(xml)?;
    editgen_schema::validate_graph(&graph)?;
    Ok(Generator::with_config(&graph, config).generate())
}

/// Generates editor files from a type-graph XML file.
///
/// # Arguments
/// * `path` - Path to the type-graph XML file
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or validation fails.
pub fn generate_from_file(path: &std::path::Path) -> Result<Vec<GeneratedFile>, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml)
}

/// Generates editor files from a type-graph XML file into a directory,
/// typically `OUT_DIR` in a build script.
///
/// # Returns
/// The number of files written.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation or writing fails.
pub fn generate_to_dir(
    path: &std::path::Path,
    out_dir: &std::path::Path,
) -> Result<usize, CodegenError> {
    let mut sink = DirectorySink::new(out_dir);
    let files = generate_from_file(path)?;
    for file in &files {
        sink.write_file(file)?;
    }
    Ok(files.len())
}
