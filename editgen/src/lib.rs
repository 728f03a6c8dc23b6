//! # editgen
//!
//! Type-driven editor code generation for Rust.
//!
//! Given a host type graph and a list of editor requests, editgen classifies
//! every requested type and emits Rust functions that build an editor for
//! it: primitive editors, enum choosers, fixed editors for singletons,
//! combined editors for records and variant selectors for sealed types.
//!
//! ## Quick Start
//!
//! ```ignore
//! // build.rs
//! use editgen::prelude::*;
//!
//! let out_dir = std::path::PathBuf::from(std::env::var("OUT_DIR")?);
//! generate_to_dir(std::path::Path::new("types.xml"), &out_dir)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Type graph model, XML loading, validation and classification
//! - [`codegen`] - Editor generation, planning and file sinks

pub mod prelude;

/// Type graph model and shape classification.
pub mod schema {
    pub use editgen_schema::*;
}

/// Editor code generation.
pub mod codegen {
    pub use editgen_codegen::*;
}
