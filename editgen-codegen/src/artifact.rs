//! Structured generation output.
//!
//! An artifact keeps its imports, items and diagnostics apart until
//! [`GeneratedArtifact::render`] turns them into source text: imports are
//! sorted and de-duplicated, token items are formatted with `prettyplease`
//! and diagnostics become line comments.

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::rust::naming;
use editgen_schema::types::simple_name;
use editgen_schema::{GenerationRequest, HostObject, PrimitiveTable, TypeRef};
use proc_macro2::TokenStream;
use std::collections::{BTreeMap, BTreeSet};

/// Imports required by one artifact.
///
/// The first path claiming a simple name is imported; later paths with the
/// same simple name are spelled out in full at their use site. Names that
/// generated code writes bare, such as primitives and `Option`, are never
/// claimed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    by_name: BTreeMap<String, String>,
}

impl ImportSet {
    /// Creates an empty import set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tokens naming `path` at a use site, importing it if possible.
    pub fn use_path(&mut self, path: &str) -> TokenStream {
        let name = simple_name(path);
        if name == path || is_reserved(name) {
            return naming::path_tokens(path);
        }
        match self.by_name.get(name) {
            Some(imported) if imported != path => naming::path_tokens(path),
            Some(_) => naming::path_tokens(name),
            None => {
                self.by_name.insert(name.to_string(), path.to_string());
                naming::path_tokens(name)
            }
        }
    }

    /// Returns true if `path` is imported.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.by_name.get(simple_name(path)).is_some_and(|p| p == path)
    }

    /// Returns the imported paths, sorted and de-duplicated.
    #[must_use]
    pub fn paths(&self) -> BTreeSet<String> {
        self.by_name.values().cloned().collect()
    }

    /// Number of imports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true if nothing is imported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Prelude names written bare in generated code.
const PRELUDE_NAMES: &[&str] = &["Box", "Default", "None", "Option", "Some", "Vec"];

/// Returns true if `name` must keep its built-in meaning in generated code.
fn is_reserved(name: &str) -> bool {
    PRELUDE_NAMES.contains(&name)
        || PrimitiveTable::lookup(name).is_some_and(|entry| entry.rust_type == name)
}

/// One piece of an artifact body.
#[derive(Debug, Clone)]
pub enum ArtifactItem {
    /// Rust items, formatted on render.
    Code(TokenStream),
    /// Rust items rendered commented out.
    Commented(TokenStream),
    /// Plain comment lines.
    Comment(Vec<String>),
}

/// Output of generating one request.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    /// Planner key of the target type.
    pub type_key: String,
    /// Host object the code is generated for.
    pub host: HostObject,
    /// Name of the generated editor function.
    pub function_name: String,
    /// Package the file belongs to.
    pub package: String,
    /// File name within the package.
    pub file_name: String,
    /// Required imports.
    pub imports: ImportSet,
    /// Body items in emission order.
    pub items: Vec<ArtifactItem>,
    /// Diagnostics recovered during generation.
    pub diagnostics: Vec<GenerationError>,
    /// Product and sum types delegated to other editor functions.
    pub dependencies: Vec<TypeRef>,
}

impl GeneratedArtifact {
    /// Creates an empty artifact for a request.
    #[must_use]
    pub fn new(request: &GenerationRequest, package: impl Into<String>) -> Self {
        Self {
            type_key: request.target_type.key(),
            host: request.host.clone(),
            function_name: request.function_name.clone(),
            package: package.into(),
            file_name: naming::file_name(request.host.name(), &request.function_name),
            imports: ImportSet::new(),
            items: Vec::new(),
            diagnostics: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Appends formatted items.
    pub fn push_code(&mut self, tokens: TokenStream) {
        self.items.push(ArtifactItem::Code(tokens));
    }

    /// Appends commented-out items.
    pub fn push_commented(&mut self, tokens: TokenStream) {
        self.items.push(ArtifactItem::Commented(tokens));
    }

    /// Appends comment lines.
    pub fn push_comment(&mut self, lines: impl IntoIterator<Item = String>) {
        self.items
            .push(ArtifactItem::Comment(lines.into_iter().collect()));
    }

    /// Records a diagnostic once.
    pub fn add_diagnostic(&mut self, diagnostic: GenerationError) {
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }

    /// Records a delegated dependency once.
    pub fn add_dependency(&mut self, ty: TypeRef) {
        if !self.dependencies.contains(&ty) {
            self.dependencies.push(ty);
        }
    }

    /// Returns true if the artifact contains no live code.
    #[must_use]
    pub fn is_stub(&self) -> bool {
        !self
            .items
            .iter()
            .any(|item| matches!(item, ArtifactItem::Code(_)))
    }

    /// Returns the imported paths, sorted.
    #[must_use]
    pub fn required_imports(&self) -> Vec<String> {
        self.imports.paths().into_iter().collect()
    }

    /// Renders the artifact as Rust source text.
    #[must_use]
    pub fn render(&self, config: &GeneratorConfig) -> String {
        let mut output = String::new();

        if config.emit_header {
            output.push_str("// @generated by editgen. Do not edit.\n");
            output.push_str(&format!(
                "// Editor for `{}` requested by `{}`.\n\n",
                self.type_key, self.host
            ));
        }

        let imports = self.imports.paths();
        if !imports.is_empty() {
            for path in &imports {
                output.push_str(&format!("use {path};\n"));
            }
            output.push('\n');
        }

        if !self.diagnostics.is_empty() {
            for diagnostic in &self.diagnostics {
                output.push_str(&format!("// error: {diagnostic}\n"));
            }
            output.push('\n');
        }

        let mut first = true;
        for item in &self.items {
            if !first {
                output.push('\n');
            }
            first = false;
            match item {
                ArtifactItem::Code(tokens) => output.push_str(&format_tokens(tokens)),
                ArtifactItem::Commented(tokens) => {
                    for line in format_tokens(tokens).lines() {
                        output.push_str(format!("// {line}").trim_end());
                        output.push('\n');
                    }
                }
                ArtifactItem::Comment(lines) => {
                    for line in lines {
                        output.push_str(&format!("// {line}\n"));
                    }
                }
            }
        }

        output
    }

    /// Renders the artifact into a file for a sink.
    #[must_use]
    pub fn into_file(self, config: &GeneratorConfig) -> GeneratedFile {
        GeneratedFile {
            source_text: self.render(config),
            required_imports: self.required_imports(),
            package_name: self.package,
            file_name: self.file_name,
        }
    }
}

/// A rendered file handed to a [`crate::sink::FileSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Package (module path) the file belongs to.
    pub package_name: String,
    /// File name within the package.
    pub file_name: String,
    /// Rendered source.
    pub source_text: String,
    /// Imported paths, sorted.
    pub required_imports: Vec<String>,
}

/// Formats items with `prettyplease`, falling back to raw tokens.
fn format_tokens(tokens: &TokenStream) -> String {
    match syn::parse2::<syn::File>(tokens.clone()) {
        Ok(file) => prettyplease::unparse(&file),
        Err(e) => {
            tracing::warn!("Generated tokens do not form a valid file: {}", e);
            format!("{tokens}\n")
        }
    }
}
