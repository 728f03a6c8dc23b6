//! Rust editor code generation.
//!
//! [`CodeGenerator`] turns one request and its classification into a
//! [`GeneratedArtifact`]. The per-shape emission lives in the submodules,
//! all of them operating on the same per-artifact [`Emitter`] state.

pub mod defaults;
pub mod enums;
pub mod naming;
pub mod primitives;
pub mod products;
pub mod stubs;
pub mod sums;

use crate::artifact::GeneratedArtifact;
use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use editgen_schema::{
    ClassId, Classification, Declaration, GenerationRequest, HostObject, TypeClassifier, TypeRef,
    UnsupportedReason,
};
use proc_macro2::TokenStream;
use quote::quote;

/// Editor function that edits a delegated type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditorHandle {
    /// Host object declaring the function.
    pub host: HostObject,
    /// Function name.
    pub function_name: String,
}

/// Resolves the editor function for a product or sum type referenced from
/// generated code.
pub trait EditorLookup {
    /// Returns the handle for `target`, registering it on behalf of
    /// `requester` when it has none yet.
    fn editor_for(&mut self, target: &TypeRef, requester: &GenerationRequest) -> EditorHandle;

    /// Returns the handle of a root request that edits `target`, without
    /// registering anything.
    fn requested_editor(&self, target: &TypeRef) -> Option<EditorHandle>;
}

/// Where a product or sum editor expression is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Call the type's own editor function.
    Delegate,
    /// Expand the editor in place.
    Inline,
}

/// Generator for editor functions.
pub struct CodeGenerator<'a> {
    classifier: &'a TypeClassifier<'a>,
    config: &'a GeneratorConfig,
}

impl<'a> CodeGenerator<'a> {
    /// Creates a new code generator.
    #[must_use]
    pub fn new(classifier: &'a TypeClassifier<'a>, config: &'a GeneratorConfig) -> Self {
        Self { classifier, config }
    }

    /// Generates the artifact for a request whose target was classified as `classification`.
    pub fn generate(
        &self,
        request: &GenerationRequest,
        classification: ClassId,
        lookup: &mut dyn EditorLookup,
    ) -> GeneratedArtifact {
        let mut emitter = Emitter::new(self.classifier, self.config, request, lookup);
        emitter.emit_root(classification);
        emitter.artifact
    }

    /// Generates a forwarding function for a request whose target type is
    /// already edited by `existing`.
    pub fn generate_alias(
        &self,
        request: &GenerationRequest,
        existing: &EditorHandle,
        lookup: &mut dyn EditorLookup,
    ) -> GeneratedArtifact {
        let mut emitter = Emitter::new(self.classifier, self.config, request, lookup);
        emitter.emit_alias(existing);
        emitter.artifact
    }
}

/// Doc lines for an editor function: the summary, then the declaration's
/// description as its own paragraph.
pub(crate) fn editor_docs(declaration: Option<&Declaration>, summary: String) -> Vec<String> {
    let mut docs = vec![summary];
    if let Some(description) = declaration.and_then(|d| d.description.as_deref()) {
        docs.push(String::new());
        docs.extend(description.lines().map(|line| format!(" {}", line.trim())));
    }
    docs
}

/// Per-artifact emission state.
pub(crate) struct Emitter<'a, 'l> {
    classifier: &'a TypeClassifier<'a>,
    config: &'a GeneratorConfig,
    request: GenerationRequest,
    lookup: &'l mut dyn EditorLookup,
    artifact: GeneratedArtifact,
    inline_stack: Vec<ClassId>,
    default_stack: Vec<ClassId>,
}

impl<'a, 'l> Emitter<'a, 'l> {
    fn new(
        classifier: &'a TypeClassifier<'a>,
        config: &'a GeneratorConfig,
        request: &GenerationRequest,
        lookup: &'l mut dyn EditorLookup,
    ) -> Self {
        let package = match request.host.module_path() {
            "" => config.default_package.clone(),
            module => module.to_string(),
        };
        Self {
            classifier,
            config,
            artifact: GeneratedArtifact::new(request, package),
            request: request.clone(),
            lookup,
            inline_stack: Vec::new(),
            default_stack: Vec::new(),
        }
    }

    /// Returns a classification with the classifier's lifetime, so it can be
    /// held across mutable emission calls.
    fn shape(&self, id: ClassId) -> &'a Classification {
        self.classifier.get(id)
    }

    fn emit_root(&mut self, id: ClassId) {
        let target = self.request.target_type.clone();
        match self.shape(id) {
            Classification::Unsupported { type_name, reason } => {
                self.emit_unsupported_stub(type_name, reason);
            }
            Classification::Sum {
                declaration,
                subtypes,
            } if subtypes.is_empty() => self.emit_empty_sum_stub(declaration),
            Classification::Primitive(_)
            | Classification::Enum { .. }
            | Classification::Singleton { .. } => self.emit_wrapper(id),
            Classification::Product {
                declaration,
                fields,
            } => {
                if target.nullable || self.is_value_wrapper(declaration, fields) {
                    self.emit_wrapper(id);
                } else if fields.len() > self.config.max_product_fields {
                    self.emit_limit_stub(declaration, fields.len());
                } else {
                    self.emit_product_artifact(declaration, fields);
                }
            }
            Classification::Sum {
                declaration,
                subtypes,
            } => {
                if target.nullable {
                    self.emit_wrapper(id);
                } else {
                    self.emit_sum_artifact(id, declaration, subtypes);
                }
            }
        }
    }

    /// Emits `impl Host { fn name(label, initial_value) -> Editor<T> }`
    /// around a single editor expression.
    fn emit_wrapper(&mut self, id: ClassId) {
        let target = self.request.target_type.clone();
        let body = self.editor_expr(
            &target,
            id,
            quote!(label),
            quote!(initial_value),
            Placement::Delegate,
        );
        let docs = editor_docs(
            self.shape(id).declaration(),
            format!(" Builds an editor for `{target}`."),
        );
        self.emit_host_function(&docs, body);
    }

    fn emit_alias(&mut self, existing: &EditorHandle) {
        let host = self.host_path(&existing.host);
        let function = naming::ident(&existing.function_name);
        let doc = format!(
            " Builds an editor for `{}` through `{}::{}`.",
            self.request.target_type, existing.host, existing.function_name
        );
        self.emit_host_function(&[doc], quote!(#host::#function(label, initial_value)));
    }

    fn emit_host_function(&mut self, docs: &[String], body: TokenStream) {
        let target = self.request.target_type.clone();
        let ty = self.type_tokens(&target);
        let editor = self.runtime("Editor");
        let host = self.host_path(&self.request.host.clone());
        let vis = naming::visibility_tokens(self.request.visibility);
        let name = naming::ident(&self.request.function_name);

        self.artifact.push_code(quote! {
            impl #host {
                #(#[doc = #docs])*
                #vis fn #name(label: &str, initial_value: #ty) -> #editor<#ty> {
                    #body
                }
            }
        });
    }

    /// Builds an expression of type `Editor<T>` editing `value` of type `ty`.
    ///
    /// Every shape is handled here; product and sum editors are either
    /// delegated to their own editor function or expanded in place.
    pub(crate) fn editor_expr(
        &mut self,
        ty: &TypeRef,
        id: ClassId,
        label: TokenStream,
        value: TokenStream,
        placement: Placement,
    ) -> TokenStream {
        if ty.nullable {
            return self.nullable_expr(ty, id, label, value, placement);
        }

        match self.shape(id) {
            Classification::Primitive(entry) => self.primitive_expr(entry, label, value),
            Classification::Enum {
                declaration,
                variants,
            } => self.enum_expr(declaration, variants, label, value),
            Classification::Singleton { .. } => self.fixed_expr(label, value),
            Classification::Product {
                declaration,
                fields,
            } => self.product_expr(ty, declaration, fields, label, value, placement),
            Classification::Sum {
                declaration,
                subtypes,
            } => self.sum_expr(ty, id, declaration, subtypes, label, value, placement),
            Classification::Unsupported { type_name, reason } => {
                self.report_unsupported(type_name, reason);
                self.fixed_expr(label, value)
            }
        }
    }

    /// Wraps the non-null editor in a nullable adapter whose initial state
    /// is absent when `value` is `None`.
    fn nullable_expr(
        &mut self,
        ty: &TypeRef,
        id: ClassId,
        label: TokenStream,
        value: TokenStream,
        placement: Placement,
    ) -> TokenStream {
        let inner = ty.non_null();
        let inner_ty = self.type_tokens(&inner);
        let default = self.default_expr(&inner, id);
        let editor = self.editor_expr(&inner, id, quote!(label), quote!(value), placement);
        let nullable_editor = self.runtime("nullable_editor");
        quote! {
            #nullable_editor(#label, #value, #default, |label: &str, value: #inner_ty| #editor)
        }
    }

    /// Calls the editor function registered for `ty`.
    fn delegate_expr(&mut self, ty: &TypeRef, label: TokenStream, value: TokenStream) -> TokenStream {
        let target = ty.non_null();
        let handle = self.lookup.editor_for(&target, &self.request);
        self.artifact.add_dependency(target);
        let host = self.host_path(&handle.host);
        let function = naming::ident(&handle.function_name);
        quote!(#host::#function(#label, #value))
    }

    fn report_unsupported(&mut self, type_name: &str, reason: &UnsupportedReason) {
        let diagnostic = match reason {
            UnsupportedReason::UnresolvableConstructor(_) => {
                GenerationError::UnresolvableConstructor {
                    type_name: type_name.to_string(),
                }
            }
            UnsupportedReason::UnknownType(_)
            | UnsupportedReason::OpenClass(_)
            | UnsupportedReason::AbstractClass(_)
            | UnsupportedReason::Incomplete(_) => GenerationError::UnsupportedType {
                type_name: type_name.to_string(),
                reason: reason.to_string(),
            },
        };
        tracing::warn!("{}", diagnostic);
        self.artifact.add_diagnostic(diagnostic);
    }

    fn host_path(&mut self, host: &HostObject) -> TokenStream {
        self.artifact.imports.use_path(&host.path)
    }

    /// Names an item of the runtime crate.
    fn runtime(&mut self, item: &str) -> TokenStream {
        let path = format!("{}::{}", self.config.runtime_crate, item);
        self.artifact.imports.use_path(&path)
    }

    /// Names an item of a runtime crate module.
    fn runtime_in(&mut self, module: &str, item: &str) -> TokenStream {
        let path = format!("{}::{}::{}", self.config.runtime_crate, module, item);
        self.artifact.imports.use_path(&path)
    }

    /// Returns the label literal for a child property.
    fn label_for(&self, name: &str) -> String {
        naming::label_text(self.request.label_policy, name)
    }
}
