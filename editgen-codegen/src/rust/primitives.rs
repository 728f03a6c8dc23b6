//! Leaf editors and type spelling.

use super::{Emitter, naming};
use editgen_schema::{PrimitiveEntry, PrimitiveTable, TypeRef};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

impl Emitter<'_, '_> {
    /// `i32_editor(label, value)` and friends.
    pub(crate) fn primitive_expr(
        &mut self,
        entry: &PrimitiveEntry,
        label: TokenStream,
        value: TokenStream,
    ) -> TokenStream {
        let constructor = self.runtime_in("primitives", entry.constructor_name);
        quote!(#constructor(#label, #value))
    }

    /// A fixed editor showing `value` without editable state.
    pub(crate) fn fixed_expr(&mut self, label: TokenStream, value: TokenStream) -> TokenStream {
        let fixed_editor = self.runtime("fixed_editor");
        quote!(#fixed_editor(#label, #value))
    }

    /// Spells a type reference, `Option<T>` when nullable.
    pub(crate) fn type_tokens(&mut self, ty: &TypeRef) -> TokenStream {
        let inner = self.type_path(&ty.canonical_name);
        if ty.nullable {
            quote!(Option<#inner>)
        } else {
            inner
        }
    }

    /// Spells a non-null type by canonical name, importing it when it is a path.
    pub(crate) fn type_path(&mut self, canonical_name: &str) -> TokenStream {
        if let Some(entry) = PrimitiveTable::lookup(canonical_name) {
            return naming::ident(entry.rust_type).into_token_stream();
        }
        if naming::is_path(canonical_name) {
            return self.artifact.imports.use_path(canonical_name);
        }
        match syn::parse_str::<syn::Type>(canonical_name) {
            Ok(ty) => ty.into_token_stream(),
            Err(_) => naming::ident(canonical_name).into_token_stream(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{assert_contains, render, request};
    use editgen_schema::{Constructor, Declaration, Parameter, TypeGraph, TypeRef};

    #[test]
    fn test_text_primitive() {
        let source = render(
            &TypeGraph::new("demo"),
            &request("crate::Forms", TypeRef::new("std::string::String"), "name_editor"),
        );
        assert!(source.contains("use editor_runtime::primitives::text_editor;"));
        assert!(!source.contains("use std::string::String;"));
        assert_contains(&source, "initial_value: String) -> Editor<String>");
        assert_contains(&source, "text_editor(label, initial_value)");
    }

    #[test]
    fn test_unknown_generic_type_is_spelled_verbatim() {
        let source = render(
            &TypeGraph::new("demo"),
            &request("crate::Forms", TypeRef::new("Vec<i32>"), "list_editor"),
        );
        assert!(source.contains("// impl crate::Forms {"));
        assert!(source.contains("Vec<i32>"));
    }

    #[test]
    fn test_user_type_cannot_shadow_builtin_names() {
        let graph = TypeGraph::new("docs")
            .with_declaration(Declaration::object("crate::text::String"))
            .with_declaration(Declaration::class(
                "crate::docs::Doc",
                Constructor::named(vec![
                    Parameter::new("body", TypeRef::new("crate::text::String")),
                    Parameter::new("title", TypeRef::new("String")),
                ]),
            ));
        let source = render(
            &graph,
            &request("crate::forms::DocForms", TypeRef::new("crate::docs::Doc"), "doc_editor"),
        );
        assert!(!source.contains("use crate::text::String;"));
        assert_contains(&source, "pub body: FieldFactory<crate::text::String>,");
        assert_contains(&source, "pub title: FieldFactory<String>,");
        assert_contains(&source, "|body: crate::text::String, title: String| Doc { body, title }");
    }
}
