//! Diagnostic stubs for roots that cannot get a real editor.
//!
//! Unsupported and empty sealed roots produce a commented-out signature
//! with the reason next to it. Oversized products keep a live function that
//! shows the value through a fixed editor. Commented stubs spell every path
//! in full so that they import nothing.

use super::{Emitter, naming};
use editgen_schema::{Declaration, PrimitiveTable, TypeRef, UnsupportedReason};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

impl Emitter<'_, '_> {
    pub(crate) fn emit_unsupported_stub(&mut self, type_name: &str, reason: &UnsupportedReason) {
        self.report_unsupported(type_name, reason);
        self.artifact
            .push_comment([format!("unsupported: {reason}")]);
        self.push_commented_signature();
    }

    pub(crate) fn emit_empty_sum_stub(&mut self, declaration: &Declaration) {
        self.report_empty_sum(declaration);
        self.artifact.push_comment([format!(
            "`{}` has no subtypes to choose from",
            declaration.canonical_name
        )]);
        self.push_commented_signature();
    }

    /// A live function editing the whole product as a fixed value.
    pub(crate) fn emit_limit_stub(&mut self, declaration: &Declaration, count: usize) {
        self.report_limit(declaration, count);
        let body = self.fixed_expr(quote!(label), quote!(initial_value));
        let doc = format!(
            " Shows `{}` without editing it: {} properties exceed the limit of {}.",
            declaration.canonical_name, count, self.config.max_product_fields
        );
        self.emit_host_function(&[doc], body);
    }

    fn push_commented_signature(&mut self) {
        let ty = full_type_tokens(&self.request.target_type);
        let host = naming::path_tokens(&self.request.host.path);
        let editor = naming::path_tokens(&format!("{}::Editor", self.config.runtime_crate));
        let vis = naming::visibility_tokens(self.request.visibility);
        let name = naming::ident(&self.request.function_name);

        self.artifact.push_commented(quote! {
            impl #host {
                #vis fn #name(label: &str, initial_value: #ty) -> #editor<#ty> {
                    unimplemented!()
                }
            }
        });
    }
}

/// Spells a type without going through the import set.
fn full_type_tokens(ty: &TypeRef) -> TokenStream {
    let name = ty.canonical_name.as_str();
    let inner = if let Some(entry) = PrimitiveTable::lookup(name) {
        naming::ident(entry.rust_type).into_token_stream()
    } else if naming::is_path(name) {
        naming::path_tokens(name)
    } else {
        match syn::parse_str::<syn::Type>(name) {
            Ok(parsed) => parsed.into_token_stream(),
            Err(_) => naming::ident(name).into_token_stream(),
        }
    };
    if ty.nullable {
        quote!(Option<#inner>)
    } else {
        inner
    }
}
