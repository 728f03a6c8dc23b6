//! Product editor generation.
//!
//! A product editor combines one child editor per field with the runtime's
//! `combineN`. The `combine` projection calls the constructor with the child
//! values in field order and the `split` projection reads the same fields
//! back, in the same order, into a tuple.
//!
//! Child editors always see the unboxed value of a field. Boxed fields are
//! unwrapped when read and boxed again when the product is rebuilt.

use super::{Emitter, Placement, editor_docs, naming};
use crate::error::GenerationError;
use editgen_schema::{Classification, Declaration, DeclarationKind, PropertyInfo, TypeRef};
use proc_macro2::TokenStream;
use quote::quote;

impl Emitter<'_, '_> {
    /// Returns true if the product is a value wrapper around one primitive.
    pub(crate) fn is_value_wrapper(&self, declaration: &Declaration, fields: &[PropertyInfo]) -> bool {
        let DeclarationKind::Class {
            value_wrapper: true,
            ..
        } = &declaration.kind
        else {
            return false;
        };
        match fields {
            [field] if !field.ty.nullable => {
                matches!(self.shape(field.classification), Classification::Primitive(_))
            }
            _ => false,
        }
    }

    pub(crate) fn product_expr(
        &mut self,
        ty: &TypeRef,
        declaration: &Declaration,
        fields: &[PropertyInfo],
        label: TokenStream,
        value: TokenStream,
        placement: Placement,
    ) -> TokenStream {
        if self.is_value_wrapper(declaration, fields) {
            return self.value_wrapper_expr(declaration, &fields[0], label, value);
        }
        if fields.len() > self.config.max_product_fields {
            self.report_limit(declaration, fields.len());
            return self.fixed_expr(label, value);
        }
        match placement {
            Placement::Delegate => self.delegate_expr(ty, label, value),
            Placement::Inline => self.inline_product(declaration, fields, label, value),
        }
    }

    /// The primitive editor of the wrapped value, transformed through the
    /// wrapper's constructor and accessor.
    fn value_wrapper_expr(
        &mut self,
        declaration: &Declaration,
        field: &PropertyInfo,
        label: TokenStream,
        value: TokenStream,
    ) -> TokenStream {
        let inner_ty = self.type_tokens(&field.ty);
        let wrapper_ty = self.type_path(&declaration.canonical_name);
        let seed = if field.boxed {
            load_field(&value, field)
        } else {
            let member = naming::member(&field.name);
            quote!(#value.#member)
        };
        let editor = self.editor_expr(&field.ty, field.classification, label, seed, Placement::Delegate);
        let wrap = self.construct(
            declaration,
            std::slice::from_ref(field),
            &[store_field(field, quote!(inner))],
        );
        let unwrap = load_field(&quote!(value), field);
        quote! {
            #editor.transform(|inner: #inner_ty| #wrap, |value: &#wrapper_ty| #unwrap)
        }
    }

    /// `combineN` over field editors built in place.
    fn inline_product(
        &mut self,
        declaration: &Declaration,
        fields: &[PropertyInfo],
        label: TokenStream,
        value: TokenStream,
    ) -> TokenStream {
        let mut editors = Vec::with_capacity(fields.len());
        for field in fields {
            let field_label = self.label_for(&field.name);
            editors.push(self.editor_expr(
                &field.ty,
                field.classification,
                quote!(#field_label),
                load_field(&value, field),
                Placement::Delegate,
            ));
        }
        self.combine_call(declaration, fields, label, &editors)
    }

    /// `combineN(label, e1, .., eN, |f1, .., fN| ctor, |value| (value.f1.clone(), ..,))`.
    fn combine_call(
        &mut self,
        declaration: &Declaration,
        fields: &[PropertyInfo],
        label: TokenStream,
        editors: &[TokenStream],
    ) -> TokenStream {
        let combine = self.runtime_in("combine", &format!("combine{}", fields.len()));
        let target = self.type_path(&declaration.canonical_name);

        let bindings: Vec<_> = fields.iter().map(|field| naming::binding(&field.name)).collect();
        let stored: Vec<_> = fields
            .iter()
            .zip(&bindings)
            .map(|(field, binding)| store_field(field, quote!(#binding)))
            .collect();
        let loads: Vec<_> = fields.iter().map(|field| load_field(&quote!(value), field)).collect();
        let mut types = Vec::with_capacity(fields.len());
        for field in fields {
            types.push(self.type_tokens(&field.ty));
        }
        let construct = self.construct(declaration, fields, &stored);

        quote! {
            #combine(
                #label,
                #(#editors,)*
                |#(#bindings: #types),*| #construct,
                |value: &#target| (#(#loads,)*),
            )
        }
    }

    /// Emits the helper struct, its defaults and the host's editor functions.
    pub(crate) fn emit_product_artifact(&mut self, declaration: &Declaration, fields: &[PropertyInfo]) {
        let host = self.request.host.clone();
        let target = self.type_path(&declaration.canonical_name);
        let helper = naming::ident(&naming::helper_struct_name(
            host.name(),
            declaration.simple_name(),
        ));
        let field_factory = self.runtime("FieldFactory");

        let mut hooks = Vec::with_capacity(fields.len());
        let mut hook_types = Vec::with_capacity(fields.len());
        let mut hook_docs = Vec::with_capacity(fields.len());
        let mut defaults = Vec::with_capacity(fields.len());
        let mut calls = Vec::with_capacity(fields.len());
        for field in fields {
            let hook = naming::factory_field(&field.name);
            let ty = self.type_tokens(&field.ty);
            let default = self.editor_expr(
                &field.ty,
                field.classification,
                quote!(label),
                quote!(value),
                Placement::Delegate,
            );
            let field_label = self.label_for(&field.name);
            let seed = load_field(&quote!(initial_value), field);

            hook_docs.push(format!(" Builds the editor for `{}`.", field.name));
            defaults.push(quote!(Box::new(|label: &str, value: #ty| #default)));
            calls.push(quote!((factories.#hook)(#field_label, #seed)));
            hooks.push(hook);
            hook_types.push(ty);
        }

        let combine = self.combine_call(declaration, fields, quote!(label), &calls);
        let editor = self.runtime("Editor");
        let host_ty = self.host_path(&host);
        let vis = naming::visibility_tokens(self.request.visibility);
        let name = naming::ident(&self.request.function_name);
        let name_with = naming::ident(&naming::with_factories_name(&self.request.function_name));
        let struct_doc = format!(
            " Child editor factories used by `{}::{}`.",
            host.name(),
            self.request.function_name
        );
        let fn_docs = editor_docs(
            Some(declaration),
            format!(" Builds an editor for `{}`.", declaration.canonical_name),
        );
        let with_doc = format!(
            " Builds an editor for `{}` from custom child factories.",
            declaration.canonical_name
        );

        self.artifact.push_code(quote! {
            #[doc = #struct_doc]
            #[allow(non_camel_case_types)]
            #vis struct #helper {
                #(
                    #[doc = #hook_docs]
                    pub #hooks: #field_factory<#hook_types>,
                )*
            }

            impl Default for #helper {
                fn default() -> Self {
                    Self {
                        #(#hooks: #defaults,)*
                    }
                }
            }

            impl #host_ty {
                #(#[doc = #fn_docs])*
                #vis fn #name(label: &str, initial_value: #target) -> #editor<#target> {
                    Self::#name_with(label, initial_value, #helper::default())
                }

                #[doc = #with_doc]
                #vis fn #name_with(
                    label: &str,
                    initial_value: #target,
                    factories: #helper,
                ) -> #editor<#target> {
                    #combine
                }
            }
        });
    }

    pub(crate) fn report_limit(&mut self, declaration: &Declaration, count: usize) {
        let diagnostic = GenerationError::PropertyLimitExceeded {
            type_name: declaration.canonical_name.clone(),
            count,
            limit: self.config.max_product_fields,
        };
        tracing::warn!("{}", diagnostic);
        self.artifact.add_diagnostic(diagnostic);
    }
}

/// Reads a field of a product as an owned, unboxed value.
pub(crate) fn load_field(base: &TokenStream, field: &PropertyInfo) -> TokenStream {
    let member = naming::member(&field.name);
    match (field.boxed, field.ty.nullable) {
        (false, _) => quote!(#base.#member.clone()),
        (true, false) => quote!((*#base.#member).clone()),
        (true, true) => quote!(#base.#member.as_deref().cloned()),
    }
}

/// Converts an edited value into the form the field stores.
pub(crate) fn store_field(field: &PropertyInfo, value: TokenStream) -> TokenStream {
    match (field.boxed, field.ty.nullable) {
        (false, _) => value,
        (true, false) => quote!(Box::new(#value)),
        (true, true) => quote!(#value.map(Box::new)),
    }
}
