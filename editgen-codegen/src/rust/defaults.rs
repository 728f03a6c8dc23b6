//! Default value synthesis.
//!
//! Nullable adapters and variant cases need a value to start from when the
//! user switches from "absent" or to another case. Defaults are built from
//! the classification: the primitive zero, the first enum variant, the
//! singleton itself, a product of field defaults, or the first sum case
//! whose default does not lead back into a type already being defaulted.

use super::products::store_field;
use super::{Emitter, naming};
use editgen_schema::{
    ClassId, Classification, ConstructorStyle, Declaration, DeclarationKind, PropertyInfo, TypeRef,
};
use proc_macro2::TokenStream;
use quote::quote;

impl Emitter<'_, '_> {
    /// Returns a default value expression for `ty`, or `Default::default()`
    /// when every candidate is cyclic or unsupported.
    pub(crate) fn default_expr(&mut self, ty: &TypeRef, id: ClassId) -> TokenStream {
        self.try_default(ty, id)
            .unwrap_or_else(|| quote!(Default::default()))
    }

    fn try_default(&mut self, ty: &TypeRef, id: ClassId) -> Option<TokenStream> {
        if ty.nullable {
            return Some(quote!(None));
        }
        if self.default_stack.contains(&id) {
            return None;
        }

        self.default_stack.push(id);
        let value = match self.shape(id) {
            Classification::Primitive(entry) => syn::parse_str::<syn::Expr>(entry.zero_value)
                .ok()
                .map(|expr| quote!(#expr)),
            Classification::Enum {
                declaration,
                variants,
            } => variants.first().map(|variant| {
                let enum_ty = self.type_path(&declaration.canonical_name);
                let variant = naming::ident(variant);
                quote!(#enum_ty::#variant)
            }),
            Classification::Singleton { declaration } => Some(self.singleton_value(declaration)),
            Classification::Product {
                declaration,
                fields,
            } => self.product_default(declaration, fields),
            Classification::Sum {
                declaration,
                subtypes,
            } => subtypes.iter().find_map(|subtype| {
                let inner = self.try_default(&subtype.type_ref(), subtype.classification)?;
                let inner = if subtype.boxed { quote!(Box::new(#inner)) } else { inner };
                let sum_ty = self.type_path(&declaration.canonical_name);
                let case = naming::ident(&subtype.name);
                Some(quote!(#sum_ty::#case(#inner)))
            }),
            Classification::Unsupported { .. } => None,
        };
        self.default_stack.pop();
        value
    }

    fn product_default(
        &mut self,
        declaration: &Declaration,
        fields: &[PropertyInfo],
    ) -> Option<TokenStream> {
        let mut values = Vec::with_capacity(fields.len());
        for field in fields {
            let value = self.try_default(&field.ty, field.classification)?;
            values.push(if field.ty.nullable { value } else { store_field(field, value) });
        }
        Some(self.construct(declaration, fields, &values))
    }

    /// The single value of a singleton: `Origin`, `Origin {}` or `Origin()`.
    pub(crate) fn singleton_value(&mut self, declaration: &Declaration) -> TokenStream {
        let path = self.type_path(&declaration.canonical_name);
        match &declaration.kind {
            DeclarationKind::Class {
                constructor: Some(ctor),
                ..
            } => match ctor.style {
                ConstructorStyle::Named => quote!(#path {}),
                ConstructorStyle::Positional => quote!(#path()),
            },
            DeclarationKind::Class {
                constructor: None, ..
            }
            | DeclarationKind::Object
            | DeclarationKind::Enum { .. }
            | DeclarationKind::Sealed { .. } => path,
        }
    }

    /// Calls the product's constructor with one stored value per field, in
    /// field order. A named field whose value is a binding of the same name
    /// uses the shorthand form.
    pub(crate) fn construct(
        &mut self,
        declaration: &Declaration,
        fields: &[PropertyInfo],
        values: &[TokenStream],
    ) -> TokenStream {
        let path = self.type_path(&declaration.canonical_name);
        match constructor_style(declaration) {
            ConstructorStyle::Named => {
                let inits = fields.iter().zip(values).map(|(field, value)| {
                    let name = naming::ident(&field.name);
                    if value.to_string() == name.to_string() {
                        quote!(#name)
                    } else {
                        quote!(#name: #value)
                    }
                });
                quote!(#path { #(#inits),* })
            }
            ConstructorStyle::Positional => quote!(#path(#(#values),*)),
        }
    }
}

/// Returns how a product declaration receives constructor arguments.
fn constructor_style(declaration: &Declaration) -> ConstructorStyle {
    match &declaration.kind {
        DeclarationKind::Class {
            constructor: Some(ctor),
            ..
        } => ctor.style,
        DeclarationKind::Class {
            constructor: None, ..
        }
        | DeclarationKind::Object
        | DeclarationKind::Enum { .. }
        | DeclarationKind::Sealed { .. } => ConstructorStyle::Named,
    }
}
