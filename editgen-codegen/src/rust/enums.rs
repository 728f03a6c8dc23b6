//! Enum editor generation.

use super::{Emitter, naming};
use editgen_schema::Declaration;
use proc_macro2::TokenStream;
use quote::quote;

impl Emitter<'_, '_> {
    /// `enum_editor(label, value, Vec::from([Color::Red, ..]))`, choices in
    /// declaration order.
    pub(crate) fn enum_expr(
        &mut self,
        declaration: &Declaration,
        variants: &[String],
        label: TokenStream,
        value: TokenStream,
    ) -> TokenStream {
        let enum_ty = self.type_path(&declaration.canonical_name);
        let choices = variants.iter().map(|variant| naming::ident(variant));
        let enum_editor = self.runtime("enum_editor");
        quote! {
            #enum_editor(#label, #value, Vec::from([#(#enum_ty::#choices),*]))
        }
    }
}
