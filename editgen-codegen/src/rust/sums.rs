//! Sum editor generation.
//!
//! A sum editor is a variant selector with one case per declared subtype,
//! in declaration order. Each case knows how to wrap a subtype value into
//! the sum, how to get it back out, which value to start from when the user
//! switches to it, and how to edit it.

use super::{Emitter, Placement, editor_docs, naming};
use crate::error::GenerationError;
use editgen_schema::{ClassId, Declaration, SubclassInfo, TypeRef};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashSet;

impl Emitter<'_, '_> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn sum_expr(
        &mut self,
        ty: &TypeRef,
        id: ClassId,
        declaration: &Declaration,
        subtypes: &[SubclassInfo],
        label: TokenStream,
        value: TokenStream,
        placement: Placement,
    ) -> TokenStream {
        if subtypes.is_empty() {
            self.report_empty_sum(declaration);
            return self.fixed_expr(label, value);
        }
        match placement {
            Placement::Delegate => self.delegate_expr(ty, label, value),
            // A sum already being expanded is edited through its own function.
            Placement::Inline if self.inline_stack.contains(&id) => {
                self.delegate_expr(ty, label, value)
            }
            Placement::Inline => self.inline_sum(id, declaration, subtypes, label, value),
        }
    }

    /// `variant_editor` over the cases of a sum expanded in place.
    fn inline_sum(
        &mut self,
        id: ClassId,
        declaration: &Declaration,
        subtypes: &[SubclassInfo],
        label: TokenStream,
        value: TokenStream,
    ) -> TokenStream {
        self.inline_stack.push(id);
        let mut cases = Vec::with_capacity(subtypes.len());
        for subtype in subtypes {
            let subtype_ty = self.type_path(&subtype.type_name);
            let editor = self.case_editor(subtype);
            let editor = quote!(|label: &str, value: #subtype_ty| #editor);
            cases.push(self.variant_case(declaration, subtypes, subtype, editor));
        }
        self.inline_stack.pop();

        let variant_editor = self.runtime("variant_editor");
        quote!(#variant_editor(#label, #value, Vec::from([#(#cases),*])))
    }

    /// The editor of one subtype. Composite subtypes are expanded in place
    /// unless a root request already generates their own editor.
    fn case_editor(&mut self, subtype: &SubclassInfo) -> TokenStream {
        let ty = subtype.type_ref();
        let placement = if self.shape(subtype.classification).is_composite()
            && self.lookup.requested_editor(&ty).is_some()
        {
            Placement::Delegate
        } else {
            Placement::Inline
        };
        self.editor_expr(&ty, subtype.classification, quote!(label), quote!(value), placement)
    }

    /// `VariantCase::new(name, wrap, unwrap, default, editor)`.
    fn variant_case(
        &mut self,
        declaration: &Declaration,
        subtypes: &[SubclassInfo],
        subtype: &SubclassInfo,
        editor: TokenStream,
    ) -> TokenStream {
        let variant_case = self.runtime("VariantCase");
        let sum_ty = self.type_path(&declaration.canonical_name);
        let case = naming::ident(&subtype.name);
        let name = subtype.name.as_str();
        let default = self.default_expr(&subtype.type_ref(), subtype.classification);
        let fallback = (subtypes.len() > 1).then(|| quote!(_ => None,));
        let (wrap, unwrapped) = if subtype.boxed {
            let subtype_ty = self.type_path(&subtype.type_name);
            (
                quote!(|inner: #subtype_ty| #sum_ty::#case(Box::new(inner))),
                quote!((**inner).clone()),
            )
        } else {
            (quote!(#sum_ty::#case), quote!(inner.clone()))
        };

        quote! {
            #variant_case::new(
                #name,
                #wrap,
                |value: &#sum_ty| match value {
                    #sum_ty::#case(inner) => Some(#unwrapped),
                    #fallback
                },
                || #default,
                #editor,
            )
        }
    }

    /// Emits the helper struct, its defaults and the host's editor functions.
    pub(crate) fn emit_sum_artifact(
        &mut self,
        id: ClassId,
        declaration: &Declaration,
        subtypes: &[SubclassInfo],
    ) {
        self.inline_stack.push(id);

        let host = self.request.host.clone();
        let target = self.type_path(&declaration.canonical_name);
        let helper = naming::ident(&naming::helper_struct_name(
            host.name(),
            declaration.simple_name(),
        ));
        let field_factory = self.runtime("FieldFactory");
        let rc = self.artifact.imports.use_path("std::rc::Rc");

        let mut taken = HashSet::new();
        let mut hooks = Vec::with_capacity(subtypes.len());
        let mut hook_types = Vec::with_capacity(subtypes.len());
        let mut hook_docs = Vec::with_capacity(subtypes.len());
        let mut defaults = Vec::with_capacity(subtypes.len());
        let mut cases = Vec::with_capacity(subtypes.len());
        for subtype in subtypes {
            let mut hook = naming::factory_field(&subtype.name);
            let mut suffix = 2;
            while !taken.insert(hook.to_string()) {
                hook = naming::factory_field(&format!("{}_{}", subtype.name, suffix));
                suffix += 1;
            }
            let subtype_ty = self.type_path(&subtype.type_name);
            let editor = self.case_editor(subtype);
            let case_editor = quote! {
                move |label: &str, value: #subtype_ty| (factories.#hook)(label, value)
            };
            let case = self.variant_case(declaration, subtypes, subtype, case_editor);

            hook_docs.push(format!(" Builds the editor for the `{}` case.", subtype.name));
            defaults.push(quote!(Box::new(|label: &str, value: #subtype_ty| #editor)));
            cases.push(quote!({
                let factories = #rc::clone(&factories);
                #case
            }));
            hooks.push(hook);
            hook_types.push(subtype_ty);
        }

        self.inline_stack.pop();

        let variant_editor = self.runtime("variant_editor");
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
            " Builds an editor for `{}` from custom case factories.",
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
                    let factories = #rc::new(factories);
                    #variant_editor(label, initial_value, Vec::from([#(#cases),*]))
                }
            }
        });
    }

    pub(crate) fn report_empty_sum(&mut self, declaration: &Declaration) {
        let diagnostic = GenerationError::EmptySumType {
            type_name: declaration.canonical_name.clone(),
        };
        tracing::warn!("{}", diagnostic);
        self.artifact.add_diagnostic(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{assert_contains, generate, render, request};
    use crate::config::GeneratorConfig;
    use crate::error::GenerationError;
    use editgen_schema::{Constructor, Declaration, Parameter, SubtypeDef, TypeGraph, TypeRef};

    fn shapes() -> TypeGraph {
        TypeGraph::new("shapes")
            .with_declaration(Declaration::sealed(
                "crate::shapes::Shape",
                vec![
                    SubtypeDef::new("Circle", "crate::shapes::Circle"),
                    SubtypeDef::new("Square", "crate::shapes::Square"),
                ],
            ))
            .with_declaration(Declaration::class(
                "crate::shapes::Circle",
                Constructor::named(vec![Parameter::new("radius", TypeRef::new("i32"))]),
            ))
            .with_declaration(Declaration::object("crate::shapes::Square"))
    }

    #[test]
    fn test_shape_has_one_case_per_subtype_in_order() {
        let source = render(
            &shapes(),
            &request("crate::forms::ShapeForms", TypeRef::new("crate::shapes::Shape"), "shape_editor"),
        );

        assert_eq!(source.matches("VariantCase::new(").count(), 2);
        assert_eq!(source.matches("\"Circle\",").count(), 1);
        assert_eq!(source.matches("\"Square\",").count(), 1);
        let circle = source.find("\"Circle\",").expect("Circle case");
        let square = source.find("\"Square\",").expect("Square case");
        assert!(circle < square);

        assert_contains(&source, "pub struct ShapeForms_ShapeChildFieldFactories {");
        assert_contains(&source, "pub circle: FieldFactory<Circle>,");
        assert_contains(&source, "pub square: FieldFactory<Square>,");
        assert_contains(&source, "let factories = Rc::new(factories);");
        assert_contains(&source, "let factories = Rc::clone(&factories);");
        assert_contains(&source, "(factories.circle)(label, value)");
        assert_contains(&source, "Shape::Circle(inner) => Some(inner.clone()),");
        assert_contains(&source, "_ => None,");
        assert_contains(&source, "variant_editor(label, initial_value, Vec::from([");
        assert!(!source.contains("vec!"));
    }

    #[test]
    fn test_cases_delegate_to_product_and_singleton_editors() {
        let source = render(
            &shapes(),
            &request("crate::forms::ShapeForms", TypeRef::new("crate::shapes::Shape"), "shape_editor"),
        );

        // Circle is combined in place from its one field.
        assert_contains(&source, "circle: Box::new(|label: &str, value: Circle|");
        assert_contains(&source, "combine1(label, i32_editor(\"radius\", value.radius.clone()),");
        assert_contains(&source, "|radius: i32| Circle { radius },");
        assert_contains(&source, "|value: &Circle| (value.radius.clone(),)");
        // Square is a fixed editor.
        assert_contains(&source, "square: Box::new(|label: &str, value: Square| fixed_editor(label, value)");
        // Defaults used when switching cases.
        assert_contains(&source, "|| Circle { radius: 0 },");
        assert_contains(&source, "|| Square,");
    }

    #[test]
    fn test_single_case_sum_has_no_fallback_arm() {
        let graph = TypeGraph::new("one")
            .with_declaration(Declaration::sealed(
                "crate::one::Only",
                vec![SubtypeDef::new("Single", "crate::one::Single")],
            ))
            .with_declaration(Declaration::object("crate::one::Single"));
        let source = render(
            &graph,
            &request("crate::forms::Forms", TypeRef::new("crate::one::Only"), "only_editor"),
        );
        assert_eq!(source.matches("VariantCase::new(").count(), 1);
        assert!(!source.contains("_ => None"));
    }

    #[test]
    fn test_recursive_sum_fields_delegate_to_root() {
        let graph = TypeGraph::new("calc")
            .with_declaration(Declaration::sealed(
                "crate::calc::Expr",
                vec![
                    SubtypeDef::new("Add", "crate::calc::Add").boxed(),
                    SubtypeDef::new("Lit", "crate::calc::Lit"),
                ],
            ))
            .with_declaration(Declaration::class(
                "crate::calc::Add",
                Constructor::named(vec![
                    Parameter::new("left", TypeRef::new("crate::calc::Expr")).boxed(),
                    Parameter::new("right", TypeRef::new("crate::calc::Expr")).boxed(),
                ]),
            ))
            .with_declaration(Declaration::class(
                "crate::calc::Lit",
                Constructor::named(vec![Parameter::new("value", TypeRef::new("f64"))]),
            ));
        let config = GeneratorConfig::default();
        let req = request("crate::forms::CalcForms", TypeRef::new("crate::calc::Expr"), "expr_editor");
        let (artifact, mut registry) = generate(&graph, &config, &req);
        let source = artifact.render(&config);

        assert_contains(&source, "CalcForms::expr_editor(\"left\", (*value.left).clone())");
        assert_contains(&source, "CalcForms::expr_editor(\"right\", (*value.right).clone())");
        assert!(registry.take_discovered().is_empty());
        assert_contains(
            &source,
            "|left: Expr, right: Expr| Add { left: Box::new(left), right: Box::new(right) }",
        );
        assert_contains(&source, "|value: &Add| ((*value.left).clone(), (*value.right).clone())");
        assert_contains(&source, "|| Add { left: Box::new(Expr::Lit(Lit { value: 0.0 })),");

        // The boxed case is wrapped and unwrapped through its box.
        assert_contains(&source, "|inner: Add| Expr::Add(Box::new(inner)),");
        assert_contains(&source, "Expr::Add(inner) => Some((**inner).clone()),");
        assert_contains(&source, "Expr::Lit,");
        assert_contains(&source, "Expr::Lit(inner) => Some(inner.clone()),");
    }

    #[test]
    fn test_nested_sums_are_inlined_once() {
        let graph = TypeGraph::new("tree")
            .with_declaration(Declaration::sealed(
                "crate::tree::Tree",
                vec![
                    SubtypeDef::new("Leaf", "crate::tree::Leaf"),
                    SubtypeDef::new("Branch", "crate::tree::Branch"),
                ],
            ))
            .with_declaration(Declaration::object("crate::tree::Leaf"))
            .with_declaration(Declaration::sealed(
                "crate::tree::Branch",
                vec![
                    SubtypeDef::new("Bare", "crate::tree::Bare"),
                    SubtypeDef::new("Grown", "crate::tree::Tree"),
                ],
            ))
            .with_declaration(Declaration::object("crate::tree::Bare"));
        let source = render(
            &graph,
            &request("crate::forms::TreeForms", TypeRef::new("crate::tree::Tree"), "tree_editor"),
        );

        // Two top-level cases plus the two cases of the inlined Branch.
        assert_eq!(source.matches("VariantCase::new(").count(), 4);
        assert_contains(&source, "branch: Box::new(|label: &str, value: Branch| variant_editor(label, value,");
        // Re-entering Tree from inside Branch calls the Tree editor instead.
        assert_contains(&source, "TreeForms::tree_editor(label, value)");
        assert_contains(&source, "|| Branch::Bare(Bare),");
    }

    #[test]
    fn test_empty_sum_field_is_reported() {
        let graph = TypeGraph::new("empty")
            .with_declaration(Declaration::sealed("crate::empty::Nothing", vec![]))
            .with_declaration(Declaration::class(
                "crate::empty::Holder",
                Constructor::named(vec![Parameter::new("nothing", TypeRef::new("crate::empty::Nothing"))]),
            ));
        let config = GeneratorConfig::default();
        let req = request("crate::forms::Forms", TypeRef::new("crate::empty::Holder"), "holder_editor");
        let (artifact, mut registry) = generate(&graph, &config, &req);

        assert_eq!(
            artifact.diagnostics,
            [GenerationError::EmptySumType {
                type_name: "crate::empty::Nothing".to_string(),
            }]
        );
        assert!(registry.take_discovered().is_empty());
        assert_contains(&artifact.render(&config), "fixed_editor(label, value)");
    }
}
