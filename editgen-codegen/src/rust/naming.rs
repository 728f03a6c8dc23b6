//! Identifier construction for generated code.

use editgen_schema::{LabelPolicy, Visibility};
use heck::{ToSnakeCase, ToTitleCase};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::Parser;

const STRICT_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "static", "struct", "trait", "true", "try", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "typeof",
    "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const PATH_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Returns true if `name` lexes as exactly one identifier or keyword.
fn is_ident_text(name: &str) -> bool {
    !name.starts_with("r#") && Ident::parse_any.parse_str(name).is_ok_and(|ident| ident == name)
}

/// Builds an identifier, escaping keywords and replacing invalid characters.
///
/// A name that is not a valid identifier keeps only its ASCII letters,
/// digits and underscores.
#[must_use]
pub fn ident(name: &str) -> Ident {
    let mut sanitized: String = if is_ident_text(name) {
        name.to_string()
    } else {
        name.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect()
    };
    if sanitized.is_empty() || sanitized.starts_with(|c: char| c.is_ascii_digit()) || sanitized == "_"
    {
        sanitized.insert(0, '_');
    }

    if PATH_KEYWORDS.contains(&sanitized.as_str()) {
        sanitized.push('_');
        Ident::new(&sanitized, Span::call_site())
    } else if STRICT_KEYWORDS.contains(&sanitized.as_str()) {
        Ident::new_raw(&sanitized, Span::call_site())
    } else {
        Ident::new(&sanitized, Span::call_site())
    }
}

/// Returns true if every `::` segment of `path` is a plain identifier.
#[must_use]
pub fn is_path(path: &str) -> bool {
    path.split("::").all(|segment| segment != "_" && is_ident_text(segment))
}

/// Converts a `::`-separated path into tokens.
#[must_use]
pub fn path_tokens(path: &str) -> TokenStream {
    let segments = path.split("::").map(|segment| {
        if PATH_KEYWORDS.contains(&segment) {
            Ident::new(segment, Span::call_site())
        } else {
            ident(segment)
        }
    });
    quote!(#(#segments)::*)
}

/// Returns the accessor for a property: `.0` for positional, `.name` otherwise.
#[must_use]
pub fn member(name: &str) -> syn::Member {
    match name.parse::<u32>() {
        Ok(index) => syn::Member::Unnamed(syn::Index::from(index as usize)),
        Err(_) => syn::Member::Named(ident(name)),
    }
}

/// Returns the closure parameter bound to a property in `combine` projections.
#[must_use]
pub fn binding(name: &str) -> Ident {
    if name.parse::<u32>().is_ok() {
        ident(&format!("f{name}"))
    } else {
        ident(name)
    }
}

/// Returns the override-hook field for a property or case.
#[must_use]
pub fn factory_field(name: &str) -> Ident {
    if name.parse::<u32>().is_ok() {
        ident(&format!("field_{name}"))
    } else {
        ident(&name.to_snake_case())
    }
}

/// Returns the helper struct name, qualified by both host and target.
#[must_use]
pub fn helper_struct_name(host_name: &str, type_simple_name: &str) -> String {
    format!("{host_name}_{type_simple_name}ChildFieldFactories")
}

/// Returns the name of the factory-accepting variant of an editor function.
#[must_use]
pub fn with_factories_name(function_name: &str) -> String {
    format!("{function_name}_with")
}

/// Returns the editor function name used for a discovered dependency.
#[must_use]
pub fn dependency_function_name(type_simple_name: &str) -> String {
    format!("{}_editor", type_simple_name.to_snake_case())
}

/// Returns the generated file name for a host function.
#[must_use]
pub fn file_name(host_name: &str, function_name: &str) -> String {
    format!("{}_{}.rs", host_name.to_snake_case(), function_name)
}

/// Converts a declared visibility into a Rust visibility qualifier.
#[must_use]
pub fn visibility_tokens(visibility: Visibility) -> TokenStream {
    match visibility {
        Visibility::Public => quote!(pub),
        Visibility::Internal => quote!(pub(crate)),
        Visibility::Protected => quote!(pub(super)),
        Visibility::Private => TokenStream::new(),
    }
}

/// Derives a child editor label from a property name.
#[must_use]
pub fn label_text(policy: LabelPolicy, name: &str) -> String {
    match policy {
        LabelPolicy::FieldName => name.to_string(),
        LabelPolicy::Title => name.to_title_case(),
        LabelPolicy::Blank => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ident_escapes_keywords() {
        assert_eq!(ident("type").to_string(), "r#type");
        assert_eq!(ident("self").to_string(), "self_");
        assert_eq!(ident("0").to_string(), "_0");
        assert_eq!(ident("first-name").to_string(), "first_name");
        assert_eq!(ident("radius").to_string(), "radius");
    }

    #[test]
    fn test_ident_never_panics_on_non_identifier_text() {
        assert_eq!(ident("Area²").to_string(), "Area_");
        assert_eq!(ident("²").to_string(), "__");
        assert_eq!(ident("r#type").to_string(), "r_type");
        assert_eq!(ident("Größe").to_string(), "Größe");
        assert_eq!(ident("").to_string(), "_");
        assert!(!is_path("crate::geo::Area²"));
    }

    #[test]
    fn test_path_tokens() {
        assert_eq!(
            path_tokens("crate::geo::Point").to_string(),
            "crate :: geo :: Point"
        );
        assert!(is_path("crate::geo::Point"));
        assert!(!is_path("Vec<i32>"));
        assert!(!is_path("crate::"));
    }

    #[test]
    fn test_members_and_bindings() {
        let positional = member("0");
        assert_eq!(quote!(value.#positional).to_string(), "value . 0");
        assert_eq!(binding("0").to_string(), "f0");
        assert_eq!(binding("x").to_string(), "x");
        assert_eq!(factory_field("0").to_string(), "field_0");
        assert_eq!(factory_field("Circle").to_string(), "circle");
    }

    #[test]
    fn test_generated_names() {
        assert_eq!(
            helper_struct_name("PointForms", "Point"),
            "PointForms_PointChildFieldFactories"
        );
        assert_eq!(with_factories_name("point_editor"), "point_editor_with");
        assert_eq!(dependency_function_name("HttpRoute"), "http_route_editor");
        assert_eq!(file_name("PointForms", "point_editor"), "point_forms_point_editor.rs");
    }

    #[test]
    fn test_visibility_tokens() {
        assert_eq!(visibility_tokens(Visibility::Public).to_string(), "pub");
        assert_eq!(
            visibility_tokens(Visibility::Internal).to_string(),
            "pub (crate)"
        );
        assert_eq!(
            visibility_tokens(Visibility::Protected).to_string(),
            "pub (super)"
        );
        assert!(visibility_tokens(Visibility::Private).is_empty());
    }

    #[test]
    fn test_label_text() {
        assert_eq!(label_text(LabelPolicy::FieldName, "first_name"), "first_name");
        assert_eq!(label_text(LabelPolicy::Title, "first_name"), "First Name");
        assert_eq!(label_text(LabelPolicy::Blank, "first_name"), "");
    }
}
