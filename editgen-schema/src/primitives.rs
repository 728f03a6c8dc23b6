//! Primitive editor table.
//!
//! Maps the canonical name of a leaf type to the runtime constructor that
//! builds its editor and to the expression of its zero value.

/// One row of the primitive table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveEntry {
    /// Rust spelling of the type in generated code.
    pub rust_type: &'static str,
    /// Runtime constructor under `primitives::`.
    pub constructor_name: &'static str,
    /// Expression evaluating to the zero value.
    pub zero_value: &'static str,
}

const fn entry(
    rust_type: &'static str,
    constructor_name: &'static str,
    zero_value: &'static str,
) -> PrimitiveEntry {
    PrimitiveEntry {
        rust_type,
        constructor_name,
        zero_value,
    }
}

const BOOL: PrimitiveEntry = entry("bool", "bool_editor", "false");
const CHAR: PrimitiveEntry = entry("char", "char_editor", "'\\0'");
const STRING: PrimitiveEntry = entry("String", "text_editor", "String::new()");
const I8: PrimitiveEntry = entry("i8", "i8_editor", "0");
const I16: PrimitiveEntry = entry("i16", "i16_editor", "0");
const I32: PrimitiveEntry = entry("i32", "i32_editor", "0");
const I64: PrimitiveEntry = entry("i64", "i64_editor", "0");
const I128: PrimitiveEntry = entry("i128", "i128_editor", "0");
const ISIZE: PrimitiveEntry = entry("isize", "isize_editor", "0");
const U8: PrimitiveEntry = entry("u8", "u8_editor", "0");
const U16: PrimitiveEntry = entry("u16", "u16_editor", "0");
const U32: PrimitiveEntry = entry("u32", "u32_editor", "0");
const U64: PrimitiveEntry = entry("u64", "u64_editor", "0");
const U128: PrimitiveEntry = entry("u128", "u128_editor", "0");
const USIZE: PrimitiveEntry = entry("usize", "usize_editor", "0");
const F32: PrimitiveEntry = entry("f32", "f32_editor", "0.0");
const F64: PrimitiveEntry = entry("f64", "f64_editor", "0.0");

/// Hard-coded lookup over the supported leaf types.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveTable;

impl PrimitiveTable {
    /// Looks up a canonical name. `None` means "not a primitive".
    #[must_use]
    pub fn lookup(canonical_name: &str) -> Option<&'static PrimitiveEntry> {
        let entry = match canonical_name {
            "bool" | "core::primitive::bool" | "std::primitive::bool" => &BOOL,
            "char" | "core::primitive::char" | "std::primitive::char" => &CHAR,
            "String" | "std::string::String" | "alloc::string::String" => &STRING,
            "i8" => &I8,
            "i16" => &I16,
            "i32" => &I32,
            "i64" => &I64,
            "i128" => &I128,
            "isize" => &ISIZE,
            "u8" => &U8,
            "u16" => &U16,
            "u32" => &U32,
            "u64" => &U64,
            "u128" => &U128,
            "usize" => &USIZE,
            "f32" => &F32,
            "f64" => &F64,
            _ => return None,
        };
        Some(entry)
    }

    /// Returns true if the name denotes a primitive.
    #[must_use]
    pub fn is_primitive(canonical_name: &str) -> bool {
        Self::lookup(canonical_name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_numeric() {
        let entry = PrimitiveTable::lookup("i32").expect("i32 is primitive");
        assert_eq!(entry.rust_type, "i32");
        assert_eq!(entry.constructor_name, "i32_editor");
        assert_eq!(entry.zero_value, "0");

        let entry = PrimitiveTable::lookup("f64").expect("f64 is primitive");
        assert_eq!(entry.zero_value, "0.0");
    }

    #[test]
    fn test_lookup_text_aliases() {
        let short = PrimitiveTable::lookup("String").expect("String is primitive");
        let long = PrimitiveTable::lookup("std::string::String").expect("alias");
        assert_eq!(short, long);
        assert_eq!(short.constructor_name, "text_editor");
        assert_eq!(short.zero_value, "String::new()");
    }

    #[test]
    fn test_lookup_not_found() {
        assert!(PrimitiveTable::lookup("crate::geo::Point").is_none());
        assert!(PrimitiveTable::lookup("Vec<i32>").is_none());
        assert!(!PrimitiveTable::is_primitive(""));
        assert!(PrimitiveTable::is_primitive("bool"));
    }
}
