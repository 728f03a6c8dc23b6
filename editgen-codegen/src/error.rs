//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Type-graph parsing error.
    #[error("type graph parse error: {0}")]
    Parse(#[from] editgen_schema::ParseError),

    /// Type-graph validation error.
    #[error("type graph error: {0}")]
    Schema(#[from] editgen_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Diagnostic attached to a generated artifact.
///
/// These are recovered locally: the generator substitutes a stub or a fixed
/// editor and keeps going, so a diagnostic never aborts a planner run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum GenerationError {
    /// The type matched no generatable shape.
    #[error("unsupported type `{type_name}`: {reason}")]
    UnsupportedType {
        /// Canonical name of the type.
        type_name: String,
        /// Human-readable cause.
        reason: String,
    },

    /// A sealed type without subtypes.
    #[error("sealed type `{type_name}` declares no subtypes")]
    EmptySumType {
        /// Canonical name of the type.
        type_name: String,
    },

    /// A product-shaped type whose primary constructor cannot be resolved.
    #[error("the primary constructor of `{type_name}` cannot be resolved")]
    UnresolvableConstructor {
        /// Canonical name of the type.
        type_name: String,
    },

    /// A product with more properties than the runtime can combine.
    #[error("`{type_name}` has {count} properties, more than the supported maximum of {limit}")]
    PropertyLimitExceeded {
        /// Canonical name of the type.
        type_name: String,
        /// Declared property count.
        count: usize,
        /// Configured maximum.
        limit: usize,
    },
}

impl GenerationError {
    /// Returns the canonical name of the offending type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::UnsupportedType { type_name, .. }
            | Self::EmptySumType { type_name }
            | Self::UnresolvableConstructor { type_name }
            | Self::PropertyLimitExceeded { type_name, .. } => type_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_display() {
        let err = GenerationError::PropertyLimitExceeded {
            type_name: "crate::Wide".to_string(),
            count: 12,
            limit: 10,
        };
        assert_eq!(
            err.to_string(),
            "`crate::Wide` has 12 properties, more than the supported maximum of 10"
        );
        assert_eq!(err.type_name(), "crate::Wide");

        let err = GenerationError::EmptySumType {
            type_name: "crate::Nothing".to_string(),
        };
        assert!(err.to_string().contains("no subtypes"));
    }

    #[test]
    fn test_codegen_error_from_io() {
        let err = CodegenError::from(std::io::Error::other("disk full"));
        assert!(matches!(err, CodegenError::Io(_)));
        assert_eq!(err.to_string(), "IO error: disk full");
    }
}
