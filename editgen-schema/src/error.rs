//! Error types for type-graph loading and validation.

use thiserror::Error;

/// Error type for type-graph parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Invalid document structure.
    #[error("invalid type graph structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for type-graph validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Duplicate declaration.
    #[error("duplicate declaration: '{name}'")]
    DuplicateDeclaration {
        /// Canonical name of the duplicate.
        name: String,
    },

    /// Duplicate member inside a declaration.
    #[error("duplicate {kind} '{member}' in '{declaration}'")]
    DuplicateMember {
        /// Member kind (variant, property, case).
        kind: &'static str,
        /// Member name.
        member: String,
        /// Owning declaration.
        declaration: String,
    },

    /// Two requests would generate the same function on the same host.
    #[error("duplicate editor function '{function}' on host '{host}'")]
    DuplicateRequest {
        /// Host path.
        host: String,
        /// Function name.
        function: String,
    },

    /// A name cannot be used as a Rust identifier or path.
    #[error("invalid {what} '{name}'")]
    InvalidName {
        /// What the name designates.
        what: &'static str,
        /// The offending name.
        name: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}
