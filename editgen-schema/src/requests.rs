//! Generation request definitions.
//!
//! A request is issued once per annotated declaration discovered upstream: it
//! names the host object that will own the generated editor function, the
//! target type, the function name and how child labels are derived.

use crate::types::{TypeRef, Visibility, module_path, simple_name};
use std::fmt;

/// Namespace on whose behalf editors are generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostObject {
    /// Fully qualified path of the host type (`crate::forms::PointForms`).
    pub path: String,
    /// Declared visibility, inherited by every generated declaration.
    pub visibility: Visibility,
}

impl HostObject {
    /// Creates a new host object.
    #[must_use]
    pub fn new(path: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            path: path.into(),
            visibility,
        }
    }

    /// Returns the host's simple name.
    #[must_use]
    pub fn name(&self) -> &str {
        simple_name(&self.path)
    }

    /// Returns the module the host lives in.
    #[must_use]
    pub fn module_path(&self) -> &str {
        module_path(&self.path)
    }
}

impl fmt::Display for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// How labels for child editors are derived from property names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LabelPolicy {
    /// The property name, verbatim.
    #[default]
    FieldName,
    /// The property name in title case (`first_name` becomes `First Name`).
    Title,
    /// An empty label.
    Blank,
}

impl LabelPolicy {
    /// Parses a label policy keyword.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "field-name" | "fieldName" | "name" => Some(Self::FieldName),
            "title" => Some(Self::Title),
            "blank" | "none" => Some(Self::Blank),
            _ => None,
        }
    }
}

/// One editor-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenerationRequest {
    /// Requesting host object.
    pub host: HostObject,
    /// Type the editor edits.
    pub target_type: TypeRef,
    /// Name of the generated editor function.
    pub function_name: String,
    /// Visibility of the generated declarations.
    pub visibility: Visibility,
    /// Child label derivation.
    pub label_policy: LabelPolicy,
}

impl GenerationRequest {
    /// Creates a request that inherits the host's visibility.
    #[must_use]
    pub fn new(host: HostObject, target_type: TypeRef, function_name: impl Into<String>) -> Self {
        Self {
            visibility: host.visibility,
            host,
            target_type,
            function_name: function_name.into(),
            label_policy: LabelPolicy::default(),
        }
    }

    /// Sets the label policy.
    #[must_use]
    pub fn with_label_policy(mut self, label_policy: LabelPolicy) -> Self {
        self.label_policy = label_policy;
        self
    }
}
