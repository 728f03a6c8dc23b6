//! Generator configuration.

/// Default name of the crate the generated code is written against.
pub const DEFAULT_RUNTIME_CRATE: &str = "editor_runtime";

/// Largest product the runtime's `combine` family can assemble.
pub const DEFAULT_MAX_PRODUCT_FIELDS: usize = 10;

/// Code generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Path of the editor runtime crate used in generated `use` lines.
    pub runtime_crate: String,
    /// Products with more fields fall back to a fixed editor.
    pub max_product_fields: usize,
    /// Whether rendered files start with an `@generated` header.
    pub emit_header: bool,
    /// Package used for hosts declared at a crate root.
    pub default_package: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            max_product_fields: DEFAULT_MAX_PRODUCT_FIELDS,
            emit_header: true,
            default_package: "crate".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime crate path.
    #[must_use]
    pub fn with_runtime_crate(mut self, runtime_crate: impl Into<String>) -> Self {
        self.runtime_crate = runtime_crate.into();
        self
    }

    /// Sets the maximum number of product fields.
    #[must_use]
    pub fn with_max_product_fields(mut self, max_product_fields: usize) -> Self {
        self.max_product_fields = max_product_fields;
        self
    }

    /// Enables or disables the `@generated` header.
    #[must_use]
    pub fn with_header(mut self, emit_header: bool) -> Self {
        self.emit_header = emit_header;
        self
    }

    /// Sets the package used when a host has no module path.
    #[must_use]
    pub fn with_default_package(mut self, default_package: impl Into<String>) -> Self {
        self.default_package = default_package.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.runtime_crate, "editor_runtime");
        assert_eq!(config.max_product_fields, 10);
        assert!(config.emit_header);
    }

    #[test]
    fn test_config_builder() {
        let config = GeneratorConfig::new()
            .with_runtime_crate("ui::editors")
            .with_max_product_fields(4)
            .with_header(false)
            .with_default_package("demo");
        assert_eq!(config.runtime_crate, "ui::editors");
        assert_eq!(config.max_product_fields, 4);
        assert!(!config.emit_header);
        assert_eq!(config.default_package, "demo");
    }
}
