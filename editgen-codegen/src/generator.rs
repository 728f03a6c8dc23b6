//! Whole-graph generation.

use crate::artifact::{GeneratedArtifact, GeneratedFile};
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::planner::GenerationPlanner;
use crate::sink::FileSink;
use editgen_schema::TypeGraph;

/// Generates editor files for every request recorded in a type graph.
pub struct Generator<'a> {
    graph: &'a TypeGraph,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a generator with the default configuration.
    #[must_use]
    pub fn new(graph: &'a TypeGraph) -> Self {
        Self::with_config(graph, GeneratorConfig::default())
    }

    /// Creates a generator with a custom configuration.
    #[must_use]
    pub fn with_config(graph: &'a TypeGraph, config: GeneratorConfig) -> Self {
        Self { graph, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Plans the graph's requests and returns the structured artifacts.
    #[must_use]
    pub fn generate_artifacts(&self) -> Vec<GeneratedArtifact> {
        let mut planner = GenerationPlanner::new(self.graph, self.config.clone());
        let artifacts = planner.plan(&self.graph.requests);

        let diagnostics: usize = artifacts.iter().map(|a| a.diagnostics.len()).sum();
        if diagnostics > 0 {
            tracing::warn!(
                "{} diagnostic(s) across {} generated file(s)",
                diagnostics,
                artifacts.len()
            );
        }
        artifacts
    }

    /// Plans the graph's requests and renders one file per artifact.
    #[must_use]
    pub fn generate(&self) -> Vec<GeneratedFile> {
        self.generate_artifacts()
            .into_iter()
            .map(|artifact| artifact.into_file(&self.config))
            .collect()
    }

    /// Generates and hands every file to `sink`, returning the file count.
    ///
    /// # Errors
    /// Returns the first error reported by the sink.
    pub fn write_to(&self, sink: &mut dyn FileSink) -> Result<usize, CodegenError> {
        let files = self.generate();
        for file in &files {
            sink.write_file(file)?;
        }
        Ok(files.len())
    }
}
