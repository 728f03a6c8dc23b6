//! Batch planning of editor generation.
//!
//! The planner drains a FIFO worklist seeded with the root requests. Every
//! product or sum type that generated code delegates to is registered once
//! in the [`EditorRegistry`] under the host that first referenced it, and
//! the registry's newly discovered requests are appended to the worklist.
//! Each planner key (canonical name, `?` suffixed when nullable) is
//! generated at most once.

use crate::artifact::GeneratedArtifact;
use crate::config::GeneratorConfig;
use crate::rust::{CodeGenerator, EditorHandle, EditorLookup, naming};
use editgen_schema::{GenerationRequest, TypeClassifier, TypeRef, TypeResolver};
use std::collections::{HashMap, HashSet, VecDeque};

/// Editor functions known for non-null product and sum types.
#[derive(Debug, Default)]
pub struct EditorRegistry {
    handles: HashMap<String, EditorHandle>,
    requested: HashSet<String>,
    taken: HashMap<String, HashSet<String>>,
    discovered: Vec<GenerationRequest>,
}

impl EditorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a root request's function name and, for a non-null target
    /// without an editor yet, makes the request that target's editor.
    ///
    /// Returns the handle already registered for the target, if any.
    pub fn register_root(&mut self, request: &GenerationRequest) -> Option<EditorHandle> {
        self.taken
            .entry(request.host.path.clone())
            .or_default()
            .insert(request.function_name.clone());

        if request.target_type.nullable {
            return None;
        }
        let canonical_name = &request.target_type.canonical_name;
        self.requested.insert(canonical_name.clone());
        if let Some(existing) = self.handles.get(canonical_name) {
            return Some(existing.clone());
        }
        self.handles.insert(
            canonical_name.clone(),
            EditorHandle {
                host: request.host.clone(),
                function_name: request.function_name.clone(),
            },
        );
        None
    }

    /// Returns the editor registered for a canonical name.
    #[must_use]
    pub fn handle(&self, canonical_name: &str) -> Option<&EditorHandle> {
        self.handles.get(canonical_name)
    }

    /// Number of registered editors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns true if no editor is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Drains the requests discovered since the last call, in discovery order.
    pub fn take_discovered(&mut self) -> Vec<GenerationRequest> {
        std::mem::take(&mut self.discovered)
    }

    /// Picks `base`, or `base_2`, `base_3`, ... when the host already has it.
    fn unique_name(&mut self, host_path: &str, base: String) -> String {
        let taken = self.taken.entry(host_path.to_string()).or_default();
        let mut name = base.clone();
        let mut suffix = 2;
        while taken.contains(&name) {
            name = format!("{base}_{suffix}");
            suffix += 1;
        }
        taken.insert(name.clone());
        name
    }
}

impl EditorLookup for EditorRegistry {
    fn editor_for(&mut self, target: &TypeRef, requester: &GenerationRequest) -> EditorHandle {
        let target = target.non_null();
        if let Some(existing) = self.handles.get(&target.canonical_name) {
            return existing.clone();
        }

        let base = naming::dependency_function_name(target.simple_name());
        let function_name = self.unique_name(&requester.host.path, base);
        tracing::debug!(
            "Discovered {} from {}, generating {}::{}",
            target,
            requester.target_type,
            requester.host,
            function_name
        );

        let handle = EditorHandle {
            host: requester.host.clone(),
            function_name: function_name.clone(),
        };
        self.handles
            .insert(target.canonical_name.clone(), handle.clone());

        let mut request = GenerationRequest::new(requester.host.clone(), target, function_name)
            .with_label_policy(requester.label_policy);
        request.visibility = requester.visibility;
        self.discovered.push(request);
        handle
    }

    fn requested_editor(&self, target: &TypeRef) -> Option<EditorHandle> {
        if !self.requested.contains(&target.canonical_name) {
            return None;
        }
        self.handles.get(&target.canonical_name).cloned()
    }
}

/// Orchestrates a batch of generation requests.
pub struct GenerationPlanner<'g> {
    classifier: TypeClassifier<'g>,
    config: GeneratorConfig,
    registry: EditorRegistry,
    generated: HashMap<String, EditorHandle>,
    processed: Vec<String>,
}

impl<'g> GenerationPlanner<'g> {
    /// Creates a planner over a host type graph.
    #[must_use]
    pub fn new(resolver: &'g dyn TypeResolver, config: GeneratorConfig) -> Self {
        Self {
            classifier: TypeClassifier::new(resolver),
            config,
            registry: EditorRegistry::new(),
            generated: HashMap::new(),
            processed: Vec::new(),
        }
    }

    /// Generates every root request and every product or sum type they
    /// reach, each planner key once.
    ///
    /// A root whose key was already generated under another host or
    /// function name produces a forwarding alias. An exact repeat of a
    /// generated request is skipped. Diagnostics stay on their artifacts,
    /// so the batch always runs to completion.
    pub fn plan(&mut self, roots: &[GenerationRequest]) -> Vec<GeneratedArtifact> {
        for root in roots {
            self.registry.register_root(root);
        }

        let mut worklist: VecDeque<GenerationRequest> = roots.iter().cloned().collect();
        let mut artifacts = Vec::new();

        while let Some(request) = worklist.pop_front() {
            let key = request.target_type.key();

            if let Some(existing) = self.generated.get(&key) {
                if existing.host == request.host && existing.function_name == request.function_name
                {
                    tracing::debug!("Skipping repeated request {}::{}", request.host, request.function_name);
                    continue;
                }
                tracing::debug!(
                    "{} is already edited by {}::{}, aliasing {}::{}",
                    key,
                    existing.host,
                    existing.function_name,
                    request.host,
                    request.function_name
                );
                let existing = existing.clone();
                let artifact = CodeGenerator::new(&self.classifier, &self.config).generate_alias(
                    &request,
                    &existing,
                    &mut self.registry,
                );
                artifacts.push(artifact);
                continue;
            }

            let id = self.classifier.classify(&request.target_type);
            tracing::debug!(
                "Generating {}::{} for {} ({})",
                request.host,
                request.function_name,
                key,
                self.classifier.get(id).kind_name()
            );
            let artifact = CodeGenerator::new(&self.classifier, &self.config).generate(
                &request,
                id,
                &mut self.registry,
            );

            self.generated.insert(
                key.clone(),
                EditorHandle {
                    host: request.host.clone(),
                    function_name: request.function_name.clone(),
                },
            );
            self.processed.push(key);
            worklist.extend(self.registry.take_discovered());
            artifacts.push(artifact);
        }

        artifacts
    }

    /// Planner keys generated so far, in generation order.
    #[must_use]
    pub fn processed_keys(&self) -> &[String] {
        &self.processed
    }

    /// Returns true if a planner key has been generated.
    #[must_use]
    pub fn is_processed(&self, key: &str) -> bool {
        self.generated.contains_key(key)
    }

    /// Returns the classification cache.
    #[must_use]
    pub fn classifier(&self) -> &TypeClassifier<'g> {
        &self.classifier
    }

    /// Returns the editor registry.
    #[must_use]
    pub fn registry(&self) -> &EditorRegistry {
        &self.registry
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}
