//! The scene registry.

use std::collections::BTreeMap;
use std::fmt;

use mathviz_core::job::Parameters;
use serde::Serialize;
use tracing::{debug, warn};

use crate::source::SceneSource;

/// Opaque reference to a scene entry point inside the rendering engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SceneHandle(pub String);

impl SceneHandle {
    /// Returns the handle as the engine sees it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneDescriptor {
    /// Visualization-type key.
    pub key: String,
    /// Engine entry point.
    pub handle: SceneHandle,
    /// Parameter name to human-readable type/default description.
    pub param_schema: BTreeMap<String, String>,
}

impl SceneDescriptor {
    /// Keeps only the parameters this scene declares. Anything else is ignored
    /// so the engine falls back to its own defaults for missing keys.
    #[must_use]
    pub fn accepted_parameters(&self, parameters: &Parameters) -> Parameters {
        parameters
            .iter()
            .filter(|(name, _)| self.param_schema.contains_key(name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

/// Summary of one discovery pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Keys registered during the pass, in visiting order.
    pub registered: Vec<String>,
    /// `(source origin, reason)` for every source that was skipped.
    pub skipped: Vec<(String, String)>,
}

/// Mapping from visualization-type key to scene descriptor.
///
/// Entries are only ever inserted or overwritten; the registry is built during
/// startup and then shared behind an `Arc` for lock-free concurrent reads.
#[derive(Debug, Default, Clone)]
pub struct SceneRegistry {
    scenes: BTreeMap<String, SceneDescriptor>,
}

impl SceneRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the scene under `key`. The last registration wins.
    /// Returns the descriptor that was replaced, if any.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        handle: SceneHandle,
        param_schema: BTreeMap<String, String>,
    ) -> Option<SceneDescriptor> {
        let key = key.into();
        let descriptor = SceneDescriptor {
            key: key.clone(),
            handle,
            param_schema,
        };
        let replaced = self.scenes.insert(key, descriptor);
        if let Some(previous) = &replaced {
            debug!(key = %previous.key, handle = %previous.handle, "scene registration overwritten");
        }
        replaced
    }

    /// Loads every source and registers the scene it exposes. A source that
    /// fails to load is skipped; discovery continues with the rest and never
    /// removes existing entries.
    pub fn discover(&mut self, sources: &[Box<dyn SceneSource>]) -> DiscoveryReport {
        let mut report = DiscoveryReport::default();
        for source in sources {
            match source.load() {
                Ok(definition) => {
                    debug!(key = %definition.key, origin = %source.origin(), "discovered scene");
                    report.registered.push(definition.key.clone());
                    self.register(
                        definition.key,
                        SceneHandle(definition.handle),
                        definition.schema,
                    );
                }
                Err(e) => {
                    warn!(origin = %source.origin(), error = %e, "skipping scene source");
                    report.skipped.push((source.origin(), e.to_string()));
                }
            }
        }
        report
    }

    /// Looks up a scene by key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&SceneDescriptor> {
        self.scenes.get(key)
    }

    /// Returns all registered keys in sorted order.
    #[must_use]
    pub fn list_keys(&self) -> Vec<String> {
        self.scenes.keys().cloned().collect()
    }

    /// Returns the parameter schema of every registered scene, keyed by scene.
    #[must_use]
    pub fn schemas(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        self.scenes
            .iter()
            .map(|(key, scene)| (key.clone(), scene.param_schema.clone()))
            .collect()
    }

    /// Number of registered scenes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
