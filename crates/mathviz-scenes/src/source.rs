//! Scene sources consumed by registry discovery.
//!
//! A source exposes exactly one `{key, handle, schema}` triple. Sources are
//! injected into `SceneRegistry::discover` as a list, so adding a scene never
//! requires touching the registry itself.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a scene source.
#[derive(Debug, Error)]
pub enum SceneSourceError {
    /// The source could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File or directory that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The source content is not a valid scene definition.
    #[error("failed to parse {origin}: {reason}")]
    Parse {
        /// Where the definition came from.
        origin: String,
        /// Parser message.
        reason: String,
    },

    /// The definition lacks a required attribute.
    #[error("{origin} is missing required attribute `{attribute}`")]
    MissingAttribute {
        /// Where the definition came from.
        origin: String,
        /// Name of the missing attribute.
        attribute: &'static str,
    },
}

/// The triple a source exposes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SceneDefinition {
    /// Visualization-type key.
    #[serde(default)]
    pub key: String,
    /// Engine entry point.
    #[serde(default)]
    pub handle: String,
    /// Parameter schema.
    #[serde(default)]
    pub schema: BTreeMap<String, String>,
}

impl SceneDefinition {
    fn validated(self, origin: &str) -> Result<Self, SceneSourceError> {
        if self.key.trim().is_empty() {
            return Err(SceneSourceError::MissingAttribute {
                origin: origin.to_owned(),
                attribute: "key",
            });
        }
        if self.handle.trim().is_empty() {
            return Err(SceneSourceError::MissingAttribute {
                origin: origin.to_owned(),
                attribute: "handle",
            });
        }
        Ok(self)
    }
}

/// Something that can contribute a scene to the registry.
pub trait SceneSource: Send + Sync {
    /// Human-readable origin used in logs and discovery reports.
    fn origin(&self) -> String;

    /// Loads the scene definition.
    ///
    /// # Errors
    ///
    /// Returns `SceneSourceError` when the definition cannot be produced.
    fn load(&self) -> Result<SceneDefinition, SceneSourceError>;
}

/// A scene compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct StaticSceneSource {
    key: &'static str,
    handle: &'static str,
    schema: &'static [(&'static str, &'static str)],
}

impl StaticSceneSource {
    /// Creates a static source.
    #[must_use]
    pub const fn new(
        key: &'static str,
        handle: &'static str,
        schema: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            key,
            handle,
            schema,
        }
    }
}

impl SceneSource for StaticSceneSource {
    fn origin(&self) -> String {
        format!("builtin:{}", self.key)
    }

    fn load(&self) -> Result<SceneDefinition, SceneSourceError> {
        SceneDefinition {
            key: self.key.to_owned(),
            handle: self.handle.to_owned(),
            schema: self
                .schema
                .iter()
                .map(|(name, doc)| ((*name).to_owned(), (*doc).to_owned()))
                .collect(),
        }
        .validated(&self.origin())
    }
}

/// A scene definition file. `.json` files are read as JSON, everything else
/// as YAML.
#[derive(Debug, Clone)]
pub struct FileSceneSource {
    path: PathBuf,
}

impl FileSceneSource {
    /// Creates a source for a single definition file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SceneSource for FileSceneSource {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<SceneDefinition, SceneSourceError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| SceneSourceError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        let is_json = self
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let definition: SceneDefinition = if is_json {
            serde_json::from_str(&content).map_err(|e| SceneSourceError::Parse {
                origin: self.origin(),
                reason: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| SceneSourceError::Parse {
                origin: self.origin(),
                reason: e.to_string(),
            })?
        };
        definition.validated(&self.origin())
    }
}

/// Expands a plugin directory into one `FileSceneSource` per definition file.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Creates a directory source.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn is_definition_file(path: &Path) -> bool {
        path.is_file()
            && path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| {
                matches!(ext.to_ascii_lowercase().as_str(), "yaml" | "yml" | "json")
            })
    }

    /// Lists definition files in name order.
    ///
    /// # Errors
    ///
    /// Returns `SceneSourceError::Io` if the directory cannot be listed.
    pub fn sources(&self) -> Result<Vec<Box<dyn SceneSource>>, SceneSourceError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| SceneSourceError::Io {
            path: self.dir.clone(),
            source: e,
        })?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| Self::is_definition_file(path))
            .collect();
        paths.sort();
        Ok(paths
            .into_iter()
            .map(|path| Box::new(FileSceneSource::new(path)) as Box<dyn SceneSource>)
            .collect())
    }
}
