//! Math Visualizer: scene registry.
//!
//! Maps visualization-type keys to a renderer handle and a parameter schema.
//! The registry is populated once at startup from static registrations and
//! injected scene sources, then shared read-only.

pub mod builtin;
pub mod registry;
pub mod source;

pub use registry::{DiscoveryReport, SceneDescriptor, SceneHandle, SceneRegistry};
pub use source::{
    DirectorySource, FileSceneSource, SceneDefinition, SceneSource, SceneSourceError,
    StaticSceneSource,
};
