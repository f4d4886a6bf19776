//! Registry-driven renderer shared by the service and the worker.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mathviz_core::error::PipelineError;
use mathviz_core::ids::file_stem_for;
use mathviz_core::job::RenderRequest;
use mathviz_scenes::builtin::unsupported_scene;
use mathviz_scenes::{SceneDescriptor, SceneRegistry};
use tracing::{info, instrument, warn};

use crate::engine::SceneEngine;

/// Resolves a request against the registry and drives the engine.
///
/// Unknown or missing visualization types render the "unsupported" notice
/// scene, so a known engine always produces something playable. Output goes
/// to `{type}.mp4` in the renders directory; a later render of the same type
/// replaces it.
pub struct SceneRenderer {
    registry: Arc<SceneRegistry>,
    engine: Arc<dyn SceneEngine>,
    renders_dir: PathBuf,
}

impl std::fmt::Debug for SceneRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneRenderer")
            .field("scenes", &self.registry.len())
            .field("renders_dir", &self.renders_dir)
            .finish_non_exhaustive()
    }
}

impl SceneRenderer {
    /// Creates a renderer.
    #[must_use]
    pub fn new(
        registry: Arc<SceneRegistry>,
        engine: Arc<dyn SceneEngine>,
        renders_dir: &Path,
    ) -> Self {
        Self {
            registry,
            engine,
            renders_dir: renders_dir.to_path_buf(),
        }
    }

    /// The registry this renderer resolves against.
    #[must_use]
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    fn resolve(&self, key: Option<&str>) -> SceneDescriptor {
        if let Some(scene) = key.and_then(|k| self.registry.lookup(k)) {
            return scene.clone();
        }
        warn!(requested = ?key, "no scene registered, rendering unsupported notice");
        unsupported_scene()
    }

    /// Renders a request and returns the absolute artifact path.
    ///
    /// # Errors
    ///
    /// Returns the engine's error, `PipelineError::Renderer("No video
    /// produced")` when the engine exits cleanly without writing the output,
    /// and `PipelineError::Catastrophic` when the renders directory is
    /// unusable.
    #[instrument(skip_all, fields(scene = request.scene_key().unwrap_or_default()))]
    pub async fn render(&self, request: &RenderRequest) -> Result<PathBuf, PipelineError> {
        let key = request.scene_key();
        let scene = self.resolve(key);
        let parameters = scene.accepted_parameters(&request.parameters);

        tokio::fs::create_dir_all(&self.renders_dir).await?;
        let output = std::path::absolute(&self.renders_dir)?
            .join(format!("{}.mp4", file_stem_for(key.unwrap_or_default())));

        // A previous render of the same type must not pass for this one.
        if let Err(e) = tokio::fs::remove_file(&output).await
            && e.kind() != std::io::ErrorKind::NotFound
        {
            return Err(e.into());
        }

        self.engine
            .render_scene(&scene.handle, &parameters, &output)
            .await?;

        if !tokio::fs::try_exists(&output).await.unwrap_or(false) {
            return Err(PipelineError::Renderer("No video produced".into()));
        }

        info!(handle = %scene.handle, path = %output.display(), "scene rendered");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use mathviz_core::job::Parameters;
    use mathviz_scenes::SceneHandle;
    use serde_json::{Value, json};

    /// Records each call and writes a one-byte video.
    #[derive(Default)]
    struct RecordingEngine {
        calls: Mutex<Vec<(String, Parameters)>>,
    }

    #[async_trait]
    impl SceneEngine for RecordingEngine {
        async fn render_scene(
            &self,
            handle: &SceneHandle,
            parameters: &Parameters,
            output: &Path,
        ) -> Result<(), PipelineError> {
            self.calls
                .lock()
                .unwrap()
                .push((handle.to_string(), parameters.clone()));
            tokio::fs::write(output, b"v").await?;
            Ok(())
        }
    }

    /// Succeeds without writing anything.
    struct SilentEngine;

    #[async_trait]
    impl SceneEngine for SilentEngine {
        async fn render_scene(
            &self,
            _handle: &SceneHandle,
            _parameters: &Parameters,
            _output: &Path,
        ) -> Result<(), PipelineError> {
            Ok(())
        }
    }

    fn registry() -> Arc<SceneRegistry> {
        let mut registry = SceneRegistry::new();
        registry.register(
            "vector",
            SceneHandle("VectorScene".into()),
            BTreeMap::from([("vectors".to_owned(), "List[List[float]]".to_owned())]),
        );
        Arc::new(registry)
    }

    fn request(kind: &str, parameters: Value) -> RenderRequest {
        RenderRequest::new(kind, serde_json::from_value(parameters).unwrap())
    }

    #[tokio::test]
    async fn test_known_scene_gets_only_declared_parameters() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(RecordingEngine::default());
        let renderer = SceneRenderer::new(registry(), engine.clone(), dir.path());

        // Act
        let path = renderer
            .render(&request("vector", json!({ "vectors": [[1, 0]], "color": "red" })))
            .await
            .unwrap();

        // Assert
        assert!(path.is_absolute());
        assert_eq!(path.file_name().unwrap(), "vector.mp4");
        let calls = engine.calls.lock().unwrap();
        assert_eq!(calls[0].0, "VectorScene");
        assert_eq!(Value::Object(calls[0].1.clone()), json!({ "vectors": [[1, 0]] }));
    }

    #[tokio::test]
    async fn test_unknown_type_renders_unsupported_scene() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(RecordingEngine::default());
        let renderer = SceneRenderer::new(registry(), engine.clone(), dir.path());

        let path = renderer
            .render(&request("hyperbolic_tiling", json!({ "p": 7 })))
            .await
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "hyperbolic_tiling.mp4");
        let calls = engine.calls.lock().unwrap();
        assert_eq!(calls[0].0, "UnsupportedScene");
        assert!(calls[0].1.is_empty());
    }

    #[tokio::test]
    async fn test_missing_type_writes_generic_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let renderer =
            SceneRenderer::new(registry(), Arc::new(RecordingEngine::default()), dir.path());

        let path = renderer.render(&RenderRequest::default()).await.unwrap();

        assert_eq!(path.file_name().unwrap(), "visualization.mp4");
    }

    #[tokio::test]
    async fn test_engine_without_output_is_renderer_failure() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SceneRenderer::new(registry(), Arc::new(SilentEngine), dir.path());

        let err = renderer
            .render(&request("vector", json!({})))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "renderer failure: No video produced");
    }

    #[tokio::test]
    async fn test_stale_output_from_earlier_render_is_not_reused() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vector.mp4"), b"old").unwrap();
        let renderer = SceneRenderer::new(registry(), Arc::new(SilentEngine), dir.path());

        // Act
        let err = renderer
            .render(&request("vector", json!({})))
            .await
            .unwrap_err();

        // Assert
        assert_eq!(err.to_string(), "renderer failure: No video produced");
        assert!(!dir.path().join("vector.mp4").exists());
    }
}
