//! Test render tiers: mock `RenderTier` implementations for tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mathviz_core::error::PipelineError;
use mathviz_core::job::{RenderRequest, RenderTierKind};
use mathviz_core::tier::RenderTier;

/// A tier that succeeds with `/tagged/{tier}/{type}.mp4`, so tests can tell
/// which tier produced an artifact. Counts its invocations.
#[derive(Debug)]
pub struct TaggedTier {
    kind: RenderTierKind,
    calls: AtomicUsize,
}

impl TaggedTier {
    /// Creates a tagged tier.
    #[must_use]
    pub fn new(kind: RenderTierKind) -> Self {
        Self {
            kind,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `render` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RenderTier for TaggedTier {
    fn kind(&self) -> RenderTierKind {
        self.kind
    }

    async fn render(&self, request: &RenderRequest) -> Result<PathBuf, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scene = request.scene_key().unwrap_or("visualization");
        Ok(PathBuf::from(format!("/tagged/{}/{scene}.mp4", self.kind)))
    }
}

/// A tier that always fails. `catastrophic` selects whether the failure is
/// recoverable. Counts its invocations.
#[derive(Debug)]
pub struct FailingTier {
    kind: RenderTierKind,
    catastrophic: bool,
    calls: AtomicUsize,
}

impl FailingTier {
    /// A tier failing with a recoverable renderer error.
    #[must_use]
    pub fn recoverable(kind: RenderTierKind) -> Self {
        Self {
            kind,
            catastrophic: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A tier failing with a catastrophic error.
    #[must_use]
    pub fn catastrophic(kind: RenderTierKind) -> Self {
        Self {
            kind,
            catastrophic: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `render` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RenderTier for FailingTier {
    fn kind(&self) -> RenderTierKind {
        self.kind
    }

    async fn render(&self, _request: &RenderRequest) -> Result<PathBuf, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.catastrophic {
            Err(PipelineError::Catastrophic("disk full".into()))
        } else {
            Err(PipelineError::Renderer("renderer exited with status 1".into()))
        }
    }
}
