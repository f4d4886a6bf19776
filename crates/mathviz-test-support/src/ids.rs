//! Test artifact ids: deterministic `ArtifactIdSource` implementations.

use std::sync::atomic::{AtomicUsize, Ordering};

use mathviz_core::ids::ArtifactIdSource;

/// Always returns the same identifier.
#[derive(Debug, Clone, Copy)]
pub struct FixedArtifactIds(pub &'static str);

impl ArtifactIdSource for FixedArtifactIds {
    fn next_id(&self) -> String {
        self.0.to_owned()
    }
}

/// Returns `00000000`, `00000001`, ... in call order.
#[derive(Debug, Default)]
pub struct SequenceArtifactIds {
    next: AtomicUsize,
}

impl SequenceArtifactIds {
    /// Creates a sequence starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactIdSource for SequenceArtifactIds {
    fn next_id(&self) -> String {
        format!("{:08x}", self.next.fetch_add(1, Ordering::SeqCst))
    }
}
