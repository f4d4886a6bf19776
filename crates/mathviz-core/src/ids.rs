//! Artifact identifier source.
//!
//! In production, suffixes come from a real RNG. Tests inject fixed or
//! sequenced identifiers so artifact names are predictable.

use rand::Rng;

/// Produces collision-resistant suffixes for artifact file names.
pub trait ArtifactIdSource: Send + Sync {
    /// Returns an 8-character lowercase hex identifier.
    fn next_id(&self) -> String;
}

/// Artifact ids drawn from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomArtifactIds;

impl ArtifactIdSource for RandomArtifactIds {
    fn next_id(&self) -> String {
        format!("{:08x}", rand::rng().random::<u32>())
    }
}

/// Replaces every character outside `[A-Za-z0-9_-]` with `_` so a
/// visualization type can be embedded in a file name. Empty input maps to
/// `visualization`.
#[must_use]
pub fn file_stem_for(visualization_type: &str) -> String {
    let stem: String = visualization_type
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "visualization".to_owned()
    } else {
        stem
    }
}
