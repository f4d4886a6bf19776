//! Shared test doubles for the Math Visualizer.

mod completion;
mod ids;
mod tiers;

pub use completion::{CannedCompletion, FailingCompletion, RecordingCompletion};
pub use ids::{FixedArtifactIds, SequenceArtifactIds};
pub use tiers::{FailingTier, TaggedTier};
