//! Math Visualizer: render dispatch.
//!
//! The dispatcher walks an ordered chain of render tiers (remote service,
//! local worker process) and finishes with a placeholder tier that always
//! produces a playable path. Callers see "a path" rather than "a correct
//! render"; the tier that produced the artifact is reported alongside it.

pub mod dispatcher;
pub mod placeholder;
pub mod remote;
pub mod subprocess;

pub use dispatcher::RenderDispatcher;
pub use placeholder::PlaceholderTier;
pub use remote::RemoteTier;
pub use subprocess::SubprocessTier;
