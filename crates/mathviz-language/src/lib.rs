//! Math Visualizer: language stages.
//!
//! Turns free text into a structured visualization job and a structured job
//! into a short explanation. Both stages use an optional text-completion
//! collaborator and fall back to deterministic offline generators, so neither
//! ever fails outward.

pub mod application;
pub mod domain;
pub mod transport;

pub use application::explain::Explainer;
pub use application::refine::Refiner;
pub use transport::completion_from_config;
