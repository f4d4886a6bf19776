//! Math Visualizer Core: shared pipeline abstractions.
//!
//! This crate defines the job types, collaborator traits, configuration and
//! error taxonomy that every pipeline stage depends on. It contains no
//! network or process code.

pub mod completion;
pub mod config;
pub mod error;
pub mod ids;
pub mod job;
pub mod tier;
