//! Offline generators and fixed instructions.

pub mod canned;
pub mod classifier;
pub mod prompts;
