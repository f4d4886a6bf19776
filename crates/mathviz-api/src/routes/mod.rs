//! Route modules.

pub mod generate;
pub mod health;
pub mod root;
