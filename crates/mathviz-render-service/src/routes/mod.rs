//! Render service route modules.

pub mod health;
pub mod render;
pub mod scenes;
