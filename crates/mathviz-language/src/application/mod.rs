//! Stage entry points.

pub mod explain;
pub mod refine;
