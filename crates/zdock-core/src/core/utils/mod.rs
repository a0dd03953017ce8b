//! Stateless helpers shared by the I/O layer and the engine: rotation and grid
//! geometry, coordinate measures, and atom/chain naming rules.

pub mod geometry;
pub mod identifiers;
