//! Math type re-exports.
//!
//! Container sizes and node content sizes are plain 2D extents; they are
//! represented with `glam` vectors rather than a bespoke size type.

pub use glam::{vec2, Vec2};
