//! Coordinate and geometry types shared across the engine.
//!
//! Canonical CPU space is clip space:
//! - x and y in [-1, 1]
//! - origin at the screen center
//! - +X right, +Y up
//!
//! Positions are passed through to the GPU unchanged; there is no viewport
//! transform between draw calls and the vertex shader.

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::{normalize_angle, Vec2};
