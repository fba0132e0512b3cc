//! Glint engine crate.
//!
//! An immediate-mode batched 2D renderer: applications issue quad/rect/text
//! draw calls each frame, the engine packs them into two fixed-capacity GPU
//! streams (flat-colored shapes, textured glyphs) and submits both once per
//! frame.

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod text;
