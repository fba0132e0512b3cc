//! Paint model for the two draw streams.
//!
//! Scope:
//! - color representation (3-component normalized linear RGB)
//!
//! There is no per-vertex alpha; translucency comes from the pipeline's global
//! blend state.

mod color;

pub use color::Color;
