//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU layer,
//! the frame clock and the frame pacer.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
