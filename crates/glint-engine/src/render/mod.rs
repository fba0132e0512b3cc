//! GPU rendering subsystem.
//!
//! Two independent draw streams are accumulated per frame and submitted once:
//! flat-colored shapes (planar vertex layout) and textured glyphs (interleaved
//! layout). Each batch owns its GPU resources (pipeline, buffers) and goes
//! through the [`crate::device::GfxBackend`] boundary for every upload.
//!
//! Convention:
//! - CPU geometry is in clip space (+Y up, [-1, 1]).
//! - Vertex shaders pass positions through unchanged.

pub mod batch;
pub mod layout;

mod glyph;
mod renderer;
mod shape;

pub use glyph::GlyphBatch;
pub use renderer::Renderer2d;
pub use shape::ShapeBatch;

/// Straight-alpha blending shared by both pipelines (colors are not
/// premultiplied; the shaders emit alpha 1).
pub(crate) fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}
