//! Typed vertex records and the byte-layout arithmetic of both streams.
//!
//! The shape stream is planar: one buffer holding all positions first, then
//! all colors, each region sized for the *full* preallocated capacity. The
//! color region therefore starts at `capacity * size_of::<ShapePosition>()`
//! regardless of how many vertices have been written.
//!
//! The glyph stream is interleaved: one `GlyphVertex` record per vertex,
//! written as a single contiguous range per glyph.

use bytemuck::{Pod, Zeroable};

/// Element indices are 32-bit in both streams.
pub const INDEX_SIZE: u64 = std::mem::size_of::<u32>() as u64;

// ── shape stream (planar) ─────────────────────────────────────────────────

/// Position record of the shape stream, clip-space xy.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ShapePosition {
    pub pos: [f32; 2],
}

/// Color record of the shape stream, linear rgb.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ShapeColor {
    pub color: [f32; 3],
}

pub const SHAPE_POSITION_SIZE: u64 = std::mem::size_of::<ShapePosition>() as u64;
pub const SHAPE_COLOR_SIZE: u64 = std::mem::size_of::<ShapeColor>() as u64;

/// Combined per-vertex footprint of the planar buffer (position + color).
pub const SHAPE_VERTEX_FOOTPRINT: u64 = SHAPE_POSITION_SIZE + SHAPE_COLOR_SIZE;

impl ShapePosition {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: SHAPE_POSITION_SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

impl ShapeColor {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: SHAPE_COLOR_SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Byte size of the planar vertex buffer for `capacity` vertices.
pub const fn shape_buffer_size(capacity: u64) -> u64 {
    capacity * SHAPE_VERTEX_FOOTPRINT
}

/// Byte offset of the position record at `cursor`.
pub const fn shape_position_offset(cursor: u64) -> u64 {
    cursor * SHAPE_POSITION_SIZE
}

/// Base byte offset of the color region.
///
/// Sized for the full capacity, not cursor-relative: positions occupy
/// `capacity * SHAPE_POSITION_SIZE` bytes up front.
pub const fn shape_color_region_base(capacity: u64) -> u64 {
    capacity * SHAPE_POSITION_SIZE
}

/// Byte offset of the color record at `cursor`.
pub const fn shape_color_offset(capacity: u64, cursor: u64) -> u64 {
    shape_color_region_base(capacity) + cursor * SHAPE_COLOR_SIZE
}

// ── glyph stream (interleaved) ────────────────────────────────────────────

/// Interleaved glyph vertex: clip-space position, atlas UV, linear rgb.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct GlyphVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 3],
}

pub const GLYPH_VERTEX_SIZE: u64 = std::mem::size_of::<GlyphVertex>() as u64;

impl GlyphVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2, // uv
        2 => Float32x3  // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: GLYPH_VERTEX_SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Byte size of the interleaved vertex buffer for `capacity` vertices.
pub const fn glyph_buffer_size(capacity: u64) -> u64 {
    capacity * GLYPH_VERTEX_SIZE
}

/// Byte offset of the glyph vertex record at `cursor`.
pub const fn glyph_vertex_offset(cursor: u64) -> u64 {
    cursor * GLYPH_VERTEX_SIZE
}

// ── indices ───────────────────────────────────────────────────────────────

/// Byte size of an index buffer holding `capacity` u32 indices.
pub const fn index_buffer_size(capacity: u64) -> u64 {
    capacity * INDEX_SIZE
}

/// Byte offset of the index at `cursor`.
pub const fn index_offset(cursor: u64) -> u64 {
    cursor * INDEX_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_sizes_are_tight() {
        assert_eq!(SHAPE_POSITION_SIZE, 8);
        assert_eq!(SHAPE_COLOR_SIZE, 12);
        assert_eq!(SHAPE_VERTEX_FOOTPRINT, 20);
        assert_eq!(GLYPH_VERTEX_SIZE, 28);
    }

    #[test]
    fn color_region_starts_after_full_position_region() {
        // The color base depends on capacity only, never on the cursor.
        assert_eq!(shape_color_region_base(1024), 1024 * 8);
        assert_eq!(shape_color_offset(1024, 0), 8192);
        assert_eq!(shape_color_offset(1024, 4), 8192 + 4 * 12);
    }

    #[test]
    fn position_offsets_are_cursor_relative() {
        assert_eq!(shape_position_offset(0), 0);
        assert_eq!(shape_position_offset(4), 32);
    }

    #[test]
    fn planar_regions_fill_the_buffer_exactly() {
        let cap = 1024;
        let positions = shape_color_region_base(cap);
        let colors = cap * SHAPE_COLOR_SIZE;
        assert_eq!(positions + colors, shape_buffer_size(cap));
    }

    #[test]
    fn glyph_offsets_use_the_interleaved_stride() {
        assert_eq!(glyph_vertex_offset(4), 4 * 28);
        assert_eq!(glyph_buffer_size(1024), 1024 * 28);
    }

    #[test]
    fn index_offsets_are_four_bytes_wide() {
        assert_eq!(index_offset(6), 24);
        assert_eq!(index_buffer_size(1024), 4096);
    }
}
