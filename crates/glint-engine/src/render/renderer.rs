use std::fmt;
use std::fmt::Write as _;

use crate::coords::{Rect, Vec2};
use crate::device::GfxBackend;
use crate::paint::Color;
use crate::text::{AtlasGrid, FontAtlas};

use super::{GlyphBatch, ShapeBatch};

/// Preallocated element capacities of both streams. Fixed for the process
/// lifetime; overflowing them is fatal.
pub const PREALLOC_VERTICES: u32 = 1024;
pub const PREALLOC_INDICES: u32 = 1024;

/// The renderer context: exclusive owner of both draw streams.
///
/// One instance exists per window. All draw calls go through a `&mut`
/// reference to it — there is no implicit "current" renderer — and the
/// cursors are only ever mutated here and in the batches it owns.
///
/// Frame protocol:
/// 1. [`clear`](Self::clear) once (resets cursors, records the clear color)
/// 2. any number of `draw_*` calls
/// 3. [`render`](Self::render) once, with the frame's encoder and view
pub struct Renderer2d {
    shapes: ShapeBatch,
    glyphs: GlyphBatch,
    font_grid: AtlasGrid,
    clear_color: Color,

    /// Reusable formatting buffer for [`draw_text_fmt`](Self::draw_text_fmt);
    /// grows to the longest formatted string and then stops allocating.
    scratch: String,
}

impl Renderer2d {
    pub fn new(backend: &GfxBackend<'_>, font: &FontAtlas) -> Self {
        Self {
            shapes: ShapeBatch::new(backend, PREALLOC_VERTICES, PREALLOC_INDICES),
            glyphs: GlyphBatch::new(backend, font, PREALLOC_VERTICES, PREALLOC_INDICES),
            font_grid: font.grid(),
            clear_color: Color::BLACK,
            scratch: String::new(),
        }
    }

    /// Opens the frame: records the clear color and zeroes both streams'
    /// cursors. Must run before any draw call of the frame; running it twice
    /// in a row is harmless (cursors are zero either way).
    pub fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.shapes.reset();
        self.glyphs.reset();
    }

    /// Draws an arbitrary quad (corners in order, split 0-1-2 / 2-3-0).
    pub fn draw_quad(
        &mut self,
        backend: &GfxBackend<'_>,
        p0: Vec2,
        p1: Vec2,
        p2: Vec2,
        p3: Vec2,
        color: Color,
    ) {
        self.shapes.submit_quad(backend, p0, p1, p2, p3, color);
    }

    /// Draws an axis-aligned rectangle extending downward from `top_left`.
    pub fn draw_rect(&mut self, backend: &GfxBackend<'_>, top_left: Vec2, size: Vec2, color: Color) {
        self.shapes.submit_rect(backend, top_left, size, color);
    }

    /// Draws `text` left-to-right from `pos` with square cells of side `size`.
    ///
    /// `pos` is the baseline-left corner; glyphs extend one cell upward.
    /// Characters without an atlas cell (space, control characters) advance
    /// the pen without emitting geometry.
    pub fn draw_text(
        &mut self,
        backend: &GfxBackend<'_>,
        pos: Vec2,
        size: f32,
        text: &str,
        color: Color,
    ) {
        for (i, c) in text.chars().enumerate() {
            let Some(uv) = self.font_grid.glyph_uv(c) else {
                continue;
            };
            let screen = glyph_screen_rect(pos, size, i);
            self.glyphs.submit_glyph_quad(backend, screen, uv, color);
        }
    }

    /// Formatted variant of [`draw_text`](Self::draw_text).
    ///
    /// Formats into an owned scratch buffer that is reused across calls, so
    /// steady-state frames do not reallocate.
    pub fn draw_text_fmt(
        &mut self,
        backend: &GfxBackend<'_>,
        pos: Vec2,
        size: f32,
        color: Color,
        args: fmt::Arguments<'_>,
    ) {
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();
        if let Err(err) = scratch.write_fmt(args) {
            crate::device::fatal("draw_text_fmt", err);
        }

        self.draw_text(backend, pos, size, &scratch, color);
        self.scratch = scratch;
    }

    /// Submits both streams in one render pass, clearing to the color from
    /// this frame's [`clear`](Self::clear). Shapes draw first, so glyphs
    /// blend on top of them.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let c = self.clear_color;

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glint frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: c.r as f64,
                        g: c.g as f64,
                        b: c.b as f64,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        self.shapes.draw(&mut rpass);
        self.glyphs.draw(&mut rpass);
    }

    /// Shape-stream cursors, for diagnostics.
    pub fn shape_cursors(&self) -> (u32, u32) {
        (self.shapes.vertex_cursor(), self.shapes.index_cursor())
    }

    /// Glyph-stream cursors, for diagnostics.
    pub fn glyph_cursors(&self) -> (u32, u32) {
        (self.glyphs.vertex_cursor(), self.glyphs.index_cursor())
    }
}

/// Screen cell of the `i`-th character of a text run: the pen advances one
/// cell per character (spaces included) and the glyph occupies the full cell
/// above the baseline.
fn glyph_screen_rect(pos: Vec2, cell: f32, i: usize) -> Rect {
    Rect::new(pos.x + i as f32 * cell, pos.y + cell, cell, cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_cells_advance_with_the_pen() {
        let r0 = glyph_screen_rect(Vec2::new(-0.8, -0.8), 0.075, 0);
        let r2 = glyph_screen_rect(Vec2::new(-0.8, -0.8), 0.075, 2);

        assert_eq!(r0.origin, Vec2::new(-0.8, -0.725));
        assert!((r2.origin.x - (-0.8 + 2.0 * 0.075)).abs() < 1e-6);
        assert_eq!(r0.origin.y, r2.origin.y);
        assert_eq!(r0.size, Vec2::splat(0.075));
    }

    #[test]
    fn glyph_cell_sits_above_the_baseline() {
        let r = glyph_screen_rect(Vec2::zero(), 0.1, 0);
        // Top edge at +cell, rect extends back down to the baseline.
        assert!((r.origin.y - 0.1).abs() < 1e-6);
        assert!((r.origin.y - r.size.y).abs() < 1e-6);
    }
}
