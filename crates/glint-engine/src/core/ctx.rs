use std::fmt;

use winit::window::{Window, WindowId};

use crate::coords::Vec2;
use crate::device::GfxBackend;
use crate::paint::Color;
use crate::render::Renderer2d;
use crate::time::FrameTime;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Returns the logical window size as `(width, height)` in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        let phys = self.window.inner_size();
        let scale = self.window.scale_factor();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(scale);
        (logi.width as f32, logi.height as f32)
    }
}

/// Per-frame context passed to [`crate::core::App::on_frame`].
///
/// The draw-call surface lives here: the context borrows the window's
/// renderer and backend for the duration of the callback, so every draw call
/// goes through this explicit reference rather than any global state.
pub struct FrameCtx<'a> {
    pub window: WindowCtx<'a>,
    pub time: FrameTime,

    pub(crate) backend: GfxBackend<'a>,
    pub(crate) renderer: &'a mut Renderer2d,
}

impl FrameCtx<'_> {
    /// Time since the previous frame, in seconds.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.time.dt
    }

    /// Opens the frame: clear color + cursor reset. Call before drawing.
    pub fn clear(&mut self, color: Color) {
        self.renderer.clear(color);
    }

    /// Draws an arbitrary quad with a flat color.
    pub fn draw_quad(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, color: Color) {
        self.renderer.draw_quad(&self.backend, p0, p1, p2, p3, color);
    }

    /// Draws an axis-aligned rectangle extending downward from `top_left`.
    pub fn draw_rect(&mut self, top_left: Vec2, size: Vec2, color: Color) {
        self.renderer.draw_rect(&self.backend, top_left, size, color);
    }

    /// Draws a text run with square glyph cells of side `size`.
    pub fn draw_text(&mut self, pos: Vec2, size: f32, text: &str, color: Color) {
        self.renderer.draw_text(&self.backend, pos, size, text, color);
    }

    /// Formatted variant of [`draw_text`](Self::draw_text); reuses the
    /// renderer's scratch buffer, so steady-state frames do not allocate.
    pub fn draw_text_fmt(&mut self, pos: Vec2, size: f32, color: Color, args: fmt::Arguments<'_>) {
        self.renderer.draw_text_fmt(&self.backend, pos, size, color, args);
    }
}
