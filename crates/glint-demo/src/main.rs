//! Render test scene: four static rects, a spinning quad and two text runs.

use std::f32::consts::PI;
use std::path::PathBuf;

use anyhow::Result;
use winit::dpi::LogicalSize;

use glint_engine::coords::{Vec2, normalize_angle};
use glint_engine::core::{App, AppControl, FrameCtx};
use glint_engine::logging::{LoggingConfig, init_logging};
use glint_engine::paint::Color;
use glint_engine::window::{Runtime, RuntimeConfig};

/// Quad spin rate: a quarter turn per second.
const RAD_PER_SEC: f32 = PI / 2.0;

struct RenderTest {
    angle: f32,
}

impl App for RenderTest {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        ctx.clear(Color::GREY);

        ctx.draw_rect(Vec2::new(0.0, 0.0), Vec2::splat(0.8), Color::RED);
        ctx.draw_rect(Vec2::new(-0.8, 0.8), Vec2::splat(0.8), Color::RED);
        ctx.draw_rect(Vec2::new(-0.8, 0.0), Vec2::splat(0.8), Color::BLUE);
        ctx.draw_rect(Vec2::new(0.0, 0.8), Vec2::splat(0.8), Color::BLUE);

        self.angle = normalize_angle(self.angle + ctx.dt() * RAD_PER_SEC);

        let a = Vec2::new(-0.25, -0.25).rotated(self.angle);
        let b = Vec2::new(0.25, -0.25).rotated(self.angle);
        let c = Vec2::new(0.25, 0.25).rotated(self.angle);
        let d = Vec2::new(-0.25, 0.25).rotated(self.angle);
        ctx.draw_quad(a, b, c, d, Color::GREEN);

        ctx.draw_text(Vec2::splat(-0.8), 0.075, "Hello world!", Color::WHITE);
        ctx.draw_text(Vec2::new(0.0, 0.8), 0.075, "Meep Moop", Color::WHITE);

        ctx.draw_text_fmt(
            Vec2::new(-0.975, -0.975),
            0.05,
            Color::WHITE,
            format_args!("{:.0} fps", 1.0 / ctx.dt()),
        );

        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    // Font bitmap path may be overridden on the command line.
    let font_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("ExportedFont.png"));

    log::info!("Hello 2D Render Test!");

    let config = RuntimeConfig {
        title: "2D Render Test".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
        max_fps: 60,
        font_path,
        ..RuntimeConfig::default()
    };

    Runtime::run(config, RenderTest { angle: 0.0 })
}
