use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{GfxBackend, Gpu, GpuInit, SurfaceErrorAction};
use crate::render::Renderer2d;
use crate::text::{AtlasGrid, FontAtlas};
use crate::time::{FrameClock, FramePacer};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Frame-rate cap enforced by sleeping at the end of each frame.
    /// `0` disables pacing. Pacing is the engine's only rate limiter: the
    /// surface is asked for `Immediate` presentation (see [`GpuInit`]).
    pub max_fps: u32,

    /// Path to the font atlas bitmap. A missing or undecodable file is fatal
    /// at startup.
    pub font_path: PathBuf,

    /// Cell grid of the font atlas bitmap.
    pub font_grid: AtlasGrid,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            max_fps: 60,
            font_path: PathBuf::from("ExportedFont.png"),
            font_grid: AtlasGrid::DEFAULT,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Creates the window, GPU context and renderer, then drives `app` until
    /// it requests exit or the window closes.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    app: A,

    entry: Option<WindowEntry>,

    /// Built right after the GPU context; all of its resources are
    /// refcounted handles, so it lives outside the self-referencing entry.
    renderer: Option<Renderer2d>,

    clock: FrameClock,
    pacer: FramePacer,

    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        let pacer = FramePacer::new(config.max_fps);
        Self {
            config,
            app,
            entry: None,
            renderer: None,
            clock: FrameClock::default(),
            pacer,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowId> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();

        let entry = WindowEntryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, GpuInit::default()))
                    .expect("GPU initialization failed for window")
            },
        }
        .build();

        let renderer = entry.with_gpu(|gpu| {
            let backend = GfxBackend::new(gpu.device(), gpu.queue(), gpu.surface_format());
            let font = FontAtlas::load(&backend, &self.config.font_path, self.config.font_grid)
                .context("failed to load font atlas")?;
            Ok::<_, anyhow::Error>(Renderer2d::new(&backend, &font))
        })?;

        self.entry = Some(entry);
        self.renderer = Some(renderer);
        self.clock.reset();

        Ok(id)
    }

    /// Drives one frame: measured tick, app callback, render pass, present,
    /// then pacing sleep. The first loop iteration has no measurable delta and
    /// skips the app callback, but still presents whatever the renderer holds.
    fn redraw(&mut self, window_id: WindowId) {
        let frame_start = Instant::now();

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, clock, renderer) = (&mut self.app, &mut self.clock, &mut self.renderer);

        let (Some(entry), Some(renderer)) = (self.entry.as_mut(), renderer.as_mut()) else {
            return;
        };

        let mut exit_from_frame = false;

        entry.with_mut(|fields| {
            if let Some(ft) = clock.tick() {
                let backend = GfxBackend::new(
                    fields.gpu.device(),
                    fields.gpu.queue(),
                    fields.gpu.surface_format(),
                );

                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: window_id,
                        window: fields.window,
                    },
                    time: ft,
                    backend,
                    renderer,
                };

                if app.on_frame(&mut ctx) == AppControl::Exit {
                    exit_from_frame = true;
                }
            }

            match fields.gpu.begin_frame() {
                Ok(mut frame) => {
                    renderer.render(&mut frame.encoder, &frame.view);
                    fields.window.pre_present_notify();
                    fields.gpu.submit(frame);
                }
                Err(err) => match fields.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {}
                    SurfaceErrorAction::Fatal => {
                        log::error!("fatal surface error, exiting");
                        exit_from_frame = true;
                    }
                },
            }
        });

        self.pacer.sleep_after_frame(frame_start.elapsed());

        if exit_from_frame {
            self.request_exit();
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.request_exit();
            event_loop.exit();
            return;
        }

        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Continuous redraw; pacing happens at the end of each frame, not by
        // waiting in the loop.
        event_loop.set_control_flow(ControlFlow::Poll);

        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.request_exit();
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.renderer = None;
                self.entry = None;
                self.request_exit();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw(window_id);
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
