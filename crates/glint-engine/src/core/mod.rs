//! Core engine-facing contracts.
//!
//! Defines the stable interface between the runtime (platform loop) and
//! application code: the `App` trait and the per-frame context carrying the
//! draw-call surface.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
