//! Time subsystem.
//!
//! Stable, testable frame timing utilities without coupling to the runtime:
//! - one `FrameClock` per render loop; `tick()` once per presented frame
//! - one `FramePacer` per loop; `sleep_after_frame()` once per presented frame

mod frame_clock;
mod pacer;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::FramePacer;
