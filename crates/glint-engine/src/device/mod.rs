//! GPU device + surface management and the narrow backend boundary.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering
//! - the checked-call boundary the render layer goes through for every
//!   buffer/shader operation

mod backend;
mod gpu;

pub use backend::GfxBackend;
pub(crate) use backend::fatal;
pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
