use std::panic::Location;

/// Error scopes drained after every checked call, in push order.
///
/// One scope per wgpu error filter; draining is bounded by this list the same
/// way the underlying APIs bound their queued error codes.
const ERROR_FILTERS: [wgpu::ErrorFilter; 3] = [
    wgpu::ErrorFilter::Validation,
    wgpu::ErrorFilter::OutOfMemory,
    wgpu::ErrorFilter::Internal,
];

/// Fatal resource error: log a diagnostic with the failing call site, then
/// terminate.
///
/// These are programmer/content errors caught during development (overflowed
/// fixed-capacity buffers, invalid GPU calls, missing assets) — there is no
/// retry and no degraded mode.
#[track_caller]
pub(crate) fn fatal(call: &str, detail: impl std::fmt::Display) -> ! {
    let loc = Location::caller();
    log::error!("{}:{}: {call}: {detail}", loc.file(), loc.line());
    std::process::abort()
}

/// The narrow boundary the render layer talks to the GPU through.
///
/// Every operation runs inside [`GfxBackend::checked`], which drains the
/// device's queued errors after the call and terminates if any were observed.
/// The render layer never touches `wgpu::Device`/`wgpu::Queue` directly for
/// buffer or shader work.
#[derive(Copy, Clone)]
pub struct GfxBackend<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    surface_format: wgpu::TextureFormat,
}

impl<'a> GfxBackend<'a> {
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
        }
    }

    /// Surface format the render pipelines must target.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Runs `f` between pushed error scopes and drains them afterwards.
    ///
    /// Each drained error is logged with the call site. When every scope in
    /// the bounded set reports an error, a missing or invalid device context
    /// is the likely cause and a warning says so. Any observed error is fatal.
    #[track_caller]
    pub fn checked<T>(&self, call: &str, f: impl FnOnce(&wgpu::Device, &wgpu::Queue) -> T) -> T {
        let guards: Vec<wgpu::ErrorScopeGuard> = ERROR_FILTERS
            .into_iter()
            .map(|filter| self.device.push_error_scope(filter))
            .collect();

        let out = f(self.device, self.queue);

        let loc = Location::caller();
        let mut n_errors = 0usize;
        // Scopes pop in reverse push order; the loop is bounded by the filter set.
        for guard in guards.into_iter().rev() {
            if let Some(err) = pollster::block_on(guard.pop()) {
                log::error!("{}:{}: {call} raised: {err}", loc.file(), loc.line());
                n_errors += 1;
            }
        }

        if n_errors >= ERROR_FILTERS.len() {
            log::warn!(
                "{call}: all {n_errors} error scopes reported failures; \
                 the device context may be invalid"
            );
        }
        if n_errors > 0 {
            fatal(call, format_args!("{n_errors} backend error(s), see log"));
        }

        out
    }

    /// Allocates a GPU buffer of `byte_size` bytes.
    #[track_caller]
    pub fn create_buffer(
        &self,
        label: &str,
        byte_size: u64,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        self.checked("create_buffer", |device, _| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: byte_size,
                usage,
                mapped_at_creation: false,
            })
        })
    }

    /// Writes `data` into `buffer` at `byte_offset`.
    ///
    /// Fatal if the write would extend past the buffer's allocated size; this
    /// mirrors the element-level capacity checks done by the batches and
    /// catches any byte-arithmetic mistake between the two.
    #[track_caller]
    pub fn upload_subrange(&self, buffer: &wgpu::Buffer, byte_offset: u64, data: &[u8]) {
        let end = byte_offset + data.len() as u64;
        if end > buffer.size() {
            fatal(
                "upload_subrange",
                format_args!(
                    "write of {} bytes at offset {byte_offset} exceeds buffer size {}",
                    data.len(),
                    buffer.size()
                ),
            );
        }

        self.checked("upload_subrange", |_, queue| {
            queue.write_buffer(buffer, byte_offset, data);
        });
    }

    /// Returns the buffer's allocated byte size.
    ///
    /// Queried from the handle each call rather than cached by the batches, so
    /// the capacity checks hold even if the buffer is swapped out from under
    /// them.
    pub fn query_buffer_capacity(&self, buffer: &wgpu::Buffer) -> u64 {
        buffer.size()
    }

    /// Compiles a WGSL module holding both vertex and fragment entry points.
    ///
    /// Compile/link failures surface through the drained error scopes with the
    /// shader's diagnostic text and are fatal.
    #[track_caller]
    pub fn compile_program(&self, label: &str, wgsl_source: &str) -> wgpu::ShaderModule {
        self.checked("compile_program", |device, _| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: wgpu::ShaderSource::Wgsl(wgsl_source.into()),
            })
        })
    }

    /// Creates an RGBA8 texture and uploads `pixels` (tightly packed rows).
    #[track_caller]
    pub fn create_texture_rgba8(
        &self,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> (wgpu::Texture, wgpu::TextureView) {
        debug_assert_eq!(pixels.len() as u64, width as u64 * height as u64 * 4);

        let texture = self.checked("create_texture", |device, _| {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            })
        });

        self.checked("write_texture", |_, queue| {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(width * 4),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }
}
