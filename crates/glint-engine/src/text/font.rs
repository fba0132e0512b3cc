use std::path::Path;

use anyhow::{Context, Result};

use crate::device::GfxBackend;

use super::AtlasGrid;

/// Bitmap font atlas uploaded as an RGBA8 texture.
///
/// The bitmap is an arbitrary image decoded by the `image` crate; an
/// unreadable path or unsupported format is an initialization error and
/// surfaces to the caller, which treats it as fatal.
pub struct FontAtlas {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    grid: AtlasGrid,
    width: u32,
    height: u32,
}

impl FontAtlas {
    /// Decodes the bitmap at `path` and uploads it.
    pub fn load(backend: &GfxBackend<'_>, path: &Path, grid: AtlasGrid) -> Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("failed to load font bitmap '{}'", path.display()))?
            .to_rgba8();
        let (width, height) = img.dimensions();

        log::info!("loaded font atlas '{}' ({width}x{height})", path.display());

        Ok(Self::from_rgba8(backend, width, height, img.as_raw(), grid))
    }

    /// Uploads already-decoded RGBA8 pixels (tightly packed rows).
    pub fn from_rgba8(
        backend: &GfxBackend<'_>,
        width: u32,
        height: u32,
        pixels: &[u8],
        grid: AtlasGrid,
    ) -> Self {
        let (texture, view) = backend.create_texture_rgba8("glint font atlas", width, height, pixels);
        Self {
            texture,
            view,
            grid,
            width,
            height,
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn grid(&self) -> AtlasGrid {
        self.grid
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
