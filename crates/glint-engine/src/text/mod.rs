//! Bitmap-font text support.
//!
//! The glyph source is a single fixed-grid bitmap atlas: `atlas` maps
//! character codes to UV rectangles, `font` loads the bitmap and owns the GPU
//! texture. There is no rasterization and no layout engine.

mod atlas;
mod font;

pub use atlas::AtlasGrid;
pub use font::FontAtlas;
