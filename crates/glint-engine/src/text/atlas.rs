use crate::coords::Rect;

/// First character present in the atlas. The cell *before* it is blank, which
/// is why glyph indices are relative to `'!' - 1`.
const FIRST_VISIBLE: u32 = '!' as u32;

/// Fixed glyph grid of a bitmap font atlas.
///
/// Cells are laid out row-major starting one cell before `'!'`. The occupied
/// glyph width is half the cell pitch (the atlas packs narrow glyphs into wide
/// cells), so the returned UV rectangle is half a cell wide and a full cell
/// tall.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AtlasGrid {
    pub cols: u32,
    pub rows: u32,
}

impl AtlasGrid {
    /// Grid of the stock exported font: 16 columns × 8 rows.
    pub const DEFAULT: AtlasGrid = AtlasGrid { cols: 16, rows: 8 };

    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Maps a character to its UV rectangle in the atlas.
    ///
    /// Returns `None` for space and control characters; callers emit no
    /// geometry for those. The mapping is pure: the same character under the
    /// same grid always yields the same rectangle.
    pub fn glyph_uv(&self, c: char) -> Option<Rect> {
        let code = c as u32;
        if code < FIRST_VISIBLE {
            return None;
        }

        let index = code - (FIRST_VISIBLE - 1);
        let col = index % self.cols;
        let row = index / self.cols;

        let u = col as f32 / self.cols as f32;
        let v = row as f32 / self.rows as f32;
        let w = 1.0 / (self.cols as f32 * 2.0);
        let h = 1.0 / self.rows as f32;

        Some(Rect::new(u, v, w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_yields_no_geometry() {
        assert!(AtlasGrid::DEFAULT.glyph_uv(' ').is_none());
    }

    #[test]
    fn control_characters_yield_no_geometry() {
        assert!(AtlasGrid::DEFAULT.glyph_uv('\n').is_none());
        assert!(AtlasGrid::DEFAULT.glyph_uv('\t').is_none());
    }

    #[test]
    fn bang_maps_to_second_cell_of_first_row() {
        // '!' has index 1, so it sits one cell pitch into row 0.
        let uv = AtlasGrid::DEFAULT.glyph_uv('!').unwrap();
        assert_eq!(uv, Rect::new(1.0 / 16.0, 0.0, 1.0 / 32.0, 1.0 / 8.0));
    }

    #[test]
    fn row_wraps_at_grid_width() {
        // '0' is code 48; index 16 wraps to column 0 of row 1.
        let uv = AtlasGrid::DEFAULT.glyph_uv('0').unwrap();
        assert_eq!(uv, Rect::new(0.0, 1.0 / 8.0, 1.0 / 32.0, 1.0 / 8.0));
    }

    #[test]
    fn mapping_is_deterministic() {
        let grid = AtlasGrid::new(16, 8);
        assert_eq!(grid.glyph_uv('Q'), grid.glyph_uv('Q'));
    }

    #[test]
    fn rect_size_reflects_half_cell_width() {
        let grid = AtlasGrid::new(8, 4);
        let uv = grid.glyph_uv('A').unwrap();
        assert_eq!(uv.size.x, 1.0 / 16.0);
        assert_eq!(uv.size.y, 1.0 / 4.0);
    }
}
