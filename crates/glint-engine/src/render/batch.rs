//! Pure batch bookkeeping: cursors, quad index emission, overflow detection.
//!
//! Nothing in this module touches the GPU. The GPU-facing batches
//! ([`super::ShapeBatch`], [`super::GlyphBatch`]) acquire a [`QuadSlot`] here
//! first and only then issue buffer uploads, so every capacity invariant is
//! enforced before any byte is written.

use thiserror::Error;

/// Vertices and indices per quad: two triangles sharing one diagonal.
pub const QUAD_VERTICES: u32 = 4;
pub const QUAD_INDICES: u32 = 6;

/// Element capacities of one batch, in vertices and indices.
///
/// Derived each call from the backend's queried buffer sizes rather than
/// cached, so external buffer mutation cannot silently invalidate the check.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BatchCapacity {
    pub vertices: u32,
    pub indices: u32,
}

/// Capacity violation for a quad submission.
///
/// A failed acquire leaves the cursors untouched; the caller decides whether
/// the condition is fatal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum OverflowError {
    #[error("vertex buffer overflow: {used} + {needed} vertices exceeds capacity {capacity}")]
    Vertices { used: u32, needed: u32, capacity: u32 },

    #[error("index buffer overflow: {used} + {needed} indices exceeds capacity {capacity}")]
    Indices { used: u32, needed: u32, capacity: u32 },
}

/// Placement of one quad inside a batch's buffers.
///
/// `indices` reference the batch's vertex numbering: for pre-acquire vertex
/// cursor `n` they are `{n, n+1, n+2, n+2, n+3, n}`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QuadSlot {
    /// Vertex cursor value before the acquire; the quad's 4 vertices occupy
    /// `base_vertex .. base_vertex + 4`.
    pub base_vertex: u32,

    /// Index cursor value before the acquire; the quad's 6 indices occupy
    /// `first_index .. first_index + 6`.
    pub first_index: u32,

    /// The six element indices forming the quad's two triangles.
    pub indices: [u32; 6],
}

/// Per-stream vertex/index cursors.
///
/// Cursors count *elements* already written this frame, not bytes; byte
/// offsets are derived by the layout types in [`super::layout`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct BatchCursors {
    vertices: u32,
    indices: u32,
}

impl BatchCursors {
    pub const fn new() -> Self {
        Self { vertices: 0, indices: 0 }
    }

    /// Zeroes both cursors. Called once per frame at clear time; calling it
    /// again is a no-op by construction.
    pub fn reset(&mut self) {
        self.vertices = 0;
        self.indices = 0;
    }

    #[inline]
    pub fn vertex_cursor(&self) -> u32 {
        self.vertices
    }

    #[inline]
    pub fn index_cursor(&self) -> u32 {
        self.indices
    }

    /// Reserves space for one quad.
    ///
    /// On success both cursors advance (+4 vertices, +6 indices) and the
    /// returned slot pins down where the quad's data belongs. On overflow
    /// nothing is mutated.
    pub fn acquire_quad(&mut self, capacity: BatchCapacity) -> Result<QuadSlot, OverflowError> {
        if self.vertices + QUAD_VERTICES > capacity.vertices {
            return Err(OverflowError::Vertices {
                used: self.vertices,
                needed: QUAD_VERTICES,
                capacity: capacity.vertices,
            });
        }
        if self.indices + QUAD_INDICES > capacity.indices {
            return Err(OverflowError::Indices {
                used: self.indices,
                needed: QUAD_INDICES,
                capacity: capacity.indices,
            });
        }

        let n = self.vertices;
        let slot = QuadSlot {
            base_vertex: n,
            first_index: self.indices,
            indices: [n, n + 1, n + 2, n + 2, n + 3, n],
        };

        self.vertices += QUAD_VERTICES;
        self.indices += QUAD_INDICES;

        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: BatchCapacity = BatchCapacity { vertices: 1024, indices: 1024 };

    // ── quad acquisition ──────────────────────────────────────────────────

    #[test]
    fn acquire_advances_cursors_by_4_and_6() {
        let mut cursors = BatchCursors::new();
        cursors.acquire_quad(CAP).unwrap();
        assert_eq!(cursors.vertex_cursor(), 4);
        assert_eq!(cursors.index_cursor(), 6);
    }

    #[test]
    fn emitted_indices_share_the_diagonal() {
        let mut cursors = BatchCursors::new();
        let slot = cursors.acquire_quad(CAP).unwrap();
        assert_eq!(slot.indices, [0, 1, 2, 2, 3, 0]);

        let slot = cursors.acquire_quad(CAP).unwrap();
        assert_eq!(slot.base_vertex, 4);
        assert_eq!(slot.indices, [4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn two_quads_offset_the_second_slot_by_4() {
        // reset(); submit_rect(..); submit_rect(..) end-to-end cursor scenario.
        let mut cursors = BatchCursors::new();
        cursors.reset();
        let first = cursors.acquire_quad(CAP).unwrap();
        let second = cursors.acquire_quad(CAP).unwrap();

        assert_eq!(cursors.vertex_cursor(), 8);
        assert_eq!(cursors.index_cursor(), 12);
        assert_eq!(second.first_index, first.first_index + 6);
        for (a, b) in first.indices.iter().zip(second.indices.iter()) {
            assert_eq!(b - a, 4);
        }
    }

    // ── reset ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_is_idempotent() {
        let mut cursors = BatchCursors::new();
        cursors.acquire_quad(CAP).unwrap();

        cursors.reset();
        let once = cursors;
        cursors.reset();
        assert_eq!(cursors, once);
        assert_eq!(cursors.vertex_cursor(), 0);
        assert_eq!(cursors.index_cursor(), 0);
    }

    // ── overflow ──────────────────────────────────────────────────────────

    #[test]
    fn vertex_overflow_leaves_cursors_untouched() {
        let mut cursors = BatchCursors::new();
        let small = BatchCapacity { vertices: 6, indices: 1024 };

        cursors.acquire_quad(small).unwrap();
        let before = cursors;
        let err = cursors.acquire_quad(small).unwrap_err();

        assert!(matches!(err, OverflowError::Vertices { used: 4, needed: 4, capacity: 6 }));
        assert_eq!(cursors, before);
    }

    #[test]
    fn index_overflow_leaves_cursors_untouched() {
        let mut cursors = BatchCursors::new();
        let small = BatchCapacity { vertices: 1024, indices: 8 };

        cursors.acquire_quad(small).unwrap();
        let before = cursors;
        let err = cursors.acquire_quad(small).unwrap_err();

        assert!(matches!(err, OverflowError::Indices { used: 6, needed: 6, capacity: 8 }));
        assert_eq!(cursors, before);
    }

    #[test]
    fn exact_fit_is_accepted() {
        let mut cursors = BatchCursors::new();
        let exact = BatchCapacity { vertices: 8, indices: 12 };
        cursors.acquire_quad(exact).unwrap();
        cursors.acquire_quad(exact).unwrap();
        assert_eq!(cursors.vertex_cursor(), 8);
        assert_eq!(cursors.index_cursor(), 12);
    }
}
