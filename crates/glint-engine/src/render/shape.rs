use crate::coords::Vec2;
use crate::device::GfxBackend;
use crate::paint::Color;

use super::batch::{BatchCapacity, BatchCursors};
use super::layout::{
    index_buffer_size, index_offset, shape_buffer_size, shape_color_offset,
    shape_color_region_base, shape_position_offset, ShapeColor, ShapePosition, INDEX_SIZE,
    SHAPE_VERTEX_FOOTPRINT,
};
use super::straight_alpha_blend;

/// Batch for the flat-colored shape stream.
///
/// The vertex buffer is planar: a position region sized for the full
/// preallocated capacity, followed by a color region. Both regions are bound
/// as separate vertex buffer slots of the same `wgpu::Buffer`.
///
/// Capacities are fixed at construction and never resized; submitting past
/// them is fatal.
pub struct ShapeBatch {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    cursors: BatchCursors,

    /// Element capacity the buffers were allocated for. Offsets into the
    /// planar color region depend on this allocation constant; the per-call
    /// overflow check uses the backend's queried size instead.
    vertex_capacity: u32,
}

impl ShapeBatch {
    pub fn new(backend: &GfxBackend<'_>, vertex_capacity: u32, index_capacity: u32) -> Self {
        let shader = backend.compile_program("glint shape shader", include_str!("shaders/shape.wgsl"));

        let pipeline = backend.checked("create_render_pipeline", |device, _| {
            let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("glint shape pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("glint shape pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[ShapePosition::layout(), ShapeColor::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: backend.surface_format(),
                        blend: Some(straight_alpha_blend()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        });

        let vertex_buffer = backend.create_buffer(
            "glint shape vbo",
            shape_buffer_size(vertex_capacity as u64),
            wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        );
        let index_buffer = backend.create_buffer(
            "glint shape ibo",
            index_buffer_size(index_capacity as u64),
            wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        );

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            cursors: BatchCursors::new(),
            vertex_capacity,
        }
    }

    /// Zeroes the cursors for a new frame.
    pub fn reset(&mut self) {
        self.cursors.reset();
    }

    #[inline]
    pub fn vertex_cursor(&self) -> u32 {
        self.cursors.vertex_cursor()
    }

    #[inline]
    pub fn index_cursor(&self) -> u32 {
        self.cursors.index_cursor()
    }

    /// Submits one arbitrary quad (two triangles over the 0-1-2 / 2-3-0
    /// diagonal split) with a single flat color.
    ///
    /// Overflow is fatal: the stream has no backpressure, dropping geometry
    /// would corrupt the frame, and the buffers cannot grow mid-frame.
    pub fn submit_quad(
        &mut self,
        backend: &GfxBackend<'_>,
        p0: Vec2,
        p1: Vec2,
        p2: Vec2,
        p3: Vec2,
        color: Color,
    ) {
        let capacity = self.query_capacity(backend);
        let slot = match self.cursors.acquire_quad(capacity) {
            Ok(slot) => slot,
            Err(err) => crate::device::fatal("submit_quad", err),
        };

        let positions = [
            ShapePosition { pos: [p0.x, p0.y] },
            ShapePosition { pos: [p1.x, p1.y] },
            ShapePosition { pos: [p2.x, p2.y] },
            ShapePosition { pos: [p3.x, p3.y] },
        ];
        backend.upload_subrange(
            &self.vertex_buffer,
            shape_position_offset(slot.base_vertex as u64),
            bytemuck::cast_slice(&positions),
        );

        let colors = [ShapeColor { color: color.to_array() }; 4];
        backend.upload_subrange(
            &self.vertex_buffer,
            shape_color_offset(self.vertex_capacity as u64, slot.base_vertex as u64),
            bytemuck::cast_slice(&colors),
        );

        backend.upload_subrange(
            &self.index_buffer,
            index_offset(slot.first_index as u64),
            bytemuck::cast_slice(&slot.indices),
        );
    }

    /// Submits an axis-aligned rectangle extending downward from `top_left`.
    pub fn submit_rect(
        &mut self,
        backend: &GfxBackend<'_>,
        top_left: Vec2,
        size: Vec2,
        color: Color,
    ) {
        let [a, b, c, d] = rect_corners(top_left, size);
        self.submit_quad(backend, a, b, c, d, color);
    }

    /// Records this frame's accumulated geometry into `rpass`.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.cursors.index_cursor() == 0 {
            return;
        }

        let color_base = shape_color_region_base(self.vertex_capacity as u64);

        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..color_base));
        rpass.set_vertex_buffer(1, self.vertex_buffer.slice(color_base..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.cursors.index_cursor(), 0, 0..1);
    }

    /// Element capacities derived from the backend's *current* buffer sizes.
    fn query_capacity(&self, backend: &GfxBackend<'_>) -> BatchCapacity {
        let vertex_bytes = backend.query_buffer_capacity(&self.vertex_buffer);
        let index_bytes = backend.query_buffer_capacity(&self.index_buffer);
        BatchCapacity {
            vertices: (vertex_bytes / SHAPE_VERTEX_FOOTPRINT) as u32,
            indices: (index_bytes / INDEX_SIZE) as u32,
        }
    }
}

/// Corner derivation for `submit_rect`: top-left, top-right, bottom-right,
/// bottom-left. Clip space grows upward, so the rect extends toward -y.
pub fn rect_corners(top_left: Vec2, size: Vec2) -> [Vec2; 4] {
    [
        top_left,
        Vec2::new(top_left.x + size.x, top_left.y),
        Vec2::new(top_left.x + size.x, top_left.y - size.y),
        Vec2::new(top_left.x, top_left.y - size.y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_corners_wind_clockwise_from_top_left() {
        let corners = rect_corners(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        assert_eq!(
            corners,
            [
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, -1.0),
                Vec2::new(0.0, -1.0),
            ]
        );
    }

    #[test]
    fn rect_corners_respect_the_origin() {
        let corners = rect_corners(Vec2::new(-0.8, 0.8), Vec2::new(0.8, 0.8));
        assert_eq!(corners[0], Vec2::new(-0.8, 0.8));
        assert_eq!(corners[2], Vec2::new(0.0, 0.0));
    }
}
