use crate::coords::Rect;
use crate::device::GfxBackend;
use crate::paint::Color;
use crate::text::FontAtlas;

use super::batch::{BatchCapacity, BatchCursors};
use super::layout::{
    glyph_buffer_size, glyph_vertex_offset, index_buffer_size, index_offset, GlyphVertex,
    GLYPH_VERTEX_SIZE, INDEX_SIZE,
};
use super::straight_alpha_blend;

/// Batch for the textured glyph stream.
///
/// Vertices are interleaved (`position + uv + color`), so each glyph is one
/// contiguous sub-range write instead of the shape stream's split planar
/// writes. The overflow discipline is identical to [`super::ShapeBatch`]:
/// capacities are queried from the backend per call and a violation is fatal.
pub struct GlyphBatch {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    cursors: BatchCursors,
}

impl GlyphBatch {
    pub fn new(
        backend: &GfxBackend<'_>,
        font: &FontAtlas,
        vertex_capacity: u32,
        index_capacity: u32,
    ) -> Self {
        let shader = backend.compile_program("glint glyph shader", include_str!("shaders/glyph.wgsl"));

        let bind_group_layout = backend.checked("create_bind_group_layout", |device, _| {
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("glint glyph bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            })
        });

        let sampler = backend.checked("create_sampler", |device, _| {
            device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("glint glyph sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            })
        });

        let bind_group = backend.checked("create_bind_group", |device, _| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("glint glyph bind group"),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(font.view()),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            })
        });

        let pipeline = backend.checked("create_render_pipeline", |device, _| {
            let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("glint glyph pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("glint glyph pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[GlyphVertex::layout()],
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
            "glint glyph vbo",
            glyph_buffer_size(vertex_capacity as u64),
            wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        );
        let index_buffer = backend.create_buffer(
            "glint glyph ibo",
            index_buffer_size(index_capacity as u64),
            wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        );

        Self {
            pipeline,
            bind_group,
            vertex_buffer,
            index_buffer,
            cursors: BatchCursors::new(),
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

    /// Submits one glyph quad.
    ///
    /// `screen` extends downward from its top-left origin in clip space;
    /// `uv` extends downward in texture space (+V down). One contiguous
    /// vertex write per glyph.
    pub fn submit_glyph_quad(
        &mut self,
        backend: &GfxBackend<'_>,
        screen: Rect,
        uv: Rect,
        color: Color,
    ) {
        let capacity = self.query_capacity(backend);
        let slot = match self.cursors.acquire_quad(capacity) {
            Ok(slot) => slot,
            Err(err) => crate::device::fatal("submit_glyph_quad", err),
        };

        let col = color.to_array();
        let (sx, sy) = (screen.origin.x, screen.origin.y);
        let (sw, sh) = (screen.size.x, screen.size.y);
        let (u, v) = (uv.origin.x, uv.origin.y);
        let (uw, vh) = (uv.size.x, uv.size.y);

        // Corner order matches the shape stream: tl, tr, br, bl.
        let vertices = [
            GlyphVertex { pos: [sx, sy], uv: [u, v], color: col },
            GlyphVertex { pos: [sx + sw, sy], uv: [u + uw, v], color: col },
            GlyphVertex { pos: [sx + sw, sy - sh], uv: [u + uw, v + vh], color: col },
            GlyphVertex { pos: [sx, sy - sh], uv: [u, v + vh], color: col },
        ];
        backend.upload_subrange(
            &self.vertex_buffer,
            glyph_vertex_offset(slot.base_vertex as u64),
            bytemuck::cast_slice(&vertices),
        );

        backend.upload_subrange(
            &self.index_buffer,
            index_offset(slot.first_index as u64),
            bytemuck::cast_slice(&slot.indices),
        );
    }

    /// Records this frame's accumulated glyphs into `rpass`.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.cursors.index_cursor() == 0 {
            return;
        }

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.cursors.index_cursor(), 0, 0..1);
    }

    fn query_capacity(&self, backend: &GfxBackend<'_>) -> BatchCapacity {
        let vertex_bytes = backend.query_buffer_capacity(&self.vertex_buffer);
        let index_bytes = backend.query_buffer_capacity(&self.index_buffer);
        BatchCapacity {
            vertices: (vertex_bytes / GLYPH_VERTEX_SIZE) as u32,
            indices: (index_bytes / INDEX_SIZE) as u32,
        }
    }
}
