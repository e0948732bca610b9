use wgpu::util::DeviceExt;
use wgpu::{BindGroup, Buffer, Device, Queue, RenderPipeline, Texture, TextureFormat};

use super::error::{PresenterError, Result};
use super::pixel_format::TEXEL_SIZE;

/// Full-viewport quad in clip space, triangle-strip order
pub const QUAD_POSITIONS: [[f32; 2]; 4] = [[-1.0, 1.0], [-1.0, -1.0], [1.0, 1.0], [1.0, -1.0]];

/// Texture coordinates matching `QUAD_POSITIONS`; v = 0 is the first buffer row
pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const UV_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];

/// Texture format for the uploaded frame.
///
/// Matches the surface's encoding so bytes reach the screen unchanged:
/// an sRGB surface re-encodes what an sRGB texture decoded.
pub fn frame_texture_format(surface_format: TextureFormat) -> TextureFormat {
    if surface_format.is_srgb() {
        TextureFormat::Rgba8UnormSrgb
    } else {
        TextureFormat::Rgba8Unorm
    }
}

/// Fixed GPU objects for drawing one texture over the whole viewport
pub struct BlitPipeline {
    pipeline: RenderPipeline,
    bind_group: BindGroup,
    texture: Texture,
    position_buffer: Buffer,
    uv_buffer: Buffer,
    width: u32,
    height: u32,
}

impl BlitPipeline {
    pub fn new(device: &Device, width: u32, height: u32, surface_format: TextureFormat) -> Self {
        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Blit Quad Positions"),
            contents: bytemuck::cast_slice(&QUAD_POSITIONS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uv_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Blit Quad UVs"),
            contents: bytemuck::cast_slice(&QUAD_UVS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Blit Frame Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: frame_texture_format(surface_format),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Nearest in every direction keeps pixel edges crisp when scaled
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Blit Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Blit Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Blit Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline = Self::create_render_pipeline(device, &bind_group_layout, surface_format);

        Self {
            pipeline,
            bind_group,
            texture,
            position_buffer,
            uv_buffer,
            width,
            height,
        }
    }

    /// Replace the whole texture with `texels` (RGBA8, no row padding)
    pub fn upload(&self, queue: &Queue, texels: &[u8]) -> Result<()> {
        let expected = self.width as usize * self.height as usize * TEXEL_SIZE;
        if texels.len() != expected {
            return Err(PresenterError::BufferSize {
                expected,
                actual: texels.len(),
            });
        }

        queue.write_texture(
            self.texture.as_image_copy(),
            texels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(TEXEL_SIZE as u32 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );

        Ok(())
    }

    /// Record a pass that clears `target` and, if `draw_quad`, draws the frame texture
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView, draw_quad: bool) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Blit Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if draw_quad {
            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.position_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.uv_buffer.slice(..));
            render_pass.draw(0..QUAD_POSITIONS.len() as u32, 0..1);
        }
    }

    fn create_render_pipeline(
        device: &Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        surface_format: TextureFormat,
    ) -> RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../blit.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit Pipeline Layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_stride = std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress;

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Blit Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: vertex_stride,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &POSITION_ATTRIBUTES,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: vertex_stride,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &UV_ATTRIBUTES,
                    },
                ],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }
}

impl Drop for BlitPipeline {
    fn drop(&mut self) {
        log::debug!("releasing blit texture and quad buffers");
        self.texture.destroy();
        self.position_buffer.destroy();
        self.uv_buffer.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_covers_clip_space() {
        let xs: Vec<f32> = QUAD_POSITIONS.iter().map(|p| p[0]).collect();
        let ys: Vec<f32> = QUAD_POSITIONS.iter().map(|p| p[1]).collect();
        assert!(xs.contains(&-1.0) && xs.contains(&1.0));
        assert!(ys.contains(&-1.0) && ys.contains(&1.0));
    }

    #[test]
    fn first_buffer_row_maps_to_top_edge() {
        for (pos, uv) in QUAD_POSITIONS.iter().zip(QUAD_UVS.iter()) {
            // Clip-space y = 1 is the top of the viewport
            assert_eq!(pos[1] == 1.0, uv[1] == 0.0);
            assert_eq!(pos[0] == -1.0, uv[0] == 0.0);
        }
    }

    #[test]
    fn vertex_data_is_tightly_packed() {
        let bytes: &[u8] = bytemuck::cast_slice(&QUAD_POSITIONS);
        assert_eq!(bytes.len(), 4 * 2 * 4);
    }

    #[test]
    fn texture_format_follows_surface_encoding() {
        assert_eq!(frame_texture_format(TextureFormat::Bgra8UnormSrgb), TextureFormat::Rgba8UnormSrgb);
        assert_eq!(frame_texture_format(TextureFormat::Bgra8Unorm), TextureFormat::Rgba8Unorm);
    }
}
