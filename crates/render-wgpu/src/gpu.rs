use crate::shaders::ShaderLibrary;
use astro_mesh::{LightVertex, Mesh, Vertex};
use astro_render::{FrameTransforms, ObjectTransforms};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ShipUniforms {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    light_pos: [f32; 4],
    light_color: [f32; 4],
}

impl ShipUniforms {
    fn new(t: &ObjectTransforms, light_pos: Vec3, light_color: Vec3) -> Self {
        Self {
            model: t.model.to_cols_array_2d(),
            view: t.view.to_cols_array_2d(),
            projection: t.projection.to_cols_array_2d(),
            light_pos: light_pos.extend(1.0).to_array(),
            light_color: light_color.extend(1.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LightUniforms {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    color: [f32; 4],
}

impl LightUniforms {
    fn new(t: &ObjectTransforms, color: Vec3) -> Self {
        Self {
            model: t.model.to_cols_array_2d(),
            view: t.view.to_cols_array_2d(),
            projection: t.projection.to_cols_array_2d(),
            color: color.extend(1.0).to_array(),
        }
    }
}

/// One uniform buffer plus the bind group exposing it at `@group(0) @binding(0)`.
struct UniformSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    layout: wgpu::BindGroupLayout,
}

impl UniformSlot {
    fn new<T: Pod>(device: &wgpu::Device, label: &str, initial: &T) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(initial),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group,
            layout,
        }
    }
}

/// Compile a WGSL module, logging (not failing on) validation errors.
fn create_shader(device: &wgpu::Device, label: &str, source: &str) -> wgpu::ShaderModule {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        tracing::error!("{label} failed to compile:\n{err}");
    }
    module
}

struct PipelineDesc<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    vs_entry: &'a str,
    fs_entry: &'a str,
    vertex_layout: wgpu::VertexBufferLayout<'a>,
    uniforms: &'a wgpu::BindGroupLayout,
}

fn create_pipeline(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    desc: PipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: &[desc.uniforms],
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some(desc.vs_entry),
            compilation_options: Default::default(),
            buffers: &[desc.vertex_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some(desc.fs_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    });

    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        tracing::error!("{} failed to link:\n{err}", desc.label);
    }
    pipeline
}

/// wgpu renderer for the ship and the light indicator.
pub struct WgpuRenderer {
    ship_pipeline: wgpu::RenderPipeline,
    light_pipeline: wgpu::RenderPipeline,
    ship_uniforms: UniformSlot,
    light_uniforms: UniformSlot,
    ship_vertex_buffer: wgpu::Buffer,
    ship_vertex_count: u32,
    light_vertex_buffer: wgpu::Buffer,
    light_index_buffer: wgpu::Buffer,
    light_index_count: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        (width, height): (u32, u32),
        shaders: &ShaderLibrary,
        ship: &Mesh<Vertex>,
        light: &Mesh<LightVertex>,
    ) -> Self {
        let identity = ObjectTransforms {
            model: glam::Mat4::IDENTITY,
            view: glam::Mat4::IDENTITY,
            projection: glam::Mat4::IDENTITY,
        };
        let ship_uniforms = UniformSlot::new(
            device,
            "ship_uniforms",
            &ShipUniforms::new(&identity, Vec3::ZERO, Vec3::ONE),
        );
        let light_uniforms = UniformSlot::new(
            device,
            "light_uniforms",
            &LightUniforms::new(&identity, Vec3::ONE),
        );

        // Ship pipeline: position, color, normal
        let ship_shader = create_shader(device, "ship_shader", &shaders.ship);
        let ship_pipeline = create_pipeline(
            device,
            surface_format,
            PipelineDesc {
                label: "ship_pipeline",
                shader: &ship_shader,
                vs_entry: "vs_main",
                fs_entry: "fs_main",
                vertex_layout: wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x3,
                    ],
                },
                uniforms: &ship_uniforms.layout,
            },
        );

        // Light pipeline: position only
        let light_shader = create_shader(device, "light_shader", &shaders.light);
        let light_pipeline = create_pipeline(
            device,
            surface_format,
            PipelineDesc {
                label: "light_pipeline",
                shader: &light_shader,
                vs_entry: "vs_light",
                fs_entry: "fs_light",
                vertex_layout: wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LightVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                },
                uniforms: &light_uniforms.layout,
            },
        );

        let ship_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ship_vertex_buffer"),
            contents: bytemuck::cast_slice(ship.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let light_indices = light.indices().unwrap_or_default();
        let light_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("light_vertex_buffer"),
            contents: bytemuck::cast_slice(light.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let light_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("light_index_buffer"),
            contents: bytemuck::cast_slice(light_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        tracing::debug!(
            ship_vertices = ship.vertex_count(),
            light_indices = light_indices.len(),
            "uploaded meshes"
        );

        Self {
            ship_pipeline,
            light_pipeline,
            ship_uniforms,
            light_uniforms,
            ship_vertex_buffer,
            ship_vertex_count: ship.vertex_count(),
            light_vertex_buffer,
            light_index_buffer,
            light_index_count: light_indices.len() as u32,
            depth_texture: Self::create_depth_texture(device, width, height),
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame: the lit ship, then the light cube.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &FrameTransforms,
    ) {
        queue.write_buffer(
            &self.ship_uniforms.buffer,
            0,
            bytemuck::bytes_of(&ShipUniforms::new(
                &frame.ship,
                frame.light_position,
                frame.light_color,
            )),
        );
        queue.write_buffer(
            &self.light_uniforms.buffer,
            0,
            bytemuck::bytes_of(&LightUniforms::new(&frame.light, frame.light_color)),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.ship_pipeline);
            pass.set_bind_group(0, &self.ship_uniforms.bind_group, &[]);
            pass.set_vertex_buffer(0, self.ship_vertex_buffer.slice(..));
            pass.draw(0..self.ship_vertex_count, 0..1);

            if self.light_index_count > 0 {
                pass.set_pipeline(&self.light_pipeline);
                pass.set_bind_group(0, &self.light_uniforms.bind_group, &[]);
                pass.set_vertex_buffer(0, self.light_vertex_buffer.slice(..));
                pass.set_index_buffer(self.light_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.light_index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_structs_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<ShipUniforms>(), 3 * 64 + 2 * 16);
        assert_eq!(std::mem::size_of::<LightUniforms>(), 3 * 64 + 16);
        assert_eq!(std::mem::size_of::<ShipUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<LightUniforms>() % 16, 0);
    }

    #[test]
    fn ship_uniforms_pack_light_as_points() {
        let t = ObjectTransforms {
            model: glam::Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            view: glam::Mat4::IDENTITY,
            projection: glam::Mat4::IDENTITY,
        };
        let u = ShipUniforms::new(&t, Vec3::new(0.0, 5.0, -20.0), Vec3::ONE);
        assert_eq!(u.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(u.light_pos, [0.0, 5.0, -20.0, 1.0]);
        assert_eq!(u.light_color, [1.0, 1.0, 1.0, 1.0]);
    }
}
