// src/rendering_lib/renderer.rs

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::Vertex;
use edge_split_sketch::sketch::StyledTriangle;

const FILL_VERTICES_PER_TRIANGLE: usize = 3;
const STROKE_VERTICES_PER_TRIANGLE: usize = 6;
const VERTICES_PER_TRIANGLE: usize = FILL_VERTICES_PER_TRIANGLE + STROKE_VERTICES_PER_TRIANGLE;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ScreenDimensionsUniform {
    width: f32,
    height: f32,
    _padding1: f32,
    _padding2: f32,
}

/// Draws a frame of styled triangles, each filled and then outlined, in frame order.
///
/// All fill vertices go first in the vertex buffer, followed by the stroke vertices,
/// so one buffer binding serves both pipelines.
pub struct Renderer {
    fill_pipeline: wgpu::RenderPipeline,
    stroke_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,

    frame_vertices: Vec<Vertex>,

    screen_uniform_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader_module: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    label: &str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader_module,
            entry_point: "vs_main",
            buffers: &[Vertex::desc()],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader_module,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sketch Vertex Buffer"),
        size: (vertex_capacity.max(VERTICES_PER_TRIANGLE) * std::mem::size_of::<Vertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Fill vertices for every triangle, then stroke vertices (three line segments each).
fn frame_vertices_into(frame: &[StyledTriangle], out: &mut Vec<Vertex>) {
    out.clear();
    out.reserve(frame.len() * VERTICES_PER_TRIANGLE);

    for styled in frame {
        for point in styled.triangle.vertices() {
            out.push(Vertex::from_point(point, styled.fill));
        }
    }
    for styled in frame {
        let [b, c, a] = styled.triangle.vertices();
        for point in [b, c, c, a, a, b] {
            out.push(Vertex::from_point(point, styled.stroke));
        }
    }
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_source: &str,
        initial_screen_width: f32,
        initial_screen_height: f32,
        initial_triangle_capacity: usize,
    ) -> Self {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sketch Shader Module"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let screen_uniform_data = ScreenDimensionsUniform {
            width: initial_screen_width,
            height: initial_screen_height,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        let screen_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Screen Dimensions Uniform Buffer"),
            contents: bytemuck::bytes_of(&screen_uniform_data),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let screen_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("screen_dimensions_bind_group_layout"),
        });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &screen_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_uniform_buffer.as_entire_binding(),
            }],
            label: Some("screen_dimensions_bind_group"),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Sketch Pipeline Layout"),
                bind_group_layouts: &[&screen_bind_group_layout],
                push_constant_ranges: &[],
            });

        let fill_pipeline = create_pipeline(
            device,
            &render_pipeline_layout,
            &shader_module,
            surface_format,
            wgpu::PrimitiveTopology::TriangleList,
            "Fill Pipeline",
        );
        // Hardware lines are 1px; the outline does not scale with the window.
        let stroke_pipeline = create_pipeline(
            device,
            &render_pipeline_layout,
            &shader_module,
            surface_format,
            wgpu::PrimitiveTopology::LineList,
            "Stroke Pipeline",
        );

        let vertex_capacity = initial_triangle_capacity * VERTICES_PER_TRIANGLE;

        Self {
            fill_pipeline,
            stroke_pipeline,
            vertex_buffer: create_vertex_buffer(device, vertex_capacity),
            frame_vertices: Vec::with_capacity(vertex_capacity),
            screen_uniform_buffer,
            screen_bind_group,
        }
    }

    pub fn render_frame(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        frame: &[StyledTriangle],
        screen_width: f32,
        screen_height: f32,
        clear_color: wgpu::Color,
    ) {
        let screen_uniform_data = ScreenDimensionsUniform {
            width: screen_width,
            height: screen_height,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        queue.write_buffer(&self.screen_uniform_buffer, 0, bytemuck::bytes_of(&screen_uniform_data));

        frame_vertices_into(frame, &mut self.frame_vertices);

        let frame_bytes = (self.frame_vertices.len() * std::mem::size_of::<Vertex>()) as u64;
        if frame_bytes > self.vertex_buffer.size() {
            log::debug!(
                "Growing vertex buffer from {} to {} bytes",
                self.vertex_buffer.size(),
                frame_bytes
            );
            self.vertex_buffer = create_vertex_buffer(device, self.frame_vertices.len().next_power_of_two());
        }
        if !self.frame_vertices.is_empty() {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.frame_vertices));
        }

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sketch Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: output_view,
                    resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Clear(clear_color), store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
            });

            if frame.is_empty() {
                return;
            }

            render_pass.set_bind_group(0, &self.screen_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..frame_bytes));

            // Each triangle's outline is drawn before the next fill covers it.
            let stroke_base = (frame.len() * FILL_VERTICES_PER_TRIANGLE) as u32;
            for i in 0..frame.len() as u32 {
                let fill_start = i * FILL_VERTICES_PER_TRIANGLE as u32;
                render_pass.set_pipeline(&self.fill_pipeline);
                render_pass.draw(fill_start..fill_start + FILL_VERTICES_PER_TRIANGLE as u32, 0..1);

                let stroke_start = stroke_base + i * STROKE_VERTICES_PER_TRIANGLE as u32;
                render_pass.set_pipeline(&self.stroke_pipeline);
                render_pass.draw(stroke_start..stroke_start + STROKE_VERTICES_PER_TRIANGLE as u32, 0..1);
            }
        }
    }
}
