use anyhow::Result;
use std::mem;
use support::{load_shader, run, AppConfig, Application, Geometry, Renderer};
use wgpu::{vertex_attr_array, Device, RenderPass, RenderPipeline, TextureFormat, VertexAttribute};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
}

impl Vertex {
    pub fn vertex_attributes() -> Vec<VertexAttribute> {
        vertex_attr_array![0 => Float32x3].to_vec()
    }

    pub fn description<'a>(attributes: &'a [VertexAttribute]) -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

const VERTICES: [Vertex; 3] = [
    Vertex {
        position: [0.0, 0.5, 0.0],
    },
    Vertex {
        position: [0.45, -0.5, 0.0],
    },
    Vertex {
        position: [-0.45, -0.5, 0.0],
    },
];

const VERTEX_SHADER_PATH: &str = "VertexShader.cso";
const PIXEL_SHADER_PATH: &str = "PixelShader.cso";

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 1.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

struct Scene {
    pub geometry: Geometry,
    pub pipeline: RenderPipeline,
}

impl Scene {
    pub fn new(device: &Device, surface_format: TextureFormat) -> Result<Self> {
        let geometry = Geometry::new(device, &VERTICES);
        let pipeline = Self::create_pipeline(device, surface_format)?;

        Ok(Self { geometry, pipeline })
    }

    pub fn render<'rpass>(&'rpass self, renderpass: &mut RenderPass<'rpass>) {
        renderpass.set_pipeline(&self.pipeline);
        renderpass.set_vertex_buffer(0, self.geometry.slice());
        renderpass.draw(0..self.geometry.vertex_count(), 0..1);
    }

    fn create_pipeline(device: &Device, surface_format: TextureFormat) -> Result<RenderPipeline> {
        let vertex_shader = load_shader(device, VERTEX_SHADER_PATH)?;
        let pixel_shader = load_shader(device, PIXEL_SHADER_PATH)?;

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        Ok(
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: None,
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &vertex_shader,
                    entry_point: "main",
                    buffers: &[Vertex::description(&Vertex::vertex_attributes())],
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Cw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                    unclipped_depth: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                fragment: Some(wgpu::FragmentState {
                    module: &pixel_shader,
                    entry_point: "main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                multiview: None,
            }),
        )
    }
}

#[derive(Default)]
struct App {
    scene: Option<Scene>,
}

impl Application for App {
    fn initialize(&mut self, renderer: &mut Renderer) -> Result<()> {
        self.scene = Some(Scene::new(&renderer.device, renderer.config.format)?);
        Ok(())
    }

    fn render(
        &mut self,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
    ) -> Result<()> {
        let mut renderpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: true,
                },
            })],
            depth_stencil_attachment: None,
        });

        if let Some(scene) = self.scene.as_ref() {
            scene.render(&mut renderpass);
        }

        Ok(())
    }
}

fn main() -> Result<()> {
    run(
        App::default(),
        AppConfig {
            title: "Output Window".to_string(),
            width: 800,
            height: 600,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_has_exactly_three_vertices() {
        assert_eq!(VERTICES.len(), 3);
        assert_eq!(VERTICES[0].position, [0.0, 0.5, 0.0]);
        assert_eq!(VERTICES[1].position, [0.45, -0.5, 0.0]);
        assert_eq!(VERTICES[2].position, [-0.45, -0.5, 0.0]);
    }

    #[test]
    fn test_vertex_layout_matches_shader_abi() {
        let attributes = Vertex::vertex_attributes();
        let description = Vertex::description(&attributes);

        assert_eq!(description.array_stride, 12);
        assert_eq!(description.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(description.attributes.len(), 1);
        assert_eq!(description.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(description.attributes[0].offset, 0);
        assert_eq!(description.attributes[0].shader_location, 0);
    }

    #[test]
    fn test_vertex_bytes_are_tightly_packed() {
        let bytes: &[u8] = bytemuck::cast_slice(&VERTICES);
        assert_eq!(bytes.len(), 3 * 12);
    }

    #[test]
    fn test_clear_color_is_magenta() {
        assert_eq!(CLEAR_COLOR.r, 1.0);
        assert_eq!(CLEAR_COLOR.g, 0.0);
        assert_eq!(CLEAR_COLOR.b, 1.0);
        assert_eq!(CLEAR_COLOR.a, 1.0);
    }
}
