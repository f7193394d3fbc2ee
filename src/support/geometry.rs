use wgpu::{
    util::{BufferInitDescriptor, DeviceExt},
    Buffer, Device,
};

/// A device-resident vertex buffer, sized and filled at creation and never
/// written again.
pub struct Geometry {
    pub vertex_buffer: Buffer,
    vertex_count: u32,
}

impl Geometry {
    pub fn new<T: bytemuck::Pod>(device: &Device, vertices: &[T]) -> Self {
        Self {
            vertex_buffer: Self::create_vertex_buffer(device, vertices),
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn slice(&self) -> wgpu::BufferSlice {
        self.vertex_buffer.slice(..)
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    fn create_vertex_buffer(device: &Device, vertices: &[impl bytemuck::Pod]) -> Buffer {
        device.create_buffer_init(&BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        })
    }
}
