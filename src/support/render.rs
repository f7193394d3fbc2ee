use crate::InitError;
use anyhow::Result;
use wgpu::{
    CommandEncoder, Device, Queue, Surface, SurfaceConfiguration, TextureView,
    TextureViewDescriptor,
};

pub struct Renderer {
    pub surface: Surface,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
    frame_count: u64,
}

impl Renderer {
    pub fn new<W>(window_handle: &W, width: u32, height: u32) -> Result<Self, InitError>
    where
        W: raw_window_handle::HasRawWindowHandle + raw_window_handle::HasRawDisplayHandle,
    {
        pollster::block_on(Renderer::new_async(window_handle, width, height))
    }

    /// Acquires the next back buffer, hands a view over it to `action` along
    /// with a command encoder, then submits the recorded commands and
    /// presents. Presentation waits on vertical sync (`PresentMode::Fifo`).
    pub fn render_frame(
        &mut self,
        mut action: impl FnMut(&TextureView, &mut CommandEncoder) -> Result<()>,
    ) -> Result<()> {
        let surface_texture = self.surface.get_current_texture()?;

        let view = surface_texture
            .texture
            .create_view(&TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        action(&view, &mut encoder)?;

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        self.frame_count += 1;
        log::trace!("Presented frame {}", self.frame_count);

        Ok(())
    }

    async fn new_async<W>(window_handle: &W, width: u32, height: u32) -> Result<Self, InitError>
    where
        W: raw_window_handle::HasRawWindowHandle + raw_window_handle::HasRawDisplayHandle,
    {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: Self::backends(),
            ..Default::default()
        });

        let surface = unsafe { instance.create_surface(&window_handle) }?;

        let adapter = Self::create_adapter(&instance, &surface)
            .await
            .ok_or(InitError::AdapterUnavailable)?;

        let (device, queue) = Self::request_device(&adapter).await?;

        let surface_capabilities = surface.get_capabilities(&adapter);

        // Fixed output format, falling back to whatever the surface offers
        let surface_format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|format| *format == wgpu::TextureFormat::Rgba8Unorm)
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            frame_count: 0,
        })
    }

    fn backends() -> wgpu::Backends {
        wgpu::util::backend_bits_from_env().unwrap_or_else(wgpu::Backends::all)
    }

    async fn create_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface,
    ) -> Option<wgpu::Adapter> {
        // First hardware adapter the backend offers; no software fallback
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(Device, Queue), InitError> {
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::default(),
                    label: Some("Render Device"),
                },
                None,
            )
            .await?;

        Ok((device, queue))
    }
}
