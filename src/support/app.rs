use anyhow::Result;
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use crate::Renderer;

pub trait Application {
    fn initialize(&mut self, _renderer: &mut Renderer) -> Result<()> {
        Ok(())
    }

    fn render(
        &mut self,
        _view: &wgpu::TextureView,
        _encoder: &mut wgpu::CommandEncoder,
    ) -> Result<()> {
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }
}

pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Whether the frame loop should keep going. Starts `Running`, flips to
/// `Stopped` exactly once when the window reports a close, and stays there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

impl RunState {
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn after_window_event(self, event: &WindowEvent) -> Self {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => Self::Stopped,
            _ => self,
        }
    }
}

pub fn run(mut application: impl Application + 'static, config: AppConfig) -> Result<()> {
    env_logger::init();
    log::info!("App started");

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_resizable(false)
        .build(&event_loop)?;

    let mut renderer = Renderer::new(&window, config.width, config.height)?;

    application.initialize(&mut renderer)?;

    let mut state = RunState::Running;

    event_loop.run(move |event, _, control_flow| {
        // The surface targets the window, so it must live as long as the loop
        let _ = &window;
        if let Err(error) = run_loop(
            &mut application,
            &mut renderer,
            &mut state,
            &event,
            control_flow,
        ) {
            log::error!("Application error: {}", error);
        }
    });
}

fn run_loop(
    application: &mut (impl Application + 'static),
    renderer: &mut Renderer,
    state: &mut RunState,
    event: &Event<()>,
    control_flow: &mut ControlFlow,
) -> Result<()> {
    match event {
        Event::MainEventsCleared => {
            if state.is_running() {
                renderer.render_frame(|view, encoder| application.render(view, encoder))?;
            }
        }
        Event::WindowEvent { event, .. } => {
            *state = state.after_window_event(event);
            if !state.is_running() {
                *control_flow = ControlFlow::Exit;
            }
        }
        Event::LoopDestroyed => {
            application.cleanup()?;
            log::info!("App stopped");
        }
        _ => {}
    }

    Ok(())
}
