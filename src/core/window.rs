use std::sync::Arc;
use std::time::Duration;
use wgpu::{Surface, SurfaceConfiguration};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Icon, Window, WindowAttributes, WindowId};

use super::backend::{PresentBackend, PumpOutcome};
use super::blit_pipeline::BlitPipeline;
use super::error::{PresenterError, Result};
use super::gpu_context::GpuContext;
use super::icon::IconImage;
use super::input_adapter::translate_window_event;
use crate::config::PresenterConfig;

/// Pumps allowed before the window system must have resumed us
const MAX_STARTUP_PUMPS: usize = 64;

/// Receives winit callbacks between pumps
struct EventCollector {
    pending: Option<WindowAttributes>,
    window: Option<Arc<Window>>,
    startup_error: Option<String>,
    outcome: PumpOutcome,
}

impl EventCollector {
    fn new(attributes: WindowAttributes) -> Self {
        Self {
            pending: Some(attributes),
            window: None,
            startup_error: None,
            outcome: PumpOutcome::default(),
        }
    }
}

impl ApplicationHandler for EventCollector {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(attributes) = self.pending.take() else {
            return;
        };

        match event_loop.create_window(attributes) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => self.startup_error = Some(e.to_string()),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.outcome.close_requested = true,
            other => {
                if let Some(input) = translate_window_event(&other) {
                    self.outcome.events.push(input);
                }
            }
        }
    }
}

/// Presents through a winit window and a wgpu surface.
///
/// Field order is drop order: GPU objects go before the surface, the
/// surface before the window, the window before its event loop.
pub struct WinitBackend {
    pipeline: BlitPipeline,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    gpu: GpuContext,
    window: Arc<Window>,
    collector: EventCollector,
    event_loop: EventLoop<()>,
}

impl WinitBackend {
    /// Open a hidden, fixed-size window and build the blit pipeline for it
    pub fn new(config: &PresenterConfig) -> Result<Self> {
        let mut event_loop = EventLoop::new()?;

        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(false)
            .with_visible(false);

        let mut collector = EventCollector::new(attributes);
        let window = Self::await_window(&mut event_loop, &mut collector)?;

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (config.width, config.height)
        } else {
            (size.width, size.height)
        };

        let (gpu, surface) = pollster::block_on(GpuContext::for_window(window.clone()))?;
        gpu.check_texture_size(config.width, config.height)?;
        gpu.check_texture_size(width, height)?;
        let surface_config = gpu.surface_config(&surface, width, height, config.vsync);
        surface.configure(gpu.device(), &surface_config);

        let pipeline = BlitPipeline::new(gpu.device(), config.width, config.height, surface_config.format);

        log::debug!(
            "surface {}x{} {:?} {:?}",
            width,
            height,
            surface_config.format,
            surface_config.present_mode
        );

        Ok(Self {
            pipeline,
            surface,
            surface_config,
            gpu,
            window,
            collector,
            event_loop,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Pump until `resumed` has created the window
    fn await_window(event_loop: &mut EventLoop<()>, collector: &mut EventCollector) -> Result<Arc<Window>> {
        for _ in 0..MAX_STARTUP_PUMPS {
            if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), collector) {
                return Err(PresenterError::Window(format!(
                    "event loop exited during startup (code {code})"
                )));
            }

            if let Some(err) = collector.startup_error.take() {
                return Err(PresenterError::Window(err));
            }

            if let Some(window) = &collector.window {
                return Ok(window.clone());
            }
        }

        Err(PresenterError::Window(
            "window system never resumed the event loop".to_string(),
        ))
    }

    /// Next swapchain image, or `None` when this frame should be skipped.
    ///
    /// A stale surface is reconfigured once, unless the window has no area.
    fn acquire(&self) -> Result<Option<wgpu::SurfaceTexture>> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if !has_area(self.window.inner_size()) {
                    log::debug!("surface stale while window has no area, skipping frame");
                    return Ok(None);
                }
                log::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(self.gpu.device(), &self.surface_config);
                Ok(Some(self.surface.get_current_texture()?))
            }
            Err(e) if skips_frame(&e) => {
                log::warn!("skipping frame: {e}");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn submit(&self, draw_quad: bool) -> Result<()> {
        let Some(frame) = self.acquire()? else {
            return Ok(());
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Blit Encoder"),
            });

        self.pipeline.encode(&mut encoder, &view, draw_quad);

        self.gpu.queue().submit(Some(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();

        Ok(())
    }
}

fn has_area(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

/// Transient acquire failures: drop this frame, keep presenting
fn skips_frame(err: &wgpu::SurfaceError) -> bool {
    matches!(err, wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other)
}

impl PresentBackend for WinitBackend {
    fn present_blank(&mut self) -> Result<()> {
        self.submit(false)
    }

    fn upload(&mut self, texels: &[u8]) -> Result<()> {
        self.pipeline.upload(self.gpu.queue(), texels)
    }

    fn render(&mut self) -> Result<()> {
        self.submit(true)
    }

    fn pump_events(&mut self) -> PumpOutcome {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.collector);

        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited (code {code})");
            self.collector.outcome.close_requested = true;
        }

        std::mem::take(&mut self.collector.outcome)
    }

    fn show(&mut self) {
        self.window.set_visible(true);
    }

    fn set_icon(&mut self, icon: IconImage) -> Result<()> {
        let icon = Icon::from_rgba(icon.rgba, icon.width, icon.height)?;
        self.window.set_window_icon(Some(icon));
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.window.set_cursor_visible(visible);
    }
}

impl Drop for WinitBackend {
    fn drop(&mut self) {
        log::debug!("closing window {:?}", self.window.id());
    }
}
