use std::sync::Arc;
use wgpu::{Adapter, Device, DeviceDescriptor, Features, Instance, Limits, Queue, Surface};
use winit::window::Window;

use super::error::{PresenterError, Result};

/// Device and queue driving one window surface.
///
/// Each presenter owns its own context; nothing here is shared between
/// windows.
pub struct GpuContext {
    adapter: Adapter,
    device: Device,
    queue: Queue,
}

impl GpuContext {
    /// Create a surface for `window` and a device compatible with it
    pub async fn for_window(window: Arc<Window>) -> Result<(Self, Surface<'static>)> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let info = adapter.get_info();
        log::info!("using {} ({:?})", info.name, info.backend);

        Ok((Self { adapter, device, queue }, surface))
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Reject sizes the device cannot allocate as a 2D texture or surface
    pub fn check_texture_size(&self, width: u32, height: u32) -> Result<()> {
        fits_texture_limits(&self.device.limits(), width, height)
    }

    /// Surface configuration for a fixed-size blit target
    pub fn surface_config(
        &self,
        surface: &Surface<'_>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> wgpu::SurfaceConfiguration {
        let caps = surface.get_capabilities(&self.adapter);

        // Linear formats keep uploaded bytes untouched on the way to the screen
        let format = caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .or_else(|| caps.formats.first().copied())
            .unwrap_or(wgpu::TextureFormat::Bgra8Unorm);

        let alpha_mode = if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::Opaque) {
            wgpu::CompositeAlphaMode::Opaque
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: if vsync {
                wgpu::PresentMode::Fifo
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    async fn request_adapter(instance: &Instance, surface: &Surface<'_>) -> Result<Adapter> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await?;
        Ok(adapter)
    }

    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue)> {
        let limits = Limits::downlevel_defaults().using_resolution(adapter.limits());

        let pair = adapter
            .request_device(&DeviceDescriptor {
                label: Some("Blit Device"),
                required_features: Features::empty(),
                required_limits: limits,
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await?;
        Ok(pair)
    }
}

fn fits_texture_limits(limits: &Limits, width: u32, height: u32) -> Result<()> {
    let max = limits.max_texture_dimension_2d;
    if width > max || height > max {
        return Err(PresenterError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_within_limits_pass() {
        let limits = Limits::downlevel_defaults();
        let max = limits.max_texture_dimension_2d;

        assert!(fits_texture_limits(&limits, 640, 480).is_ok());
        assert!(fits_texture_limits(&limits, max, max).is_ok());
    }

    #[test]
    fn sizes_above_limits_rejected() {
        let limits = Limits::downlevel_defaults();
        let max = limits.max_texture_dimension_2d;

        for (width, height) in [(max + 1, 16), (16, max + 1)] {
            let result = fits_texture_limits(&limits, width, height);
            assert!(matches!(
                result,
                Err(PresenterError::InvalidDimensions { width: w, height: h }) if (w, h) == (width, height)
            ));
        }
    }
}
