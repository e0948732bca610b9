use std::path::PathBuf;
use thiserror::Error;

use super::pixel_format::PixelFormat;

/// Errors raised while building or driving a `Presenter`.
#[derive(Debug, Error)]
pub enum PresenterError {
    /// Only RGB and RGBA buffers can be uploaded.
    #[error("unsupported pixel format {0:?}")]
    UnsupportedFormat(PixelFormat),

    #[error("invalid window dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Texel data handed to the backend does not cover the whole texture.
    #[error("texel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(String),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("failed to load icon '{path}': {source}")]
    Icon {
        path: PathBuf,
        #[source]
        source: IconError,
    },

    #[error("icon rejected by the window system: {0}")]
    BadIcon(#[from] winit::window::BadIcon),

    #[error("failed to load config '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// Icon loading failures.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Config file failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PresenterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_message_names_format() {
        let err = PresenterError::UnsupportedFormat(PixelFormat::Grayscale);
        assert_eq!(err.to_string(), "unsupported pixel format Grayscale");
    }

    #[test]
    fn icon_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = PresenterError::Icon {
            path: PathBuf::from("icon.png"),
            source: IconError::Io(io),
        };

        assert!(err.to_string().contains("icon.png"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
