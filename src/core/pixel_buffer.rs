use super::error::{PresenterError, Result};
use super::pixel_format::{PixelFormat, TEXEL_SIZE};

/// Caller-owned framebuffer - row-major, top row first, no stride padding
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    channels: usize,
    format: PixelFormat,
}

impl PixelBuffer {
    /// Create a zeroed buffer; fails for formats that cannot be uploaded and
    /// for dimensions whose buffer or texture size does not fit in `usize`
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let channels = format.channels()?;
        let size = byte_len(width, height, channels)
            .filter(|_| byte_len(width, height, TEXEL_SIZE).is_some())
            .ok_or(PresenterError::InvalidDimensions { width, height })?;

        Ok(Self {
            pixels: vec![0; size],
            width,
            height,
            channels,
            format,
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable view; the slice length is fixed for the buffer's lifetime
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Set one pixel; `color` supplies as many channels as the format holds.
    /// A shorter `color` writes only its leading channels and keeps the rest.
    /// Out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: &[u8]) {
        if x >= self.width || y >= self.height {
            return;
        }

        let channels = self.channels;
        let idx = (y as usize * self.width as usize + x as usize) * channels;
        let len = channels.min(color.len());
        self.pixels[idx..idx + len].copy_from_slice(&color[..len]);
    }

    /// Fill every pixel with the first `channels()` bytes of `color`.
    /// A `color` shorter than one pixel leaves the buffer untouched.
    pub fn fill(&mut self, color: &[u8]) {
        let channels = self.channels;
        if color.len() < channels {
            return;
        }

        for px in self.pixels.chunks_exact_mut(channels) {
            px.copy_from_slice(&color[..channels]);
        }
    }

    /// Bytes exactly as the GPU texture expects them: RGBA is passed through
    /// untouched, RGB is widened into `staging`.
    pub fn upload_texels<'a>(&'a self, staging: &'a mut Vec<u8>) -> Result<&'a [u8]> {
        match self.format {
            PixelFormat::Rgba => Ok(&self.pixels),
            PixelFormat::Rgb => {
                PixelFormat::expand_rgb(&self.pixels, staging);
                Ok(staging.as_slice())
            }
            other => Err(PresenterError::UnsupportedFormat(other)),
        }
    }

    /// Size in bytes of a full texture upload
    pub fn texel_len(&self) -> usize {
        // Checked in `new`
        self.width as usize * self.height as usize * TEXEL_SIZE
    }
}

fn byte_len(width: u32, height: u32, bytes_per_pixel: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(bytes_per_pixel)
}
