use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{PresenterError, Result};

/// Bytes per texel on the GPU side; RGB buffers are widened to this.
pub const TEXEL_SIZE: usize = 4;

/// Layout of the caller's pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// Declared, never uploadable
    Bw,
    /// Declared, never uploadable
    Grayscale,
    Rgb,
    Rgba,
}

impl PixelFormat {
    /// Bytes per pixel, or `UnsupportedFormat` for Bw/Grayscale
    pub fn channels(self) -> Result<usize> {
        match self {
            PixelFormat::Rgb => Ok(3),
            PixelFormat::Rgba => Ok(4),
            PixelFormat::Bw | PixelFormat::Grayscale => {
                Err(PresenterError::UnsupportedFormat(self))
            }
        }
    }

    pub fn is_supported(self) -> bool {
        self.channels().is_ok()
    }

    /// Expand RGB pixels into opaque RGBA texels, reusing `out`'s allocation.
    pub fn expand_rgb(rgb: &[u8], out: &mut Vec<u8>) {
        out.clear();
        out.reserve(rgb.len() / 3 * TEXEL_SIZE);
        for px in rgb.chunks_exact(3) {
            out.extend_from_slice(px);
            out.push(u8::MAX);
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelFormat::Bw => "bw",
            PixelFormat::Grayscale => "grayscale",
            PixelFormat::Rgb => "rgb",
            PixelFormat::Rgba => "rgba",
        };
        f.write_str(name)
    }
}

impl FromStr for PixelFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bw" => Ok(PixelFormat::Bw),
            "grayscale" | "greyscale" => Ok(PixelFormat::Grayscale),
            "rgb" => Ok(PixelFormat::Rgb),
            "rgba" => Ok(PixelFormat::Rgba),
            other => Err(format!("unknown pixel format '{other}'")),
        }
    }
}
