use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{ConfigError, PresenterError, Result};
use crate::core::pixel_format::PixelFormat;

/// Everything fixed at presenter construction.
///
/// Every field is optional in JSON; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Buffer and window width in pixels
    pub width: u32,
    /// Buffer and window height in pixels
    pub height: u32,
    pub title: String,
    pub format: PixelFormat,
    /// Wait for vertical sync on present
    pub vsync: bool,
    pub cursor_visible: bool,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "pixel-blit".to_string(),
            format: PixelFormat::Rgba,
            vsync: true,
            cursor_visible: true,
        }
    }
}

impl PresenterConfig {
    pub fn new(width: u32, height: u32, title: impl Into<String>, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            format,
            ..Default::default()
        }
    }

    /// Load from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let wrap = |source: ConfigError| PresenterError::Config {
            path: path.to_path_buf(),
            source,
        };

        let text = std::fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
        Self::from_json_str(&text).map_err(|e| wrap(e.into()))
    }

    pub fn from_json_str(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Check format and dimensions; touches no window or GPU state
    pub fn validate(&self) -> Result<()> {
        self.format.channels()?;

        if self.width == 0 || self.height == 0 {
            return Err(PresenterError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        Ok(())
    }
}
