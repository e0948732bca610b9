// cli.rs - Command-line interface for the demo binary
use clap::Parser;
use std::path::PathBuf;

use crate::config::PresenterConfig;
use crate::core::error::Result;
use crate::core::pixel_format::PixelFormat;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pixel-blit")]
#[command(about = "Software framebuffer presented through the GPU", long_about = None)]
pub struct Cli {
    /// JSON config file; flags below override its fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Buffer width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Buffer height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Window title
    #[arg(long)]
    pub title: Option<String>,

    /// Pixel format: rgb or rgba
    #[arg(long)]
    pub format: Option<PixelFormat>,

    /// Window icon image
    #[arg(long)]
    pub icon: Option<PathBuf>,

    /// Resolve --icon against the executable's directory
    #[arg(long = "icon-relative", default_value = "false")]
    pub icon_relative: bool,

    /// Present without waiting for vertical sync
    #[arg(long = "no-vsync", default_value = "false")]
    pub no_vsync: bool,

    /// Hide the mouse cursor over the window
    #[arg(long = "hide-cursor", default_value = "false")]
    pub hide_cursor: bool,

    /// Exit after this many frames (runs until closed when absent)
    #[arg(long)]
    pub frames: Option<u64>,

    /// Log filter in env_logger syntax
    #[arg(long)]
    pub log: Option<String>,
}

impl Cli {
    /// Build the presenter config: file (or defaults), then flag overrides
    pub fn presenter_config(&self) -> Result<PresenterConfig> {
        let mut config = match &self.config {
            Some(path) => PresenterConfig::from_json_file(path)?,
            None => PresenterConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.no_vsync {
            config.vsync = false;
        }
        if self.hide_cursor {
            config.cursor_visible = false;
        }

        Ok(config)
    }
}
