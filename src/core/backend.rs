use super::error::Result;
use super::icon::IconImage;
use super::input::InputEvent;

/// Result of pumping the window system once
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PumpOutcome {
    /// Input events in arrival order
    pub events: Vec<InputEvent>,
    /// The window system asked the window to close
    pub close_requested: bool,
}

/// Window + GPU side of a presenter.
///
/// The presenter owns the pixel buffer, timing and input snapshot; a
/// backend only moves texels to the screen and reports what the window
/// system did in between.
pub trait PresentBackend {
    /// Draw a cleared frame and present it, without touching the texture
    fn present_blank(&mut self) -> Result<()>;

    /// Replace the full texture contents with tightly packed RGBA8 texels
    fn upload(&mut self, texels: &[u8]) -> Result<()>;

    /// Clear, draw the textured quad and present
    fn render(&mut self) -> Result<()>;

    /// Process pending window events without blocking
    fn pump_events(&mut self) -> PumpOutcome;

    /// Make the window visible
    fn show(&mut self);

    fn set_icon(&mut self, icon: IconImage) -> Result<()>;

    fn set_cursor_visible(&mut self, visible: bool);
}
