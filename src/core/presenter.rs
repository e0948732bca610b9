use std::path::Path;

use super::backend::PresentBackend;
use super::clock::FrameTimer;
use super::error::Result;
use super::icon::{load_icon, resolve_icon_path};
use super::input::{InputSnapshot, InputTracker, KeyCode, MouseButton};
use super::pixel_buffer::PixelBuffer;
use super::pixel_format::PixelFormat;
use super::window::WinitBackend;
use crate::config::PresenterConfig;

/// Whether the window system has asked the window to close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Open,
    /// Terminal
    Closed,
}

impl WindowState {
    /// Move to `Closed`; returns true only on the first call
    pub fn close(&mut self) -> bool {
        let was_open = *self == WindowState::Open;
        *self = WindowState::Closed;
        was_open
    }

    pub fn is_open(self) -> bool {
        self == WindowState::Open
    }
}

/// Window with a CPU pixel buffer that is blitted to the screen on every
/// `present` call.
///
/// ```no_run
/// use pixel_blit::{KeyCode, PixelFormat, Presenter};
///
/// let mut presenter = Presenter::new(320, 240, "demo", PixelFormat::Rgb)?;
/// while presenter.is_open() && !presenter.key(KeyCode::Esc) {
///     presenter.pixels_mut().fill(0x40);
///     presenter.present()?;
/// }
/// # Ok::<(), pixel_blit::PresenterError>(())
/// ```
pub struct Presenter<B: PresentBackend = WinitBackend> {
    buffer: PixelBuffer,
    staging: Vec<u8>,
    config: PresenterConfig,
    tracker: InputTracker,
    snapshot: InputSnapshot,
    timer: FrameTimer,
    delta_time: f32,
    frame_count: u64,
    state: WindowState,
    backend: B,
}

impl Presenter<WinitBackend> {
    /// Open a window of `width` x `height` pixels backed by a `format` buffer
    pub fn new(width: u32, height: u32, title: &str, format: PixelFormat) -> Result<Self> {
        Self::from_config(PresenterConfig::new(width, height, title, format))
    }

    pub fn from_config(config: PresenterConfig) -> Result<Self> {
        Self::with_backend(config, WinitBackend::new)
    }

    pub fn window(&self) -> &winit::window::Window {
        self.backend.window()
    }
}

impl<B: PresentBackend> Presenter<B> {
    /// Validate `config`, then build the backend with `build`.
    ///
    /// `build` is never called for an unsupported format or empty window.
    pub fn with_backend<F>(config: PresenterConfig, build: F) -> Result<Self>
    where
        F: FnOnce(&PresenterConfig) -> Result<B>,
    {
        config.validate()?;
        let buffer = PixelBuffer::new(config.width, config.height, config.format)?;

        let mut backend = build(&config)?;
        backend.set_cursor_visible(config.cursor_visible);
        backend.present_blank()?;
        backend.show();

        log::info!(
            "presenter ready: '{}' {}x{} {}",
            config.title,
            config.width,
            config.height,
            config.format
        );

        Ok(Self {
            staging: Vec::with_capacity(buffer.texel_len()),
            buffer,
            config,
            tracker: InputTracker::new(),
            snapshot: InputSnapshot::default(),
            timer: FrameTimer::new(),
            delta_time: 0.0,
            frame_count: 0,
            state: WindowState::Open,
            backend,
        })
    }

    /// Blit the pixel buffer to the window, then pump events and time the frame.
    ///
    /// Input queries answer from the state sampled at the start of this call
    /// until the next one.
    pub fn present(&mut self) -> Result<()> {
        self.buffer.format().channels()?;

        self.timer.start_if_idle();
        self.tracker.capture_into(&mut self.snapshot);

        let texels = self.buffer.upload_texels(&mut self.staging)?;
        self.backend.upload(texels)?;
        self.backend.render()?;

        let outcome = self.backend.pump_events();
        self.tracker.apply_all(outcome.events);
        if outcome.close_requested && self.state.close() {
            log::info!("window '{}' closed", self.config.title);
        }

        self.delta_time = self.timer.lap();
        self.frame_count += 1;
        log::trace!("frame {} took {:.4}s", self.frame_count, self.delta_time);

        Ok(())
    }

    /// Assign the window icon from an image file, resolved against the
    /// executable's directory when `is_relative`
    pub fn set_icon(&mut self, path: impl AsRef<Path>, is_relative: bool) -> Result<()> {
        let path = resolve_icon_path(path.as_ref(), is_relative)?;
        let icon = load_icon(&path)?;
        self.backend.set_icon(icon)?;
        log::info!("window icon set from {}", path.display());
        Ok(())
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.backend.set_cursor_visible(visible);
    }

    // === Buffer ===

    pub fn pixels(&self) -> &[u8] {
        self.buffer.pixels()
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        self.buffer.pixels_mut()
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    pub fn format(&self) -> PixelFormat {
        self.buffer.format()
    }

    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    // === Timing and lifecycle ===

    /// Seconds between the end of the previous present and the end of the last one
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn window_state(&self) -> WindowState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    // === Input ===

    pub fn input(&self) -> &InputSnapshot {
        &self.snapshot
    }

    pub fn key(&self, key: KeyCode) -> bool {
        self.snapshot.key_down(key)
    }

    pub fn mouse_x(&self) -> i32 {
        self.snapshot.mouse_x()
    }

    pub fn mouse_y(&self) -> i32 {
        self.snapshot.mouse_y()
    }

    pub fn mouse_left(&self) -> bool {
        self.snapshot.button_down(MouseButton::Left)
    }

    pub fn mouse_middle(&self) -> bool {
        self.snapshot.button_down(MouseButton::Middle)
    }

    pub fn mouse_right(&self) -> bool {
        self.snapshot.button_down(MouseButton::Right)
    }

    // === Backend ===

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_state_closes_once() {
        let mut state = WindowState::default();
        assert!(state.is_open());

        assert!(state.close());
        assert!(!state.is_open());

        assert!(!state.close());
        assert_eq!(state, WindowState::Closed);
    }
}
