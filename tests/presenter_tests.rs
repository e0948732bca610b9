use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use pixel_blit::core::{IconImage, InputEvent, PumpOutcome, Result};
use pixel_blit::{
    KeyCode, MouseButton, PixelFormat, PresentBackend, Presenter, PresenterConfig,
    PresenterError, WindowState,
};

/// Records every backend call; pump results are scripted per present
#[derive(Default)]
struct RecordingBackend {
    uploads: Vec<Vec<u8>>,
    renders: usize,
    blank_presents: usize,
    shown: bool,
    cursor_visible: Option<bool>,
    icon: Option<IconImage>,
    scripted_pumps: VecDeque<PumpOutcome>,
    calls: Vec<&'static str>,
}

impl RecordingBackend {
    fn script(&mut self, outcome: PumpOutcome) {
        self.scripted_pumps.push_back(outcome);
    }
}

impl PresentBackend for RecordingBackend {
    fn present_blank(&mut self) -> Result<()> {
        self.blank_presents += 1;
        self.calls.push("present_blank");
        Ok(())
    }

    fn upload(&mut self, texels: &[u8]) -> Result<()> {
        self.uploads.push(texels.to_vec());
        self.calls.push("upload");
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        self.renders += 1;
        self.calls.push("render");
        Ok(())
    }

    fn pump_events(&mut self) -> PumpOutcome {
        self.calls.push("pump_events");
        self.scripted_pumps.pop_front().unwrap_or_default()
    }

    fn show(&mut self) {
        self.shown = true;
        self.calls.push("show");
    }

    fn set_icon(&mut self, icon: IconImage) -> Result<()> {
        self.icon = Some(icon);
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = Some(visible);
    }
}

fn presenter(width: u32, height: u32, format: PixelFormat) -> Presenter<RecordingBackend> {
    let config = PresenterConfig::new(width, height, "test", format);
    Presenter::with_backend(config, |_| Ok(RecordingBackend::default())).unwrap()
}

fn key_event(key: KeyCode, pressed: bool) -> PumpOutcome {
    PumpOutcome {
        events: vec![InputEvent::Key { key, pressed }],
        close_requested: false,
    }
}

fn close_event() -> PumpOutcome {
    PumpOutcome {
        events: vec![],
        close_requested: true,
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_buffer_sized_per_format() {
    for (format, channels) in [(PixelFormat::Rgb, 3), (PixelFormat::Rgba, 4)] {
        let presenter = presenter(64, 48, format);
        assert_eq!(presenter.pixels().len(), 64 * 48 * channels);
        assert!(presenter.pixels().iter().all(|&b| b == 0));
        assert_eq!((presenter.width(), presenter.height()), (64, 48));
        assert_eq!(presenter.format(), format);
    }
}

#[test]
fn test_unsupported_format_fails_before_backend() {
    for format in [PixelFormat::Bw, PixelFormat::Grayscale] {
        let mut built = false;
        let config = PresenterConfig::new(16, 16, "test", format);
        let result = Presenter::with_backend(config, |_| {
            built = true;
            Ok(RecordingBackend::default())
        });

        assert!(matches!(result, Err(PresenterError::UnsupportedFormat(f)) if f == format));
        assert!(!built, "backend must not be created for {:?}", format);
    }
}

#[test]
fn test_zero_dimensions_rejected() {
    let config = PresenterConfig::new(0, 16, "test", PixelFormat::Rgb);
    let result = Presenter::with_backend(config, |_| Ok(RecordingBackend::default()));
    assert!(matches!(result, Err(PresenterError::InvalidDimensions { .. })));
}

#[test]
fn test_oversized_dimensions_rejected_before_backend() {
    let mut built = false;
    let config = PresenterConfig::new(1 << 31, 1 << 31, "test", PixelFormat::Rgba);
    let result = Presenter::with_backend(config, |_| {
        built = true;
        Ok(RecordingBackend::default())
    });

    assert!(matches!(result, Err(PresenterError::InvalidDimensions { .. })));
    assert!(!built);
}

#[test]
fn test_backend_error_propagates() {
    let config = PresenterConfig::new(16, 16, "test", PixelFormat::Rgb);
    let result: std::result::Result<Presenter<RecordingBackend>, _> =
        Presenter::with_backend(config, |_| Err(PresenterError::Window("no display".into())));
    assert!(matches!(result, Err(PresenterError::Window(_))));
}

#[test]
fn test_construction_presents_blank_frame_then_shows() {
    let presenter = presenter(8, 8, PixelFormat::Rgba);
    let backend = presenter.backend();

    assert_eq!(backend.blank_presents, 1);
    assert!(backend.uploads.is_empty());
    assert!(backend.shown);
    assert_eq!(backend.calls, vec!["present_blank", "show"]);
    assert_eq!(backend.cursor_visible, Some(true));
}

#[test]
fn test_cursor_visibility_from_config() {
    let config = PresenterConfig {
        cursor_visible: false,
        ..PresenterConfig::new(8, 8, "test", PixelFormat::Rgb)
    };
    let mut presenter =
        Presenter::with_backend(config, |_| Ok(RecordingBackend::default())).unwrap();
    assert_eq!(presenter.backend().cursor_visible, Some(false));

    presenter.set_cursor_visible(true);
    assert_eq!(presenter.backend().cursor_visible, Some(true));
}

// ============================================================================
// Present
// ============================================================================

#[test]
fn test_present_call_order() {
    let mut presenter = presenter(4, 4, PixelFormat::Rgba);
    presenter.present().unwrap();

    let calls = &presenter.backend().calls;
    assert_eq!(&calls[2..], &["upload", "render", "pump_events"]);
    assert_eq!(presenter.frame_count(), 1);
}

#[test]
fn test_solid_color_uploaded_exactly() {
    let mut presenter = presenter(10, 6, PixelFormat::Rgba);
    presenter.buffer_mut().fill(&[12, 34, 56, 255]);
    presenter.present().unwrap();

    let upload = &presenter.backend().uploads[0];
    assert_eq!(upload.as_slice(), presenter.pixels());
    for px in upload.chunks_exact(4) {
        assert_eq!(px, &[12, 34, 56, 255]);
    }
}

#[test]
fn test_rgb_uploaded_as_opaque_rgba() {
    let mut presenter = presenter(3, 2, PixelFormat::Rgb);
    presenter.buffer_mut().fill(&[200, 100, 50]);
    presenter.present().unwrap();

    let upload = &presenter.backend().uploads[0];
    assert_eq!(upload.len(), 3 * 2 * 4);
    for px in upload.chunks_exact(4) {
        assert_eq!(px, &[200, 100, 50, 255]);
    }
}

#[test]
fn test_every_present_reuploads_whole_buffer() {
    let mut presenter = presenter(5, 5, PixelFormat::Rgb);
    for _ in 0..3 {
        presenter.present().unwrap();
    }

    let backend = presenter.backend();
    assert_eq!(backend.uploads.len(), 3);
    assert_eq!(backend.renders, 3);
    assert!(backend.uploads.iter().all(|u| u.len() == 5 * 5 * 4));
}

#[test]
fn test_overwrite_after_present_does_not_alias() {
    let mut presenter = presenter(4, 4, PixelFormat::Rgba);
    presenter.buffer_mut().fill(&[1, 2, 3, 4]);
    presenter.present().unwrap();

    presenter.buffer_mut().fill(&[9, 9, 9, 9]);

    let first = &presenter.backend().uploads[0];
    assert!(first.chunks_exact(4).all(|px| px == [1, 2, 3, 4]));
    assert!(presenter.pixels().chunks_exact(4).all(|px| px == [9, 9, 9, 9]));
}

// ============================================================================
// Window state
// ============================================================================

#[test]
fn test_window_stays_open_without_close_event() {
    let mut presenter = presenter(4, 4, PixelFormat::Rgb);
    for _ in 0..10 {
        presenter.present().unwrap();
        assert!(presenter.is_open());
    }
    assert_eq!(presenter.window_state(), WindowState::Open);
}

#[test]
fn test_close_event_is_terminal() {
    let mut presenter = presenter(4, 4, PixelFormat::Rgb);
    presenter.backend_mut().script(PumpOutcome::default());
    presenter.backend_mut().script(PumpOutcome::default());
    presenter.backend_mut().script(close_event());

    presenter.present().unwrap();
    presenter.present().unwrap();
    assert!(presenter.is_open());

    // Close pumped during the third call
    presenter.present().unwrap();
    assert_eq!(presenter.window_state(), WindowState::Closed);

    for _ in 0..5 {
        presenter.present().unwrap();
        assert_eq!(presenter.window_state(), WindowState::Closed);
    }
}

// ============================================================================
// Timing
// ============================================================================

#[test]
fn test_delta_time_before_first_present() {
    let presenter = presenter(4, 4, PixelFormat::Rgb);
    assert_eq!(presenter.delta_time(), 0.0);
}

#[test]
fn test_delta_time_between_presents() {
    let mut presenter = presenter(4, 4, PixelFormat::Rgb);
    presenter.present().unwrap();
    assert!(presenter.delta_time() >= 0.0);

    thread::sleep(Duration::from_millis(20));
    presenter.present().unwrap();

    // Measured from the end of the previous present
    assert!(presenter.delta_time() >= 0.019);
}

#[test]
fn test_timer_starts_on_first_present() {
    let mut presenter = presenter(4, 4, PixelFormat::Rgb);

    // Idle time before the first present is not part of any frame
    thread::sleep(Duration::from_millis(30));
    presenter.present().unwrap();

    assert!(
        presenter.delta_time() < 0.015,
        "first delta {} includes time before the first present",
        presenter.delta_time()
    );
}

// ============================================================================
// Input
// ============================================================================

#[test]
fn test_input_defaults_before_present() {
    let presenter = presenter(4, 4, PixelFormat::Rgb);
    for key in KeyCode::ALL {
        assert!(!presenter.key(key));
    }
    assert_eq!((presenter.mouse_x(), presenter.mouse_y()), (0, 0));
    assert!(!presenter.mouse_left());
    assert!(!presenter.mouse_middle());
    assert!(!presenter.mouse_right());
}

#[test]
fn test_snapshot_taken_at_present_start() {
    let mut presenter = presenter(4, 4, PixelFormat::Rgb);
    presenter.backend_mut().script(key_event(KeyCode::A, true));

    // Pressed during the first call's pump: not visible until the next snapshot
    presenter.present().unwrap();
    assert!(!presenter.key(KeyCode::A));

    presenter.present().unwrap();
    assert!(presenter.key(KeyCode::A));
}

#[test]
fn test_snapshot_ignores_later_changes() {
    let mut presenter = presenter(4, 4, PixelFormat::Rgb);
    presenter.backend_mut().script(key_event(KeyCode::Left, true));
    presenter.backend_mut().script(key_event(KeyCode::Left, false));

    presenter.present().unwrap();
    // Release arrives during this call, after the snapshot
    presenter.present().unwrap();
    assert!(presenter.key(KeyCode::Left));

    presenter.present().unwrap();
    assert!(!presenter.key(KeyCode::Left));
}

#[test]
fn test_mouse_snapshot() {
    let mut presenter = presenter(4, 4, PixelFormat::Rgb);
    presenter.backend_mut().script(PumpOutcome {
        events: vec![
            InputEvent::CursorMoved { x: 120, y: 45 },
            InputEvent::MouseButton { button: MouseButton::Right, pressed: true },
        ],
        close_requested: false,
    });

    presenter.present().unwrap();
    presenter.present().unwrap();

    assert_eq!((presenter.mouse_x(), presenter.mouse_y()), (120, 45));
    assert!(presenter.mouse_right());
    assert!(!presenter.mouse_left());
    assert!(presenter.input().button_down(MouseButton::Right));
}

// ============================================================================
// Icon
// ============================================================================

#[test]
fn test_set_icon_absolute_path() {
    let path = std::env::temp_dir().join(format!("pixel_blit_test_icon_{}.png", std::process::id()));
    image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 128, 255, 255]))
        .save(&path)
        .unwrap();

    let mut presenter = presenter(4, 4, PixelFormat::Rgb);
    presenter.set_icon(&path, false).unwrap();
    std::fs::remove_file(&path).ok();

    let icon = presenter.backend().icon.as_ref().unwrap();
    assert_eq!((icon.width, icon.height), (4, 4));
    assert_eq!(&icon.rgba[0..4], &[0, 128, 255, 255]);
}

#[test]
fn test_set_icon_missing_file() {
    let mut presenter = presenter(4, 4, PixelFormat::Rgb);
    let result = presenter.set_icon("no-such-icon.png", true);

    assert!(matches!(result, Err(PresenterError::Icon { .. })));
    assert!(presenter.backend().icon.is_none());
}
