pub mod backend;
pub mod blit_pipeline;
pub mod clock;
pub mod error;
pub mod gpu_context;
pub mod icon;
pub mod input;
pub mod input_adapter;
pub mod pixel_buffer;
pub mod pixel_format;
pub mod presenter;
pub mod window;

pub use backend::{PresentBackend, PumpOutcome};
pub use clock::FrameTimer;
pub use error::{ConfigError, IconError, PresenterError, Result};
pub use icon::IconImage;
pub use input::{InputEvent, InputSnapshot, InputTracker, KeyCode, MouseButton};
pub use pixel_buffer::PixelBuffer;
pub use pixel_format::PixelFormat;
pub use presenter::{Presenter, WindowState};
pub use window::WinitBackend;
