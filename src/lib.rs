pub mod cli;
pub mod config;
pub mod core;
pub mod logging;

pub use crate::config::PresenterConfig;
pub use crate::core::{
    InputSnapshot, KeyCode, MouseButton, PixelBuffer, PixelFormat, PresentBackend, Presenter,
    PresenterError, WindowState,
};
