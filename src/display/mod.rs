mod pixel_buffer;
#[cfg(feature = "window")]
mod window;

pub use pixel_buffer::PixelBuffer;
#[cfg(feature = "window")]
pub use window::{Display, InputEvent, RenderTarget};

/// Internal render resolution; the window upscales this 3x
pub const INTERNAL_WIDTH: u32 = 240;
pub const INTERNAL_HEIGHT: u32 = 200;

pub const WINDOW_WIDTH: u32 = 720;
pub const WINDOW_HEIGHT: u32 = 600;
