//! Software-rendered rotating planet.
//!
//! A procedurally textured sphere and a translucent cloud shell are
//! rasterised pixel by pixel into a small RGBA buffer over a drifting
//! starfield, then handed to a window that upscales it.

pub mod clouds;
pub mod diagnostics;
pub mod display;
pub mod error;
pub mod frame;
pub mod lighting;
pub mod logging;
pub mod math3d;
pub mod noise;
pub mod palette;
pub mod planet;
pub mod projection;
pub mod settings;
pub mod starfield;
pub mod timing;

pub use display::PixelBuffer;
pub use error::{Error, Result};
pub use frame::{run, EventSource, FrameSink, Orchestrator, RunState};
pub use settings::Settings;
