use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;
use tracing::debug;

use super::PixelBuffer;
use crate::error::{Error, Result};

/// SDL2 window that presents one internal-resolution buffer per frame,
/// stretched to the window size.
pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
}

/// Streaming texture the buffer is uploaded into each frame
pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

/// The only input the renderer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close or Escape
    Quit,
}

impl Display {
    /// Open a centered window of `width`x`height`.
    ///
    /// VSync stays off: frame pacing is done by the caller's limiter.
    pub fn open(
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<(Self, TextureCreator<WindowContext>)> {
        let sdl_context = sdl2::init().map_err(Error::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(Error::Sdl)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| Error::Sdl(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| Error::Sdl(e.to_string()))?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(Error::Sdl)?;

        debug!(width, height, "window opened");

        Ok((
            Self { canvas, event_pump },
            texture_creator,
        ))
    }

    /// Upload the buffer and stretch it over the whole window
    pub fn present(&mut self, target: &mut RenderTarget, buffer: &PixelBuffer) -> Result<()> {
        if buffer.width() != target.width || buffer.height() != target.height {
            return Err(Error::Texture(format!(
                "buffer is {}x{}, texture is {}x{}",
                buffer.width(),
                buffer.height(),
                target.width,
                target.height
            )));
        }

        target
            .texture
            .update(None, buffer.as_bytes(), buffer.pitch())
            .map_err(|e| Error::Texture(e.to_string()))?;

        self.canvas.copy(&target.texture, None, None).map_err(Error::Sdl)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => events.push(InputEvent::Quit),
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Create a streaming texture matching the internal buffer size
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        // ABGR8888 is R, G, B, A in memory on little-endian, matching PixelBuffer
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::ABGR8888, width, height)
            .map_err(|e| Error::Texture(e.to_string()))?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }
}
