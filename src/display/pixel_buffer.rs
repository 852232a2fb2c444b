use super::{INTERNAL_HEIGHT, INTERNAL_WIDTH};
use crate::palette::Rgb;

// ============================================================================
// Utility Functions
// ============================================================================

/// Mix a single channel: round(src·alpha + dst·(1 − alpha)), clamped to 255
#[inline]
fn mix_channel(src: u8, dst: u8, alpha: f32) -> u8 {
    (src as f32 * alpha + dst as f32 * (1.0 - alpha))
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Write an opaque pixel to a 4-byte slice (R, G, B, A in memory)
#[inline]
fn write_pixel(dest: &mut [u8], r: u8, g: u8, b: u8) {
    dest[0] = r;
    dest[1] = g;
    dest[2] = b;
    dest[3] = 255;
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Row-major RGBA pixel buffer at the internal render resolution.
/// Fully overwritten every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a new pixel buffer at the internal resolution (240x200)
    pub fn new() -> Self {
        Self::with_size(INTERNAL_WIDTH, INTERNAL_HEIGHT)
    }

    /// Create a new pixel buffer with custom resolution
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    /// Clear to a solid opaque color
    pub fn clear(&mut self, r: u8, g: u8, b: u8) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            write_pixel(chunk, r, g, b);
        }
    }

    /// Set a single pixel (bounds checked, out-of-range writes are dropped)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
        }
    }

    /// Set a pixel from an RGB triple
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: Rgb) {
        self.set_pixel(x, y, color.0, color.1, color.2);
    }

    /// Read a pixel from the buffer (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some((self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]))
        } else {
            None
        }
    }

    /// Blend `color` over the existing pixel with a fractional alpha,
    /// rounding each channel. Returns false if the pixel was clipped.
    #[inline]
    pub fn mix_pixel(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.pixel_index(x as u32, y as u32);
        let px = &mut self.pixels[idx..idx + 4];
        px[0] = mix_channel(color.0, px[0], alpha);
        px[1] = mix_channel(color.1, px[1], alpha);
        px[2] = mix_channel(color.2, px[2], alpha);
        px[3] = 255;
        true
    }

    /// Draw a horizontal line, clipped to the buffer
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, r: u8, g: u8, b: u8) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let x1 = x1.max(0);
        let x2 = x2.min(self.width as i32 - 1);
        if x1 > x2 {
            return;
        }
        let start = self.pixel_index(x1 as u32, y as u32);
        let end = self.pixel_index(x2 as u32, y as u32) + 4;
        for chunk in self.pixels[start..end].chunks_exact_mut(4) {
            write_pixel(chunk, r, g, b);
        }
    }

    /// Draw a filled circle using horizontal spans
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, r: u8, g: u8, b: u8) {
        if radius <= 0 {
            if radius == 0 {
                self.set_pixel(cx, cy, r, g, b);
            }
            return;
        }

        // Midpoint circle algorithm with span filling
        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;

        while x >= y {
            self.hline(cx - x, cx + x, cy + y, r, g, b);
            if y != 0 {
                self.hline(cx - x, cx + x, cy - y, r, g, b);
            }
            if x != y {
                self.hline(cx - y, cx + y, cy + x, r, g, b);
                if y != 0 {
                    self.hline(cx - y, cx + y, cy - x, r, g, b);
                }
            }

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Raw bytes for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes per row
    pub fn pitch(&self) -> usize {
        (self.width * 4) as usize
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}
