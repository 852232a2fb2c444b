//! Falling white starfield drawn behind the planet.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::display::PixelBuffer;
use crate::palette::Rgb;

const STAR_COLOR: Rgb = (255, 255, 255);

#[derive(Debug, Clone, PartialEq)]
struct Star {
    x: f32,
    y: f32,
    vy: f32,
}

/// Background of white points drifting downwards, wrapping to the top.
///
/// Owns its own RNG so placement never touches the startup random source.
pub struct Starfield {
    stars: Vec<Star>,
    width: f32,
    height: f32,
    speed: (f32, f32),
    size: i32,
    rng: StdRng,
}

impl Starfield {
    pub fn new(
        count: usize,
        width: u32,
        height: u32,
        speed: (f32, f32),
        size: i32,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let (w, h) = (width as f32, height as f32);
        let stars = (0..count)
            .map(|_| Star {
                x: rng.gen_range(0.0..w),
                y: rng.gen_range(0.0..h),
                vy: rng.gen_range(speed.0..speed.1),
            })
            .collect();

        Self {
            stars,
            width: w,
            height: h,
            speed,
            size,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Move every star down; one that leaves the bottom edge restarts at
    /// the top with a new column and speed.
    pub fn update(&mut self) {
        for star in &mut self.stars {
            star.y += star.vy;
            if star.y > self.height {
                star.x = self.rng.gen_range(0.0..self.width);
                star.y = 0.0;
                star.vy = self.rng.gen_range(self.speed.0..self.speed.1);
            }
        }
    }

    /// Plot each star; size 1 is a single pixel, larger sizes a filled circle
    pub fn draw(&self, buffer: &mut PixelBuffer) {
        let (r, g, b) = STAR_COLOR;
        for star in &self.stars {
            let (x, y) = (star.x as i32, star.y as i32);
            if self.size <= 1 {
                buffer.set_pixel(x, y, r, g, b);
            } else {
                buffer.fill_circle(x, y, self.size, r, g, b);
            }
        }
    }
}
