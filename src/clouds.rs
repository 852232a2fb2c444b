//! Cloud layer: a second, larger sphere blended over the terrain.
//!
//! Shares the planet's rotation. Noise X and Y are shifted by a
//! time-proportional drift; Z is not, so the pattern slides sideways
//! and vertically rather than along the view axis.

use crate::display::PixelBuffer;
use crate::lighting::Light;
use crate::math3d::Rotation;
use crate::noise::{height, NoiseConfig, NoiseSource};
use crate::palette::ColorPalette;
use crate::projection::disc_samples;

#[derive(Debug, Clone, PartialEq)]
pub struct CloudState {
    radius: i32,
    noise: NoiseConfig,
    threshold: f32,
    drift_speed: f32,
    alpha: f32,
    elapsed: f32,
}

impl CloudState {
    pub fn new(
        radius: i32,
        noise: NoiseConfig,
        threshold: f32,
        drift_speed: f32,
        alpha: f32,
    ) -> Self {
        Self {
            radius,
            noise,
            threshold,
            drift_speed,
            alpha,
            elapsed: 0.0,
        }
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn noise(&self) -> &NoiseConfig {
        &self.noise
    }

    /// Seconds of drift accumulated so far
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Per-frame update. Negative or NaN `dt` is ignored.
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.elapsed += dt;
        }
    }

    /// Pin the drift clock (snapshots, tests)
    pub fn set_elapsed(&mut self, elapsed: f32) {
        self.elapsed = elapsed.max(0.0);
    }

    /// Additive noise offset applied to X and Y
    #[inline]
    pub fn drift(&self) -> f32 {
        self.elapsed * self.drift_speed
    }

    /// Whether a normalised cloud height is dense enough to draw
    #[inline]
    pub fn is_visible(&self, h: f32) -> bool {
        h > self.threshold
    }
}

/// Blend the cloud disc over whatever `buffer` already holds.
///
/// Below the threshold the existing pixel is left as is. Offsets outside
/// the buffer and directionless normals are skipped.
pub fn render_clouds<N: NoiseSource + ?Sized>(
    buffer: &mut PixelBuffer,
    center: (i32, i32),
    rotation: &Rotation,
    clouds: &CloudState,
    noise: &N,
    palette: &ColorPalette,
    light: &Light,
    step: usize,
) {
    let basis = rotation.basis();
    let scale = clouds.noise.scale;
    let drift = clouds.drift();
    let (cx, cy) = center;

    for (sx, sy, local) in disc_samples(clouds.radius, step) {
        let (x, y) = (cx + sx, cy + sy);
        if !buffer.in_bounds(x, y) {
            continue;
        }

        let p = basis.apply(local);
        let h = height(noise.sample(p.x * scale + drift, p.y * scale + drift, p.z * scale));
        if !clouds.is_visible(h) {
            continue;
        }

        let Some(brightness) = light.brightness(p) else {
            continue;
        };

        buffer.mix_pixel(x, y, palette.cloud_color(brightness), clouds.alpha);
    }
}
