//! Planet state and the terrain pass.
//!
//! Every visible offset of the planet disc is projected onto the near
//! hemisphere, rotated, lit, and colored from the terrain noise height.

use crate::diagnostics::HeightHistogram;
use crate::display::PixelBuffer;
use crate::lighting::Light;
use crate::math3d::Rotation;
use crate::noise::{height, NoiseConfig, NoiseSource};
use crate::palette::ColorPalette;
use crate::projection::disc_samples;

/// Orientation and terrain parameters of the planet
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetState {
    radius: i32,
    rotation: Rotation,
    noise: NoiseConfig,
    seed: u32,
}

impl PlanetState {
    pub fn new(radius: i32, noise: NoiseConfig, seed: u32) -> Self {
        Self {
            radius,
            rotation: Rotation::default(),
            noise,
            seed,
        }
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[inline]
    pub fn noise(&self) -> &NoiseConfig {
        &self.noise
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Per-frame update: advance both angles by fixed deltas
    pub fn advance(&mut self, delta_y: f32, delta_x: f32) {
        self.rotation.advance(delta_y, delta_x);
    }

    /// Pin the orientation (snapshots, tests)
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }
}

/// Fill the planet disc centered at `center`.
///
/// Pixels whose normal has no direction are skipped, as are offsets that
/// land outside the buffer. When `stats` is given, every sampled height is
/// recorded.
pub fn render_terrain<N: NoiseSource + ?Sized>(
    buffer: &mut PixelBuffer,
    center: (i32, i32),
    planet: &PlanetState,
    noise: &N,
    palette: &ColorPalette,
    light: &Light,
    step: usize,
    mut stats: Option<&mut HeightHistogram>,
) {
    let basis = planet.rotation.basis();
    let scale = planet.noise.scale;
    let (cx, cy) = center;

    for (sx, sy, local) in disc_samples(planet.radius, step) {
        let p = basis.apply(local);

        // The rotated surface point doubles as the normal
        let Some(brightness) = light.brightness(p) else {
            continue;
        };

        let h = height(noise.sample(p.x * scale, p.y * scale, p.z * scale));
        if let Some(stats) = stats.as_deref_mut() {
            stats.record(h);
        }

        buffer.put(cx + sx, cy + sy, palette.terrain_color(h, brightness));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::FractalPerlin;

    /// Noise that returns the same value everywhere
    struct Flat(f32);

    impl NoiseSource for Flat {
        fn sample(&self, _x: f32, _y: f32, _z: f32) -> f32 {
            self.0
        }
    }

    fn palette() -> ColorPalette {
        ColorPalette::new(
            (20, 80, 220),
            (230, 210, 150),
            (30, 150, 50),
            (120, 100, 80),
            (240, 240, 240),
        )
    }

    fn black(w: u32, h: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::with_size(w, h);
        buf.clear(0, 0, 0);
        buf
    }

    #[test]
    fn test_disc_is_filled_and_outside_untouched() {
        let mut buf = black(64, 64);
        let planet = PlanetState::new(20, NoiseConfig::TERRAIN, 950);
        let pal = palette();
        // height 0.7 -> mountain everywhere
        render_terrain(&mut buf, (32, 32), &planet, &Flat(0.4), &pal, &Light::default(), 1, None);

        for y in 0..64 {
            for x in 0..64 {
                let (dx, dy) = (x - 32, y - 32);
                let in_square = (-20..20).contains(&dx) && (-20..20).contains(&dy);
                let inside = in_square && dx * dx + dy * dy <= 400;
                let px = buf.get_pixel(x, y).unwrap();
                if inside {
                    assert_ne!(px, (0, 0, 0), "hole at ({}, {})", x, y);
                } else {
                    assert_eq!(px, (0, 0, 0), "spill at ({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_lit_and_dark_limbs() {
        let mut buf = black(64, 64);
        let planet = PlanetState::new(20, NoiseConfig::TERRAIN, 950);
        let pal = palette();
        render_terrain(&mut buf, (32, 32), &planet, &Flat(0.4), &pal, &Light::default(), 1, None);

        // Light from -X: the left limb is fully lit, the right limb sits at ambient
        let full = Light::default()
            .brightness(crate::math3d::Vec3::new(-20.0, 0.0, 0.0))
            .unwrap();
        assert!(full > 0.999);
        assert_eq!(buf.get_pixel(12, 32), Some(pal.terrain_color(0.7, full)));
        assert_eq!(buf.get_pixel(51, 32), Some(crate::palette::shade(pal.mountain, 0.1)));
    }

    #[test]
    fn test_offsets_outside_buffer_are_clipped() {
        let mut buf = black(16, 16);
        let planet = PlanetState::new(30, NoiseConfig::TERRAIN, 950);
        let light = Light::default();
        render_terrain(&mut buf, (0, 0), &planet, &Flat(0.0), &palette(), &light, 1, None);
        assert_ne!(buf.get_pixel(0, 0), Some((0, 0, 0)));
        assert_ne!(buf.get_pixel(15, 15), Some((0, 0, 0)));
    }

    #[test]
    fn test_zero_radius_renders_nothing() {
        let mut buf = black(8, 8);
        let before = buf.clone();
        let planet = PlanetState::new(0, NoiseConfig::TERRAIN, 950);
        let light = Light::default();
        render_terrain(&mut buf, (4, 4), &planet, &Flat(0.0), &palette(), &light, 1, None);
        assert_eq!(buf, before);
    }

    #[test]
    fn test_histogram_counts_every_sample() {
        let mut buf = black(64, 64);
        let planet = PlanetState::new(15, NoiseConfig::TERRAIN, 977);
        let noise = FractalPerlin::new(planet.noise(), planet.seed());
        let mut stats = HeightHistogram::new();
        render_terrain(
            &mut buf,
            (32, 32),
            &planet,
            &noise,
            &palette(),
            &Light::default(),
            1,
            Some(&mut stats),
        );
        assert_eq!(stats.total() as usize, disc_samples(15, 1).count());
    }

    #[test]
    fn test_rotation_changes_terrain() {
        let planet_a = PlanetState::new(25, NoiseConfig::TERRAIN, 940);
        let mut planet_b = planet_a.clone();
        planet_b.set_rotation(Rotation::new(1.0, 0.5));
        let noise = FractalPerlin::new(planet_a.noise(), planet_a.seed());
        let pal = palette();

        let mut a = black(64, 64);
        let mut b = black(64, 64);
        render_terrain(&mut a, (32, 32), &planet_a, &noise, &pal, &Light::default(), 1, None);
        render_terrain(&mut b, (32, 32), &planet_b, &noise, &pal, &Light::default(), 1, None);
        assert_ne!(a, b);
    }
}
