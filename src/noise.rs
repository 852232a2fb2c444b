//! Coherent Noise
//!
//! Seeded gradient (Perlin) noise over ℝ³ summed into a fractal with
//! configurable persistence and lacunarity. Renderers only see the
//! [`NoiseSource`] trait, so the lattice function can be swapped freely.

use serde::{Deserialize, Serialize};

/// Lattice wrap period per axis. Large enough that no seam shows up in range.
pub const WRAP_PERIOD: i32 = 999_999;

/// A coherent noise function sampled in pre-scaled coordinates
pub trait NoiseSource {
    /// Sample at `(x, y, z)`. Nominally in [-1.0, 1.0].
    fn sample(&self, x: f32, y: f32, z: f32) -> f32;
}

/// Map a noise value from [-1, 1] to a height in [0, 1]
#[inline]
pub fn height(value: f32) -> f32 {
    (value + 1.0) / 2.0
}

/// Fractal noise parameters for one layer (terrain or clouds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Multiplier from sphere-space units to noise-space units
    pub scale: f32,
    pub octaves: u32,
    /// Amplitude falloff per octave
    pub persistence: f32,
    /// Frequency growth per octave
    pub lacunarity: f32,
}

impl NoiseConfig {
    pub const TERRAIN: Self = Self {
        scale: 0.03,
        octaves: 3,
        persistence: 0.8,
        lacunarity: 2.0,
    };

    pub const CLOUDS: Self = Self {
        scale: 0.03,
        octaves: 3,
        persistence: 0.5,
        lacunarity: 1.5,
    };
}

/// Hash of an integer lattice point. Low bits select the gradient.
#[inline]
fn lattice_hash(x: i32, y: i32, z: i32, seed: u32) -> u32 {
    let mut h = seed.wrapping_add(x as u32).wrapping_mul(374761393);
    h = h.wrapping_add(y as u32).wrapping_mul(668265263);
    h = h.wrapping_add(z as u32).wrapping_mul(2147483647);
    h = (h ^ (h >> 13)).wrapping_mul(1274126177);
    h ^ (h >> 16)
}

/// Quintic fade (Ken Perlin's improved noise): 6t⁵ - 15t⁴ + 10t³
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Dot product of the offset with one of the 12 cube-edge gradients
#[inline]
fn grad(hash: u32, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

#[inline]
fn wrap(i: i32) -> i32 {
    i.rem_euclid(WRAP_PERIOD)
}

/// Single-octave 3D gradient noise. Zero on every lattice point.
pub fn perlin(x: f32, y: f32, z: f32, seed: u32) -> f32 {
    let fx = x.floor();
    let fy = y.floor();
    let fz = z.floor();
    let (x, y, z) = (x - fx, y - fy, z - fz);

    let (ix, iy, iz) = (fx as i32, fy as i32, fz as i32);
    let (x0, x1) = (wrap(ix), wrap(ix.wrapping_add(1)));
    let (y0, y1) = (wrap(iy), wrap(iy.wrapping_add(1)));
    let (z0, z1) = (wrap(iz), wrap(iz.wrapping_add(1)));

    let u = fade(x);
    let v = fade(y);
    let w = fade(z);

    let c000 = grad(lattice_hash(x0, y0, z0, seed), x, y, z);
    let c100 = grad(lattice_hash(x1, y0, z0, seed), x - 1.0, y, z);
    let c010 = grad(lattice_hash(x0, y1, z0, seed), x, y - 1.0, z);
    let c110 = grad(lattice_hash(x1, y1, z0, seed), x - 1.0, y - 1.0, z);
    let c001 = grad(lattice_hash(x0, y0, z1, seed), x, y, z - 1.0);
    let c101 = grad(lattice_hash(x1, y0, z1, seed), x - 1.0, y, z - 1.0);
    let c011 = grad(lattice_hash(x0, y1, z1, seed), x, y - 1.0, z - 1.0);
    let c111 = grad(lattice_hash(x1, y1, z1, seed), x - 1.0, y - 1.0, z - 1.0);

    let y0 = lerp(lerp(c000, c100, u), lerp(c010, c110, u), v);
    let y1 = lerp(lerp(c001, c101, u), lerp(c011, c111, u), v);
    lerp(y0, y1, w)
}

/// Multi-octave Perlin noise normalised by the summed amplitudes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalPerlin {
    octaves: u32,
    persistence: f32,
    lacunarity: f32,
    seed: u32,
}

impl FractalPerlin {
    pub fn new(config: &NoiseConfig, seed: u32) -> Self {
        Self {
            octaves: config.octaves.max(1),
            persistence: config.persistence,
            lacunarity: config.lacunarity,
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseSource for FractalPerlin {
    fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        let mut total = 0.0;
        let mut max = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for _ in 0..self.octaves {
            total += amplitude * perlin(x * frequency, y * frequency, z * frequency, self.seed);
            max += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }
        if max > 0.0 {
            (total / max).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}
