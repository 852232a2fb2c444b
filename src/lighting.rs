//! Fixed directional light with an ambient floor.

use crate::math3d::Vec3;

/// Brightness floor for surfaces facing away from the light
pub const AMBIENT: f32 = 0.1;

/// A single directional light, fixed for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    direction: Vec3,
    ambient: f32,
}

impl Light {
    /// Light travelling along `direction`. Returns `None` for a zero vector.
    pub fn new(direction: Vec3) -> Option<Self> {
        direction.try_normalize().map(|direction| Self {
            direction,
            ambient: AMBIENT,
        })
    }

    /// Light coming from the left of the screen
    pub fn from_left() -> Self {
        Self {
            direction: Vec3::new(-1.0, 0.0, 0.0),
            ambient: AMBIENT,
        }
    }

    /// Brightness in [ambient, 1.0] for a surface normal of any length.
    ///
    /// A zero-length normal has no direction; the caller skips the pixel.
    #[inline]
    pub fn brightness(&self, normal: Vec3) -> Option<f32> {
        let normal = normal.try_normalize()?;
        let diffuse = normal.dot(&self.direction).max(0.0);
        Some((self.ambient + (1.0 - self.ambient) * diffuse).min(1.0))
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::from_left()
    }
}
