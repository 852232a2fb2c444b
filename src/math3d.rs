//! 3D Math for the Sphere Passes
//!
//! A fixed-size 3-vector plus the two-axis rotation applied to every
//! projected sphere sample.

use std::f64::consts::TAU;

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector
    #[inline]
    pub fn try_normalize(&self) -> Option<Self> {
        let len = self.length();
        if len > 0.0 {
            Some(Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }

    /// Rotate around X given the angle's sine and cosine
    #[inline]
    fn rotate_x_sc(&self, sin: f32, cos: f32) -> Self {
        Self {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }

    /// Rotate around Y: x' = x·cos − z·sin, z' = x·sin + z·cos
    #[inline]
    fn rotate_y_sc(&self, sin: f32, cos: f32) -> Self {
        Self {
            x: self.x * cos - self.z * sin,
            y: self.y,
            z: self.x * sin + self.z * cos,
        }
    }
}

// ============================================================================
// Rotation
// ============================================================================

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Two-axis planet orientation: Y rotation first, then X.
///
/// Angles are kept in f64 so that θ and θ + 2π wrap to values whose f32
/// sines and cosines agree, which keeps rendering exactly periodic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    angle_y: f64,
    angle_x: f64,
}

impl Rotation {
    pub fn new(angle_y: f64, angle_x: f64) -> Self {
        Self {
            angle_y: wrap_angle(angle_y),
            angle_x: wrap_angle(angle_x),
        }
    }

    #[inline]
    pub fn angle_y(&self) -> f64 {
        self.angle_y
    }

    #[inline]
    pub fn angle_x(&self) -> f64 {
        self.angle_x
    }

    /// Advance both angles, keeping each in [0, 2π)
    pub fn advance(&mut self, delta_y: f32, delta_x: f32) {
        self.angle_y = wrap_angle(self.angle_y + f64::from(delta_y));
        self.angle_x = wrap_angle(self.angle_x + f64::from(delta_x));
    }

    /// Precompute sines and cosines for a whole pass
    pub fn basis(&self) -> RotationBasis {
        let (sin_y, cos_y) = self.angle_y.sin_cos();
        let (sin_x, cos_x) = self.angle_x.sin_cos();
        RotationBasis {
            sin_y: sin_y as f32,
            cos_y: cos_y as f32,
            sin_x: sin_x as f32,
            cos_x: cos_x as f32,
        }
    }
}

/// Cached trig for a [`Rotation`], shared by every pixel of a pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationBasis {
    sin_y: f32,
    cos_y: f32,
    sin_x: f32,
    cos_x: f32,
}

impl RotationBasis {
    /// Rotate about Y, then about the already Y-rotated X axis
    #[inline]
    pub fn apply(&self, v: Vec3) -> Vec3 {
        v.rotate_y_sc(self.sin_y, self.cos_y)
            .rotate_x_sc(self.sin_x, self.cos_x)
    }
}
