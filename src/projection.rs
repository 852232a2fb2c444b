//! Orthographic sphere projection.
//!
//! Maps a 2D pixel offset from the disc center onto the viewer-facing
//! hemisphere of a sphere. Only the non-negative depth root is used.

use crate::math3d::Vec3;

/// Local-space point on the near hemisphere for offset `(sx, sy)`,
/// or `None` when the offset falls outside the disc.
#[inline]
pub fn project_offset(radius: i32, sx: i32, sy: i32) -> Option<Vec3> {
    let r2 = sx * sx + sy * sy;
    let radius2 = radius * radius;
    if r2 > radius2 {
        return None;
    }
    let z = ((radius2 - r2) as f32).sqrt();
    Some(Vec3::new(sx as f32, sy as f32, z))
}

/// Every visible offset of a disc, row by row within each column.
///
/// Offsets cover `[-radius, radius)` on both axes, sampled every `step`
/// pixels, in the same column-major order the passes write them.
pub fn disc_samples(radius: i32, step: usize) -> impl Iterator<Item = (i32, i32, Vec3)> {
    let step = step.max(1);
    (-radius..radius).step_by(step).flat_map(move |sx| {
        (-radius..radius)
            .step_by(step)
            .filter_map(move |sy| project_offset(radius, sx, sy).map(|p| (sx, sy, p)))
    })
}
