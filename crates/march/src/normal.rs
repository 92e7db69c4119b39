//! Surface normals from the distance field gradient.

use glam::Vec3;

use crate::sdf::SignedDistance;

/// Central difference step.
pub const NORMAL_EPSILON: f32 = 1e-4;

/// Estimate the surface normal at `pos` by central differences.
///
/// The result is not guarded: a zero gradient (an exact singularity of the
/// field) normalises to NaN components.
#[must_use]
pub fn estimate<S: SignedDistance + ?Sized>(field: &S, pos: Vec3) -> Vec3 {
    let h = NORMAL_EPSILON;
    let grad = Vec3::new(
        field.distance(pos + Vec3::X * h) - field.distance(pos - Vec3::X * h),
        field.distance(pos + Vec3::Y * h) - field.distance(pos - Vec3::Y * h),
        field.distance(pos + Vec3::Z * h) - field.distance(pos - Vec3::Z * h),
    );
    grad.normalize()
}
