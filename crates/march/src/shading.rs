//! Phong-like colour model with a single fixed directional light.
//!
//! There is no energy normalisation and no clamping: bright highlights exceed
//! 1.0 and are clipped by the output target.

use glam::{Vec3, Vec4};

/// Direction the light travels, `-(1, 2, 1) / 2.45`.
pub const LIGHT_DIR: Vec3 = Vec3::new(-1.0 / 2.45, -2.0 / 2.45, -1.0 / 2.45);

/// Base tint applied to both the surface and the sky gradient.
pub const TINT: Vec3 = Vec3::new(0.7, 0.9, 1.0);

/// Colour a surface point seen along `view_ray` with normal `normal`.
#[must_use]
pub fn shade(normal: Vec3, _pos: Vec3, view_ray: Vec3) -> Vec4 {
    let light_dot = (-LIGHT_DIR).dot(normal);

    let reflected = view_ray - 2.0 * normal * view_ray.dot(normal);
    let reflected_dot = (-reflected).dot(LIGHT_DIR);

    let phong = (light_dot * 0.3 + 0.3) * TINT + Vec3::splat((reflected_dot * 18.5 - 19.0).exp());
    phong.extend(1.0)
}

/// Vertical sky gradient for a fragment at NDC height `y`.
#[must_use]
pub fn background(y: f32) -> Vec4 {
    ((y / 5.0 + 0.4) * TINT).extend(1.0)
}
