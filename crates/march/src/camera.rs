//! Primary ray construction for the orbit camera.
//!
//! Rays start from a fixed eye behind the origin and pass through a virtual
//! image plane; the view matrix rotates both, so the camera orbits the origin
//! rather than flying freely.

use glam::{Mat4, Vec2, Vec3};

/// Offset from the image plane to the eye along the viewing axis.
pub const CAMERA_TO_CLIP: Vec3 = Vec3::new(0.0, 0.0, 3.0);

/// Eye position before the view rotation is applied.
pub const CAMERA_POS: Vec3 = Vec3::new(0.0, 0.0, -4.0);

/// A view ray. `origin` is advanced by the marcher, `direction` stays fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Build the ray for a fragment at `ndc` in `[-1, 1]^2`.
///
/// `x` is widened by the aspect ratio so pixels stay square.
#[must_use]
pub fn primary_ray(ndc: Vec2, resolution: Vec2, view: Mat4) -> Ray {
    let mut clip_pos = ndc.extend(0.0);
    clip_pos.x /= resolution.y / resolution.x;
    let clip_ray = (clip_pos + CAMERA_TO_CLIP).normalize();

    Ray {
        origin: view.transform_point3(CAMERA_POS),
        direction: view.transform_vector3(clip_ray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RES: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn centre_ray_looks_down_positive_z() {
        let ray = primary_ray(Vec2::ZERO, RES, Mat4::IDENTITY);
        assert_eq!(ray.origin, CAMERA_POS);
        assert!((ray.direction - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn aspect_ratio_widens_x() {
        let ray = primary_ray(Vec2::new(1.0, 1.0), RES, Mat4::IDENTITY);
        let expected = Vec3::new(800.0 / 600.0, 1.0, 3.0).normalize();
        assert!((ray.direction - expected).length() < 1e-6);
    }

    #[test]
    fn view_rotation_orbits_origin_and_ray_together() {
        let view = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let ray = primary_ray(Vec2::ZERO, RES, view);
        assert!((ray.origin - Vec3::new(-4.0, 0.0, 0.0)).length() < 1e-5);
        assert!((ray.direction - Vec3::X).length() < 1e-5);
        // still aimed at the pivot
        assert!(ray.at(4.0).length() < 1e-5);
    }
}
