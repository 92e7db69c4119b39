//! Signed distance functions for the scene primitives
//!
//! Every function here is pure and allocation free. The scene is a single
//! primitive repeated through space on a 3x3x3 lattice, so one evaluation
//! covers every instance.

use glam::{Vec2, Vec3};

use crate::config::Primitive;

/// Lattice spacing of the repeated scene.
pub const REPEAT_PERIOD: Vec3 = Vec3::splat(3.0);

/// Half extents of the cuboid primitive.
pub const CUBOID_HALF_EXTENT: Vec3 = Vec3::splat(0.3);
pub const CUBOID_ROUNDNESS: f32 = 0.0;

pub const CYLINDER_RADIUS: f32 = 0.2;
pub const CYLINDER_HALF_HEIGHT: f32 = 0.6;

pub const MANDELBULB_POWER: f32 = 8.0;
pub const MANDELBULB_ITERATIONS: u32 = 4;
pub const MANDELBULB_BAILOUT: f32 = 256.0;

/// Anything that can report a signed distance to its nearest surface.
///
/// The ray marcher is generic over this so it can be driven by the real scene
/// or by a standalone field.
pub trait SignedDistance {
    fn distance(&self, pos: Vec3) -> f32;
}

impl<F: Fn(Vec3) -> f32> SignedDistance for F {
    fn distance(&self, pos: Vec3) -> f32 {
        self(pos)
    }
}

/// Distance to one instance of a primitive, given the point folded into the
/// home cell and the current sphere radius.
pub type PrimitiveField = fn(Vec3, f32) -> f32;

/// The active primitive at one animation phase.
///
/// The distance function is picked once in [`Scene::new`]; evaluation never
/// branches on the primitive.
#[derive(Debug, Clone, Copy)]
pub struct Scene {
    pub primitive: Primitive,
    /// Frame counter value, used as the animation phase.
    pub frame: f32,
    radius: f32,
    field: PrimitiveField,
}

impl Scene {
    #[must_use]
    pub fn new(primitive: Primitive, frame: f32) -> Self {
        Self {
            primitive,
            frame,
            radius: 0.5 + 0.25 * (frame / 30.0).sin(),
            field: primitive_field(primitive),
        }
    }

    /// Radius of the pulsing sphere at this frame. Never clamped.
    #[must_use]
    pub fn sphere_radius(&self) -> f32 {
        self.radius
    }
}

impl SignedDistance for Scene {
    #[inline]
    fn distance(&self, pos: Vec3) -> f32 {
        (self.field)(repeat(pos, REPEAT_PERIOD), self.radius)
    }
}

/// Resolve `primitive` to its distance function.
#[must_use]
pub fn primitive_field(primitive: Primitive) -> PrimitiveField {
    match primitive {
        Primitive::Sphere => |p: Vec3, radius: f32| sphere(p, Vec3::ZERO, radius),
        Primitive::Cuboid => |p: Vec3, _: f32| cuboid(p, CUBOID_HALF_EXTENT, CUBOID_ROUNDNESS),
        Primitive::Cylinder => |p: Vec3, _: f32| cylinder(p, CYLINDER_RADIUS, CYLINDER_HALF_HEIGHT),
        Primitive::Mandelbulb => |p: Vec3, _: f32| mandelbulb(p),
    }
}

/// Fold `pos` into the cell of the lattice centred on the origin.
///
/// Equivalent to `mod(pos + period/2, period) - period/2`, written so points
/// already in the home cell come back bit-for-bit unchanged.
#[inline]
#[must_use]
pub fn repeat(pos: Vec3, period: Vec3) -> Vec3 {
    pos - period * ((pos + 0.5 * period) / period).floor()
}

#[inline]
#[must_use]
pub fn sphere(pos: Vec3, centre: Vec3, radius: f32) -> f32 {
    (pos - centre).length() - radius
}

#[inline]
#[must_use]
pub fn cuboid(pos: Vec3, half_extent: Vec3, roundness: f32) -> f32 {
    let q = pos.abs() - half_extent;
    q.max(Vec3::ZERO).length() + q.max_element().min(0.0) - roundness
}

#[inline]
#[must_use]
pub fn cylinder(pos: Vec3, radius: f32, half_height: f32) -> f32 {
    let d = Vec2::new(Vec2::new(pos.x, pos.z).length(), pos.y).abs()
        - Vec2::new(radius, half_height);
    d.x.max(d.y).min(0.0) + d.max(Vec2::ZERO).length()
}

/// Distance estimate for the power 8 bulb.
///
/// Undefined (NaN) exactly at the origin, where the polar angle has no
/// direction.
#[must_use]
pub fn mandelbulb(pos: Vec3) -> f32 {
    let power = MANDELBULB_POWER;
    let mut w = Vec3::new(pos.x, -pos.y, pos.z);
    let mut m = w.dot(w);
    let mut d = 1.0_f32;

    for _ in 0..MANDELBULB_ITERATIONS {
        d = power * m.powf(0.5 * (power - 1.0)) * d + 1.0;

        let r = w.length();
        let b = power * (w.y / r).acos();
        let a = power * w.x.atan2(w.z);
        w = pos + r.powf(power) * Vec3::new(b.sin() * a.sin(), b.cos(), b.sin() * a.cos());

        m = w.dot(w);
        if m > MANDELBULB_BAILOUT {
            break;
        }
    }

    0.25 * m.ln() * m.sqrt() / d
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn repeat_keeps_home_cell_untouched() {
        let p = Vec3::new(0.3, -1.2, 1.49);
        assert_eq!(repeat(p, REPEAT_PERIOD), p);
    }

    #[test]
    fn repeat_folds_neighbouring_cells() {
        let folded = repeat(Vec3::new(3.2, -2.0, 7.0), REPEAT_PERIOD);
        assert!((folded - Vec3::new(0.2, 1.0, 1.0)).length() < EPS);
    }

    #[test]
    fn sphere_radius_pulses_without_clamping() {
        assert!((Scene::new(Primitive::Sphere, 0.0).sphere_radius() - 0.5).abs() < EPS);
        let peak = Scene::new(Primitive::Sphere, 15.0 * std::f32::consts::PI);
        assert!((peak.sphere_radius() - 0.75).abs() < 1e-4);
        let trough = Scene::new(Primitive::Sphere, 45.0 * std::f32::consts::PI);
        assert!((trough.sphere_radius() - 0.25).abs() < 1e-4);
    }

    #[test]
    fn cuboid_distance_on_faces_and_inside() {
        let half = CUBOID_HALF_EXTENT;
        assert!(cuboid(Vec3::new(0.3, 0.0, 0.0), half, 0.0).abs() < EPS);
        assert!((cuboid(Vec3::new(1.0, 0.0, 0.0), half, 0.0) - 0.7).abs() < EPS);
        assert!((cuboid(Vec3::ZERO, half, 0.0) + 0.3).abs() < EPS);
        // corner region measures euclidean distance to the corner
        let corner = cuboid(Vec3::splat(0.4), half, 0.0);
        assert!((corner - Vec3::splat(0.1).length()).abs() < EPS);
    }

    #[test]
    fn cylinder_distance_on_side_and_cap() {
        assert!(cylinder(Vec3::new(0.2, 0.0, 0.0), 0.2, 0.6).abs() < EPS);
        assert!((cylinder(Vec3::new(0.0, 1.0, 0.0), 0.2, 0.6) - 0.4).abs() < EPS);
        assert!((cylinder(Vec3::new(0.0, 0.0, 0.5), 0.2, 0.6) - 0.3).abs() < EPS);
        assert!((cylinder(Vec3::ZERO, 0.2, 0.6) + 0.2).abs() < EPS);
    }

    #[test]
    fn mandelbulb_is_positive_far_away_and_negative_near_core() {
        assert!(mandelbulb(Vec3::new(0.0, 0.0, 1.4)) > 0.0);
        assert!(mandelbulb(Vec3::new(0.1, 0.2, 0.1)) < 0.0);
    }

    #[test]
    fn scene_dispatches_to_the_resolved_primitive() {
        let p = Vec3::new(3.4, -0.1, 5.8);
        let home = repeat(p, REPEAT_PERIOD);
        let radius = Scene::new(Primitive::Sphere, 20.0).sphere_radius();
        let cases = [
            (Primitive::Sphere, sphere(home, Vec3::ZERO, radius)),
            (Primitive::Cuboid, cuboid(home, CUBOID_HALF_EXTENT, CUBOID_ROUNDNESS)),
            (Primitive::Cylinder, cylinder(home, CYLINDER_RADIUS, CYLINDER_HALF_HEIGHT)),
            (Primitive::Mandelbulb, mandelbulb(home)),
        ];
        for (primitive, expected) in cases {
            let scene = Scene::new(primitive, 20.0);
            assert_eq!(scene.distance(p), expected, "{primitive}");
            assert_eq!(primitive_field(primitive)(home, radius), expected, "{primitive}");
        }
    }

    #[test]
    fn only_the_sphere_follows_the_frame() {
        let p = Vec3::new(0.9, 0.1, -0.2);
        for primitive in [Primitive::Cuboid, Primitive::Cylinder, Primitive::Mandelbulb] {
            let early = Scene::new(primitive, 0.0).distance(p);
            let late = Scene::new(primitive, 40.0).distance(p);
            assert_eq!(early, late, "{primitive}");
        }
        let early = Scene::new(Primitive::Sphere, 0.0).distance(p);
        let late = Scene::new(Primitive::Sphere, 40.0).distance(p);
        assert_ne!(early, late);
    }

    #[test]
    fn closures_act_as_fields() {
        let plane = |p: Vec3| p.y;
        assert_eq!(plane.distance(Vec3::new(4.0, 2.0, 0.0)), 2.0);
    }
}
