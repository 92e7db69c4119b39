//! Sphere tracing and the full per-pixel program.

use glam::{Vec2, Vec3, Vec4};

use crate::camera::{primary_ray, Ray};
use crate::config::SceneConfig;
use crate::frame::UniformSnapshot;
use crate::normal;
use crate::sdf::{Scene, SignedDistance};
use crate::shading;

/// Step budget per pixel.
pub const MAX_STEPS: u32 = 512;

/// A distance above this means the ray has left the scene.
pub const ESCAPE_DISTANCE: f32 = 1000.0;

/// A distance below this counts as touching the surface.
pub const HIT_DISTANCE: f32 = 2.5e-3;

/// Brightening per march step when highlights are on.
pub const HIGHLIGHT_SCALE: f32 = 150.0;

/// How a march ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarchOutcome {
    /// Came within [`HIT_DISTANCE`] of the surface at `position` on step `steps`.
    Hit { position: Vec3, steps: u32 },
    /// Distance exceeded [`ESCAPE_DISTANCE`] on step `steps`.
    Escaped { steps: u32 },
    /// Ran out of steps without resolving; `position` is where it stopped.
    Exhausted { position: Vec3 },
}

impl MarchOutcome {
    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, MarchOutcome::Hit { .. })
    }
}

/// March `ray` through `field` until it hits, escapes or uses up [`MAX_STEPS`].
#[must_use]
pub fn march<S: SignedDistance + ?Sized>(field: &S, ray: Ray) -> MarchOutcome {
    let mut current = ray.origin;

    for n in 0..MAX_STEPS {
        let dist = field.distance(current);

        if dist > ESCAPE_DISTANCE {
            return MarchOutcome::Escaped { steps: n };
        } else if dist < HIT_DISTANCE {
            return MarchOutcome::Hit {
                position: current,
                steps: n,
            };
        }
        current += ray.direction * dist;
    }

    MarchOutcome::Exhausted { position: current }
}

/// Colour a single fragment.
///
/// `ndc` is the interpolated quad position in `[-1, 1]^2` with `+y` up. Pixels
/// that exhaust the step budget keep the sky gradient, unhighlighted.
#[must_use]
pub fn shade_pixel(ndc: Vec2, uniforms: &UniformSnapshot, config: &SceneConfig) -> Vec4 {
    let scene = Scene::new(config.primitive, uniforms.frame);
    let ray = primary_ray(ndc, uniforms.resolution, uniforms.view);
    let sky = shading::background(ndc.y);

    let (color, steps) = match march(&scene, ray) {
        MarchOutcome::Hit { position, steps } => {
            let n = normal::estimate(&scene, position);
            (shading::shade(n, position, ray.direction), steps)
        }
        MarchOutcome::Escaped { steps } => (sky, steps),
        MarchOutcome::Exhausted { .. } => return sky,
    };

    if config.highlights {
        let glow = steps as f32 / HIGHLIGHT_SCALE;
        (color.truncate() + Vec3::splat(glow)).extend(color.w)
    } else {
        color
    }
}
