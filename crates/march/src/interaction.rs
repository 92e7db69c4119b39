//! Pointer driven orbit controller
//!
//! Dragging rotates the view about an axis perpendicular to the drag direction,
//! by an angle proportional to the drag length. Rotations are composed as unit
//! quaternions so the view never picks up scale or shear, however long the
//! session runs. There is no inertia: the view stops when the drag stops.
//!
//! The controller is a pure transition function over [`PointerEvent`]s so it
//! can be driven by any input backend, or directly from tests.

use glam::{Mat4, Quat, Vec2, Vec3};
use tracing::debug;

/// Axis crossed with the drag vector to get the orbit axis.
pub const ORBIT_RIGHT: Vec3 = Vec3::Z;

/// Drag length, in logical pixels, that produces one radian of rotation.
pub const PIXELS_PER_RADIAN: f32 = 300.0;

/// A unified mouse / first-touch event in logical pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
}

/// Pointer bookkeeping shared with the GPU as `mouse` / `mouse_delta`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub position: Vec2,
    pub previous: Vec2,
    pub delta: Vec2,
    pub dragging: bool,
}

/// Accumulated camera orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    orientation: Quat,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            orientation: Quat::IDENTITY,
        }
    }
}

impl ViewState {
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// The view matrix uploaded to the GPU.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation)
    }

    /// Post-multiply the view by a rotation of `angle` radians about `axis`.
    ///
    /// A degenerate axis leaves the view unchanged.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        self.orientation = (self.orientation * Quat::from_axis_angle(axis, angle)).normalize();
    }
}

/// Orbit axis and angle for a drag of `delta` screen pixels.
///
/// Screen `y` grows downwards, so it is flipped before crossing.
#[must_use]
pub fn orbit_rotation(delta: Vec2) -> (Vec3, f32) {
    let ds = Vec3::new(delta.x, -delta.y, 0.0);
    (ORBIT_RIGHT.cross(ds), ds.length() / PIXELS_PER_RADIAN)
}

/// Idle/dragging state machine over the pointer and the view it steers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Interaction {
    pub pointer: PointerState,
    pub view: ViewState,
}

impl Interaction {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.pointer.dragging
    }

    /// Apply one event and return the next state.
    #[must_use]
    pub fn transition(mut self, event: PointerEvent) -> Self {
        match event {
            PointerEvent::Down(at) => {
                if !self.pointer.dragging {
                    debug!(x = at.x, y = at.y, "orbit drag started");
                }
                self.pointer.dragging = true;
                self.pointer.position = at;
                self.pointer.previous = at;
            }
            PointerEvent::Move(at) if self.pointer.dragging => {
                self.pointer.position = at;
                self.pointer.delta = at - self.pointer.previous;
                self.pointer.previous = at;

                let (axis, angle) = orbit_rotation(self.pointer.delta);
                self.view.rotate(axis, angle);
            }
            PointerEvent::Move(_) => {}
            PointerEvent::Up => {
                if self.pointer.dragging {
                    debug!("orbit drag ended");
                }
                self.pointer.dragging = false;
                self.pointer.delta = Vec2::ZERO;
            }
        }
        self
    }

    /// In-place form of [`Interaction::transition`] for event callbacks.
    pub fn handle(&mut self, event: PointerEvent) {
        *self = self.transition(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rotation(m: Mat4) {
        assert!((m.determinant() - 1.0).abs() < 1e-4, "det {}", m.determinant());
        let cols = [m.x_axis.truncate(), m.y_axis.truncate(), m.z_axis.truncate()];
        for c in cols {
            assert!((c.length() - 1.0).abs() < 1e-4);
        }
        assert!(cols[0].dot(cols[1]).abs() < 1e-4);
        assert!(cols[1].dot(cols[2]).abs() < 1e-4);
        assert!(cols[0].dot(cols[2]).abs() < 1e-4);
    }

    #[test]
    fn horizontal_drag_yaws_about_y() {
        let state = Interaction::default()
            .transition(PointerEvent::Down(Vec2::ZERO))
            .transition(PointerEvent::Move(Vec2::new(100.0, 0.0)));

        assert_eq!(state.pointer.delta, Vec2::new(100.0, 0.0));
        let (axis, angle) = orbit_rotation(state.pointer.delta);
        assert_eq!(axis, Vec3::new(0.0, 100.0, 0.0));
        assert!((angle - 100.0 / 300.0).abs() < 1e-6);

        let expected = Mat4::from_axis_angle(Vec3::Y, 100.0 / 300.0);
        assert!(state.view.matrix().abs_diff_eq(expected, 1e-6));
        assert_rotation(state.view.matrix());
    }

    #[test]
    fn vertical_drag_pitches_about_x() {
        let (axis, _) = orbit_rotation(Vec2::new(0.0, 50.0));
        assert_eq!(axis, Vec3::new(50.0, 0.0, 0.0));
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let state = Interaction::default().transition(PointerEvent::Move(Vec2::new(40.0, 12.0)));
        assert_eq!(state, Interaction::default());
    }

    #[test]
    fn release_stops_rotation_until_next_press() {
        let mut state = Interaction::default();
        for event in [
            PointerEvent::Down(Vec2::new(10.0, 10.0)),
            PointerEvent::Move(Vec2::new(30.0, 15.0)),
            PointerEvent::Move(Vec2::new(60.0, 40.0)),
            PointerEvent::Up,
        ] {
            state.handle(event);
        }
        assert!(!state.is_dragging());
        assert_eq!(state.pointer.delta, Vec2::ZERO);

        let released_view = state.view;
        state.handle(PointerEvent::Move(Vec2::new(500.0, 500.0)));
        assert_eq!(state.view, released_view);

        // a fresh press measures from the new point, not the old one
        state.handle(PointerEvent::Down(Vec2::new(500.0, 500.0)));
        state.handle(PointerEvent::Move(Vec2::new(503.0, 500.0)));
        assert_eq!(state.pointer.delta, Vec2::new(3.0, 0.0));
        assert_ne!(state.view, released_view);
    }

    #[test]
    fn zero_length_move_keeps_view() {
        let state = Interaction::default()
            .transition(PointerEvent::Down(Vec2::splat(5.0)))
            .transition(PointerEvent::Move(Vec2::splat(5.0)));
        assert_eq!(state.view, ViewState::default());
        assert!(state.is_dragging());
    }

    #[test]
    fn long_sessions_stay_orthonormal() {
        let mut state = Interaction::default();
        state.handle(PointerEvent::Down(Vec2::ZERO));
        let mut at = Vec2::ZERO;
        for i in 0..5_000 {
            let t = i as f32 * 0.37;
            at += Vec2::new(t.sin() * 7.0, t.cos() * 5.0);
            state.handle(PointerEvent::Move(at));
        }
        assert_rotation(state.view.matrix());
    }
}
