//! Host-side per-frame state
//!
//! [`RenderState`] is owned by the frame driver. Input handling mutates its
//! [`Interaction`]; once per frame it is copied into an immutable
//! [`UniformSnapshot`] for upload, then the frame counter advances.

use glam::{Mat4, Vec2};

use crate::interaction::{Interaction, PointerEvent};

/// Monotonic frame index, used only as an animation phase.
///
/// The phase advances once per presented frame, so animation speed follows the
/// display refresh rate.
// TODO: derive the phase from elapsed wall-clock time for variable refresh displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FrameCounter(u64);

impl FrameCounter {
    #[must_use]
    pub fn new(start: u64) -> Self {
        Self(start)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    /// Phase as uploaded to the GPU. Loses integer precision past 2^24 frames.
    #[must_use]
    pub fn phase(self) -> f32 {
        self.0 as f32
    }

    pub fn advance(&mut self) {
        self.0 += 1;
    }
}

/// Value copy of everything the fragment program reads in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSnapshot {
    pub resolution: Vec2,
    pub frame: f32,
    pub mouse: Vec2,
    pub mouse_delta: Vec2,
    pub view: Mat4,
}

impl Default for UniformSnapshot {
    fn default() -> Self {
        Self {
            resolution: Vec2::new(800.0, 600.0),
            frame: 0.0,
            mouse: Vec2::ZERO,
            mouse_delta: Vec2::ZERO,
            view: Mat4::IDENTITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// Drawable size in physical pixels.
    pub resolution: Vec2,
    pub frame: FrameCounter,
    pub interaction: Interaction,
}

impl RenderState {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: Vec2::new(width as f32, height as f32),
            frame: FrameCounter::default(),
            interaction: Interaction::default(),
        }
    }

    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.resolution = Vec2::new(width as f32, height as f32);
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.interaction.handle(event);
    }

    #[must_use]
    pub fn snapshot(&self) -> UniformSnapshot {
        let pointer = &self.interaction.pointer;
        UniformSnapshot {
            resolution: self.resolution,
            frame: self.frame.phase(),
            mouse: pointer.position,
            mouse_delta: pointer.delta,
            view: self.interaction.view.matrix(),
        }
    }

    /// Snapshot the current state for upload and move on to the next frame.
    pub fn begin_frame(&mut self) -> UniformSnapshot {
        let snapshot = self.snapshot();
        self.frame.advance();
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_start_at_zero_and_count_up() {
        let mut state = RenderState::new(800, 600);
        let first = state.begin_frame();
        let second = state.begin_frame();
        assert_eq!(first.frame, 0.0);
        assert_eq!(second.frame, 1.0);
        assert_eq!(state.frame.get(), 2);
    }

    #[test]
    fn counter_is_not_bounded_by_u32() {
        let mut counter = FrameCounter::new(u64::from(u32::MAX));
        counter.advance();
        assert_eq!(counter.get(), u64::from(u32::MAX) + 1);
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut state = RenderState::new(640, 480);
        state.handle_pointer(PointerEvent::Down(Vec2::ZERO));
        let before = state.snapshot();

        state.handle_pointer(PointerEvent::Move(Vec2::new(90.0, 0.0)));
        state.set_resolution(1280, 960);

        assert_eq!(before.view, Mat4::IDENTITY);
        assert_eq!(before.resolution, Vec2::new(640.0, 480.0));
        let after = state.snapshot();
        assert_eq!(after.mouse, Vec2::new(90.0, 0.0));
        assert_eq!(after.mouse_delta, Vec2::new(90.0, 0.0));
        assert_ne!(after.view, before.view);
    }

    #[test]
    fn default_snapshot_is_the_reference_frame() {
        let snapshot = RenderState::new(800, 600).snapshot();
        assert_eq!(snapshot, UniformSnapshot::default());
    }
}
