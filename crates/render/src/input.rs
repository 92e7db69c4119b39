//! Translation of winit window events into orbit pointer events.
//!
//! Mouse and the first touch contact are folded into a single stream of
//! [`PointerEvent`]s in logical pixels, so drag speed is the same on every
//! pixel density.

use march::{PointerEvent, Vec2};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, Touch, TouchPhase, WindowEvent};

#[derive(Debug, Default)]
pub struct PointerInput {
    cursor: Vec2,
    active_touch: Option<u64>,
}

fn logical(position: PhysicalPosition<f64>, scale_factor: f64) -> Vec2 {
    let logical = position.to_logical::<f64>(scale_factor);
    Vec2::new(logical.x as f32, logical.y as f32)
}

impl PointerInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a window event to a pointer event, if it is one.
    pub fn translate(&mut self, event: &WindowEvent, scale_factor: f64) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = logical(*position, scale_factor);
                Some(PointerEvent::Move(self.cursor))
            }
            WindowEvent::MouseInput { state, .. } => Some(match state {
                ElementState::Pressed => PointerEvent::Down(self.cursor),
                ElementState::Released => PointerEvent::Up,
            }),
            WindowEvent::Touch(touch) => self.touch(touch, scale_factor),
            _ => None,
        }
    }

    fn touch(&mut self, touch: &Touch, scale_factor: f64) -> Option<PointerEvent> {
        let at = logical(touch.location, scale_factor);
        match (touch.phase, self.active_touch) {
            (TouchPhase::Started, None) => {
                self.active_touch = Some(touch.id);
                Some(PointerEvent::Down(at))
            }
            (TouchPhase::Moved, Some(id)) if id == touch.id => Some(PointerEvent::Move(at)),
            (TouchPhase::Ended | TouchPhase::Cancelled, Some(id)) if id == touch.id => {
                self.active_touch = None;
                Some(PointerEvent::Up)
            }
            _ => None,
        }
    }
}
