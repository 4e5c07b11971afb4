//! Pointer gesture tracking: turns raw down/move/up events into orbit
//! camera drags, wheel zoom, and clicks.

use glam::Vec2;

use crate::input::queue::InputEvent;
use crate::renderer::camera::OrbitCamera;

/// Which drag gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    None,
    Rotate,
    Pan,
}

impl DragMode {
    pub fn from_button(button: u8) -> Self {
        match button {
            0 => DragMode::Rotate,
            1 | 2 => DragMode::Pan,
            _ => DragMode::None,
        }
    }
}

/// Movement (in pixels) beyond which a press no longer counts as a click.
pub const CLICK_SLOP_PX: f32 = 5.0;

#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    mode: DragMode,
    last: Vec2,
    down_at: Option<Vec2>,
    travelled: f32,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// Feed one event. Camera gestures are queued on `camera`; returns the
    /// release position when the press/release pair was a click.
    pub fn feed(&mut self, event: &InputEvent, camera: &mut OrbitCamera) -> Option<Vec2> {
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                let p = Vec2::new(x, y);
                self.mode = DragMode::from_button(button);
                self.last = p;
                self.down_at = (button == 0).then_some(p);
                self.travelled = 0.0;
                None
            }
            InputEvent::PointerMove { x, y } => {
                let p = Vec2::new(x, y);
                let delta = p - self.last;
                self.last = p;
                self.travelled += delta.length();
                match self.mode {
                    DragMode::Rotate => camera.rotate(delta.x, delta.y),
                    DragMode::Pan => camera.pan(delta.x, delta.y),
                    DragMode::None => {}
                }
                None
            }
            InputEvent::PointerUp { x, y } => {
                self.mode = DragMode::None;
                let up = Vec2::new(x, y);
                let click = self
                    .down_at
                    .take()
                    .filter(|down| self.travelled <= CLICK_SLOP_PX && down.distance(up) <= CLICK_SLOP_PX);
                click.map(|_| up)
            }
            InputEvent::Wheel { delta } => {
                camera.zoom(delta);
                None
            }
            _ => None,
        }
    }

    /// Forget any gesture in progress (e.g. when a modal takes the pointer).
    pub fn cancel(&mut self) {
        self.mode = DragMode::None;
        self.down_at = None;
        self.travelled = 0.0;
    }
}
