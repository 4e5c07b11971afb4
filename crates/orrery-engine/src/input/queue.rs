/// Input event types the engine understands.
/// Coordinates are CSS pixels relative to the canvas, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began. `button` follows the DOM convention
    /// (0 = primary, 1 = middle, 2 = secondary).
    PointerDown { x: f32, y: f32, button: u8 },
    /// A touch/click ended.
    PointerUp { x: f32, y: f32 },
    /// The cursor moved.
    PointerMove { x: f32, y: f32 },
    /// Wheel scroll; positive values scroll away from the viewer.
    Wheel { delta: f32 },
    /// The canvas changed size.
    Resize { width: f32, height: f32 },
    /// A custom event from the UI layer (modal buttons, audio element, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0, button: 0 });
        q.push(InputEvent::Wheel { delta: -3.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn custom_event() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 });
        let events = q.drain();
        assert_eq!(events, vec![InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 }]);
    }
}
