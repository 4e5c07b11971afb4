use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A sound command emitted by the game logic.
/// The numeric value maps to a command the browser's audio layer understands
/// (see `SoundDescriptor::play_event` / `pause_event` in the asset manifest).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// A game-defined action raised when a clickable entity is hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClickAction(pub u32);

/// A game event communicated from Rust to the browser layer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    /// Flat `[kind, a, b, c, ...]` view of a run of events.
    pub fn as_floats(events: &[GameEvent]) -> &[f32] {
        bytemuck::cast_slice(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }

    #[test]
    fn events_flatten_in_order() {
        let events = [GameEvent::new(1.0, 2.0, 3.0, 4.0), GameEvent::new(5.0, 0.0, 0.0, 0.0)];
        assert_eq!(GameEvent::as_floats(&events)[..5], [1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
