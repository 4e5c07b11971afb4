/// Heart trail shown while the greeting is open.
///
/// Hearts are spawned from pointer movement, throttled to one per
/// `THROTTLE_MS`, and each carries its own removal deadline. Removal is a
/// queue of `(due_ms, id)` pairs: clearing drops the hearts but leaves the
/// queue alone, so a removal that fires after a clear finds nothing and does
/// nothing.

use std::collections::VecDeque;

use orrery_engine::{ease, Easing, HeartBuffer, HeartInstance, Rng};

pub const HEART_EMOJIS: [&str; 8] = ["💖", "💕", "💗", "💝", "❤️", "💓", "💞", "💟"];

/// Minimum spacing between two spawns.
pub const THROTTLE_MS: f64 = 100.0;
/// Time from spawn to removal.
pub const LIFETIME_MS: f64 = 2000.0;

/// Screen pixels a heart floats up over its lifetime.
const RISE_PX: f32 = 60.0;
const END_SCALE: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartParticle {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    /// Index into `HEART_EMOJIS`.
    pub emoji: usize,
    pub born_ms: f64,
}

impl HeartParticle {
    pub fn glyph(&self) -> &'static str {
        HEART_EMOJIS[self.emoji % HEART_EMOJIS.len()]
    }

    /// Normalized age in [0, 1].
    pub fn age(&self, now_ms: f64) -> f32 {
        ((now_ms - self.born_ms) / LIFETIME_MS).clamp(0.0, 1.0) as f32
    }
}

#[derive(Debug, Default)]
pub struct HeartField {
    hearts: Vec<HeartParticle>,
    removals: VecDeque<(f64, u64)>,
    next_id: u64,
    last_spawn_ms: Option<f64>,
}

impl HeartField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a heart at `(x, y)` unless one was spawned less than
    /// `THROTTLE_MS` ago. Returns the new heart's id.
    pub fn spawn(&mut self, x: f32, y: f32, now_ms: f64, rng: &mut Rng) -> Option<u64> {
        if !(x.is_finite() && y.is_finite()) {
            log::debug!("heart ignored: pointer at {x}, {y}");
            return None;
        }
        if let Some(last) = self.last_spawn_ms {
            if now_ms - last < THROTTLE_MS {
                return None;
            }
        }
        self.last_spawn_ms = Some(now_ms);

        let id = self.next_id;
        self.next_id += 1;
        let emoji = rng.next_int(HEART_EMOJIS.len() as u32) as usize;
        self.hearts.push(HeartParticle { id, x, y, emoji, born_ms: now_ms });
        self.removals.push_back((now_ms + LIFETIME_MS, id));
        Some(id)
    }

    /// Run every removal due at or before `now_ms`.
    pub fn expire(&mut self, now_ms: f64) -> usize {
        let mut removed = 0;
        while let Some(&(due, id)) = self.removals.front() {
            if due > now_ms {
                break;
            }
            self.removals.pop_front();
            if let Some(idx) = self.hearts.iter().position(|h| h.id == id) {
                self.hearts.remove(idx);
                removed += 1;
            }
        }
        removed
    }

    /// Drop every visible heart. Pending removals stay queued.
    pub fn clear(&mut self) {
        self.hearts.clear();
    }

    pub fn len(&self) -> usize {
        self.hearts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hearts.is_empty()
    }

    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeartParticle> {
        self.hearts.iter()
    }

    /// Write one instance per heart: rising, fading and growing with age.
    pub fn write_instances(&self, now_ms: f64, out: &mut HeartBuffer) {
        for heart in &self.hearts {
            let age = heart.age(now_ms);
            out.push(HeartInstance {
                x: heart.x,
                y: heart.y - ease(0.0, RISE_PX, age, Easing::CubicOut),
                emoji: heart.emoji as f32,
                alpha: 1.0 - Easing::QuadIn.apply(age),
                scale: ease(1.0, END_SCALE, age, Easing::Linear),
                age,
                ..Default::default()
            });
        }
    }
}
