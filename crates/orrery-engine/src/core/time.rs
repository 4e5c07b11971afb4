/// Fixed timestep accumulator.
/// Ensures scene logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    /// Upper bound on catch-up steps per frame (prevents the spiral of death).
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        self.accumulator = self.accumulator.min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Scene clock.
///
/// Tracks two timelines:
/// - `elapsed`: simulation seconds, advanced once per fixed tick. Orbit
///   positions are a pure function of this value, so freezing it pauses
///   every body and `restart` sends them all back to their start angle.
/// - `now_ms`: monotonic wall time in milliseconds, advanced by real frame
///   time. Used for input throttling and timed removals.
#[derive(Debug, Clone, Default)]
pub struct SceneClock {
    elapsed: f64,
    now_ms: f64,
    frozen: bool,
}

impl SceneClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance simulation time by one fixed tick (no-op while frozen).
    pub fn tick(&mut self, dt: f32) {
        if !self.frozen {
            self.elapsed += dt as f64;
        }
    }

    /// Advance wall time by a real frame delta in seconds.
    pub fn advance_wall(&mut self, frame_dt: f32) {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.now_ms += frame_dt as f64 * 1000.0;
        }
    }

    /// Simulation seconds since start.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Wall milliseconds since start.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn resume(&mut self) {
        self.frozen = false;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Reset simulation time to zero. Wall time keeps running.
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0 / 60.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), 10);
    }

    #[test]
    fn ignores_negative_and_nan_frames() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(f32::NAN), 0);
        assert_eq!(ts.accumulate(0.010), 0);
    }

    #[test]
    fn frozen_clock_keeps_wall_time() {
        let mut clock = SceneClock::new();
        clock.tick(0.5);
        clock.freeze();
        clock.tick(0.5);
        clock.advance_wall(0.25);
        assert!((clock.elapsed() - 0.5).abs() < 1e-9);
        assert!((clock.now_ms() - 250.0).abs() < 1e-6);

        clock.resume();
        clock.tick(0.5);
        assert!((clock.elapsed() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn restart_zeroes_simulation_time() {
        let mut clock = SceneClock::new();
        clock.tick(3.0);
        clock.advance_wall(1.0);
        clock.restart();
        assert_eq!(clock.elapsed(), 0.0);
        assert!((clock.now_ms() - 1000.0).abs() < 1e-6);
    }
}
