/// Circular orbit math in the XZ plane. Pure functions, no engine state.
///
/// Angles accumulate in f64 so long sessions don't lose precision; the
/// result drops to f32 only at the end.

use glam::Vec3;

/// Planet spin per fixed tick, radians.
pub const PLANET_SPIN: f32 = 0.01;
/// Sun spin per fixed tick, radians.
pub const SUN_SPIN: f32 = 0.005;

/// Position on a circle of `radius` at `elapsed` seconds for angular
/// `speed` (rad/s). `y` is carried through unchanged.
pub fn orbit_position(elapsed: f64, speed: f32, radius: f32, y: f32) -> Vec3 {
    let angle = elapsed * speed as f64;
    let (sin, cos) = angle.sin_cos();
    Vec3::new(
        (cos * radius as f64) as f32,
        y,
        (sin * radius as f64) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_positive_x() {
        let p = orbit_position(0.0, 0.2, 6.0, 0.0);
        assert!((p.x - 6.0).abs() < 1e-6);
        assert!(p.z.abs() < 1e-6);
    }

    #[test]
    fn stays_on_circle() {
        for (speed, radius) in [(0.1, 3.0), (0.2, 6.0), (0.29, 17.5)] {
            for i in 0..200 {
                let t = i as f64 * 7.3;
                let p = orbit_position(t, speed, radius, 0.0);
                let r2 = p.x * p.x + p.z * p.z;
                assert!((r2 - radius * radius).abs() < 1e-3 * radius * radius, "t={t}");
            }
        }
    }

    #[test]
    fn quarter_turn_reaches_positive_z() {
        let speed = 0.5;
        let t = std::f64::consts::FRAC_PI_2 / speed as f64;
        let p = orbit_position(t, speed, 4.0, 1.25);
        assert!(p.x.abs() < 1e-4);
        assert!((p.z - 4.0).abs() < 1e-4);
        assert_eq!(p.y, 1.25);
    }

    #[test]
    fn long_sessions_stay_precise() {
        let p = orbit_position(86_400.0 * 30.0, 0.3, 10.0, 0.0);
        assert!(((p.x * p.x + p.z * p.z).sqrt() - 10.0).abs() < 1e-4);
    }
}
