// extensions/easing.rs
//
// Easing curves for short-lived UI animations (heart trails).
// Pure math, no Entity/Scene dependencies.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Stronger slow end.
    CubicOut,
}

impl Easing {
    /// Apply the curve to a normalized time `t` (clamped to [0, 1]).
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 3] = [Easing::Linear, Easing::QuadIn, Easing::CubicOut];

    #[test]
    fn endpoints_are_fixed() {
        for e in ALL {
            assert!(e.apply(0.0).abs() < 1e-6, "{e:?} at 0");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{e:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-2.0), 0.0);
        assert_eq!(Easing::CubicOut.apply(5.0), 1.0);
    }

    #[test]
    fn ease_out_leads_linear() {
        assert!(Easing::CubicOut.apply(0.3) > Easing::Linear.apply(0.3));
        assert!(Easing::QuadIn.apply(0.3) < Easing::Linear.apply(0.3));
        assert!((ease(10.0, 20.0, 0.5, Easing::Linear) - 15.0).abs() < 1e-6);
    }
}
