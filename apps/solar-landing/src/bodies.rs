/// Celestial body table: the sun and eight planets.
///
/// Sizes, speeds and orbit radii are decorative, chosen for a readable
/// landing page rather than physical accuracy.

use glam::Vec3;
use orrery_engine::{ClickAction, SDFColor};

/// Raised when Earth is clicked; opens the greeting.
pub const ACTION_OPEN_GREETING: ClickAction = ClickAction(1);

/// Authored constants for one body.
#[derive(Debug, Clone, Copy)]
pub struct CelestialBodyConfig {
    pub name: &'static str,
    /// Second label drawn above the name.
    pub nickname: Option<&'static str>,
    /// Base offset inside the body's group. Only `y` survives orbiting.
    pub position: Vec3,
    pub radius: f32,
    pub color: SDFColor,
    /// Angular speed in radians per second.
    pub speed: f32,
    pub orbit_radius: f32,
    /// Glow in the body's own color.
    pub emissive: bool,
    pub on_click: Option<ClickAction>,
}

impl CelestialBodyConfig {
    const fn planet(name: &'static str, radius: f32, color: u32, speed: f32, orbit_radius: f32) -> Self {
        Self {
            name,
            nickname: None,
            position: Vec3::ZERO,
            radius,
            color: SDFColor::hex(color),
            speed,
            orbit_radius,
            emissive: false,
            on_click: None,
        }
    }
}

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_NAME: &str = "Sun";
pub const SUN_RADIUS: f32 = 1.5;
pub const SUN_COLOR: SDFColor = SDFColor::hex(0xFFD700);
pub const SUN_EMISSIVE_COLOR: SDFColor = SDFColor::hex(0xFFA500);
pub const SUN_EMISSIVE: f32 = 1.0;
pub const SUN_GLOW_RADIUS: f32 = 1.7;
pub const SUN_GLOW_OPACITY: f32 = 0.3;
pub const SUN_LABEL_OFFSET: Vec3 = Vec3::new(0.0, 2.5, 0.0);

// ── Planets ──────────────────────────────────────────────────────────

pub const PLANET_COUNT: usize = 8;
pub const EARTH: usize = 2;

pub const PLANETS: [CelestialBodyConfig; PLANET_COUNT] = [
    CelestialBodyConfig::planet("Mercury", 0.15, 0x8C7853, 0.1, 3.0),
    CelestialBodyConfig::planet("Venus", 0.1, 0xFFC649, 0.2, 4.5),
    CelestialBodyConfig {
        nickname: Some("ENTER"),
        on_click: Some(ACTION_OPEN_GREETING),
        ..CelestialBodyConfig::planet("Earth", 0.25, 0x6B93D6, 0.2, 6.0)
    },
    CelestialBodyConfig::planet("Mars", 0.2, 0xC1440E, 0.3, 7.5),
    CelestialBodyConfig::planet("Jupiter", 0.6, 0xD8CA9D, 0.3, 10.0),
    CelestialBodyConfig::planet("Saturn", 0.5, 0xFAD5A5, 0.28, 12.5),
    CelestialBodyConfig::planet("Uranus", 0.35, 0x4FD0E7, 0.28, 15.0),
    CelestialBodyConfig::planet("Neptune", 0.35, 0x4B70DD, 0.29, 17.5),
];

/// Emissive intensity for bodies flagged `emissive`.
pub const BODY_GLOW: f32 = 0.5;

// ── Labels ───────────────────────────────────────────────────────────

/// Name label height above the body surface.
pub const NAME_LABEL_GAP: f32 = 0.5;
/// Nickname label height above the body surface.
pub const NICKNAME_LABEL_GAP: f32 = 0.9;
pub const NICKNAME_OPACITY: f32 = 0.9;

// ── Orbit rings ──────────────────────────────────────────────────────

pub const RING_WIDTH: f32 = 0.2;
pub const RING_SEGMENTS: u32 = 64;
pub const RING_OPACITY: f32 = 0.2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_earth_is_clickable() {
        let clickable: Vec<&str> = PLANETS
            .iter()
            .filter(|p| p.on_click.is_some())
            .map(|p| p.name)
            .collect();
        assert_eq!(clickable, vec!["Earth"]);
        assert_eq!(PLANETS[EARTH].nickname, Some("ENTER"));
    }

    #[test]
    fn orbits_are_ordered_and_clear_the_sun() {
        let mut last = SUN_GLOW_RADIUS;
        for p in &PLANETS {
            assert!(p.orbit_radius > last, "{}", p.name);
            last = p.orbit_radius;
        }
    }

    #[test]
    fn colors_decode() {
        let earth = PLANETS[EARTH].color;
        assert!((earth.r - 0x6B as f32 / 255.0).abs() < 1e-6);
        assert!((earth.b - 0xD6 as f32 / 255.0).abs() < 1e-6);
    }
}
