//! Background starfield: points scattered through a spherical shell
//! around the origin, projected every frame with a slow size pulse.

use glam::Vec3;

use crate::renderer::camera::OrbitCamera;
use crate::renderer::instance::{StarBuffer, StarInstance};
use crate::systems::rng::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldConfig {
    /// Inner radius of the shell.
    pub radius: f32,
    /// Shell thickness; stars fill `radius..radius + depth`.
    pub depth: f32,
    pub count: usize,
    /// Base point size multiplier.
    pub factor: f32,
    /// Soft round points instead of hard squares.
    pub fade: bool,
    /// Pulse speed multiplier applied to scene time.
    pub speed: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            depth: 50.0,
            count: 5000,
            factor: 4.0,
            fade: false,
            speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Star {
    pos: Vec3,
    size: f32,
}

/// Star brightness; stars are unsaturated so this is the gray level.
const STAR_LIGHTNESS: f32 = 0.9;
/// Reference depth at which a star draws at its base size.
const SIZE_ATTENUATION: f32 = 30.0;

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    config: StarfieldConfig,
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(config: StarfieldConfig, rng: &mut Rng) -> Self {
        let mut field = Self { config, stars: Vec::new() };
        field.regenerate(rng);
        field
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Change the star count, regenerating only when it differs.
    pub fn set_count(&mut self, count: usize, rng: &mut Rng) {
        if count != self.config.count || count != self.stars.len() {
            self.config.count = count;
            self.regenerate(rng);
        }
    }

    /// Scatter stars from the outer edge inward so the shell stays filled
    /// regardless of count.
    fn regenerate(&mut self, rng: &mut Rng) {
        let StarfieldConfig { radius, depth, count, factor, .. } = self.config;
        self.stars.clear();
        self.stars.reserve(count);
        if count == 0 {
            return;
        }
        let increment = depth / count as f32;
        let mut r = radius + depth;
        for _ in 0..count {
            r -= increment * rng.next_f32();
            let polar = (1.0 - rng.next_f32() * 2.0).clamp(-1.0, 1.0).acos();
            let azimuth = rng.next_f32() * std::f32::consts::TAU;
            let pos = Vec3::new(
                r * polar.sin() * azimuth.sin(),
                r * polar.cos(),
                r * polar.sin() * azimuth.cos(),
            );
            let size = (0.5 + 0.5 * rng.next_f32()) * factor;
            self.stars.push(Star { pos, size });
        }
    }

    /// Project every visible star into `buffer`.
    /// `elapsed` is scene time in seconds and drives the size pulse.
    pub fn project(&self, camera: &OrbitCamera, elapsed: f32, buffer: &mut StarBuffer) {
        let pulse = 3.0 + (elapsed * self.config.speed + 100.0).sin();
        for star in &self.stars {
            let Some(p) = camera.project(star.pos) else { continue };
            let size = star.size * (SIZE_ATTENUATION / p.depth) * pulse;
            if !buffer.push(StarInstance {
                x: p.pos.x,
                y: p.pos.y,
                size,
                alpha: STAR_LIGHTNESS,
            }) {
                break;
            }
        }
    }
}
