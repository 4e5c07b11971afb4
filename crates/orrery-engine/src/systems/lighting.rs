/// Scene lights for the 3D sphere pass.
///
/// Lights are persistent: they stay until explicitly removed.
/// Each frame, the engine serializes them to the SAB for the renderer's
/// shading pass. Ambient light travels in the header, not the light list.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::components::mesh::SDFColor;

/// Light kind tag in the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Emits from `position` in every direction.
    Point = 0,
    /// Parallel rays arriving from `position` toward the origin.
    Directional = 1,
}

/// A light in world space.
///
/// Wire format (8 floats / 32 bytes):
/// `[kind, x, y, z, r, g, b, intensity]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Light {
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
}

impl Light {
    pub fn point(pos: Vec3, color: SDFColor, intensity: f32) -> Self {
        Self::new(LightKind::Point, pos, color, intensity)
    }

    /// Directional light shining from `from` toward the origin.
    pub fn directional(from: Vec3, color: SDFColor, intensity: f32) -> Self {
        Self::new(LightKind::Directional, from, color, intensity)
    }

    fn new(kind: LightKind, pos: Vec3, color: SDFColor, intensity: f32) -> Self {
        Self {
            kind: kind as u8 as f32,
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
        }
    }

    pub fn kind(&self) -> LightKind {
        if self.kind >= 0.5 {
            LightKind::Directional
        } else {
            LightKind::Point
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Uniform light applied to every surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: SDFColor,
    pub intensity: f32,
}

impl AmbientLight {
    /// Color premultiplied by intensity, as the shader consumes it.
    pub fn rgb(&self) -> [f32; 3] {
        [
            self.color.r * self.intensity,
            self.color.g * self.intensity,
            self.color.b * self.intensity,
        ]
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        // Full white: unlit output when no lights are present.
        Self { color: SDFColor::WHITE, intensity: 1.0 }
    }
}

/// Manages active lights and ambient color for the scene.
pub struct LightState {
    lights: Vec<Light>,
    capacity: usize,
    ambient: AmbientLight,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(crate::bridge::protocol::DEFAULT_MAX_LIGHTS)
    }

    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            capacity: max_lights,
            ambient: AmbientLight::default(),
        }
    }

    /// Add a light. Ignored (with a warning) once the wire section is full.
    pub fn add(&mut self, light: Light) {
        if self.lights.len() >= self.capacity {
            log::warn!("light capacity {} reached, light dropped", self.capacity);
            return;
        }
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    pub fn retain<F: FnMut(&Light) -> bool>(&mut self, f: F) {
        self.lights.retain(f);
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, color: SDFColor, intensity: f32) {
        self.ambient = AmbientLight { color, intensity };
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }

    /// Pointer to the lights data for SAB serialization.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.lights)
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
