/// RGB color for SDF rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SDFColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl SDFColor {
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as f32 / 255.0,
            g: ((rgb >> 8) & 0xFF) as f32 / 255.0,
            b: (rgb & 0xFF) as f32 / 255.0,
        }
    }
}

impl Default for SDFColor {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// SDF shape primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SDFShape {
    Sphere { radius: f32 },
}

/// Component for SDF-rendered meshes (raymarched spheres).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: SDFShape,
    pub color: SDFColor,
    /// Color of the self-illumination term.
    pub emissive_color: SDFColor,
    /// Glow multiplier (default: 0.0, no glow).
    pub emissive: f32,
    /// Phong specular exponent (default: 32.0).
    pub shininess: f32,
    /// 1.0 = opaque. Translucent meshes are drawn unlit (glow shells).
    pub opacity: f32,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: SDFShape::Sphere { radius: 1.0 },
            color: SDFColor::default(),
            emissive_color: SDFColor::BLACK,
            emissive: 0.0,
            shininess: 32.0,
            opacity: 1.0,
        }
    }
}

impl MeshComponent {
    pub fn new(shape: SDFShape, color: SDFColor) -> Self {
        Self {
            shape,
            color,
            ..Default::default()
        }
    }

    pub fn sphere(radius: f32, color: SDFColor) -> Self {
        Self::new(SDFShape::Sphere { radius }, color)
    }

    pub fn radius(&self) -> f32 {
        match self.shape {
            SDFShape::Sphere { radius } => radius,
        }
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_emissive(mut self, color: SDFColor, intensity: f32) -> Self {
        self.emissive_color = color;
        self.emissive = intensity;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        let gold = SDFColor::hex(0xFFD700);
        assert_eq!(gold.r, 1.0);
        assert!((gold.g - 215.0 / 255.0).abs() < 1e-6);
        assert_eq!(gold.b, 0.0);
    }

    #[test]
    fn opacity_is_clamped() {
        let mesh = MeshComponent::sphere(1.0, SDFColor::WHITE).with_opacity(3.0);
        assert_eq!(mesh.opacity, 1.0);
        assert_eq!(mesh.radius(), 1.0);
    }
}
