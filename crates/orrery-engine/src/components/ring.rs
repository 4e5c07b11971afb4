use crate::components::mesh::SDFColor;

/// Flat annulus lying in the XZ plane, centered on the entity position.
/// Used for orbit paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingComponent {
    /// Center-line radius in world units (before group scale).
    pub radius: f32,
    /// Radial width in world units.
    pub width: f32,
    /// Polygon segments used when tessellating.
    pub segments: u32,
    pub color: SDFColor,
    pub opacity: f32,
}

impl RingComponent {
    pub fn new(radius: f32, width: f32, color: SDFColor) -> Self {
        Self {
            radius,
            width,
            segments: 64,
            color,
            opacity: 1.0,
        }
    }

    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments.max(3);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}
