use glam::Vec3;
use crate::api::types::{ClickAction, EntityId};
use crate::components::label::LabelComponent;
use crate::components::mesh::MeshComponent;
use crate::components::ring::RingComponent;

/// Fat Entity: a single struct with optional components.
///
/// `pos`, `rotation` and `scale` are world-space values. Entities that belong
/// to a hierarchy get them written by `TransformGraph::propagate`; free
/// entities are positioned directly.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Spin around the world Y axis, in radians.
    pub rotation: f32,
    /// Uniform world-space scale.
    pub scale: f32,
    /// Sphere mesh (entities without one are invisible groups).
    pub mesh: Option<MeshComponent>,
    /// Billboard text label.
    pub label: Option<LabelComponent>,
    /// Flat ring in the XZ plane (orbit paths).
    pub ring: Option<RingComponent>,
    /// Action raised when the mesh is clicked or tapped.
    pub on_click: Option<ClickAction>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: 0.0,
            scale: 1.0,
            mesh: None,
            label: None,
            ring: None,
            on_click: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_label(mut self, label: LabelComponent) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_ring(mut self, ring: RingComponent) -> Self {
        self.ring = Some(ring);
        self
    }

    pub fn with_click(mut self, action: ClickAction) -> Self {
        self.on_click = Some(action);
        self
    }
}
