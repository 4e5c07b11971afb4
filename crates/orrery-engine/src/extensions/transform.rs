// extensions/transform.rs
//
// Scene-graph hierarchy: tracks parent-child relationships by EntityId.
// Built once when the scene is composed; afterwards only local offsets and
// spins change (per-tick orbit updates), followed by one propagate() pass.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register_with(group, LocalTransform::new().with_scale(scale));
//   graph.register(planet);
//   graph.set_parent(planet, Some(group));
//   graph.propagate(&mut scene);  // writes world pos/rotation/scale

use std::collections::HashMap;
use glam::Vec3;
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Local transform relative to the parent node (or the world for roots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub offset: Vec3,
    /// Spin around the Y axis, in radians.
    pub rotation: f32,
    /// Uniform scale multiplier.
    pub scale: f32,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
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
}

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: LocalTransform,
}

/// Transform hierarchy over a `Scene`.
///
/// Kept apart from `Scene` so that flat entities (stars, overlays) pay
/// nothing for it.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
    /// Top-level nodes, in registration order.
    roots: Vec<EntityId>,
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity as a root with an identity local transform.
    pub fn register(&mut self, id: EntityId) {
        self.register_with(id, LocalTransform::default());
    }

    /// Register an entity as a root with a specific local transform.
    pub fn register_with(&mut self, id: EntityId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Set the parent of an entity. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) {
        if parent == Some(child) {
            return;
        }
        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            self.nodes.entry(p).or_default();
        }

        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
    }

    pub fn set_local(&mut self, id: EntityId, local: LocalTransform) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local = local;
            self.dirty = true;
        }
    }

    /// Move a node without touching its spin or scale.
    pub fn set_offset(&mut self, id: EntityId, offset: Vec3) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local.offset = offset;
            self.dirty = true;
        }
    }

    /// Add `delta` radians to a node's spin.
    pub fn spin(&mut self, id: EntityId, delta: f32) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local.rotation = (node.local.rotation + delta) % std::f32::consts::TAU;
            self.dirty = true;
        }
    }

    pub fn set_scale(&mut self, id: EntityId, scale: f32) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local.scale = scale;
            self.dirty = true;
        }
    }

    pub fn get_local(&self, id: EntityId) -> Option<&LocalTransform> {
        self.nodes.get(&id).map(|n| &n.local)
    }

    pub fn get_parent(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn get_children(&self, id: EntityId) -> Option<&[EntityId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// Write world transforms into the scene, roots first.
    ///
    /// A parent's spin rotates its children's offsets; a parent's scale
    /// multiplies both the children's offsets and their own scale.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }
        for &root in &self.roots {
            self.propagate_recursive(root, Vec3::ZERO, 0.0, 1.0, scene);
        }
        self.dirty = false;
    }

    fn propagate_recursive(
        &self,
        id: EntityId,
        parent_pos: Vec3,
        parent_rot: f32,
        parent_scale: f32,
        scene: &mut Scene,
    ) {
        let Some(node) = self.nodes.get(&id) else { return };
        let local = &node.local;

        let (sin_r, cos_r) = parent_rot.sin_cos();
        // Rotation about +Y (right-handed): x' = x cos + z sin, z' = -x sin + z cos.
        let rotated = Vec3::new(
            local.offset.x * cos_r + local.offset.z * sin_r,
            local.offset.y,
            -local.offset.x * sin_r + local.offset.z * cos_r,
        );
        let world_pos = parent_pos + rotated * parent_scale;
        let world_rot = parent_rot + local.rotation;
        let world_scale = parent_scale * local.scale;

        if let Some(entity) = scene.get_mut(id) {
            entity.pos = world_pos;
            entity.rotation = world_rot;
            entity.scale = world_scale;
        }

        for &child in &node.children {
            self.propagate_recursive(child, world_pos, world_rot, world_scale, scene);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    #[test]
    fn parent_child_relationship() {
        let mut graph = TransformGraph::new();
        let parent = EntityId(1);
        let child = EntityId(2);

        graph.register(parent);
        graph.register(child);
        graph.set_parent(child, Some(parent));

        assert_eq!(graph.get_parent(child), Some(parent));
        assert_eq!(graph.get_children(parent), Some([child].as_slice()));
        assert!(!graph.roots.contains(&child));
    }

    #[test]
    fn group_scale_multiplies_child_offset_and_scale() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let group = EntityId(1);
        let body = EntityId(2);
        scene.spawn(Entity::new(group));
        scene.spawn(Entity::new(body));

        graph.register_with(group, LocalTransform::new().with_scale(0.5));
        graph.register_with(body, LocalTransform::new().with_offset(Vec3::new(6.0, 0.0, 0.0)));
        graph.set_parent(body, Some(group));
        graph.propagate(&mut scene);

        let e = scene.get(body).unwrap();
        assert_eq!(e.pos, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(e.scale, 0.5);
    }

    #[test]
    fn set_offset_marks_dirty_and_moves_child() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let group = EntityId(1);
        let body = EntityId(2);
        scene.spawn(Entity::new(group));
        scene.spawn(Entity::new(body));
        graph.register_with(group, LocalTransform::new().with_scale(2.0));
        graph.register(body);
        graph.set_parent(body, Some(group));
        graph.propagate(&mut scene);
        assert!(!graph.is_dirty());

        graph.set_offset(body, Vec3::new(0.0, 0.0, 1.5));
        assert!(graph.is_dirty());
        graph.propagate(&mut scene);
        assert_eq!(scene.get(body).unwrap().pos, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn spin_accumulates_without_moving_children_of_siblings() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let sun = EntityId(1);
        scene.spawn(Entity::new(sun));
        graph.register(sun);
        graph.spin(sun, 0.25);
        graph.spin(sun, 0.25);
        graph.propagate(&mut scene);
        assert!((scene.get(sun).unwrap().rotation - 0.5).abs() < 1e-6);
        assert_eq!(scene.get(sun).unwrap().pos, Vec3::ZERO);
    }

    #[test]
    fn self_parenting_is_ignored() {
        let mut graph = TransformGraph::new();
        let id = EntityId(1);
        graph.register(id);
        graph.set_parent(id, Some(id));
        assert_eq!(graph.get_parent(id), None);
    }
}
