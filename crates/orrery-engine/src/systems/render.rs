use glam::{Vec2, Vec3};

use crate::api::types::{ClickAction, EntityId};
use crate::components::entity::Entity;
use crate::renderer::camera::OrbitCamera;
use crate::renderer::instance::{LabelBuffer, LabelInstance};
#[cfg(feature = "vectors")]
use crate::systems::vector::{VectorColor, VectorState};

/// Project label entities into screen-space label instances.
///
/// Font size is world units scaled by the entity's world scale, so labels
/// shrink with distance like the meshes they annotate.
pub fn build_label_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &OrbitCamera,
    buffer: &mut LabelBuffer,
) {
    buffer.clear();
    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(label) = &entity.label else { continue };
        let Some(p) = camera.project(entity.pos) else { continue };
        buffer.push(LabelInstance {
            x: p.pos.x,
            y: p.pos.y,
            font_px: label.font_size * entity.scale * p.scale,
            text_id: label.text.0 as f32,
            r: label.color.r,
            g: label.color.g,
            b: label.color.b,
            alpha: label.opacity,
        });
    }
}

/// Tessellate ring entities as flat annuli in the entity's XZ plane.
///
/// Each segment is projected as its own quad, so a ring that passes behind
/// the camera loses only the hidden segments.
#[cfg(feature = "vectors")]
pub fn build_ring_vectors<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &OrbitCamera,
    vectors: &mut VectorState,
) {
    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(ring) = &entity.ring else { continue };
        let half = ring.width * 0.5;
        let inner = (ring.radius - half).max(0.0) * entity.scale;
        let outer = (ring.radius + half) * entity.scale;
        let color = VectorColor::from_sdf(ring.color, ring.opacity);
        let segments = ring.segments.max(3);

        let corner = |radius: f32, i: u32| -> Option<Vec2> {
            let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
            let world = entity.pos + Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin());
            camera.project(world).map(|p| p.pos)
        };

        for i in 0..segments {
            let quad = [corner(outer, i), corner(outer, i + 1), corner(inner, i + 1), corner(inner, i)];
            if let [Some(a), Some(b), Some(c), Some(d)] = quad {
                vectors.fill_polygon(&[a, b, c, d], color);
            }
        }
    }
}

/// Frontmost clickable entity under the pointer.
///
/// A mesh is hit when the pointer lies within its projected radius plus
/// `slop_px`, which keeps tiny planets clickable on touch screens.
pub fn hit_test<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &OrbitCamera,
    pointer: Vec2,
    slop_px: f32,
) -> Option<(EntityId, ClickAction)> {
    let mut best: Option<(f32, EntityId, ClickAction)> = None;
    for entity in entities {
        if !entity.active {
            continue;
        }
        let (Some(action), Some(mesh)) = (entity.on_click, &entity.mesh) else { continue };
        let Some(p) = camera.project(entity.pos) else { continue };
        let reach = mesh.radius() * entity.scale * p.scale + slop_px;
        if p.pos.distance(pointer) > reach {
            continue;
        }
        if best.map_or(true, |(depth, _, _)| p.depth < depth) {
            best = Some((p.depth, entity.id, action));
        }
    }
    best.map(|(_, id, action)| (id, action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::label::{LabelComponent, LabelId};
    use crate::components::mesh::{MeshComponent, SDFColor};

    fn camera() -> OrbitCamera {
        OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, 60.0)
    }

    fn clickable(id: u32, pos: Vec3, radius: f32, action: u32) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(pos)
            .with_mesh(MeshComponent::sphere(radius, SDFColor::WHITE))
            .with_click(ClickAction(action))
    }

    #[test]
    fn labels_scale_with_entity() {
        let label = LabelComponent::new(LabelId(3), 0.2, SDFColor::WHITE);
        let a = Entity::new(EntityId(1)).with_label(label);
        let b = Entity::new(EntityId(2)).with_scale(2.0).with_label(label);
        let mut buf = LabelBuffer::with_capacity(4);
        build_label_buffer([a, b].iter(), &camera(), &mut buf);
        let s = buf.as_slice();
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].text_id, 3.0);
        assert!((s[1].font_px - 2.0 * s[0].font_px).abs() < 1e-3);
    }

    #[test]
    fn hit_inside_radius() {
        let cam = camera();
        let e = clickable(1, Vec3::ZERO, 1.0, 7);
        let hit = hit_test([e].iter(), &cam, Vec2::new(400.0, 300.0), 0.0);
        assert_eq!(hit, Some((EntityId(1), ClickAction(7))));
    }

    #[test]
    fn miss_outside_radius_plus_slop() {
        let cam = camera();
        let e = clickable(1, Vec3::ZERO, 0.25, 7);
        assert!(hit_test([e.clone()].iter(), &cam, Vec2::new(500.0, 300.0), 4.0).is_none());
        assert!(hit_test([e].iter(), &cam, Vec2::new(500.0, 300.0), 200.0).is_some());
    }

    #[test]
    fn frontmost_wins() {
        let cam = camera();
        let back = clickable(1, Vec3::new(0.0, 0.0, -5.0), 1.0, 1);
        let front = clickable(2, Vec3::new(0.0, 0.0, 5.0), 1.0, 2);
        let hit = hit_test([back, front].iter(), &cam, Vec2::new(400.0, 300.0), 0.0);
        assert_eq!(hit, Some((EntityId(2), ClickAction(2))));
    }

    #[test]
    fn non_clickable_is_ignored() {
        let cam = camera();
        let e = Entity::new(EntityId(1)).with_mesh(MeshComponent::sphere(5.0, SDFColor::WHITE));
        assert!(hit_test([e].iter(), &cam, Vec2::new(400.0, 300.0), 10.0).is_none());
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn ring_emits_one_quad_per_segment() {
        use crate::components::ring::RingComponent;
        let cam = OrbitCamera::looking_at(Vec3::new(0.0, 15.0, 25.0), Vec3::ZERO, 60.0);
        let e = Entity::new(EntityId(1))
            .with_ring(RingComponent::new(6.0, 0.2, SDFColor::WHITE).with_segments(16));
        let mut vectors = VectorState::new();
        build_ring_vectors([e].iter(), &cam, &mut vectors);
        assert_eq!(vectors.vertex_count(), 16 * 6);
    }
}
