use crate::components::entity::Entity;
use crate::renderer::camera::OrbitCamera;
use crate::renderer::sdf_instance::{SDFBuffer, SDFInstance};

/// Project every active mesh entity and fill the SDF buffer back-to-front.
///
/// Screen radius is the world radius times the entity's world scale times
/// the projected pixels-per-unit at its depth. Entities behind the camera
/// are skipped.
pub fn build_sdf_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &OrbitCamera,
    buffer: &mut SDFBuffer,
) {
    buffer.clear();
    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(mesh) = &entity.mesh else { continue };
        let Some(p) = camera.project(entity.pos) else { continue };
        buffer.push(SDFInstance {
            x: p.pos.x,
            y: p.pos.y,
            radius: mesh.radius() * entity.scale * p.scale,
            depth: p.depth,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            alpha: mesh.opacity,
            emissive_r: mesh.emissive_color.r,
            emissive_g: mesh.emissive_color.g,
            emissive_b: mesh.emissive_color.b,
            emissive: mesh.emissive,
            shininess: mesh.shininess,
            rotation: entity.rotation,
            _pad0: 0.0,
            _pad1: 0.0,
        });
    }
    buffer.sort_back_to_front();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::mesh::{MeshComponent, SDFColor};
    use glam::Vec3;

    fn camera() -> OrbitCamera {
        OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, 60.0)
    }

    #[test]
    fn mesh_entity_projects_to_center() {
        let entity = Entity::new(EntityId(1)).with_mesh(
            MeshComponent::sphere(1.5, SDFColor::hex(0xFFD700))
                .with_emissive(SDFColor::hex(0xFFA500), 1.0),
        );
        let mut buffer = SDFBuffer::with_capacity(8);
        build_sdf_buffer([entity].iter(), &camera(), &mut buffer);

        assert_eq!(buffer.instance_count(), 1);
        let inst = buffer.as_slice()[0];
        assert!((inst.x - 400.0).abs() < 1e-3);
        assert!((inst.y - 300.0).abs() < 1e-3);
        assert!(inst.radius > 0.0);
        assert_eq!(inst.emissive, 1.0);
        assert_eq!(inst.alpha, 1.0);
    }

    #[test]
    fn group_scale_enlarges_radius() {
        let small = Entity::new(EntityId(1)).with_mesh(MeshComponent::default());
        let big = Entity::new(EntityId(2))
            .with_scale(2.0)
            .with_mesh(MeshComponent::default());
        let mut buffer = SDFBuffer::with_capacity(8);
        build_sdf_buffer([small, big].iter(), &camera(), &mut buffer);
        let radii: Vec<f32> = buffer.as_slice().iter().map(|i| i.radius).collect();
        assert!((radii[0] * 2.0 - radii[1]).abs() < 1e-3 || (radii[1] * 2.0 - radii[0]).abs() < 1e-3);
    }

    #[test]
    fn skips_inactive_meshless_and_behind() {
        let e1 = Entity::new(EntityId(1));
        let mut e2 = Entity::new(EntityId(2)).with_mesh(MeshComponent::default());
        e2.active = false;
        let e3 = Entity::new(EntityId(3))
            .with_pos(Vec3::new(0.0, 0.0, 40.0))
            .with_mesh(MeshComponent::default());
        let e4 = Entity::new(EntityId(4)).with_mesh(MeshComponent::default());

        let mut buffer = SDFBuffer::with_capacity(8);
        build_sdf_buffer([e1, e2, e3, e4].iter(), &camera(), &mut buffer);
        assert_eq!(buffer.instance_count(), 1);
    }

    #[test]
    fn output_is_back_to_front() {
        let near = Entity::new(EntityId(1))
            .with_pos(Vec3::new(0.0, 0.0, 5.0))
            .with_mesh(MeshComponent::default());
        let far = Entity::new(EntityId(2))
            .with_pos(Vec3::new(0.0, 0.0, -5.0))
            .with_mesh(MeshComponent::default());
        let mut buffer = SDFBuffer::with_capacity(8);
        build_sdf_buffer([near, far].iter(), &camera(), &mut buffer);
        let s = buffer.as_slice();
        assert!(s[0].depth > s[1].depth);
    }
}
