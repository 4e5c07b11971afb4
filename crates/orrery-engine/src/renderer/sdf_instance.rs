use bytemuck::{Pod, Zeroable};

use super::instance::InstanceBuffer;

/// Per-instance data for the projected SDF sphere pipeline.
/// Written to SharedArrayBuffer for the TypeScript SDF renderer.
/// 16 floats = 64 bytes per instance.
///
/// Position and radius are already projected to screen pixels; `depth` is
/// kept so the renderer can sort or fog without reprojecting.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct SDFInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub depth: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: f32,
    pub emissive_r: f32,
    pub emissive_g: f32,
    pub emissive_b: f32,
    pub emissive: f32,
    pub shininess: f32,
    pub rotation: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl SDFInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Buffer of SDF instances, back-to-front after the render pass.
pub type SDFBuffer = InstanceBuffer<SDFInstance>;

impl SDFBuffer {
    /// Painter's order: farthest first.
    pub fn sort_back_to_front(&mut self) {
        self.as_mut_slice()
            .sort_by(|a, b| b.depth.total_cmp(&a.depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdf_instance_is_64_bytes() {
        assert_eq!(std::mem::size_of::<SDFInstance>(), 64);
        assert_eq!(SDFInstance::FLOATS, 16);
    }

    #[test]
    fn sort_puts_far_first() {
        let mut buf = SDFBuffer::with_capacity(8);
        for depth in [5.0, 20.0, 1.0] {
            buf.push(SDFInstance { depth, ..Default::default() });
        }
        buf.sort_back_to_front();
        let depths: Vec<f32> = buf.as_slice().iter().map(|i| i.depth).collect();
        assert_eq!(depths, vec![20.0, 5.0, 1.0]);
    }
}
