use bytemuck::{Pod, Zeroable};

/// Fixed-capacity buffer of `#[repr(C)]` instances read by TypeScript.
///
/// Capacity comes from `GameConfig` and matches the section size in the
/// shared buffer; pushes past capacity are dropped and counted.
pub struct InstanceBuffer<T: Pod> {
    instances: Vec<T>,
    capacity: usize,
    dropped: usize,
}

impl<T: Pod> InstanceBuffer<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.dropped = 0;
    }

    /// Append an instance. Returns `false` when the buffer is full.
    pub fn push(&mut self, instance: T) -> bool {
        if self.instances.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Instances rejected since the last `clear`.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn as_slice(&self) -> &[T] {
        &self.instances
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.instances
    }

    /// Flat float view for SharedArrayBuffer copies.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

/// Screen-space text label. 8 floats = 32 bytes.
///
/// `text_id` indexes the label table the browser fetches once at init.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct LabelInstance {
    pub x: f32,
    pub y: f32,
    /// Glyph height in CSS pixels.
    pub font_px: f32,
    pub text_id: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: f32,
}

impl LabelInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Background star point. 4 floats = 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct StarInstance {
    pub x: f32,
    pub y: f32,
    /// Point diameter in CSS pixels.
    pub size: f32,
    pub alpha: f32,
}

impl StarInstance {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Floating heart glyph drawn above the overlay. 8 floats = 32 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct HeartInstance {
    pub x: f32,
    pub y: f32,
    /// Index into the game's emoji palette.
    pub emoji: f32,
    pub alpha: f32,
    pub scale: f32,
    /// Normalized age in [0, 1].
    pub age: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl HeartInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

pub type LabelBuffer = InstanceBuffer<LabelInstance>;
pub type StarBuffer = InstanceBuffer<StarInstance>;
pub type HeartBuffer = InstanceBuffer<HeartInstance>;
