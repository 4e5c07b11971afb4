pub mod lighting;
pub mod render;
pub mod rng;
pub mod sdf_render;
pub mod starfield;
#[cfg(feature = "vectors")]
pub mod vector;
