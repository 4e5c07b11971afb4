// extensions/mod.rs
//
// Optional systems decoupled from the core Entity/Scene types.
// Games opt in by creating them.

pub mod easing;
pub mod transform;

pub use easing::{Easing, lerp, ease};
pub use transform::{TransformGraph, LocalTransform};
