pub mod camera;
pub mod instance;
pub mod sdf_instance;

pub use camera::{OrbitCamera, OrbitControls, Projection};
pub use instance::{
    HeartBuffer, HeartInstance, InstanceBuffer, LabelBuffer, LabelInstance, StarBuffer,
    StarInstance,
};
pub use sdf_instance::{SDFBuffer, SDFInstance};
