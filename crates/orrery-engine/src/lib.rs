pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext, PICK_SLOP_PX};
pub use api::types::{EntityId, SoundEvent, GameEvent, ClickAction};
pub use components::entity::Entity;
pub use components::label::{LabelComponent, LabelId, LabelTable};
pub use components::mesh::{MeshComponent, SDFShape, SDFColor};
pub use components::ring::RingComponent;
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, SceneClock};
pub use renderer::camera::{OrbitCamera, OrbitControls, Projection};
pub use renderer::instance::{
    InstanceBuffer, LabelBuffer, LabelInstance, StarBuffer, StarInstance, HeartBuffer, HeartInstance,
};
pub use renderer::sdf_instance::{SDFInstance, SDFBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use input::pointer::{DragMode, PointerTracker};
pub use assets::manifest::{AssetManifest, ImageDescriptor, SoundDescriptor, ManifestError};
pub use bridge::protocol::{ProtocolLayout, Section, LIGHT_FLOATS, DEFAULT_MAX_LIGHTS};
pub use systems::lighting::{Light, LightKind, AmbientLight, LightState};
pub use systems::starfield::{Starfield, StarfieldConfig};
pub use systems::rng::Rng;

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex, VectorColor};

pub use extensions::{Easing, lerp, ease, TransformGraph, LocalTransform};
