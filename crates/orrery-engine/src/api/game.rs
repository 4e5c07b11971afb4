use glam::{Vec2, Vec3};

use crate::api::types::{ClickAction, EntityId, GameEvent, SoundEvent};
use crate::assets::manifest::{AssetManifest, ManifestError};
use crate::bridge::protocol::DEFAULT_MAX_LIGHTS;
use crate::components::label::LabelTable;
use crate::core::scene::Scene;
use crate::core::time::SceneClock;
use crate::extensions::transform::TransformGraph;
use crate::input::pointer::PointerTracker;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::OrbitCamera;
use crate::renderer::instance::HeartBuffer;
use crate::systems::lighting::LightState;
use crate::systems::render::hit_test;
use crate::systems::rng::Rng;
use crate::systems::starfield::Starfield;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Initial viewport size in CSS pixels, replaced by the first resize.
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Maximum projected spheres per frame (default: 64).
    pub max_sdf_instances: usize,
    /// Maximum labels per frame (default: 64).
    pub max_labels: usize,
    /// Maximum stars per frame (default: 5000).
    pub max_stars: usize,
    /// Maximum heart glyphs per frame (default: 64).
    pub max_hearts: usize,
    /// Maximum vector vertices per frame (default: 16384).
    pub max_vector_vertices: usize,
    /// Maximum lights (default: 8).
    pub max_lights: usize,
    /// Maximum sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum game events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the engine RNG.
    pub rng_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_sdf_instances: 64,
            max_labels: 64,
            max_stars: 5000,
            max_hearts: 64,
            max_vector_vertices: 16384,
            max_lights: DEFAULT_MAX_LIGHTS,
            max_sounds: 32,
            max_events: 32,
            rng_seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick. Read input, advance animation, emit sounds/events.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only pass after the scene has been projected.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Built-in asset manifest used until the host supplies one.
    fn manifest(&self) -> AssetManifest {
        AssetManifest::default()
    }

    /// Accept a host-supplied manifest. Returning an error keeps the
    /// previous manifest in place.
    fn load_manifest(
        &mut self,
        _ctx: &mut EngineContext,
        _manifest: &AssetManifest,
    ) -> Result<(), ManifestError> {
        Ok(())
    }

    /// The host is tearing the page down. Release anything the browser
    /// holds on the game's behalf.
    fn shutdown(&mut self, _ctx: &mut EngineContext) {}
}

/// Extra pixels around a clickable sphere that still count as a hit.
pub const PICK_SLOP_PX: f32 = 6.0;

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub labels: LabelTable,
    pub camera: OrbitCamera,
    pub lights: LightState,
    pub stars: Starfield,
    #[cfg(feature = "vectors")]
    pub vectors: VectorState,
    pub clock: SceneClock,
    pub pointer: PointerTracker,
    pub rng: Rng,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        let mut camera = OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 60.0);
        camera.set_screen_size(config.viewport_width, config.viewport_height);
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            labels: LabelTable::new(),
            camera,
            lights: LightState::with_capacity(config.max_lights),
            stars: Starfield::default(),
            #[cfg(feature = "vectors")]
            vectors: VectorState::with_capacity(config.max_vector_vertices),
            clock: SceneClock::new(),
            pointer: PointerTracker::new(),
            rng: Rng::new(config.rng_seed),
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a sound event to be forwarded to the browser.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the browser.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }

    /// Current viewport size in CSS pixels.
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.camera.screen_width, self.camera.screen_height)
    }

    /// Apply a resize from the host. Non-finite or sub-pixel sizes are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.camera.set_screen_size(width, height);
    }

    /// Feed one input event to the orbit controls.
    /// Returns the clicked entity's action when the event completes a click
    /// on a clickable sphere.
    pub fn drive_camera(&mut self, event: &InputEvent) -> Option<(EntityId, ClickAction)> {
        let click = self.pointer.feed(event, &mut self.camera)?;
        self.pick(click)
    }

    /// Frontmost clickable entity under a screen position.
    pub fn pick(&self, pointer: Vec2) -> Option<(EntityId, ClickAction)> {
        hit_test(self.scene.iter(), &self.camera, pointer, PICK_SLOP_PX)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame output the game may write after the scene is projected.
pub struct RenderContext<'a> {
    pub camera: &'a OrbitCamera,
    pub hearts: &'a mut HeartBuffer,
    #[cfg(feature = "vectors")]
    pub vectors: &'a mut VectorState,
    /// Wall clock at render time, in milliseconds.
    pub now_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::components::mesh::{MeshComponent, SDFColor};

    #[test]
    fn ids_are_sequential() {
        let mut ctx = EngineContext::new();
        assert_eq!(ctx.next_id(), EntityId(1));
        assert_eq!(ctx.next_id(), EntityId(2));
    }

    #[test]
    fn frame_data_is_cleared() {
        let mut ctx = EngineContext::new();
        ctx.emit_sound(SoundEvent(1));
        ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty());
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn viewport_follows_config_and_resize() {
        let config = GameConfig { viewport_width: 375.0, viewport_height: 667.0, ..Default::default() };
        let mut ctx = EngineContext::with_config(&config);
        assert_eq!(ctx.viewport(), Vec2::new(375.0, 667.0));
        ctx.set_viewport(1200.0, 800.0);
        assert_eq!(ctx.viewport(), Vec2::new(1200.0, 800.0));
        ctx.set_viewport(0.0, f32::NAN);
        assert_eq!(ctx.viewport(), Vec2::new(1200.0, 800.0));
    }

    #[test]
    fn click_on_sphere_is_picked() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_mesh(MeshComponent::sphere(1.0, SDFColor::WHITE))
                .with_click(ClickAction(9)),
        );
        let center = Vec2::new(400.0, 300.0);
        assert!(ctx
            .drive_camera(&InputEvent::PointerDown { x: center.x, y: center.y, button: 0 })
            .is_none());
        let hit = ctx.drive_camera(&InputEvent::PointerUp { x: center.x, y: center.y });
        assert_eq!(hit, Some((id, ClickAction(9))));
    }
}
