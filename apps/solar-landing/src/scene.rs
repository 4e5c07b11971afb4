/// Scene composition: builds the body hierarchy once and drives it every
/// tick.
///
/// Each body gets its own group node scaled by the viewport scale factor.
/// Inside a planet group the ring sits at the origin while the body and its
/// label node are moved along the orbit, so labels follow the planet
/// without inheriting its spin.

use glam::Vec3;
use orrery_engine::*;

use crate::bodies::{self, CelestialBodyConfig, PLANETS};
use crate::orbit::{orbit_position, PLANET_SPIN, SUN_SPIN};
use crate::viewport::ViewportScale;

// ── Camera ───────────────────────────────────────────────────────────

pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_DAMPING: f32 = 0.05;

// ── Lighting ─────────────────────────────────────────────────────────

pub const AMBIENT_INTENSITY: f32 = 0.3;
pub const SUN_LIGHT_INTENSITY: f32 = 2.0;
pub const FILL_LIGHT_FROM: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const FILL_LIGHT_INTENSITY: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct SunNodes {
    pub group: EntityId,
    pub body: EntityId,
    pub glow: EntityId,
    pub label: Option<EntityId>,
}

#[derive(Debug, Clone, Copy)]
pub struct PlanetNodes {
    pub config: CelestialBodyConfig,
    pub group: EntityId,
    pub ring: EntityId,
    pub body: EntityId,
    pub label_group: EntityId,
    pub name_label: Option<EntityId>,
    pub nickname_label: Option<EntityId>,
}

/// Entity ids of every composed node.
#[derive(Debug, Clone)]
pub struct SolarScene {
    pub sun: SunNodes,
    pub planets: Vec<PlanetNodes>,
}

impl SolarScene {
    /// Spawn the sun and planets, configure camera, lights and stars.
    pub fn compose(ctx: &mut EngineContext, view: &ViewportScale) -> Self {
        setup_camera(ctx, view);
        setup_lighting(ctx);
        ctx.stars = Starfield::new(
            StarfieldConfig { count: view.star_count, fade: true, ..Default::default() },
            &mut ctx.rng,
        );

        let sun = spawn_sun(ctx, view);
        let planets = PLANETS
            .iter()
            .map(|config| spawn_planet(ctx, config, view))
            .collect();

        let scene = Self { sun, planets };
        scene.place(ctx);
        log::info!(
            "scene composed: {} entities, scale {:.2}",
            ctx.scene.len(),
            view.scale_factor
        );
        scene
    }

    /// Move every planet and its label node to its orbit position for the
    /// current clock time.
    pub fn place(&self, ctx: &mut EngineContext) {
        let elapsed = ctx.clock.elapsed();
        for planet in &self.planets {
            let c = &planet.config;
            let pos = orbit_position(elapsed, c.speed, c.orbit_radius, c.position.y);
            ctx.graph.set_offset(planet.body, pos);
            ctx.graph.set_offset(planet.label_group, pos);
        }
    }

    /// One tick: orbit placement plus body spin. Spin is skipped while the
    /// clock is frozen.
    pub fn animate(&self, ctx: &mut EngineContext) {
        self.place(ctx);
        if ctx.clock.is_frozen() {
            return;
        }
        for planet in &self.planets {
            ctx.graph.spin(planet.body, PLANET_SPIN);
        }
        ctx.graph.spin(self.sun.body, SUN_SPIN);
    }

    /// Re-apply viewport-derived values after a resize.
    pub fn apply_viewport(&self, ctx: &mut EngineContext, view: &ViewportScale) {
        ctx.camera
            .set_distance_bounds(view.min_distance, view.max_distance);
        ctx.stars.set_count(view.star_count, &mut ctx.rng);

        ctx.graph.set_scale(self.sun.group, view.scale_factor);
        set_font_size(ctx, self.sun.label, view.labels.sun);

        for planet in &self.planets {
            ctx.graph.set_scale(planet.group, view.scale_factor);
            set_font_size(ctx, planet.name_label, view.labels.name);
            set_font_size(ctx, planet.nickname_label, view.labels.nickname);
        }
    }

    pub fn planet(&self, name: &str) -> Option<&PlanetNodes> {
        self.planets.iter().find(|p| p.config.name == name)
    }
}

fn setup_camera(ctx: &mut EngineContext, view: &ViewportScale) {
    let camera = &mut ctx.camera;
    camera.fov_y = CAMERA_FOV_DEG.to_radians();
    camera.target = Vec3::ZERO;
    camera.controls = OrbitControls {
        enable_rotate: true,
        enable_zoom: true,
        enable_pan: true,
        damping: Some(CAMERA_DAMPING),
        auto_rotate: false,
        ..Default::default()
    };
    camera.set_position(view.camera_position);
    camera.set_distance_bounds(view.min_distance, view.max_distance);
}

fn setup_lighting(ctx: &mut EngineContext) {
    ctx.lights.clear();
    ctx.lights.set_ambient(SDFColor::WHITE, AMBIENT_INTENSITY);
    ctx.lights
        .add(Light::point(Vec3::ZERO, bodies::SUN_COLOR, SUN_LIGHT_INTENSITY));
    ctx.lights
        .add(Light::directional(FILL_LIGHT_FROM, SDFColor::WHITE, FILL_LIGHT_INTENSITY));
}

fn set_font_size(ctx: &mut EngineContext, id: Option<EntityId>, size: f32) {
    let Some(entity) = id.and_then(|id| ctx.scene.get_mut(id)) else { return };
    if let Some(label) = entity.label.as_mut() {
        label.font_size = size;
    }
}

/// Spawn `entity` under `parent` with a local offset.
fn attach(ctx: &mut EngineContext, entity: Entity, parent: EntityId, offset: Vec3) -> EntityId {
    let id = entity.id;
    ctx.scene.spawn(entity);
    ctx.graph
        .register_with(id, LocalTransform::new().with_offset(offset));
    ctx.graph.set_parent(id, Some(parent));
    id
}

fn spawn_group(ctx: &mut EngineContext, tag: String, scale: f32) -> EntityId {
    let id = ctx.next_id();
    ctx.scene.spawn(Entity::new(id).with_tag(tag));
    ctx.graph
        .register_with(id, LocalTransform::new().with_scale(scale));
    id
}

/// Label entity, or `None` when the text is blank.
fn spawn_label(
    ctx: &mut EngineContext,
    text: &str,
    font_size: f32,
    color: SDFColor,
    opacity: f32,
    parent: EntityId,
    offset: Vec3,
) -> Option<EntityId> {
    let text_id = ctx.labels.intern(text)?;
    let id = ctx.next_id();
    let entity = Entity::new(id)
        .with_tag(format!("label:{text}"))
        .with_label(LabelComponent::new(text_id, font_size, color).with_opacity(opacity));
    Some(attach(ctx, entity, parent, offset))
}

// ── Sun ──────────────────────────────────────────────────────────────

fn spawn_sun(ctx: &mut EngineContext, view: &ViewportScale) -> SunNodes {
    let group = spawn_group(ctx, "sun-group".into(), view.scale_factor);

    let body_id = ctx.next_id();
    let body = attach(
        ctx,
        Entity::new(body_id).with_tag(bodies::SUN_NAME).with_mesh(
            MeshComponent::sphere(bodies::SUN_RADIUS, bodies::SUN_COLOR)
                .with_emissive(bodies::SUN_EMISSIVE_COLOR, bodies::SUN_EMISSIVE),
        ),
        group,
        Vec3::ZERO,
    );

    let glow_id = ctx.next_id();
    let glow = attach(
        ctx,
        Entity::new(glow_id).with_tag("sun-glow").with_mesh(
            MeshComponent::sphere(bodies::SUN_GLOW_RADIUS, bodies::SUN_COLOR)
                .with_opacity(bodies::SUN_GLOW_OPACITY),
        ),
        group,
        Vec3::ZERO,
    );

    let label = spawn_label(
        ctx,
        bodies::SUN_NAME,
        view.labels.sun,
        bodies::SUN_COLOR,
        1.0,
        group,
        bodies::SUN_LABEL_OFFSET,
    );

    SunNodes { group, body, glow, label }
}

// ── Planets ──────────────────────────────────────────────────────────

fn spawn_planet(ctx: &mut EngineContext, config: &CelestialBodyConfig, view: &ViewportScale) -> PlanetNodes {
    let slug = config.name.to_lowercase();
    let group = spawn_group(ctx, format!("{slug}-group"), view.scale_factor);

    let ring_id = ctx.next_id();
    let ring = attach(
        ctx,
        Entity::new(ring_id).with_tag(format!("{slug}-orbit")).with_ring(
            RingComponent::new(config.orbit_radius, bodies::RING_WIDTH, config.color)
                .with_segments(bodies::RING_SEGMENTS)
                .with_opacity(bodies::RING_OPACITY),
        ),
        group,
        Vec3::ZERO,
    );

    let mut mesh = MeshComponent::sphere(config.radius, config.color);
    if config.emissive {
        mesh = mesh.with_emissive(config.color, bodies::BODY_GLOW);
    }
    let mut body_entity = Entity::new(ctx.next_id()).with_tag(config.name).with_mesh(mesh);
    if let Some(action) = config.on_click {
        body_entity = body_entity.with_click(action);
    }
    let body = attach(ctx, body_entity, group, config.position);

    let label_group_id = ctx.next_id();
    let label_group = attach(
        ctx,
        Entity::new(label_group_id).with_tag(format!("{slug}-labels")),
        group,
        config.position,
    );

    let nickname_label = config.nickname.and_then(|nickname| {
        spawn_label(
            ctx,
            nickname,
            view.labels.nickname,
            config.color,
            bodies::NICKNAME_OPACITY,
            label_group,
            Vec3::new(0.0, config.radius + bodies::NICKNAME_LABEL_GAP, 0.0),
        )
    });
    let name_label = spawn_label(
        ctx,
        config.name,
        view.labels.name,
        config.color,
        1.0,
        label_group,
        Vec3::new(0.0, config.radius + bodies::NAME_LABEL_GAP, 0.0),
    );

    PlanetNodes {
        config: *config,
        group,
        ring,
        body,
        label_group,
        name_label,
        nickname_label,
    }
}
