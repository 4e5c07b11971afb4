use orrery_engine::bridge::protocol::{
    Section, HEADER_AMBIENT_B, HEADER_AMBIENT_G, HEADER_AMBIENT_R, HEADER_FRAME_COUNTER,
    HEADER_STAR_FADE, HEADER_VIEWPORT_HEIGHT, HEADER_VIEWPORT_WIDTH,
};
use orrery_engine::systems::render::build_label_buffer;
#[cfg(feature = "vectors")]
use orrery_engine::systems::render::build_ring_vectors;
use orrery_engine::systems::sdf_render::build_sdf_buffer;
use orrery_engine::{
    AssetManifest, EngineContext, FixedTimestep, Game, GameConfig, GameEvent, HeartBuffer, InputEvent,
    InputQueue, LabelBuffer, ProtocolLayout, RenderContext, SDFBuffer, StarBuffer,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// Handed to the extra fixed steps of a catch-up frame so queued input
    /// is seen exactly once.
    no_input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    manifest: AssetManifest,
    sdf_buffer: SDFBuffer,
    label_buffer: LabelBuffer,
    star_buffer: StarBuffer,
    heart_buffer: HeartBuffer,
    /// Sound event IDs as floats, mirrored into the sounds section.
    sound_floats: Vec<f32>,
    /// Whole frame in protocol layout, rewritten after every tick.
    frame: Vec<f32>,
    frame_counter: u32,
    initialized: bool,
    shut_down: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let manifest = game.manifest();

        Self {
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            no_input: InputQueue::new(),
            timestep: FixedTimestep::new(config.fixed_dt),
            sdf_buffer: SDFBuffer::with_capacity(config.max_sdf_instances),
            label_buffer: LabelBuffer::with_capacity(config.max_labels),
            star_buffer: StarBuffer::with_capacity(config.max_stars),
            heart_buffer: HeartBuffer::with_capacity(config.max_hearts),
            sound_floats: Vec::with_capacity(config.max_sounds),
            frame: vec![0.0; layout.buffer_total_floats],
            frame_counter: 0,
            game,
            layout,
            config,
            manifest,
            initialized: false,
            shut_down: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.layout.write_capacities(&mut self.frame);
        self.game.init(&mut self.ctx);
        self.initialized = true;
        // Publish the initial scene before the first tick arrives.
        self.build_frame();
    }

    /// Push an input event into the queue.
    /// Resizes also update the projection right away so hit tests and the
    /// next render use the new size.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.shut_down {
            return;
        }
        if let InputEvent::Resize { width, height } = event {
            self.ctx.set_viewport(width, height);
        }
        self.input.push(event);
    }

    /// Parse and hand a manifest to the game. On failure the previous
    /// manifest stays active.
    pub fn load_manifest(&mut self, json: &str) {
        let manifest = match AssetManifest::from_json(json) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("manifest ignored: {e}");
                return;
            }
        };
        match self.game.load_manifest(&mut self.ctx, &manifest) {
            Ok(()) => {
                log::info!(
                    "manifest loaded: {} images, {} sounds",
                    manifest.images.len(),
                    manifest.sounds.len()
                );
                self.manifest = manifest;
            }
            Err(e) => log::warn!("manifest rejected: {e}"),
        }
    }

    /// Run one frame tick: update game, project the scene, pack buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized || self.shut_down {
            return;
        }

        self.ctx.clear_frame_data();
        self.ctx.clock.advance_wall(dt);

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            self.ctx.clock.tick(self.timestep.dt());
            let input = if step == 0 { &self.input } else { &self.no_input };
            self.game.update(&mut self.ctx, input);
            self.ctx.camera.update();
            self.ctx.graph.propagate(&mut self.ctx.scene);
        }

        // Input waits for a frame that actually runs a step.
        if steps > 0 {
            self.input.drain();
        }

        self.build_frame();
    }

    /// Tear down: let the game release browser-side resources and publish
    /// its final sound commands. Further ticks and input are ignored.
    pub fn shutdown(&mut self) {
        if !self.initialized || self.shut_down {
            return;
        }
        self.ctx.clear_frame_data();
        self.game.shutdown(&mut self.ctx);
        self.shut_down = true;
        self.pack_sounds();
        self.write_frame();
        log::info!("runner shut down");
    }

    fn build_frame(&mut self) {
        let camera = &self.ctx.camera;
        build_sdf_buffer(self.ctx.scene.iter(), camera, &mut self.sdf_buffer);
        build_label_buffer(self.ctx.scene.iter(), camera, &mut self.label_buffer);

        self.star_buffer.clear();
        self.ctx
            .stars
            .project(camera, self.ctx.clock.elapsed() as f32, &mut self.star_buffer);

        #[cfg(feature = "vectors")]
        {
            self.ctx.vectors.clear();
            build_ring_vectors(self.ctx.scene.iter(), &self.ctx.camera, &mut self.ctx.vectors);
        }

        self.heart_buffer.clear();
        {
            let mut render_ctx = RenderContext {
                camera: &self.ctx.camera,
                hearts: &mut self.heart_buffer,
                #[cfg(feature = "vectors")]
                vectors: &mut self.ctx.vectors,
                now_ms: self.ctx.clock.now_ms(),
            };
            self.game.render(&mut render_ctx);
        }

        self.pack_sounds();
        self.write_frame();
    }

    fn pack_sounds(&mut self) {
        self.sound_floats.clear();
        for sound in &self.ctx.sounds {
            self.sound_floats.push(sound.0 as f32);
        }
    }

    fn write_frame(&mut self) {
        self.frame_counter = self.frame_counter.wrapping_add(1);
        let viewport = self.ctx.viewport();
        let ambient = self.ctx.lights.ambient().rgb();
        let header = &mut self.frame;
        header[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        header[HEADER_VIEWPORT_WIDTH] = viewport.x;
        header[HEADER_VIEWPORT_HEIGHT] = viewport.y;
        header[HEADER_AMBIENT_R] = ambient[0];
        header[HEADER_AMBIENT_G] = ambient[1];
        header[HEADER_AMBIENT_B] = ambient[2];
        header[HEADER_STAR_FADE] = if self.ctx.stars.config().fade { 1.0 } else { 0.0 };

        let layout = &self.layout;
        let frame = &mut self.frame;
        layout.write_section(frame, Section::Sdf, self.sdf_buffer.as_floats());
        layout.write_section(frame, Section::Labels, self.label_buffer.as_floats());
        layout.write_section(frame, Section::Stars, self.star_buffer.as_floats());
        layout.write_section(frame, Section::Hearts, self.heart_buffer.as_floats());
        #[cfg(feature = "vectors")]
        layout.write_section(frame, Section::Vectors, self.ctx.vectors.as_floats());
        layout.write_section(frame, Section::Lights, self.ctx.lights.as_floats());
        layout.write_section(frame, Section::Sounds, &self.sound_floats);
        layout.write_section(frame, Section::Events, GameEvent::as_floats(&self.ctx.events));
    }

    // ---- Read-only views (tests and accessors) ----

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    pub fn manifest_json(&self) -> String {
        match self.manifest.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("manifest serialization failed: {e}");
                "{}".to_owned()
            }
        }
    }

    pub fn label_texts(&self) -> Vec<String> {
        self.ctx.labels.iter().map(str::to_owned).collect()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    pub fn sdf_instances_ptr(&self) -> *const f32 {
        self.sdf_buffer.instances_ptr()
    }

    pub fn sdf_instance_count(&self) -> u32 {
        self.sdf_buffer.instance_count() as u32
    }

    pub fn labels_ptr(&self) -> *const f32 {
        self.label_buffer.instances_ptr()
    }

    pub fn label_count(&self) -> u32 {
        self.label_buffer.instance_count() as u32
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.star_buffer.instances_ptr()
    }

    pub fn star_count(&self) -> u32 {
        self.star_buffer.instance_count() as u32
    }

    pub fn hearts_ptr(&self) -> *const f32 {
        self.heart_buffer.instances_ptr()
    }

    pub fn heart_count(&self) -> u32 {
        self.heart_buffer.instance_count() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.ctx.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.ctx.vectors.vertex_count() as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count() as u32
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ctx.lights.ambient().rgb()
    }

    pub fn sound_events_ptr(&self) -> *const f32 {
        self.sound_floats.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_floats.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn viewport_width(&self) -> f32 {
        self.ctx.viewport().x
    }

    pub fn viewport_height(&self) -> f32 {
        self.ctx.viewport().y
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn capacity(&self, section: Section) -> u32 {
        self.layout.capacity(section) as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
