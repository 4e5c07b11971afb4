pub mod runner;

pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (lifecycle, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_engine::*;
///
/// mod game;
/// use game::MyScene;
///
/// orrery_web::export_game!(MyScene, "my-scene");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `orrery_engine::Game`
///   and has a `new()` constructor
/// - `$game_name`: A string literal used in lifecycle log messages
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        /// Page unmount: final sound commands stay readable until the
        /// runner slot is reused by the next `game_init`.
        #[wasm_bindgen]
        pub fn game_shutdown() {
            with_runner(|r| r.shutdown());
            log::info!("{}: shut down", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32, button: u8) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta }));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) {
            with_runner(|r| r.load_manifest(json));
        }

        // ---- Static data ----

        #[wasm_bindgen]
        pub fn get_manifest_json() -> String {
            with_runner(|r| r.manifest_json())
        }

        /// Label strings indexed by `text_id`.
        #[wasm_bindgen]
        pub fn get_label_texts() -> js_sys::Array {
            with_runner(|r| {
                r.label_texts()
                    .into_iter()
                    .map(|t| wasm_bindgen::JsValue::from_str(&t))
                    .collect::<js_sys::Array>()
            })
        }

        // ---- Frame buffer ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }

        // ---- Per-section accessors ----

        #[wasm_bindgen]
        pub fn get_sdf_instances_ptr() -> *const f32 {
            with_runner(|r| r.sdf_instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sdf_instance_count() -> u32 {
            with_runner(|r| r.sdf_instance_count())
        }

        #[wasm_bindgen]
        pub fn get_labels_ptr() -> *const f32 {
            with_runner(|r| r.labels_ptr())
        }

        #[wasm_bindgen]
        pub fn get_label_count() -> u32 {
            with_runner(|r| r.label_count())
        }

        #[wasm_bindgen]
        pub fn get_stars_ptr() -> *const f32 {
            with_runner(|r| r.stars_ptr())
        }

        #[wasm_bindgen]
        pub fn get_star_count() -> u32 {
            with_runner(|r| r.star_count())
        }

        #[wasm_bindgen]
        pub fn get_hearts_ptr() -> *const f32 {
            with_runner(|r| r.hearts_ptr())
        }

        #[wasm_bindgen]
        pub fn get_heart_count() -> u32 {
            with_runner(|r| r.heart_count())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const f32 {
            with_runner(|r| r.sound_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_viewport_width() -> f32 {
            with_runner(|r| r.viewport_width())
        }

        #[wasm_bindgen]
        pub fn get_viewport_height() -> f32 {
            with_runner(|r| r.viewport_height())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_sdf_instances() -> u32 {
            with_runner(|r| r.capacity(orrery_engine::Section::Sdf))
        }

        #[wasm_bindgen]
        pub fn get_max_labels() -> u32 {
            with_runner(|r| r.capacity(orrery_engine::Section::Labels))
        }

        #[wasm_bindgen]
        pub fn get_max_stars() -> u32 {
            with_runner(|r| r.capacity(orrery_engine::Section::Stars))
        }

        #[wasm_bindgen]
        pub fn get_max_hearts() -> u32 {
            with_runner(|r| r.capacity(orrery_engine::Section::Hearts))
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.capacity(orrery_engine::Section::Sounds))
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.capacity(orrery_engine::Section::Events))
        }

        // ---- Lighting accessors ----

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.lights_ptr())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.light_count())
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.capacity(orrery_engine::Section::Lights))
        }

        #[wasm_bindgen]
        pub fn get_ambient_r() -> f32 {
            with_runner(|r| r.ambient()[0])
        }

        #[wasm_bindgen]
        pub fn get_ambient_g() -> f32 {
            with_runner(|r| r.ambient()[1])
        }

        #[wasm_bindgen]
        pub fn get_ambient_b() -> f32 {
            with_runner(|r| r.ambient()[2])
        }
    };

    // Variant with vectors feature
    ($game_type:ty, $game_name:literal, vectors) => {
        $crate::export_game!($game_type, $game_name);

        // ---- Vector accessors (only when vectors feature is enabled) ----

        #[wasm_bindgen]
        pub fn get_vector_vertices_ptr() -> *const f32 {
            with_runner(|r| r.vector_vertices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_vector_vertex_count() -> u32 {
            with_runner(|r| r.vector_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_max_vector_vertices() -> u32 {
            with_runner(|r| r.capacity(orrery_engine::Section::Vectors))
        }
    };
}
