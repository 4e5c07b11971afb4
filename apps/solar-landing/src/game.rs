/// Solar Landing: an orbiting solar system that opens a greeting when
/// Earth is clicked.
///
/// SDF spheres + labels + lyon orbit rings, orbit camera driven by pointer
/// and wheel input. The greeting itself is drawn by the browser; this side
/// owns its state and reports it through game events.

use orrery_engine::*;

use crate::audio::{MusicTrack, PlaybackSignal};
use crate::bodies::ACTION_OPEN_GREETING;
use crate::content::{self, PORTRAIT};
use crate::overlay::GreetingOverlay;
use crate::scene::SolarScene;
use crate::viewport::ViewportScale;

// ── Custom event kinds from the page ─────────────────────────────────

/// Click on the dimmed backdrop around the greeting.
const CUSTOM_BACKDROP: u32 = 1;
/// Greeting close button.
const CUSTOM_CLOSE: u32 = 2;
/// Play/pause button.
const CUSTOM_TOGGLE_MUSIC: u32 = 3;
/// Playback engine reports: a = rejection code for `PLAY_FAILED`.
const CUSTOM_AUDIO_PLAY: u32 = 10;
const CUSTOM_AUDIO_PAUSE: u32 = 11;
const CUSTOM_AUDIO_ENDED: u32 = 12;
const CUSTOM_AUDIO_PLAY_FAILED: u32 = 13;
/// Viewport resize (a = width, b = height).
const CUSTOM_RESIZE: u32 = 99;

// ── Game event kinds to the page ─────────────────────────────────────

/// a = 1 when the greeting is open, b = live heart count.
const EVENT_OVERLAY: f32 = 1.0;
/// a = 1 while music plays, b = rejected play attempts.
const EVENT_AUDIO: f32 = 2.0;
/// a = scale factor, b = min camera distance, c = max camera distance.
const EVENT_VIEWPORT: f32 = 3.0;

fn flag(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}

pub struct SolarLanding {
    scene: Option<SolarScene>,
    view: ViewportScale,
    overlay: GreetingOverlay,
    /// Last published event payloads; only changes are re-sent.
    sent_overlay: Option<GameEvent>,
    sent_audio: Option<GameEvent>,
    sent_viewport: Option<GameEvent>,
}

impl SolarLanding {
    pub fn new() -> Self {
        let track = MusicTrack::from_manifest(&content::default_manifest()).ok();
        Self {
            scene: None,
            view: ViewportScale::fallback(),
            overlay: GreetingOverlay::new(track),
            sent_overlay: None,
            sent_audio: None,
            sent_viewport: None,
        }
    }

    pub fn overlay(&self) -> &GreetingOverlay {
        &self.overlay
    }

    pub fn view(&self) -> &ViewportScale {
        &self.view
    }

    pub fn scene(&self) -> Option<&SolarScene> {
        self.scene.as_ref()
    }

    fn resize(&mut self, ctx: &mut EngineContext, width: f32, height: f32) {
        ctx.set_viewport(width, height);
        self.view = ViewportScale::from_size(width, height);
        if let Some(scene) = &self.scene {
            scene.apply_viewport(ctx, &self.view);
        }
        log::info!("viewport {width}x{height}, scale {:.2}", self.view.scale_factor);
    }

    fn handle_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32, b: f32) {
        match kind {
            CUSTOM_BACKDROP | CUSTOM_CLOSE => {
                self.overlay.close();
            }
            CUSTOM_TOGGLE_MUSIC => {
                if let Some(sound) = self.overlay.toggle_music() {
                    ctx.emit_sound(sound);
                }
            }
            CUSTOM_AUDIO_PLAY => self.overlay.on_playback(PlaybackSignal::Play),
            CUSTOM_AUDIO_PAUSE => self.overlay.on_playback(PlaybackSignal::Pause),
            CUSTOM_AUDIO_ENDED => self.overlay.on_playback(PlaybackSignal::Ended),
            CUSTOM_AUDIO_PLAY_FAILED => {
                let code = if a.is_finite() && a >= 0.0 { a as u32 } else { 0 };
                self.overlay.on_playback(PlaybackSignal::Rejected(code));
            }
            CUSTOM_RESIZE => self.resize(ctx, a, b),
            other => log::debug!("unknown custom event {other}"),
        }
    }

    fn handle_pointer(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        if self.overlay.is_open() {
            // The greeting covers the canvas: pointer input feeds the heart
            // trail instead of the camera.
            if let InputEvent::PointerMove { x, y } = *event {
                let now = ctx.clock.now_ms();
                self.overlay.pointer_moved(x, y, now, &mut ctx.rng);
            }
            return;
        }
        if let Some((_, action)) = ctx.drive_camera(event) {
            if action == ACTION_OPEN_GREETING && self.overlay.open() {
                ctx.pointer.cancel();
            }
        }
    }

    fn publish(&mut self, ctx: &mut EngineContext) {
        let overlay = GameEvent::new(
            EVENT_OVERLAY,
            flag(self.overlay.is_open()),
            self.overlay.hearts().len() as f32,
            0.0,
        );
        let audio = GameEvent::new(
            EVENT_AUDIO,
            flag(self.overlay.audio().is_playing()),
            self.overlay.audio().failures() as f32,
            0.0,
        );
        let viewport = GameEvent::new(
            EVENT_VIEWPORT,
            self.view.scale_factor,
            self.view.min_distance,
            self.view.max_distance,
        );
        for (event, sent) in [
            (overlay, &mut self.sent_overlay),
            (audio, &mut self.sent_audio),
            (viewport, &mut self.sent_viewport),
        ] {
            if *sent != Some(event) {
                *sent = Some(event);
                ctx.emit_event(event);
            }
        }
    }
}

impl Default for SolarLanding {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarLanding {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            max_sdf_instances: 32,
            max_labels: 32,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let size = ctx.viewport();
        self.view = ViewportScale::from_size(size.x, size.y);
        self.scene = Some(SolarScene::compose(ctx, &self.view));
        self.publish(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind, a, b, .. } => self.handle_custom(ctx, kind, a, b),
                InputEvent::Resize { width, height } => self.resize(ctx, width, height),
                _ => self.handle_pointer(ctx, event),
            }
        }

        if let Some(scene) = &self.scene {
            scene.animate(ctx);
        }
        self.overlay.tick(ctx.clock.now_ms());
        self.publish(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        self.overlay.write_hearts(ctx.now_ms, ctx.hearts);
    }

    fn manifest(&self) -> AssetManifest {
        content::default_manifest()
    }

    fn load_manifest(&mut self, _ctx: &mut EngineContext, manifest: &AssetManifest) -> Result<(), ManifestError> {
        let track = MusicTrack::from_manifest(manifest)?;
        manifest.image(PORTRAIT)?;
        self.overlay.set_track(Some(track));
        Ok(())
    }

    fn shutdown(&mut self, ctx: &mut EngineContext) {
        if let Some(sound) = self.overlay.release() {
            ctx.emit_sound(sound);
        }
    }
}
