/// Greeting overlay: visibility, heart trail and music, in one place.
///
/// Times are wall-clock milliseconds from the engine clock.

use orrery_engine::{HeartBuffer, Rng, SoundEvent};

use crate::audio::{AudioPlayback, MusicTrack, PlaybackSignal};
use crate::hearts::HeartField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalVisibility {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Default)]
pub struct GreetingOverlay {
    visibility: ModalVisibility,
    hearts: HeartField,
    audio: AudioPlayback,
}

impl GreetingOverlay {
    pub fn new(track: Option<MusicTrack>) -> Self {
        Self {
            audio: AudioPlayback::new(track),
            ..Default::default()
        }
    }

    pub fn visibility(&self) -> ModalVisibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == ModalVisibility::Open
    }

    /// Returns `true` if the state changed.
    pub fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.visibility = ModalVisibility::Open;
        log::info!("greeting opened");
        true
    }

    /// Close and drop every heart. Returns `true` if the state changed.
    pub fn close(&mut self) -> bool {
        self.hearts.clear();
        if !self.is_open() {
            return false;
        }
        self.visibility = ModalVisibility::Closed;
        log::info!("greeting closed");
        true
    }

    /// Pointer moved over the open greeting. Returns `true` if a heart was
    /// added.
    pub fn pointer_moved(&mut self, x: f32, y: f32, now_ms: f64, rng: &mut Rng) -> bool {
        if !self.is_open() {
            return false;
        }
        self.hearts.spawn(x, y, now_ms, rng).is_some()
    }

    /// Run due heart removals.
    pub fn tick(&mut self, now_ms: f64) {
        self.hearts.expire(now_ms);
    }

    /// The play/pause button inside the greeting. Returns the sound event
    /// to emit; a toggle while closed or a playback error yields `None`.
    /// Closing never pauses.
    pub fn toggle_music(&mut self) -> Option<SoundEvent> {
        if !self.is_open() {
            log::debug!("music toggle ignored: greeting closed");
            return None;
        }
        match self.audio.toggle() {
            Ok((_, event)) => Some(event),
            Err(e) => {
                log::debug!("music toggle ignored: {e}");
                None
            }
        }
    }

    pub fn on_playback(&mut self, signal: PlaybackSignal) {
        self.audio.on_signal(signal);
    }

    pub fn set_track(&mut self, track: Option<MusicTrack>) {
        self.audio.set_track(track);
    }

    /// Page teardown: final pause, if any.
    pub fn release(&mut self) -> Option<SoundEvent> {
        self.hearts.clear();
        self.audio.release()
    }

    pub fn hearts(&self) -> &HeartField {
        &self.hearts
    }

    pub fn audio(&self) -> &AudioPlayback {
        &self.audio
    }

    pub fn write_hearts(&self, now_ms: f64, out: &mut HeartBuffer) {
        self.hearts.write_instances(now_ms, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{MUSIC_PAUSE, MUSIC_PLAY};
    use crate::hearts::LIFETIME_MS;

    fn overlay() -> (GreetingOverlay, Rng) {
        (GreetingOverlay::new(Some(MusicTrack::default())), Rng::new(3))
    }

    #[test]
    fn starts_closed() {
        let (overlay, _) = overlay();
        assert_eq!(overlay.visibility(), ModalVisibility::Closed);
    }

    #[test]
    fn hearts_only_while_open() {
        let (mut overlay, mut rng) = overlay();
        assert!(!overlay.pointer_moved(10.0, 10.0, 0.0, &mut rng));
        assert!(overlay.hearts().is_empty());

        assert!(overlay.open());
        assert!(overlay.pointer_moved(10.0, 10.0, 0.0, &mut rng));
        assert!(!overlay.pointer_moved(12.0, 10.0, 50.0, &mut rng));
        assert!(overlay.pointer_moved(14.0, 10.0, 150.0, &mut rng));
        assert_eq!(overlay.hearts().len(), 2);
    }

    #[test]
    fn close_clears_hearts_at_once() {
        let (mut overlay, mut rng) = overlay();
        overlay.open();
        overlay.pointer_moved(1.0, 1.0, 0.0, &mut rng);
        overlay.pointer_moved(2.0, 2.0, 200.0, &mut rng);
        assert!(overlay.close());
        assert!(overlay.hearts().is_empty());
        assert!(!overlay.is_open());
        // Pending removals fire later without effect.
        overlay.tick(LIFETIME_MS + 500.0);
        assert!(overlay.hearts().is_empty());
    }

    #[test]
    fn open_twice_is_idempotent() {
        let (mut overlay, _) = overlay();
        assert!(overlay.open());
        assert!(!overlay.open());
        assert!(overlay.close());
        assert!(!overlay.close());
    }

    #[test]
    fn hearts_expire_while_open() {
        let (mut overlay, mut rng) = overlay();
        overlay.open();
        overlay.pointer_moved(1.0, 1.0, 100.0, &mut rng);
        overlay.tick(100.0 + LIFETIME_MS - 1.0);
        assert_eq!(overlay.hearts().len(), 1);
        overlay.tick(100.0 + LIFETIME_MS);
        assert!(overlay.hearts().is_empty());
    }

    #[test]
    fn music_keeps_playing_after_close() {
        let (mut overlay, _) = overlay();
        overlay.open();
        assert_eq!(overlay.toggle_music(), Some(MUSIC_PLAY));
        overlay.on_playback(PlaybackSignal::Play);
        overlay.close();
        assert!(overlay.audio().is_playing());

        overlay.open();
        assert_eq!(overlay.toggle_music(), Some(MUSIC_PAUSE));
        assert!(!overlay.audio().is_playing());
    }

    #[test]
    fn toggle_while_closed_is_ignored() {
        let (mut overlay, _) = overlay();
        assert_eq!(overlay.toggle_music(), None);
        assert!(!overlay.audio().is_playing());

        overlay.open();
        overlay.toggle_music();
        overlay.on_playback(PlaybackSignal::Play);
        overlay.close();
        assert_eq!(overlay.toggle_music(), None);
        assert!(overlay.audio().is_playing());
    }

    #[test]
    fn release_pauses_and_disables_toggle() {
        let (mut overlay, _) = overlay();
        overlay.open();
        overlay.on_playback(PlaybackSignal::Play);
        assert_eq!(overlay.release(), Some(MUSIC_PAUSE));
        assert_eq!(overlay.toggle_music(), None);
        assert!(!overlay.audio().is_playing());
    }

    #[test]
    fn no_track_toggle_is_noop() {
        let mut overlay = GreetingOverlay::new(None);
        overlay.open();
        assert_eq!(overlay.toggle_music(), None);
        assert!(!overlay.audio().is_playing());
    }
}
