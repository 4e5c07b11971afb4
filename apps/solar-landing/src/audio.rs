/// Background music state.
///
/// Rust never touches the audio element. It issues play/pause commands as
/// sound events and learns what actually happened from the signals the
/// browser sends back. `is_playing` only turns on after the browser
/// confirms playback started.

use std::fmt;

use orrery_engine::{AssetManifest, ManifestError, SoundEvent};

/// Manifest key of the music track.
pub const MUSIC_TRACK: &str = "music";

/// Sound events used when the manifest doesn't name its own.
pub const MUSIC_PLAY: SoundEvent = SoundEvent(1);
pub const MUSIC_PAUSE: SoundEvent = SoundEvent(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play,
    Pause,
}

/// What the playback engine reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSignal {
    Play,
    Pause,
    Ended,
    /// `play()` was refused. The code identifies the browser's reason.
    Rejected(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    Rejected(String),
    NoTrack,
    Released,
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::Rejected(reason) => write!(f, "playback rejected: {reason}"),
            PlaybackError::NoTrack => write!(f, "no music track registered"),
            PlaybackError::Released => write!(f, "music track already released"),
        }
    }
}

impl std::error::Error for PlaybackError {}

impl PlaybackError {
    /// Map a rejection code from the browser to a readable reason.
    pub fn from_rejection(code: u32) -> Self {
        let reason = match code {
            1 => "autoplay not allowed",
            2 => "media not supported",
            3 => "playback aborted",
            _ => "unknown error",
        };
        PlaybackError::Rejected(reason.to_owned())
    }
}

/// The sound events that drive one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicTrack {
    pub play: SoundEvent,
    pub pause: SoundEvent,
}

impl Default for MusicTrack {
    fn default() -> Self {
        Self { play: MUSIC_PLAY, pause: MUSIC_PAUSE }
    }
}

impl MusicTrack {
    pub fn from_manifest(manifest: &AssetManifest) -> Result<Self, ManifestError> {
        let sound = manifest.sound(MUSIC_TRACK)?;
        Ok(Self {
            play: sound.play_event.map_or(MUSIC_PLAY, SoundEvent),
            pause: sound.pause_event.map_or(MUSIC_PAUSE, SoundEvent),
        })
    }

    pub fn event(&self, command: PlaybackCommand) -> SoundEvent {
        match command {
            PlaybackCommand::Play => self.play,
            PlaybackCommand::Pause => self.pause,
        }
    }
}

#[derive(Debug, Default)]
pub struct AudioPlayback {
    track: Option<MusicTrack>,
    released: bool,
    is_playing: bool,
    failures: u32,
}

impl AudioPlayback {
    pub fn new(track: Option<MusicTrack>) -> Self {
        Self { track, ..Default::default() }
    }

    /// Swap the track, e.g. after a new manifest. Ignored once released.
    pub fn set_track(&mut self, track: Option<MusicTrack>) {
        if self.released {
            return;
        }
        self.track = track;
        if self.track.is_none() {
            self.is_playing = false;
        }
    }

    /// The play/pause button. Returns the sound event to send.
    ///
    /// Pausing clears `is_playing` at once; playing waits for the browser's
    /// `Play` signal.
    pub fn toggle(&mut self) -> Result<(PlaybackCommand, SoundEvent), PlaybackError> {
        if self.released {
            return Err(PlaybackError::Released);
        }
        let track = self.track.ok_or(PlaybackError::NoTrack)?;
        let command = if self.is_playing {
            self.is_playing = false;
            PlaybackCommand::Pause
        } else {
            PlaybackCommand::Play
        };
        log::info!("music {command:?}");
        Ok((command, track.event(command)))
    }

    /// Apply a signal from the playback engine.
    pub fn on_signal(&mut self, signal: PlaybackSignal) {
        if self.released {
            return;
        }
        match signal {
            PlaybackSignal::Play => self.is_playing = true,
            PlaybackSignal::Pause | PlaybackSignal::Ended => self.is_playing = false,
            PlaybackSignal::Rejected(code) => {
                self.is_playing = false;
                self.failures += 1;
                log::error!("Error playing audio: {}", PlaybackError::from_rejection(code));
            }
        }
    }

    /// Final pause on teardown. Drops the track; later toggles fail with
    /// `Released`.
    pub fn release(&mut self) -> Option<SoundEvent> {
        if self.released {
            return None;
        }
        self.released = true;
        self.is_playing = false;
        self.track.take().map(|t| t.pause)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Rejected play attempts so far.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn has_track(&self) -> bool {
        self.track.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::SoundDescriptor;

    fn playback() -> AudioPlayback {
        AudioPlayback::new(Some(MusicTrack::default()))
    }

    #[test]
    fn play_waits_for_confirmation() {
        let mut audio = playback();
        assert_eq!(audio.toggle(), Ok((PlaybackCommand::Play, MUSIC_PLAY)));
        assert!(!audio.is_playing());
        audio.on_signal(PlaybackSignal::Play);
        assert!(audio.is_playing());
    }

    #[test]
    fn pause_clears_at_once() {
        let mut audio = playback();
        audio.on_signal(PlaybackSignal::Play);
        assert_eq!(audio.toggle(), Ok((PlaybackCommand::Pause, MUSIC_PAUSE)));
        assert!(!audio.is_playing());
    }

    #[test]
    fn toggle_before_confirmation_reissues_play() {
        let mut audio = playback();
        audio.toggle().unwrap();
        assert_eq!(audio.toggle().unwrap().0, PlaybackCommand::Play);
    }

    #[test]
    fn rejection_counts_once_and_stays_stopped() {
        let mut audio = playback();
        audio.toggle().unwrap();
        audio.on_signal(PlaybackSignal::Rejected(1));
        assert!(!audio.is_playing());
        assert_eq!(audio.failures(), 1);
    }

    #[test]
    fn engine_signals_resync() {
        let mut audio = playback();
        audio.on_signal(PlaybackSignal::Play);
        audio.on_signal(PlaybackSignal::Ended);
        assert!(!audio.is_playing());
        audio.on_signal(PlaybackSignal::Play);
        audio.on_signal(PlaybackSignal::Pause);
        assert!(!audio.is_playing());
    }

    #[test]
    fn missing_track_is_an_error() {
        let mut audio = AudioPlayback::new(None);
        assert_eq!(audio.toggle(), Err(PlaybackError::NoTrack));
        assert!(!audio.is_playing());
        assert_eq!(audio.release(), None);
    }

    #[test]
    fn release_pauses_then_disables() {
        let mut audio = playback();
        audio.on_signal(PlaybackSignal::Play);
        assert_eq!(audio.release(), Some(MUSIC_PAUSE));
        assert!(!audio.is_playing());
        assert_eq!(audio.toggle(), Err(PlaybackError::Released));
        assert_eq!(audio.release(), None);
        audio.on_signal(PlaybackSignal::Play);
        assert!(!audio.is_playing());
    }

    #[test]
    fn track_reads_manifest_events() {
        let mut manifest = AssetManifest::default();
        manifest.sounds.insert(
            MUSIC_TRACK.into(),
            SoundDescriptor { path: "music.mp3".into(), looping: true, play_event: Some(7), pause_event: None },
        );
        let track = MusicTrack::from_manifest(&manifest).unwrap();
        assert_eq!(track.play, SoundEvent(7));
        assert_eq!(track.pause, MUSIC_PAUSE);
        assert!(MusicTrack::from_manifest(&AssetManifest::default()).is_err());
    }

    #[test]
    fn rejection_reason_is_readable() {
        assert_eq!(
            PlaybackError::from_rejection(1).to_string(),
            "playback rejected: autoplay not allowed"
        );
    }
}
