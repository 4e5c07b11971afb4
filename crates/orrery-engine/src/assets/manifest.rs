use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Asset manifest describing the static assets a game references.
/// Loaded from JSON at runtime; games also ship a built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Named images: name → descriptor.
    #[serde(default)]
    pub images: HashMap<String, ImageDescriptor>,
    /// Named audio assets.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
    /// Display strings the browser layer renders (titles, captions).
    #[serde(default)]
    pub texts: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Relative path or URL.
    pub path: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Describes an audio asset and the sound events that drive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundDescriptor {
    pub path: String,
    /// Restart from the beginning when playback reaches the end.
    #[serde(default, rename = "loop")]
    pub looping: bool,
    /// Sound event id that starts (or resumes) playback.
    #[serde(default)]
    pub play_event: Option<u32>,
    /// Sound event id that pauses playback.
    #[serde(default)]
    pub pause_event: Option<u32>,
}

#[derive(Debug)]
pub enum ManifestError {
    Json(serde_json::Error),
    MissingSound(String),
    MissingImage(String),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Json(e) => write!(f, "invalid manifest JSON: {e}"),
            ManifestError::MissingSound(name) => write!(f, "manifest has no sound named '{name}'"),
            ManifestError::MissingImage(name) => write!(f, "manifest has no image named '{name}'"),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(e: serde_json::Error) -> Self {
        ManifestError::Json(e)
    }
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn sound(&self, name: &str) -> Result<&SoundDescriptor, ManifestError> {
        self.sounds
            .get(name)
            .ok_or_else(|| ManifestError::MissingSound(name.to_owned()))
    }

    pub fn image(&self, name: &str) -> Result<&ImageDescriptor, ManifestError> {
        self.images
            .get(name)
            .ok_or_else(|| ManifestError::MissingImage(name.to_owned()))
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.texts.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_sounds() {
        let json = r#"{
            "images": { "portrait": { "path": "portrait.jpg", "alt": "Portrait" } },
            "sounds": {
                "music": { "path": "track.mp3", "loop": true, "play_event": 1, "pause_event": 2 },
                "click": { "path": "click.ogg" }
            },
            "texts": { "title": "Hello" }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let music = manifest.sound("music").unwrap();
        assert!(music.looping);
        assert_eq!(music.play_event, Some(1));
        assert_eq!(music.pause_event, Some(2));

        let click = manifest.sound("click").unwrap();
        assert!(!click.looping);
        assert_eq!(click.play_event, None);

        assert_eq!(manifest.image("portrait").unwrap().alt.as_deref(), Some("Portrait"));
        assert_eq!(manifest.text("title"), Some("Hello"));
    }

    #[test]
    fn empty_object_is_valid() {
        let manifest = AssetManifest::from_json("{}").unwrap();
        assert_eq!(manifest, AssetManifest::default());
    }

    #[test]
    fn bad_json_is_reported() {
        let err = AssetManifest::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ManifestError::Json(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn missing_entries_name_the_key() {
        let manifest = AssetManifest::default();
        let err = manifest.sound("music").unwrap_err();
        assert_eq!(err.to_string(), "manifest has no sound named 'music'");
        assert!(matches!(manifest.image("x"), Err(ManifestError::MissingImage(_))));
    }

    #[test]
    fn json_roundtrip_keeps_loop_key() {
        let mut manifest = AssetManifest::default();
        manifest.sounds.insert(
            "music".into(),
            SoundDescriptor { path: "a.mp3".into(), looping: true, play_event: Some(1), pause_event: None },
        );
        let json = manifest.to_json().unwrap();
        assert!(json.contains("\"loop\":true"));
        assert_eq!(AssetManifest::from_json(&json).unwrap(), manifest);
    }
}
