/// Built-in asset manifest: the portrait, the music track and every string
/// the browser layer shows. A host-supplied manifest replaces it.

use std::collections::HashMap;

use orrery_engine::{AssetManifest, ImageDescriptor, SoundDescriptor};

use crate::audio::{MUSIC_PAUSE, MUSIC_PLAY, MUSIC_TRACK};
use crate::hearts::HEART_EMOJIS;

pub const PORTRAIT: &str = "portrait";

const TEXTS: &[(&str, &str)] = &[
    ("banner", "ДЭЛХИЙ ДЭЭР ДАР"),
    ("banner_mobile", "Татаад дэлхий дээр дар"),
    ("title", "💕 Valentine's Day 💕"),
    ("message", "Валентины баярын мэнд хүргэе!"),
    ("portrait_caption", "Цэнгэл"),
    ("play_caption", "Дуу тоглуулах"),
    ("pause_caption", "Дуу зогсоох"),
    ("close_caption", "Арилгах"),
];

pub fn default_manifest() -> AssetManifest {
    let mut images = HashMap::new();
    images.insert(
        PORTRAIT.to_owned(),
        ImageDescriptor { path: "assets/tsengel.jpg".into(), alt: Some("Цэнгэл".into()) },
    );

    let mut sounds = HashMap::new();
    sounds.insert(
        MUSIC_TRACK.to_owned(),
        SoundDescriptor {
            path: "sound/music.mp3".into(),
            looping: true,
            play_event: Some(MUSIC_PLAY.0),
            pause_event: Some(MUSIC_PAUSE.0),
        },
    );

    let mut texts: HashMap<String, String> = TEXTS
        .iter()
        .map(|&(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
    texts.insert("hearts".into(), HEART_EMOJIS.join(" "));

    AssetManifest { images, sounds, texts }
}
