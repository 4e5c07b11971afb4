use wasm_bindgen::prelude::*;
use orrery_engine::*;

pub mod audio;
pub mod bodies;
pub mod content;
pub mod game;
pub mod hearts;
pub mod orbit;
pub mod overlay;
pub mod scene;
pub mod viewport;
use game::SolarLanding;

orrery_web::export_game!(SolarLanding, "solar-landing", vectors);
