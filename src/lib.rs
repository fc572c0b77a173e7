//! Burrow Tap core crate.
//!
//! A 30 second tap-the-target round on a 2D canvas: targets pop out of seven
//! holes, tapping one scores, and the rare bonus target doubles scoring for a
//! few seconds. Gameplay (`game`, `render`) is platform-free and driven with
//! explicit timestamps; `web` binds it to the DOM and the frame loop, and
//! `host` wraps the optional chat mini-app shell.

use wasm_bindgen::prelude::*;

pub mod assets;
pub mod config;
pub mod error;
pub mod game;
pub mod host;
pub mod render;
mod web;

pub use config::{AssetPaths, GameConfig, SpawnRate};
pub use error::{AssetError, ConfigError, MountError};
pub use game::{FrameOutcome, Game, Hud, Phase, TapOutcome, TargetKind, Viewport};
pub use host::{Haptic, Host, NoHost};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    if let Err(err) = web::mount(GameConfig::default()) {
        log::warn!("mount failed: {err}");
    }
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Begin a fresh round, mounting first if the start hook could not.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::mount(GameConfig::default())?;
    web::start_round();
    Ok(())
}

/// Flip haptic feedback; returns the new state.
#[wasm_bindgen]
pub fn toggle_haptics() -> bool {
    web::toggle_haptics()
}

#[wasm_bindgen]
pub fn score() -> f64 {
    web::score() as f64
}

/// Replace the gameplay config from JSON. Applies from the next round.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    web::configure(config)?;
    Ok(())
}
