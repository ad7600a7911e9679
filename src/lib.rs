//! Memo Pairs core crate.
//!
//! A memory-matching card game for the browser. Cards are drawn from the categories
//! picked in the menu, dealt face-down on a grid sized for the device, and turned two
//! at a time until every pair is found.
//!
//! The gameplay modules (`grid`, `selector`, `engine`, `session`, ...) are plain Rust
//! and run natively under `cargo test`; `web` binds them to the DOM.

use wasm_bindgen::prelude::*;

pub mod catalog;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod grid;
pub mod render;
pub mod rng;
pub mod selector;
pub mod session;
pub mod timers;
mod web;

pub use catalog::{CardCatalog, CardPair};
pub use config::{GameConfig, GameOptions, Timing};
pub use deck::{Card, CardId, CardState, Deck, Face};
pub use engine::{GameEvent, Phase, SoundCue, TurnEngine, TurnState};
pub use error::GameError;
pub use grid::{DeviceTier, GridMode, GridSpec, Viewport};
pub use session::GameSession;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    web::console::init();
    web::boot();
}

// -----------------------------------------------------------------------------
// Menu actions exported to the page
// -----------------------------------------------------------------------------

/// Deal a new game from the current menu selection.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start_from_menu().map_err(JsValue::from)
}

/// Mirror of the sound checkbox; when false no cue is played.
#[wasm_bindgen]
pub fn set_sound_enabled(enabled: bool) {
    web::set_sound_enabled(enabled);
}
