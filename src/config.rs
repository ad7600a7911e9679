//! Tunable timings, asset locations and the per-game options chosen in the menu.
//!
//! Everything here deserializes from JSON with per-field defaults so a host page can
//! override a single value (for example a slower `flip_timeout_ms` for younger players)
//! without restating the rest.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::grid::GridMode;

/// Delays (milliseconds) for every scheduled callback the game uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// How long a mismatched pair stays face-up before turning back.
    pub flip_timeout_ms: u32,
    /// Pause between the final match and the win notification.
    pub win_delay_ms: u32,
    /// Duration of the kids-mode full reveal.
    pub training_ms: u32,
    /// Quiet period before a resize recomputes the card size.
    pub resize_debounce_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            flip_timeout_ms: 600,
            win_delay_ms: 500,
            training_ms: 3000,
            resize_debounce_ms: 250,
        }
    }
}

/// Where the static data files, card faces, backs and sounds live.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetLayout {
    pub cards_url: String,
    pub backs_url: String,
    pub cards_dir: String,
    pub backs_dir: String,
    pub sounds_dir: String,
    pub image_ext: String,
    pub sound_ext: String,
    pub volume: f64,
}

impl Default for AssetLayout {
    fn default() -> Self {
        Self {
            cards_url: "cards.json".to_string(),
            backs_url: "backs.json".to_string(),
            cards_dir: "cards".to_string(),
            backs_dir: "backs".to_string(),
            sounds_dir: "sounds".to_string(),
            image_ext: ".png".to_string(),
            sound_ext: ".mp3".to_string(),
            volume: 0.3,
        }
    }
}

impl AssetLayout {
    pub fn back_image(&self, back: &str) -> String {
        format!("{}/{}", self.backs_dir, back)
    }

    pub fn cue_path(&self, cue: &str) -> String {
        format!("{}/{}{}", self.sounds_dir, cue, self.sound_ext)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub timing: Timing,
    pub assets: AssetLayout,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Menu selection for one game start.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Selected category ids; empty means "everything".
    pub categories: Vec<String>,
    pub mode: GridMode,
    /// Back image file name; `None` uses the first back in the catalog.
    pub back: Option<String>,
    pub kids_mode: bool,
}
