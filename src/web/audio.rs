//! Sound cues through `<audio>` elements. Playback failures (autoplay policies,
//! missing files) are logged and otherwise ignored.

use std::collections::HashMap;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::config::AssetLayout;
use crate::engine::SoundCue;
use crate::render::SoundPlayer;

const CUES: [&str; 3] = ["flip", "wrong", "win"];

pub struct AudioPlayer {
    cues: HashMap<&'static str, HtmlAudioElement>,
    current_match: Option<HtmlAudioElement>,
    volume: f64,
}

impl AudioPlayer {
    pub fn new(assets: &AssetLayout) -> Self {
        let mut cues = HashMap::new();
        for name in CUES {
            match HtmlAudioElement::new_with_src(&assets.cue_path(name)) {
                Ok(audio) => {
                    audio.set_volume(assets.volume);
                    audio.load();
                    cues.insert(name, audio);
                }
                Err(err) => log::warn!("sound '{name}' unavailable: {err:?}"),
            }
        }
        Self {
            cues,
            current_match: None,
            volume: assets.volume,
        }
    }

    fn start(audio: &HtmlAudioElement, label: String) {
        audio.set_current_time(0.0);
        match audio.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    log::warn!("could not play {label}: {}", describe(&err));
                }
            }),
            Err(err) => log::warn!("could not play {label}: {}", describe(&err)),
        }
    }

    fn rewind(audio: &HtmlAudioElement) {
        if let Err(err) = audio.pause() {
            log::debug!("pause failed: {}", describe(&err));
        }
        audio.set_current_time(0.0);
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl SoundPlayer for AudioPlayer {
    fn play(&mut self, cue: &SoundCue) {
        if let SoundCue::Custom(path) = cue {
            self.play_custom(path);
            return;
        }
        if let Some(audio) = self.cues.get(cue.name()) {
            Self::start(audio, format!("'{}'", cue.name()));
        }
    }

    /// Only one pair sound plays at a time; a new one cuts the previous.
    fn play_custom(&mut self, path: &str) {
        if let Some(previous) = self.current_match.take() {
            Self::rewind(&previous);
        }
        match HtmlAudioElement::new_with_src(path) {
            Ok(audio) => {
                audio.set_volume(self.volume);
                Self::start(&audio, format!("match sound {path}"));
                self.current_match = Some(audio);
            }
            Err(err) => log::warn!("match sound {path} unavailable: {}", describe(&err)),
        }
    }

    fn stop_all(&mut self) {
        for audio in self.cues.values() {
            Self::rewind(audio);
        }
        if let Some(current) = self.current_match.take() {
            Self::rewind(&current);
        }
    }
}
