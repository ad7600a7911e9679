//! Browser glue: owns the live session, wires DOM events and real timeouts to it.

use std::cell::RefCell;
use std::collections::HashMap;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window, window};

use crate::config::GameConfig;
use crate::deck::CardId;
use crate::engine::GameEvent;
use crate::error::GameError;
use crate::grid::Viewport;
use crate::render::{self, SoundPlayer};
use crate::rng::GameRng;
use crate::session::GameSession;
use crate::timers::TimerHandle;

mod audio;
pub(crate) mod console;
mod data;
mod dom;

use audio::AudioPlayer;
use dom::DomRenderer;

/// Element holding optional JSON overrides for [`GameConfig`].
const CONFIG_ELEMENT_ID: &str = "memo-config";

struct App {
    session: GameSession,
    renderer: DomRenderer,
    audio: AudioPlayer,
    sound_enabled: bool,
    /// Real timeouts armed for pending session timers. Dropping one clears it.
    armed: HashMap<TimerHandle, Timeout>,
}

impl App {
    fn pump(&mut self, events: Vec<GameEvent>) {
        render::dispatch(&events, &mut self.renderer, &mut self.audio, self.sound_enabled);
        self.sync_timers();
    }

    /// Arm a timeout for every new session timer, drop the ones it cancelled.
    fn sync_timers(&mut self) {
        let now = now_ms();
        let timers = self.session.timers();
        self.armed.retain(|handle, _| timers.is_pending(*handle));
        for (handle, scheduled) in timers.pending() {
            if self.armed.contains_key(&handle) {
                continue;
            }
            let delay = (scheduled.due_ms - now).max(0.0) as u32;
            self.armed.insert(handle, Timeout::new(delay, move || on_timeout(handle)));
        }
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app<T>(f: impl FnOnce(&mut App) -> T) -> Option<T> {
    APP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn viewport_of(win: &Window) -> Viewport {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(dim(win.inner_width()), dim(win.inner_height()))
}

fn document() -> Result<Document, GameError> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| GameError::Dom("no document".into()))
}

fn read_config(doc: &Document) -> GameConfig {
    let Some(text) = doc.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
        return GameConfig::default();
    };
    GameConfig::from_json(&text).unwrap_or_else(|err| {
        log::warn!("ignoring invalid #{CONFIG_ELEMENT_ID}: {err}");
        GameConfig::default()
    })
}

/// Page start-up: build the session, listen for resizes, fetch the card data.
pub(crate) fn boot() {
    if let Err(err) = install() {
        log::error!("start-up failed: {err}");
    }
}

fn install() -> Result<(), GameError> {
    let win = window().ok_or_else(|| GameError::Dom("no window".into()))?;
    let doc = document()?;
    let config = read_config(&doc);

    let app = App {
        session: GameSession::new(config.clone(), GameRng::from_entropy(), viewport_of(&win)),
        renderer: DomRenderer::new(&doc)?,
        audio: AudioPlayer::new(&config.assets),
        sound_enabled: dom::checkbox(&doc, dom::SOUND_ID).unwrap_or(true),
        armed: HashMap::new(),
    };
    APP.with(|cell| cell.replace(Some(app)));

    // Window resize feeds the debounced card-size update.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let Some(win) = window() else { return };
            let viewport = viewport_of(&win);
            with_app(|app| {
                app.session.resize(viewport, now_ms());
                app.sync_timers();
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    wasm_bindgen_futures::spawn_local(async move {
        match data::load_catalog(&config.assets).await {
            Ok(catalog) => {
                if let Ok(doc) = document() {
                    if let Err(err) = dom::build_menu(&doc, &catalog) {
                        log::warn!("menu not built: {err}");
                    }
                }
                with_app(|app| app.session.load(catalog));
            }
            Err(err) => {
                log::error!("card data unavailable: {err}");
                dom::alert(&format!(
                    "Could not load the game data. Check that {} and {} are available.",
                    config.assets.cards_url, config.assets.backs_url
                ));
            }
        }
    });
    Ok(())
}

/// Start button: read the menu and deal. Failures are shown to the player.
pub(crate) fn start_from_menu() -> Result<(), GameError> {
    let result = (|| -> Result<(), GameError> {
        let doc = document()?;
        let options = dom::read_options(&doc)?;
        let sound = dom::checkbox(&doc, dom::SOUND_ID);
        with_app(|app| -> Result<(), GameError> {
            if let Some(sound) = sound {
                app.sound_enabled = sound;
            }
            let events = app.session.start_game(&options, now_ms())?;
            app.pump(events);
            Ok(())
        })
        .unwrap_or_else(|| Err(GameError::Dom("game board is not initialised".into())))
    })();
    if let Err(err) = &result {
        log::warn!("game not started: {err}");
        dom::alert(&err.to_string());
    }
    result
}

pub(crate) fn set_sound_enabled(enabled: bool) {
    with_app(|app| {
        app.sound_enabled = enabled;
        if !enabled {
            app.audio.stop_all();
        }
    });
}

fn on_card_click(card: CardId) {
    with_app(|app| {
        let events = app.session.flip(card, now_ms());
        app.pump(events);
    });
}

fn on_timeout(handle: TimerHandle) {
    with_app(|app| {
        // The closure running now belongs to this Timeout; leak it rather than drop it mid-call.
        if let Some(timeout) = app.armed.remove(&handle) {
            let _ = timeout.forget();
        }
        let events = app.session.fire(handle);
        app.pump(events);
    });
}
