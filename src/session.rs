//! One player's session: loaded card data, the running game and its timers.
//!
//! The session is an ordinary value owned by the host (the browser glue or a test).
//! Every entry point takes the current time in milliseconds and returns the events
//! the presentation layer should apply.

use crate::catalog::CardCatalog;
use crate::config::{GameConfig, GameOptions};
use crate::deck::{CardId, Deck};
use crate::engine::{GameEvent, TurnEngine};
use crate::error::GameError;
use crate::grid::{self, GridSpec, Viewport};
use crate::rng::GameRng;
use crate::selector::{pool_size, select_pairs};
use crate::timers::{TimerAction, TimerHandle, Timers};

pub struct GameSession {
    config: GameConfig,
    catalog: Option<CardCatalog>,
    engine: Option<TurnEngine>,
    grid: Option<GridSpec>,
    timers: Timers,
    rng: GameRng,
    viewport: Viewport,
    training: Option<TimerHandle>,
    resize: Option<TimerHandle>,
}

impl GameSession {
    pub fn new(config: GameConfig, rng: GameRng, viewport: Viewport) -> Self {
        Self {
            config,
            catalog: None,
            engine: None,
            grid: None,
            timers: Timers::new(),
            rng,
            viewport,
            training: None,
            resize: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Install the card data. Games can start from now on.
    pub fn load(&mut self, catalog: CardCatalog) {
        log::info!(
            "card data loaded: {} pairs, {} backs",
            catalog.pair_count(),
            catalog.backs().len()
        );
        self.catalog = Some(catalog.with_assets(self.config.assets.clone()));
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn catalog(&self) -> Option<&CardCatalog> {
        self.catalog.as_ref()
    }

    pub fn engine(&self) -> Option<&TurnEngine> {
        self.engine.as_ref()
    }

    pub fn grid(&self) -> Option<GridSpec> {
        self.grid
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// True while the kids-mode reveal is on screen.
    pub fn is_training(&self) -> bool {
        self.training.is_some()
    }

    /// Deal a fresh game. On error the previous game, if any, is left untouched.
    pub fn start_game(&mut self, options: &GameOptions, now_ms: f64) -> Result<Vec<GameEvent>, GameError> {
        let catalog = self.catalog.as_ref().ok_or(GameError::DataNotLoaded)?;
        if catalog.is_empty() {
            return Err(GameError::EmptyCatalog);
        }

        let available = pool_size(options.categories.as_slice(), catalog);
        let grid = grid::plan(options.mode, self.viewport, available)?;
        let wanted = grid.total_pairs();
        let pairs = select_pairs(options.categories.as_slice(), wanted, catalog, &mut self.rng);
        if pairs.len() < wanted {
            return Err(GameError::InsufficientCards {
                required: wanted,
                available: pairs.len(),
            });
        }

        let back = options
            .back
            .as_deref()
            .or_else(|| catalog.default_back())
            .unwrap_or_default();
        let back_image = self.config.assets.back_image(back);

        self.end_game();

        let deck = Deck::deal(&pairs, &mut self.rng);
        let card_px = grid::card_size(grid.columns, self.viewport);
        let mut events = Vec::with_capacity(deck.len() + 4);
        events.push(GameEvent::StopSounds);
        events.push(GameEvent::ClearBoard);
        events.push(GameEvent::Layout { grid, card_px });
        events.extend(deck.iter().map(|(card, data)| GameEvent::DealCard {
            card,
            data: data.clone(),
            back_image: back_image.clone(),
        }));

        if options.kids_mode {
            events.push(GameEvent::RevealAll);
            self.training = Some(self.timers.schedule(
                TimerAction::TrainingConceal,
                self.config.timing.training_ms,
                now_ms,
            ));
        }

        log::info!(
            "new game: {}x{} grid, {} pairs, mode {}",
            grid.columns,
            grid.rows,
            wanted,
            options.mode
        );
        self.grid = Some(grid);
        self.engine = Some(TurnEngine::new(deck, self.config.timing));
        Ok(events)
    }

    /// Tear down the current game and every callback scheduled for it.
    pub fn end_game(&mut self) {
        self.timers.cancel_all();
        self.training = None;
        self.resize = None;
        self.engine = None;
        self.grid = None;
    }

    /// Player clicked a card. Ignored with no game or during the kids-mode reveal.
    pub fn flip(&mut self, card: CardId, now_ms: f64) -> Vec<GameEvent> {
        if self.training.is_some() {
            return Vec::new();
        }
        match self.engine.as_mut() {
            Some(engine) => engine.flip(card, &mut self.timers, now_ms),
            None => Vec::new(),
        }
    }

    /// Record a new viewport and restart the resize quiet period.
    pub fn resize(&mut self, viewport: Viewport, now_ms: f64) {
        self.viewport = viewport;
        if let Some(previous) = self.resize.take() {
            self.timers.cancel(previous);
        }
        self.resize = Some(self.timers.schedule(
            TimerAction::ResizeDebounce,
            self.config.timing.resize_debounce_ms,
            now_ms,
        ));
    }

    /// A browser timeout armed for `handle` elapsed.
    pub fn fire(&mut self, handle: TimerHandle) -> Vec<GameEvent> {
        match self.timers.take(handle) {
            Some(action) => self.apply(handle, action),
            None => {
                log::debug!("timer {handle:?} no longer pending");
                Vec::new()
            }
        }
    }

    /// Run every timer due by `now_ms`.
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let due = self.timers.drain_due(now_ms);
        due.into_iter()
            .flat_map(|(handle, action)| self.apply(handle, action))
            .collect()
    }

    fn apply(&mut self, handle: TimerHandle, action: TimerAction) -> Vec<GameEvent> {
        match action {
            TimerAction::TrainingConceal => {
                if self.training != Some(handle) {
                    return Vec::new();
                }
                self.training = None;
                let states = self
                    .engine
                    .as_ref()
                    .map(|e| e.deck().iter().map(|(_, c)| c.state).collect())
                    .unwrap_or_default();
                vec![GameEvent::ConcealAll { states }]
            }
            TimerAction::ResizeDebounce => {
                if self.resize != Some(handle) {
                    return Vec::new();
                }
                self.resize = None;
                match self.grid {
                    Some(grid) => vec![GameEvent::CardSize {
                        card_px: grid::card_size(grid.columns, self.viewport),
                    }],
                    None => Vec::new(),
                }
            }
            TimerAction::MismatchRevert | TimerAction::WinNotify => match self.engine.as_mut() {
                Some(engine) => engine.on_timer(handle, action),
                None => Vec::new(),
            },
        }
    }
}
