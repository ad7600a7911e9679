//! Turn state machine.
//!
//! `Idle` → flip → `OneSelected` → flip → `Resolving` → (match) `Idle`/`Won`
//!                                                   → (mismatch, after delay) `Idle`
//!
//! The engine mutates only its own deck and [`TurnState`]; everything visible
//! (card faces, sounds, the win message) leaves as [`GameEvent`]s for the renderer.


use crate::config::Timing;
use crate::deck::{Card, CardId, CardState, Deck};
use crate::grid::GridSpec;
use crate::timers::{TimerAction, TimerHandle, Timers};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Flip,
    Wrong,
    Win,
    /// Per-pair match sound.
    Custom(String),
}

impl SoundCue {
    pub fn name(&self) -> &str {
        match self {
            SoundCue::Flip => "flip",
            SoundCue::Wrong => "wrong",
            SoundCue::Win => "win",
            SoundCue::Custom(path) => path,
        }
    }
}

/// Everything the presentation layer needs to mirror the game.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    StopSounds,
    ClearBoard,
    Layout { grid: GridSpec, card_px: f64 },
    DealCard { card: CardId, data: Card, back_image: String },
    CardState { card: CardId, state: CardState },
    CardSize { card_px: f64 },
    /// Kids mode: show every face regardless of state.
    RevealAll,
    /// End of kids-mode reveal: restore each card's real state.
    ConcealAll { states: Vec<CardState> },
    Sound(SoundCue),
    Won { total_pairs: usize, turn_count: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    OneSelected,
    Resolving,
    Won,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnState {
    pub first_selected: Option<CardId>,
    pub second_selected: Option<CardId>,
    pub locked: bool,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub turn_count: u32,
}

#[derive(Debug)]
pub struct TurnEngine {
    deck: Deck,
    state: TurnState,
    timing: Timing,
    pending_revert: Option<TimerHandle>,
    pending_win: Option<TimerHandle>,
}

impl TurnEngine {
    pub fn new(deck: Deck, timing: Timing) -> Self {
        let total_pairs = deck.pair_count();
        Self {
            deck,
            state: TurnState {
                total_pairs,
                ..TurnState::default()
            },
            timing,
            pending_revert: None,
            pending_win: None,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        let st = &self.state;
        if st.total_pairs > 0 && st.matched_pairs == st.total_pairs {
            Phase::Won
        } else if st.locked {
            Phase::Resolving
        } else if st.first_selected.is_some() {
            Phase::OneSelected
        } else {
            Phase::Idle
        }
    }

    /// Handles scheduled by this engine that have not fired yet.
    pub fn pending_timers(&self) -> impl Iterator<Item = TimerHandle> {
        self.pending_revert.into_iter().chain(self.pending_win)
    }

    /// Turn a card face-up. Ignored while locked, for the already selected card,
    /// and for cards that are face-up or matched.
    pub fn flip(&mut self, card: CardId, timers: &mut Timers, now_ms: f64) -> Vec<GameEvent> {
        if self.state.locked || self.state.first_selected == Some(card) {
            return Vec::new();
        }
        let Some(target) = self.deck.get_mut(card) else {
            log::warn!("flip on unknown card {card}");
            return Vec::new();
        };
        if target.state != CardState::FaceDown {
            return Vec::new();
        }
        target.state = CardState::FaceUp;

        let mut events = vec![
            GameEvent::CardState { card, state: CardState::FaceUp },
            GameEvent::Sound(SoundCue::Flip),
        ];

        let Some(first) = self.state.first_selected else {
            self.state.first_selected = Some(card);
            return events;
        };

        self.state.second_selected = Some(card);
        self.state.locked = true;
        self.state.turn_count += 1;
        self.resolve(first, card, timers, now_ms, &mut events);
        events
    }

    fn resolve(&mut self, first: CardId, second: CardId, timers: &mut Timers, now_ms: f64, events: &mut Vec<GameEvent>) {
        let (a, b) = match (self.deck.get(first), self.deck.get(second)) {
            (Some(a), Some(b)) => (a, b),
            _ => return,
        };

        if a.pair_id != b.pair_id {
            events.push(GameEvent::Sound(SoundCue::Wrong));
            self.pending_revert = Some(timers.schedule(TimerAction::MismatchRevert, self.timing.flip_timeout_ms, now_ms));
            return;
        }

        let cue = a.match_sound.clone().map_or(SoundCue::Flip, SoundCue::Custom);
        events.push(GameEvent::Sound(cue));
        for id in [first, second] {
            if let Some(c) = self.deck.get_mut(id) {
                c.state = CardState::Matched;
            }
            events.push(GameEvent::CardState { card: id, state: CardState::Matched });
        }
        self.state.matched_pairs += 1;
        self.clear_turn();

        if self.state.matched_pairs == self.state.total_pairs {
            self.pending_win = Some(timers.schedule(TimerAction::WinNotify, self.timing.win_delay_ms, now_ms));
        }
    }

    fn clear_turn(&mut self) {
        self.state.first_selected = None;
        self.state.second_selected = None;
        self.state.locked = false;
    }

    /// Apply a fired engine timer. Actions that do not belong to the engine are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle, action: TimerAction) -> Vec<GameEvent> {
        match action {
            TimerAction::MismatchRevert if self.pending_revert == Some(handle) => {
                self.pending_revert = None;
                let mut events = Vec::with_capacity(2);
                for id in [self.state.first_selected, self.state.second_selected].into_iter().flatten() {
                    if let Some(c) = self.deck.get_mut(id) {
                        c.state = CardState::FaceDown;
                    }
                    events.push(GameEvent::CardState { card: id, state: CardState::FaceDown });
                }
                self.clear_turn();
                events
            }
            TimerAction::WinNotify if self.pending_win == Some(handle) => {
                self.pending_win = None;
                log::info!(
                    "game won: {} pairs in {} turns",
                    self.state.total_pairs,
                    self.state.turn_count
                );
                vec![
                    GameEvent::Sound(SoundCue::Win),
                    GameEvent::Won {
                        total_pairs: self.state.total_pairs,
                        turn_count: self.state.turn_count,
                    },
                ]
            }
            _ => {
                log::debug!("ignoring stale timer {handle:?} ({action:?})");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Face;

    fn card(pair: &str, face: Face) -> Card {
        Card {
            pair_id: pair.to_string(),
            face,
            state: CardState::FaceDown,
            name: pair.to_string(),
            image: format!("{pair}.png"),
            match_sound: None,
        }
    }

    // Display order: A0 B0 A1 B1
    fn engine() -> TurnEngine {
        let deck = Deck::from_cards(vec![
            card("A", Face::A),
            card("B", Face::A),
            card("A", Face::B),
            card("B", Face::B),
        ]);
        TurnEngine::new(deck, Timing::default())
    }

    fn fire_all(engine: &mut TurnEngine, timers: &mut Timers, now: f64) -> Vec<GameEvent> {
        timers
            .drain_due(now)
            .into_iter()
            .flat_map(|(h, a)| engine.on_timer(h, a))
            .collect()
    }

    #[test]
    fn first_flip_selects() {
        let mut e = engine();
        let mut t = Timers::new();
        let ev = e.flip(0, &mut t, 0.0);
        assert_eq!(
            ev,
            vec![
                GameEvent::CardState { card: 0, state: CardState::FaceUp },
                GameEvent::Sound(SoundCue::Flip)
            ]
        );
        assert_eq!(e.phase(), Phase::OneSelected);
        assert_eq!(e.state().first_selected, Some(0));
    }

    #[test]
    fn same_card_twice_is_ignored() {
        let mut e = engine();
        let mut t = Timers::new();
        e.flip(0, &mut t, 0.0);
        let before = *e.state();
        assert!(e.flip(0, &mut t, 1.0).is_empty());
        assert_eq!(*e.state(), before);
    }

    #[test]
    fn match_marks_both_and_unlocks() {
        let mut e = engine();
        let mut t = Timers::new();
        e.flip(0, &mut t, 0.0);
        let ev = e.flip(2, &mut t, 10.0);
        assert!(ev.contains(&GameEvent::CardState { card: 0, state: CardState::Matched }));
        assert!(ev.contains(&GameEvent::CardState { card: 2, state: CardState::Matched }));
        assert_eq!(e.state().matched_pairs, 1);
        assert!(!e.state().locked);
        assert_eq!(e.phase(), Phase::Idle);
        assert!(t.is_empty());
        // Matched cards stay put.
        assert!(e.flip(0, &mut t, 20.0).is_empty());
    }

    #[test]
    fn match_prefers_pair_sound() {
        let mut a = card("owl", Face::A);
        a.match_sound = Some("sounds/birds/owl.mp3".into());
        let mut b = card("owl", Face::B);
        b.match_sound = a.match_sound.clone();
        let mut e = TurnEngine::new(Deck::from_cards(vec![a, b, card("x", Face::A), card("x", Face::B)]), Timing::default());
        let mut t = Timers::new();
        e.flip(0, &mut t, 0.0);
        let ev = e.flip(1, &mut t, 0.0);
        assert!(ev.contains(&GameEvent::Sound(SoundCue::Custom("sounds/birds/owl.mp3".into()))));
    }

    #[test]
    fn mismatch_reverts_after_delay() {
        let mut e = engine();
        let mut t = Timers::new();
        e.flip(0, &mut t, 0.0);
        let ev = e.flip(1, &mut t, 100.0);
        assert_eq!(ev.last(), Some(&GameEvent::Sound(SoundCue::Wrong)));
        assert_eq!(e.phase(), Phase::Resolving);
        assert_eq!(e.state().turn_count, 1);

        // Locked: a third card does nothing.
        assert!(e.flip(2, &mut t, 200.0).is_empty());
        assert!(fire_all(&mut e, &mut t, 699.0).is_empty());

        let ev = fire_all(&mut e, &mut t, 700.0);
        assert_eq!(
            ev,
            vec![
                GameEvent::CardState { card: 0, state: CardState::FaceDown },
                GameEvent::CardState { card: 1, state: CardState::FaceDown },
            ]
        );
        assert_eq!(e.phase(), Phase::Idle);
        assert_eq!(e.state().matched_pairs, 0);
        assert_eq!(e.deck().get(0).unwrap().state, CardState::FaceDown);
    }

    #[test]
    fn win_is_announced_after_delay() {
        let mut e = engine();
        let mut t = Timers::new();
        e.flip(0, &mut t, 0.0);
        e.flip(1, &mut t, 0.0);
        fire_all(&mut e, &mut t, 600.0);
        e.flip(0, &mut t, 1000.0);
        e.flip(2, &mut t, 1000.0);
        e.flip(1, &mut t, 1100.0);
        e.flip(3, &mut t, 1100.0);
        assert_eq!(e.phase(), Phase::Won);
        assert!(fire_all(&mut e, &mut t, 1599.0).is_empty());
        let ev = fire_all(&mut e, &mut t, 1600.0);
        assert_eq!(
            ev,
            vec![
                GameEvent::Sound(SoundCue::Win),
                GameEvent::Won { total_pairs: 2, turn_count: 3 }
            ]
        );
    }

    #[test]
    fn single_pair_game_is_won_after_delay() {
        let deck = Deck::from_cards(vec![card("A", Face::A), card("A", Face::B)]);
        let mut e = TurnEngine::new(deck, Timing::default());
        let mut t = Timers::new();
        e.flip(1, &mut t, 0.0);
        let ev = e.flip(0, &mut t, 100.0);
        assert!(!ev.iter().any(|event| matches!(event, GameEvent::Won { .. })));
        assert_eq!(e.phase(), Phase::Won);
        assert_eq!(t.next_due(), Some(600.0));

        assert!(fire_all(&mut e, &mut t, 599.0).is_empty());
        assert_eq!(
            fire_all(&mut e, &mut t, 600.0),
            vec![
                GameEvent::Sound(SoundCue::Win),
                GameEvent::Won { total_pairs: 1, turn_count: 1 },
            ]
        );
        assert!(t.is_empty());
    }

    #[test]
    fn foreign_handles_are_ignored() {
        let mut e = engine();
        let mut t = Timers::new();
        e.flip(0, &mut t, 0.0);
        e.flip(1, &mut t, 0.0);
        // A handle from another queue that does not alias the engine's own.
        let mut other = Timers::new();
        other.schedule(TimerAction::MismatchRevert, 0, 0.0);
        let stray = other.schedule(TimerAction::MismatchRevert, 0, 0.0);
        assert!(e.pending_timers().all(|h| h != stray));
        assert!(e.on_timer(stray, TimerAction::MismatchRevert).is_empty());
        assert!(e.state().locked);
    }

    #[test]
    fn unknown_card_is_ignored() {
        let mut e = engine();
        let mut t = Timers::new();
        assert!(e.flip(99, &mut t, 0.0).is_empty());
        assert_eq!(e.phase(), Phase::Idle);
    }
}
