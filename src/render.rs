//! Presentation contracts and the event pump that drives them.

use crate::deck::{Card, CardId, CardState};
use crate::engine::{GameEvent, SoundCue};
use crate::grid::GridSpec;

/// Draws the board. Never read back by the game logic.
pub trait Renderer {
    fn clear_board(&mut self);
    fn layout_grid(&mut self, grid: &GridSpec, card_px: f64);
    fn set_card_size(&mut self, card_px: f64);
    fn render_card(&mut self, id: CardId, card: &Card, back_image: &str);
    fn set_card_state(&mut self, id: CardId, state: CardState);
    fn reveal_all(&mut self);
    fn conceal_all(&mut self, states: &[CardState]);
    fn announce_win(&mut self, total_pairs: usize, turn_count: u32);
}

pub trait SoundPlayer {
    fn play(&mut self, cue: &SoundCue);
    fn play_custom(&mut self, path: &str);
    fn stop_all(&mut self);
}

/// Feed `events` to the renderer and sound player, in order.
/// Sounds are skipped entirely when `sound_enabled` is false.
pub fn dispatch<R, S>(events: &[GameEvent], renderer: &mut R, sounds: &mut S, sound_enabled: bool)
where
    R: Renderer + ?Sized,
    S: SoundPlayer + ?Sized,
{
    for event in events {
        match event {
            GameEvent::StopSounds => sounds.stop_all(),
            GameEvent::ClearBoard => renderer.clear_board(),
            GameEvent::Layout { grid, card_px } => renderer.layout_grid(grid, *card_px),
            GameEvent::DealCard { card, data, back_image } => renderer.render_card(*card, data, back_image),
            GameEvent::CardState { card, state } => renderer.set_card_state(*card, *state),
            GameEvent::CardSize { card_px } => renderer.set_card_size(*card_px),
            GameEvent::RevealAll => renderer.reveal_all(),
            GameEvent::ConcealAll { states } => renderer.conceal_all(states),
            GameEvent::Sound(cue) if sound_enabled => match cue {
                SoundCue::Custom(path) => sounds.play_custom(path),
                other => sounds.play(other),
            },
            GameEvent::Sound(_) => {}
            GameEvent::Won { total_pairs, turn_count } => renderer.announce_win(*total_pairs, *turn_count),
        }
    }
}
