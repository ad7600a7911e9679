//! Runtime cards and the dealt deck.

use rand::Rng;

use crate::catalog::CardPair;
use crate::rng::shuffle;

/// Index of a card in display order.
pub type CardId = usize;

/// Which of the two pictures of a pair this card shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    A,
    B,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CardState {
    #[default]
    FaceDown,
    FaceUp,
    Matched,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub pair_id: String,
    pub face: Face,
    pub state: CardState,
    pub name: String,
    pub image: String,
    pub match_sound: Option<String>,
}

impl Card {
    fn from_pair(pair: &CardPair, face: Face) -> Self {
        let image = match face {
            Face::A => pair.image_a.clone(),
            Face::B => pair.image_b.clone(),
        };
        Self {
            pair_id: pair.id.clone(),
            face,
            state: CardState::FaceDown,
            name: pair.name.clone(),
            image,
            match_sound: pair.match_sound.clone(),
        }
    }

    pub fn alt_text(&self) -> String {
        let variant = match self.face {
            Face::A => 1,
            Face::B => 2,
        };
        format!("{} (variant {variant})", self.name)
    }
}

/// Cards of one game in display order. The order is fixed once dealt.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Two cards per pair, shuffled once.
    pub fn deal<R: Rng + ?Sized>(pairs: &[CardPair], rng: &mut R) -> Self {
        let mut cards: Vec<Card> = pairs
            .iter()
            .flat_map(|pair| [Card::from_pair(pair, Face::A), Card::from_pair(pair, Face::B)])
            .collect();
        shuffle(&mut cards, rng);
        Self { cards }
    }

    /// Deck in exactly the given order (no shuffle).
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardId, &Card)> {
        self.cards.iter().enumerate()
    }
}
