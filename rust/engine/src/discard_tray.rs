use std::fmt;

use crate::cards::Card;

/// Cards handed to [`DiscardTray::discard`]: a single card or a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discard {
    One(Card),
    Many(Vec<Card>),
}

impl From<Card> for Discard {
    fn from(card: Card) -> Self {
        Discard::One(card)
    }
}

impl From<Vec<Card>> for Discard {
    fn from(cards: Vec<Card>) -> Self {
        Discard::Many(cards)
    }
}

impl From<&[Card]> for Discard {
    fn from(cards: &[Card]) -> Self {
        Discard::Many(cards.to_vec())
    }
}

impl<const N: usize> From<[Card; N]> for Discard {
    fn from(cards: [Card; N]) -> Self {
        Discard::Many(cards.to_vec())
    }
}

/// Holds played cards until the shoe is replenished.
#[derive(Debug, Clone, Default)]
pub struct DiscardTray {
    cards: Vec<Card>,
}

impl DiscardTray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discard(&mut self, cards: impl Into<Discard>) {
        match cards.into() {
            Discard::One(card) => self.cards.push(card),
            Discard::Many(cards) => self.cards.extend(cards),
        }
    }

    /// Empties the tray, returning its cards in the order they were discarded.
    pub fn reset(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Display for DiscardTray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiscardTray(len={})", self.len())
    }
}
