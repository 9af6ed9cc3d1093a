use std::collections::VecDeque;
use std::fmt;
use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, error, warn};

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Number of 52-card decks in a standard casino shoe.
pub const DEFAULT_DECKS: usize = 6;

/// Range the end-of-shoe marker is drawn from, in cards left in the shoe.
pub const DEFAULT_PENETRATION: RangeInclusive<usize> = 50..=80;

/// Where the shoe stands relative to its end-of-shoe marker.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Penetration {
    /// No marker placed for this shoe.
    Unset,
    /// Marker placed, still more than `threshold` cards left.
    Armed { threshold: usize },
    /// Remaining count fell to `threshold` or below; stays here until the
    /// discard pile is collected.
    Reached { threshold: usize },
}

impl Penetration {
    pub fn threshold(self) -> Option<usize> {
        match self {
            Penetration::Unset => None,
            Penetration::Armed { threshold } | Penetration::Reached { threshold } => {
                Some(threshold)
            }
        }
    }
}

/// A multi-deck dealing shoe.
///
/// Cards are dealt from the front. A new shoe holds its decks in a fixed,
/// known order until [`Shoe::shuffle`] is called.
///
/// # Examples
///
/// ```
/// use blackjack_engine::shoe::Shoe;
///
/// let mut shoe = Shoe::new_with_seed(6, 42);
/// shoe.shuffle();
/// shoe.set_cut_card(120).unwrap();
/// shoe.set_end_of_shoe(50, 80).unwrap();
///
/// let card = shoe.draw().unwrap();
/// assert_eq!(shoe.len(), 6 * 52 - 1);
/// assert!(!shoe.end_of_round());
/// # let _ = card;
/// ```
#[derive(Debug)]
pub struct Shoe {
    cards: VecDeque<Card>,
    decks: usize,
    shuffled: bool,
    cut_position: Option<usize>,
    penetration: Penetration,
    rng: ChaCha20Rng,
}

impl Shoe {
    /// Builds a shoe of `decks` decks seeded from the thread RNG.
    pub fn new(decks: usize) -> Self {
        Self::with_rng(decks, ChaCha20Rng::from_rng(&mut rand::rng()))
    }

    /// Builds a shoe whose shuffles and markers are reproducible from `seed`.
    pub fn new_with_seed(decks: usize, seed: u64) -> Self {
        Self::with_rng(decks, ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(decks: usize, rng: ChaCha20Rng) -> Self {
        // Keep build order until shuffle is called explicitly
        let cards = (0..decks).flat_map(|_| full_deck()).collect();
        Self {
            cards,
            decks,
            shuffled: false,
            cut_position: None,
            penetration: Penetration::Unset,
            rng,
        }
    }

    /// Removes and returns the front card.
    ///
    /// Drawing the card that brings the shoe down to its end-of-shoe marker
    /// flips [`Shoe::end_of_round`]; the current round may finish, but the
    /// shoe must be replenished before the next one.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        if self.cards.is_empty() {
            error!("cannot draw from empty shoe");
            return Err(GameError::EmptyShoe);
        }
        if !self.shuffled {
            warn!(remaining = self.cards.len(), "drawing from unshuffled shoe");
        }

        let card = self.cards.pop_front().ok_or(GameError::EmptyShoe)?;

        if let Penetration::Armed { threshold } = self.penetration {
            if self.cards.len() <= threshold {
                warn!(
                    remaining = self.cards.len(),
                    threshold, "end of shoe reached, reshuffle required after round"
                );
                self.penetration = Penetration::Reached { threshold };
            }
        }
        Ok(card)
    }

    pub fn shuffle(&mut self) {
        self.cards.make_contiguous().shuffle(&mut self.rng);
        self.shuffled = true;
        debug!(cards = self.cards.len(), "shoe shuffled");
    }

    /// Cuts the shoe: cards from `position` onward move to the front and the
    /// cards above the cut go to the back. Nothing is removed.
    pub fn set_cut_card(&mut self, position: usize) -> Result<(), GameError> {
        if position >= self.cards.len() {
            return Err(GameError::InvalidArgument(format!(
                "cut position {} out of bounds for shoe of {} cards",
                position,
                self.cards.len()
            )));
        }
        self.cards.rotate_left(position);
        self.cut_position = Some(position);
        debug!(position, "shoe cut");
        Ok(())
    }

    /// Places the end-of-shoe marker a random `min..=max` cards from the back
    /// and returns the chosen threshold.
    ///
    /// Only a later [`Shoe::draw`] evaluates the marker. A shoe that already
    /// reached its marker keeps that state and only takes the new threshold.
    pub fn set_end_of_shoe(&mut self, min: usize, max: usize) -> Result<usize, GameError> {
        if min > max {
            return Err(GameError::InvalidArgument(format!(
                "end of shoe range {}..={} is empty",
                min, max
            )));
        }
        let threshold = self.rng.random_range(min..=max);
        self.penetration = match self.penetration {
            Penetration::Reached { .. } => Penetration::Reached { threshold },
            _ => Penetration::Armed { threshold },
        };
        debug!(threshold, "end of shoe marker set");
        Ok(threshold)
    }

    /// Returns the played cards to the back of the shoe and starts a new
    /// shoe life: unshuffled, uncut, no marker.
    pub fn collect_discard_pile<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        let before = self.cards.len();
        self.cards.extend(cards);
        self.shuffled = false;
        self.cut_position = None;
        self.penetration = Penetration::Unset;
        debug!(
            collected = self.cards.len() - before,
            cards = self.cards.len(),
            "discard pile collected"
        );
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn deck_count(&self) -> usize {
        self.decks
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn cut_position(&self) -> Option<usize> {
        self.cut_position
    }

    pub fn penetration(&self) -> Penetration {
        self.penetration
    }

    pub fn penetration_threshold(&self) -> Option<usize> {
        self.penetration.threshold()
    }

    /// True once the end-of-shoe marker has been reached in this shoe life.
    pub fn end_of_round(&self) -> bool {
        matches!(self.penetration, Penetration::Reached { .. })
    }

    /// Card at `index` from the front, without drawing it.
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> impl ExactSizeIterator<Item = &Card> + '_ {
        self.cards.iter()
    }
}

impl Default for Shoe {
    fn default() -> Self {
        Self::new(DEFAULT_DECKS)
    }
}

impl fmt::Display for Shoe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shoe(cards={}, shuffled={}, shoe_size=",
            self.len(),
            self.shuffled
        )?;
        match self.penetration_threshold() {
            Some(threshold) => write!(f, "{})", self.len().saturating_sub(threshold)),
            None => write!(f, "not set)"),
        }
    }
}
