use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Highest total that does not bust.
pub const BLACKJACK: u32 = 21;

/// Owner name every dealer hand carries.
pub const DEALER_NAME: &str = "dealer";

/// Who a hand belongs to. Dealer hands keep their hole card hidden until
/// revealed and can never be split.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Player,
    Dealer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Player => f.write_str("player"),
            Role::Dealer => f.write_str("dealer"),
        }
    }
}

impl FromStr for Role {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(Role::Player),
            "dealer" => Ok(Role::Dealer),
            other => Err(GameError::InvalidArgument(format!(
                "Unknown role \"{}\", please use player or dealer",
                other
            ))),
        }
    }
}

/// A card as observers at the table see it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibleCard {
    Shown(Card),
    Hidden,
}

impl fmt::Display for VisibleCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisibleCard::Shown(card) => write!(f, "{}", card),
            VisibleCard::Hidden => f.write_str("hidden"),
        }
    }
}

/// Cards held by one participant for one round.
///
/// # Examples
///
/// ```
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::Hand;
///
/// let mut hand = Hand::player("Ocean");
/// hand.add(Card::new(Suit::Spades, Rank::Ace));
/// hand.add(Card::new(Suit::Hearts, Rank::Ace));
/// hand.add(Card::new(Suit::Clubs, Rank::Nine));
/// assert_eq!(hand.score(), 21);
/// assert!(!hand.is_blackjack());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    role: Role,
    owner: String,
    cards: Vec<Card>,
    revealed: bool,
}

impl Hand {
    /// Creates an empty hand. Dealer hands always belong to [`DEALER_NAME`].
    pub fn new(role: Role, name: impl Into<String>) -> Self {
        let owner = match role {
            Role::Player => name.into(),
            Role::Dealer => DEALER_NAME.to_string(),
        };
        Self {
            role,
            owner,
            cards: Vec::new(),
            revealed: false,
        }
    }

    pub fn player(name: impl Into<String>) -> Self {
        Self::new(Role::Player, name)
    }

    pub fn dealer() -> Self {
        Self::new(Role::Dealer, DEALER_NAME)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Every total the hand can reach, counting each Ace as 1 or 11
    /// independently of the others.
    pub fn totals(&self) -> BTreeSet<u32> {
        self.cards.iter().fold(BTreeSet::from([0]), |totals, card| {
            totals
                .iter()
                .flat_map(|&total| card.value().options().map(move |v| total + u32::from(v)))
                .collect()
        })
    }

    /// Best total that does not exceed 21, or the smallest total once every
    /// combination busts. An empty hand scores 0.
    pub fn score(&self) -> u32 {
        let totals = self.totals();
        totals
            .range(..=BLACKJACK)
            .next_back()
            .or_else(|| totals.first())
            .copied()
            .unwrap_or(0)
    }

    /// Score as seen from across the table. An unrevealed dealer hand only
    /// shows the lowest value of its up-card.
    pub fn visible_score(&self) -> u32 {
        if self.is_concealed() {
            self.cards
                .first()
                .map_or(0, |card| u32::from(card.value().min()))
        } else {
            self.score()
        }
    }

    /// Cards as seen from across the table. An unrevealed dealer hand shows
    /// its first card and a [`VisibleCard::Hidden`] marker for each other.
    pub fn visible_hand(&self) -> Vec<VisibleCard> {
        let concealed = self.is_concealed();
        self.cards
            .iter()
            .enumerate()
            .map(|(i, &card)| {
                if concealed && i > 0 {
                    VisibleCard::Hidden
                } else {
                    VisibleCard::Shown(card)
                }
            })
            .collect()
    }

    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.score() == BLACKJACK
    }

    pub fn is_bust(&self) -> bool {
        self.score() > BLACKJACK
    }

    /// True when the best score counts an Ace as 11.
    pub fn is_soft(&self) -> bool {
        let hard: u32 = self
            .cards
            .iter()
            .map(|card| u32::from(card.value().min()))
            .sum();
        let score = self.score();
        score <= BLACKJACK && score != hard
    }

    /// A player hand of exactly two cards of equal value may be split.
    pub fn can_split(&self) -> bool {
        self.role == Role::Player
            && matches!(self.cards.as_slice(), [a, b] if a.value() == b.value())
    }

    /// Splits a pair into two single-card hands for the same owner. The
    /// original hand is left empty.
    pub fn split(&mut self) -> Result<(Hand, Hand), GameError> {
        if !self.can_split() {
            return Err(GameError::InvalidOperation(format!(
                "hand of {} cannot be split",
                self.owner
            )));
        }
        let mut first = Hand::new(self.role, self.owner.clone());
        let mut second = Hand::new(self.role, self.owner.clone());
        let mut cards = std::mem::take(&mut self.cards).into_iter();
        first.cards.extend(cards.next());
        second.cards.extend(cards.next());
        Ok((first, second))
    }

    /// Empties the hand, returning its cards in the order they were dealt.
    pub fn discard(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    /// Turns the dealer's hole card face up. Player hands are always visible.
    pub fn reveal(&mut self) {
        if self.role == Role::Dealer {
            self.revealed = true;
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    fn is_concealed(&self) -> bool {
        self.role == Role::Dealer && !self.revealed
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [", self.owner)?;
        for (i, card) in self.visible_hand().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", card)?;
        }
        write!(f, "] ({})", self.visible_score())
    }
}
