use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Value counted for an Ace when it would otherwise bust the hand.
pub const ACE_LOW: u8 = 1;
/// Value counted for an Ace when the hand can afford it.
pub const ACE_HIGH: u8 = 11;

/// Represents one of the four suits in a standard 52-card deck.
/// Declaration order is the order suits appear in a freshly built shoe.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts suit (♥)
    Hearts,
    /// Diamonds suit (♦)
    Diamonds,
    /// Clubs suit (♣)
    Clubs,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Suit {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_suits()
            .into_iter()
            .find(|suit| suit.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::InvalidArgument(format!("unknown suit \"{}\"", s)))
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack, counts 10
    Jack,
    /// Queen, counts 10
    Queen,
    /// King, counts 10
    King,
    /// Ace, counts 1 or 11
    Ace,
}

impl Rank {
    pub fn name(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }

    /// Blackjack value of the rank. Face cards count 10.
    pub fn value(self) -> CardValue {
        match self {
            Rank::Ace => CardValue::Ace,
            Rank::Jack | Rank::Queen | Rank::King => CardValue::Fixed(10),
            numeric => CardValue::Fixed(numeric as u8),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rank {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_ranks()
            .into_iter()
            .find(|rank| rank.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::InvalidArgument(format!("unknown rank \"{}\"", s)))
    }
}

/// Blackjack value of a card: a fixed number, or the Ace's choice of 1 or 11.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardValue {
    Fixed(u8),
    Ace,
}

impl CardValue {
    /// Every value this card may count as, lowest first.
    pub fn options(self) -> impl Iterator<Item = u8> {
        let (values, n) = match self {
            CardValue::Fixed(v) => ([v, v], 1),
            CardValue::Ace => ([ACE_LOW, ACE_HIGH], 2),
        };
        values.into_iter().take(n)
    }

    /// Smallest value the card can count as.
    pub fn min(self) -> u8 {
        match self {
            CardValue::Fixed(v) => v,
            CardValue::Ace => ACE_LOW,
        }
    }

    pub fn is_ace(self) -> bool {
        matches!(self, CardValue::Ace)
    }
}

/// A single playing card. Cards are plain values and move between the shoe,
/// hands and the discard tray by copy.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card
    pub suit: Suit,
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Builds a card from its textual suit and rank, e.g. `("Hearts", "Jack")`.
    pub fn parse(suit: &str, rank: &str) -> Result<Self, GameError> {
        Ok(Self {
            suit: suit.parse()?,
            rank: rank.parse()?,
        })
    }

    pub fn value(&self) -> CardValue {
        self.rank.value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

/// One standard 52-card deck: every rank of a suit, suit by suit.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}
