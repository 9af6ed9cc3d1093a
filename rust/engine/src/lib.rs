//! # blackjack-engine: Blackjack Shoe & Hand Core
//!
//! Card model, a multi-deck dealing shoe with cut and end-of-shoe tracking,
//! Ace-aware hand scoring, and the dealer/player turn actions that tie them
//! together.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and blackjack values
//! - [`shoe`] - Multi-deck shoe: draw, shuffle, cut, end-of-shoe marker
//! - [`discard_tray`] - Played cards waiting to go back into the shoe
//! - [`hand`] - Hand scoring, dealer concealment and splitting
//! - [`participant`] - Dealer and Player seats (hit/stand)
//! - [`table`] - Single-table round driver
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_engine::hand::Hand;
//!
//! let mut hand = Hand::player("Ocean");
//! hand.add(Card::new(Suit::Spades, Rank::Seven));
//! hand.add(Card::new(Suit::Spades, Rank::Ace));
//! assert_eq!(hand.score(), 18);
//!
//! hand.add(Card::new(Suit::Hearts, Rank::Four));
//! assert_eq!(hand.score(), 12);
//! ```
//!
//! ## Shoe Lifecycle
//!
//! ```rust
//! use blackjack_engine::discard_tray::DiscardTray;
//! use blackjack_engine::shoe::Shoe;
//!
//! let mut shoe = Shoe::new_with_seed(1, 42);
//! let mut tray = DiscardTray::new();
//! shoe.shuffle();
//! shoe.set_end_of_shoe(10, 10).unwrap();
//!
//! while !shoe.end_of_round() {
//!     tray.discard(shoe.draw().unwrap());
//! }
//! assert_eq!(shoe.len(), 10);
//!
//! shoe.collect_discard_pile(tray.reset());
//! assert_eq!(shoe.len(), 52);
//! assert!(!shoe.end_of_round());
//! ```

pub mod cards;
pub mod discard_tray;
pub mod errors;
pub mod hand;
pub mod participant;
pub mod shoe;
pub mod table;

pub use errors::GameError;
