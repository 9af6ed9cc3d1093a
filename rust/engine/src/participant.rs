use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{Hand, Role};
use crate::shoe::Shoe;

/// Dealer keeps drawing until the hand reaches this score.
pub const DEALER_STANDS_ON: u32 = 17;

/// Default budget handed to a player joining the table.
pub const STARTING_BUDGET: u32 = 10_000;

/// What a seat at the table can do during a round.
pub trait Participant {
    fn role(&self) -> Role;
    fn name(&self) -> &str;
    fn hand(&self) -> &Hand;
    fn hand_mut(&mut self) -> &mut Hand;
    fn is_standing(&self) -> bool;

    /// Stops taking cards for the rest of the round.
    fn stand(&mut self);

    /// Draws one card from the shoe into the hand.
    fn hit(&mut self, shoe: &mut Shoe) -> Result<Card, GameError> {
        let card = shoe.draw()?;
        self.hand_mut().add(card);
        Ok(card)
    }

    /// Clears the hand and standing flag for the next round, returning the
    /// cards for the discard tray.
    fn end_round(&mut self) -> Vec<Card>;
}

#[derive(Debug, Clone)]
pub struct Dealer {
    hand: Hand,
    standing: bool,
}

impl Dealer {
    pub fn new() -> Self {
        Self {
            hand: Hand::dealer(),
            standing: false,
        }
    }

    /// House rule: draw below 17, stand on any 17 or more.
    pub fn must_hit(&self) -> bool {
        !self.standing && self.hand.score() < DEALER_STANDS_ON
    }

    pub fn reveal(&mut self) {
        self.hand.reveal();
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Self::new()
    }
}

impl Participant for Dealer {
    fn role(&self) -> Role {
        Role::Dealer
    }

    fn name(&self) -> &str {
        self.hand.owner()
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    fn is_standing(&self) -> bool {
        self.standing
    }

    fn stand(&mut self) {
        self.standing = true;
    }

    fn end_round(&mut self) -> Vec<Card> {
        self.standing = false;
        // a fresh hand also turns the hole card face down again
        std::mem::replace(&mut self.hand, Hand::dealer()).discard()
    }
}

/// A seated player. The budget belongs to whatever settles bets; the engine
/// only carries it.
#[derive(Debug, Clone)]
pub struct Player {
    hand: Hand,
    standing: bool,
    budget: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, budget: u32) -> Self {
        Self {
            hand: Hand::player(name),
            standing: false,
            budget,
        }
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn set_budget(&mut self, budget: u32) {
        self.budget = budget;
    }
}

impl Participant for Player {
    fn role(&self) -> Role {
        Role::Player
    }

    fn name(&self) -> &str {
        self.hand.owner()
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    fn is_standing(&self) -> bool {
        self.standing
    }

    fn stand(&mut self) {
        self.standing = true;
    }

    fn end_round(&mut self) -> Vec<Card> {
        self.standing = false;
        self.hand.discard()
    }
}
