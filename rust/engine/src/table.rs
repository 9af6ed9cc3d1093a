use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::discard_tray::DiscardTray;
use crate::errors::GameError;
use crate::hand::{Hand, BLACKJACK};
use crate::participant::{Dealer, Participant, Player};
use crate::shoe::Shoe;

/// A player's decision on their turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
}

/// Final state of one hand at the end of a round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandSummary {
    pub owner: String,
    pub cards: Vec<Card>,
    pub score: u32,
    pub blackjack: bool,
    pub bust: bool,
}

impl From<&Hand> for HandSummary {
    fn from(hand: &Hand) -> Self {
        Self {
            owner: hand.owner().to_string(),
            cards: hand.cards().to_vec(),
            score: hand.score(),
            blackjack: hand.is_blackjack(),
            bust: hand.is_bust(),
        }
    }
}

/// Record of one completed round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Round number, starting at 1
    pub round: u32,
    pub dealer: HandSummary,
    pub players: Vec<HandSummary>,
    /// Whether the shoe hit its end-of-shoe marker and was replenished
    /// after this round
    pub reshuffled: bool,
}

/// One blackjack table: a shoe, a discard tray, the dealer and the seated
/// players.
///
/// # Examples
///
/// ```
/// use blackjack_engine::participant::Player;
/// use blackjack_engine::shoe::{Shoe, DEFAULT_PENETRATION};
/// use blackjack_engine::table::{Action, Table};
///
/// let players = vec![Player::new("Ocean", 1_000)];
/// let mut table = Table::with_seed(Shoe::new_with_seed(6, 7), players, DEFAULT_PENETRATION, 7);
/// table.open_shoe().unwrap();
///
/// let summary = table
///     .play_round(|hand, _dealer_up| if hand.score() < 17 { Action::Hit } else { Action::Stand })
///     .unwrap();
/// assert_eq!(summary.round, 1);
/// assert_eq!(summary.players.len(), 1);
/// ```
#[derive(Debug)]
pub struct Table {
    shoe: Shoe,
    tray: DiscardTray,
    dealer: Dealer,
    players: Vec<Player>,
    penetration: RangeInclusive<usize>,
    rng: ChaCha20Rng,
    rounds: u32,
    reshuffles: u32,
}

impl Table {
    pub fn new(shoe: Shoe, players: Vec<Player>, penetration: RangeInclusive<usize>) -> Self {
        Self::with_rng(shoe, players, penetration, ChaCha20Rng::from_rng(&mut rand::rng()))
    }

    /// Table whose cut positions are reproducible from `seed`.
    pub fn with_seed(
        shoe: Shoe,
        players: Vec<Player>,
        penetration: RangeInclusive<usize>,
        seed: u64,
    ) -> Self {
        Self::with_rng(shoe, players, penetration, ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(
        shoe: Shoe,
        players: Vec<Player>,
        penetration: RangeInclusive<usize>,
        rng: ChaCha20Rng,
    ) -> Self {
        Self {
            shoe,
            tray: DiscardTray::new(),
            dealer: Dealer::new(),
            players,
            penetration,
            rng,
            rounds: 0,
            reshuffles: 0,
        }
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn tray(&self) -> &DiscardTray {
        &self.tray
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds
    }

    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    /// Starts a shoe life: shuffle, cut at a random position and place the
    /// end-of-shoe marker.
    pub fn open_shoe(&mut self) -> Result<(), GameError> {
        if self.shoe.is_empty() {
            return Err(GameError::EmptyShoe);
        }
        self.shoe.shuffle();
        let cut = self.rng.random_range(0..self.shoe.len());
        self.shoe.set_cut_card(cut)?;
        let threshold = self
            .shoe
            .set_end_of_shoe(*self.penetration.start(), *self.penetration.end())?;
        info!(cards = self.shoe.len(), cut, threshold, "shoe opened");
        Ok(())
    }

    /// Deals two cards to every player and then to the dealer, one at a time.
    pub fn deal(&mut self) -> Result<(), GameError> {
        for _ in 0..2 {
            for p in &mut self.players {
                p.hit(&mut self.shoe)?;
            }
            self.dealer.hit(&mut self.shoe)?;
        }
        Ok(())
    }

    /// Plays one full round: deal, every player's turn driven by `strategy`,
    /// the dealer's turn, then clean-up.
    ///
    /// `strategy` sees the player's hand and the dealer's visible score. A
    /// turn also ends on bust or 21. If the shoe reached its end-of-shoe
    /// marker during the round, the discard tray is returned to the shoe and
    /// a new shoe life is opened.
    ///
    /// If the shoe runs dry mid-round the cards already dealt are moved to
    /// the discard tray before the error is returned, so a [`Table::replenish`]
    /// leaves every seat ready for a fresh round.
    pub fn play_round<F>(&mut self, strategy: F) -> Result<RoundSummary, GameError>
    where
        F: FnMut(&Hand, u32) -> Action,
    {
        match self.play_hands(strategy) {
            Ok(summary) => self.finish_round(summary),
            Err(e) => {
                warn!(error = %e, "round abandoned, cards collected");
                self.collect_cards();
                Err(e)
            }
        }
    }

    fn play_hands<F>(&mut self, mut strategy: F) -> Result<RoundSummary, GameError>
    where
        F: FnMut(&Hand, u32) -> Action,
    {
        self.deal()?;

        let dealer_up = self.dealer.hand().visible_score();
        for p in &mut self.players {
            while !p.is_standing() && p.hand().score() < BLACKJACK {
                match strategy(p.hand(), dealer_up) {
                    Action::Hit => {
                        p.hit(&mut self.shoe)?;
                    }
                    Action::Stand => p.stand(),
                }
            }
            p.stand();
        }

        self.dealer.reveal();
        while self.dealer.must_hit() {
            self.dealer.hit(&mut self.shoe)?;
        }
        self.dealer.stand();

        self.rounds += 1;
        let summary = RoundSummary {
            round: self.rounds,
            dealer: HandSummary::from(self.dealer.hand()),
            players: self.players.iter().map(|p| HandSummary::from(p.hand())).collect(),
            reshuffled: false,
        };
        debug!(round = summary.round, dealer = summary.dealer.score, "round played");
        Ok(summary)
    }

    fn finish_round(&mut self, mut summary: RoundSummary) -> Result<RoundSummary, GameError> {
        self.collect_cards();
        if self.shoe.end_of_round() {
            self.replenish()?;
            summary.reshuffled = true;
        }
        Ok(summary)
    }

    /// Moves every card on the table into the discard tray.
    pub fn collect_cards(&mut self) {
        for p in &mut self.players {
            self.tray.discard(p.end_round());
        }
        self.tray.discard(self.dealer.end_round());
    }

    /// Returns the discard tray to the shoe and opens a new shoe life.
    pub fn replenish(&mut self) -> Result<(), GameError> {
        self.shoe.collect_discard_pile(self.tray.reset());
        self.reshuffles += 1;
        info!(reshuffles = self.reshuffles, "shoe replenished");
        self.open_shoe()
    }
}
