//! Deal command handler.
//!
//! Deals one round from a freshly shuffled shoe and prints it the way the
//! table sees it: the player's cards, the dealer's up-card with the hole card
//! hidden, then the dealer's hand after the reveal and draw-to-17.

use crate::config::Config;
use crate::error::CliError;
use blackjack_engine::participant::{Dealer, Participant, Player};
use blackjack_engine::shoe::Shoe;
use std::io::Write;
use tracing::debug;

/// Handle the deal command.
///
/// Uses `seed` if given, else the configured seed, else a random one.
pub fn handle_deal_command(
    seed: Option<u64>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.or(config.seed).unwrap_or_else(rand::random);
    debug!(seed, decks = config.decks, "dealing single round");
    let mut shoe = Shoe::new_with_seed(config.decks, seed);
    shoe.shuffle();
    shoe.set_end_of_shoe(config.penetration_min, config.penetration_max)?;

    let mut player = Player::new("Player", config.starting_budget);
    let mut dealer = Dealer::new();
    for _ in 0..2 {
        player.hit(&mut shoe)?;
        dealer.hit(&mut shoe)?;
    }

    writeln!(out, "seed: {}", seed)?;
    writeln!(out, "{}", player.hand())?;
    writeln!(out, "{}", dealer.hand())?;

    dealer.reveal();
    while dealer.must_hit() {
        dealer.hit(&mut shoe)?;
    }
    writeln!(out, "{}", dealer.hand())?;
    writeln!(out, "{}", shoe)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(seed: u64) -> String {
        let mut out = Vec::new();
        handle_deal_command(Some(seed), &Config::default(), &mut out).expect("deal succeeds");
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_deal_hides_hole_card_until_reveal() {
        let output = deal(42);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "seed: 42");
        assert!(lines[1].starts_with("Player: ["));
        assert!(lines[2].starts_with("dealer: ["));
        assert!(lines[2].contains("hidden"));
        assert!(!lines[3].contains("hidden"));
        assert!(lines[4].starts_with("Shoe(cards="));
    }

    #[test]
    fn test_deal_is_deterministic_with_seed() {
        assert_eq!(deal(7), deal(7));
    }
}
