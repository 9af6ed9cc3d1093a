//! # Play Command
//!
//! Plays a run of rounds at one table. Every player follows the same
//! strategy as the dealer (hit below 17), which makes the command a quick
//! way to exercise the full shoe lifecycle: deal, play, collect, and
//! replenish once the end-of-shoe marker is reached.

use crate::config::{Config, validate};
use crate::error::CliError;
use crate::ui;
use blackjack_engine::hand::Hand;
use blackjack_engine::participant::{DEALER_STANDS_ON, Player};
use blackjack_engine::shoe::Shoe;
use blackjack_engine::table::{Action, RoundSummary, Table};
use std::io::Write;
use tracing::info;

/// Flags accepted by `blackjack play`. Unset values fall back to the
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    pub rounds: Option<u32>,
    pub seed: Option<u64>,
    pub decks: Option<usize>,
    pub players: Option<usize>,
    pub json: bool,
}

#[derive(Debug, Default)]
struct Totals {
    rounds: u32,
    reshuffles: u32,
    player_blackjacks: u32,
    player_busts: u32,
    dealer_busts: u32,
}

impl Totals {
    fn record(&mut self, summary: &RoundSummary) {
        self.rounds += 1;
        self.reshuffles += u32::from(summary.reshuffled);
        self.dealer_busts += u32::from(summary.dealer.bust);
        for p in &summary.players {
            self.player_blackjacks += u32::from(p.blackjack);
            self.player_busts += u32::from(p.bust);
        }
    }
}

fn hit_below_17(hand: &Hand, _dealer_up: u32) -> Action {
    if hand.score() < DEALER_STANDS_ON {
        Action::Hit
    } else {
        Action::Stand
    }
}

/// Handle the play command.
///
/// # Errors
///
/// `CliError::InvalidInput` when rounds or players is zero,
/// `CliError::Config` when the deck override conflicts with the penetration
/// range, `CliError::Engine` if the shoe runs dry mid-round.
pub fn handle_play_command(
    opts: PlayOptions,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let rounds = opts.rounds.unwrap_or(1);
    let seats = opts.players.unwrap_or(1);
    if rounds == 0 {
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }
    if seats == 0 {
        return Err(CliError::InvalidInput("players must be >= 1".to_string()));
    }
    if seats > 7 {
        ui::display_warning(err, "more than 7 seats; rounds may exhaust small shoes")?;
    }

    let config = Config {
        decks: opts.decks.unwrap_or(config.decks),
        ..config.clone()
    };
    validate(&config)?;
    let seed = opts.seed.or(config.seed).unwrap_or_else(rand::random);

    let players = (1..=seats)
        .map(|i| Player::new(format!("P{}", i), config.starting_budget))
        .collect();
    let mut table = Table::with_seed(
        Shoe::new_with_seed(config.decks, seed),
        players,
        config.penetration_min..=config.penetration_max,
        seed,
    );
    table.open_shoe()?;
    info!(rounds, seats, decks = config.decks, seed, "table opened");

    if !opts.json {
        writeln!(
            out,
            "play: rounds={} players={} decks={} seed={}",
            rounds, seats, config.decks, seed
        )?;
    }

    let mut totals = Totals::default();
    for _ in 0..rounds {
        let summary = table.play_round(hit_below_17)?;
        totals.record(&summary);
        if opts.json {
            let line = serde_json::to_string(&summary).map_err(std::io::Error::other)?;
            writeln!(out, "{}", line)?;
        } else {
            write_round(out, &summary)?;
        }
    }

    if !opts.json {
        writeln!(
            out,
            "Rounds: {}  Reshuffles: {}  Player blackjacks: {}  Player busts: {}  Dealer busts: {}",
            totals.rounds,
            totals.reshuffles,
            totals.player_blackjacks,
            totals.player_busts,
            totals.dealer_busts
        )?;
    }
    info!(
        rounds = totals.rounds,
        reshuffles = totals.reshuffles,
        "play finished"
    );
    Ok(())
}

fn write_round(out: &mut dyn Write, summary: &RoundSummary) -> std::io::Result<()> {
    write!(
        out,
        "Round {}: dealer {}",
        summary.round,
        ui::hand_result(&summary.dealer)
    )?;
    for p in &summary.players {
        write!(out, " | {} {}", p.owner, ui::hand_result(p))?;
    }
    if summary.reshuffled {
        write!(out, " | reshuffle")?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(opts: PlayOptions) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_play_command(opts, &Config::default(), &mut out, &mut err);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_play_prints_one_line_per_round_and_totals() {
        let (result, out, _) = play(PlayOptions {
            rounds: Some(5),
            seed: Some(42),
            players: Some(2),
            ..Default::default()
        });
        assert!(result.is_ok());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("play: rounds=5 players=2 decks=6 seed=42"));
        assert!(lines[1].starts_with("Round 1: dealer "));
        assert!(lines[1].contains("| P1 ") && lines[1].contains("| P2 "));
        assert!(lines[6].starts_with("Rounds: 5"));
    }

    #[test]
    fn test_play_json_lines_parse() {
        let (result, out, _) = play(PlayOptions {
            rounds: Some(3),
            seed: Some(1),
            json: true,
            ..Default::default()
        });
        assert!(result.is_ok());
        let rounds: Vec<RoundSummary> = out
            .lines()
            .map(|l| serde_json::from_str(l).expect("valid round json"))
            .collect();
        assert_eq!(rounds.len(), 3);
        assert_eq!(rounds[2].round, 3);
    }

    #[test]
    fn test_play_rejects_zero_rounds() {
        let (result, out, err) = play(PlayOptions {
            rounds: Some(0),
            ..Default::default()
        });
        match result {
            Err(CliError::InvalidInput(msg)) => assert_eq!(msg, "rounds must be >= 1"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_play_rejects_deck_count_above_cap() {
        let (result, out, _) = play(PlayOptions {
            decks: Some(usize::MAX),
            ..Default::default()
        });
        assert!(matches!(result, Err(CliError::Config(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_play_rejects_deck_override_below_penetration() {
        let (result, _, _) = play(PlayOptions {
            decks: Some(1),
            ..Default::default()
        });
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_play_reshuffles_through_long_runs() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let config = Config {
            decks: 2,
            ..Config::default()
        };
        let opts = PlayOptions {
            rounds: Some(60),
            seed: Some(3),
            ..Default::default()
        };
        handle_play_command(opts, &config, &mut out, &mut err).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("| reshuffle"));
    }
}
