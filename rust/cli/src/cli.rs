//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "blackjack",
    version,
    about = "Blackjack shoe and hand engine",
    disable_help_subcommand = true
)]
pub struct BlackjackCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play rounds at a single table with a hit-below-17 strategy
    Play {
        /// Number of rounds to play
        #[arg(long)]
        rounds: Option<u32>,
        /// RNG seed for shuffles and cuts
        #[arg(long)]
        seed: Option<u64>,
        /// Decks in the shoe
        #[arg(long)]
        decks: Option<usize>,
        /// Seated players
        #[arg(long)]
        players: Option<usize>,
        /// Print one JSON object per round
        #[arg(long)]
        json: bool,
    },
    /// Deal a single round and show what the table sees
    Deal {
        /// RNG seed for the shuffle
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
