//! # Blackjack CLI Library
//!
//! Command-line front end for the blackjack engine. The primary entry point
//! is [`run`], which parses arguments and executes the matching subcommand.
//!
//! ## Example Usage
//!
//! ```
//! use std::io;
//! let args = vec!["blackjack", "deal", "--seed", "42"];
//! let code = blackjack_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play rounds at one table and print per-round results
//! - `deal`: Deal a single round for inspection
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
mod macros;
pub mod ui;

use cli::{BlackjackCli, Commands};
use commands::{PlayOptions, handle_cfg_command, handle_deal_command, handle_play_command};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Returns the process exit code: `0` for success, `2` for errors.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "deal", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BlackjackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Usage: blackjack <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: blackjack --help");
            return exit_code::ERROR;
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Play {
            rounds,
            seed,
            decks,
            players,
            json,
        } => config::load().map_err(CliError::from).and_then(|cfg| {
            let opts = PlayOptions {
                rounds,
                seed,
                decks,
                players,
                json,
            };
            handle_play_command(opts, &cfg, out, err)
        }),
        Commands::Deal { seed } => config::load()
            .map_err(CliError::from)
            .and_then(|cfg| handle_deal_command(seed, &cfg, out)),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}
