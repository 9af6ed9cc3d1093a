//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, one `{value, source}` pair per
//! setting:
//!
//! ```json
//! {
//!   "decks": {
//!     "value": 6,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "decks": {
            "value": config.decks,
            "source": sources.decks,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "penetration_min": {
            "value": config.penetration_min,
            "source": sources.penetration_min,
        },
        "penetration_max": {
            "value": config.penetration_max,
            "source": sources.penetration_max,
        },
        "starting_budget": {
            "value": config.starting_budget,
            "source": sources.starting_budget,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cfg_displays_json_output() {
        unsafe {
            std::env::remove_var(config::CONFIG_ENV);
            std::env::remove_var("BLACKJACK_DECKS");
        }
        let mut out = Vec::new();

        let result = handle_cfg_command(&mut out);
        assert!(result.is_ok(), "cfg command should succeed");

        let output = String::from_utf8(out).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&output).expect("cfg output should be valid JSON");
        for key in [
            "decks",
            "seed",
            "penetration_min",
            "penetration_max",
            "starting_budget",
        ] {
            assert!(json[key].get("value").is_some(), "missing value for {}", key);
            assert!(json[key].get("source").is_some(), "missing source for {}", key);
        }
    }

    #[test]
    #[serial]
    fn test_cfg_reports_invalid_configuration() {
        unsafe {
            std::env::set_var("BLACKJACK_DECKS", "0");
        }
        let mut out = Vec::new();
        let result = handle_cfg_command(&mut out);
        unsafe {
            std::env::remove_var("BLACKJACK_DECKS");
        }

        let err = result.unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("decks must be between 1 and 8"));
        assert!(out.is_empty());
    }
}
