//! UI helper functions for terminal output formatting.

use std::io::Write;

use blackjack_engine::table::HandSummary;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Short outcome text for a finished hand, e.g. `20`, `BJ` or `bust(24)`.
pub fn hand_result(hand: &HandSummary) -> String {
    if hand.blackjack {
        "BJ".to_string()
    } else if hand.bust {
        format!("bust({})", hand.score)
    } else {
        hand.score.to_string()
    }
}
