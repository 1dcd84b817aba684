//! Deal command handler for single hand dealing and display.
//!
//! Deals one opening hand with both dealer cards face up and reports what the
//! blackjack check decided. Output is deterministic for a given seed.

use super::play::natural_message;
use crate::error::CliError;
use crate::formatters::{SuitStyle, format_hand_line};
use blackjack_engine::engine::Engine;
use blackjack_engine::game::Resolution;
use std::io::Write;

/// Handle the deal command.
///
/// # Arguments
///
/// * `seed` - Optional RNG seed for deterministic dealing
/// * `style` - How suits are printed
/// * `out` - Output stream for command results
pub fn handle_deal_command(
    seed: Option<u64>,
    style: SuitStyle,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut engine = Engine::new(Some(seed));
    let round = engine.start_round()?;

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "{}", format_hand_line("Dealer", round.dealer(), false, style))?;
    writeln!(out, "{}", format_hand_line("Player", round.player(), false, style))?;
    let check = match (round.resolution(), round.outcome()) {
        (Some(Resolution::Naturals), Some(outcome)) => natural_message(outcome),
        _ => "No blackjack. Player to act.",
    };
    writeln!(out, "Blackjack check: {}", check)?;
    Ok(())
}
