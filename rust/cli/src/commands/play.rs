//! # Play Command
//!
//! Interactive Blackjack at the terminal.
//!
//! A [`TextSession`] owns the engine, the round counter and the display
//! style, and drives one [`Round`] at a time from lines read on stdin:
//!
//! - `h` hits, `s` or an empty line stands
//! - `q` (or EOF) quits at once
//! - anything else is rejected with a hint and the prompt repeats
//!
//! Between rounds the player is asked whether to continue; the session ends
//! with the number of rounds played to completion.

use crate::error::CliError;
use crate::formatters::{SuitStyle, format_hand_line};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_continue, parse_turn_command};
use blackjack_engine::engine::Engine;
use blackjack_engine::game::{Phase, Resolution, Round};
use blackjack_engine::hand::Hand;
use blackjack_engine::player::PlayerAction;
use blackjack_engine::record::{RoundCounter, RoundRecord};
use blackjack_engine::rules::Outcome;
use std::io::{BufRead, Write};

pub const BANNER: &str = "Simple Blackjack - type q to quit at any prompt";

/// How a round handed control back to the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Finished(Outcome),
    Quit,
}

/// Line printed when the opening deal settles the round.
pub fn natural_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Push => "Both have Blackjack: Push.",
        Outcome::Blackjack => "Player has Blackjack! You win 1.5x.",
        _ => "Dealer has Blackjack. You lose.",
    }
}

fn result_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win | Outcome::Blackjack => "You win!",
        Outcome::Lose => "You lose.",
        Outcome::Push => "Push (tie).",
    }
}

/// Handle the play command: run a session until the player stops.
///
/// # Arguments
///
/// * `seed` - RNG seed for reproducibility (default: random)
/// * `style` - How suits are printed
/// * `stdin` - Input stream for player decisions
/// * `out` - Output stream for the table
/// * `err` - Error stream for input hints and warnings
pub fn handle_play_command(
    seed: Option<u64>,
    style: SuitStyle,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "starting text session");
    let mut session = TextSession::new(seed, style);
    let played = session.run(stdin, out, err)?;
    tracing::info!(rounds = played, "text session finished");
    Ok(())
}

/// Adapter-side state for one terminal session.
#[derive(Debug)]
pub struct TextSession {
    engine: Engine,
    rounds: RoundCounter,
    style: SuitStyle,
}

impl TextSession {
    pub fn new(seed: u64, style: SuitStyle) -> Self {
        Self {
            engine: Engine::new(Some(seed)),
            rounds: RoundCounter::new(),
            style,
        }
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds.completed()
    }

    /// Plays rounds until the player quits or declines another one.
    /// Returns the number of rounds played to completion.
    pub fn run(
        &mut self,
        stdin: &mut dyn BufRead,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<u32, CliError> {
        writeln!(out, "{}", BANNER)?;
        loop {
            let round = self.engine.start_round()?;
            if self.play_round(round, stdin, out, err)? == RoundEnd::Quit {
                return Ok(self.rounds.completed());
            }

            write!(out, "Play another round? (y/n): ")?;
            out.flush()?;
            let again = read_stdin_line(stdin);
            if !again.as_deref().is_some_and(parse_continue) {
                let played = self.rounds.completed();
                writeln!(out, "Goodbye - rounds played: {}", played)?;
                return Ok(played);
            }
        }
    }

    /// Drives one dealt round to its end. The round must come straight from
    /// [`Round::start`].
    pub fn play_round(
        &mut self,
        mut round: Round,
        stdin: &mut dyn BufRead,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<RoundEnd, CliError> {
        let round_id = self.rounds.next_id();
        writeln!(out)?;
        writeln!(out, "--- New Round ---")?;
        self.show(out, "Dealer", round.dealer(), true)?;
        self.show(out, "Player", round.player(), false)?;

        if let (Some(Resolution::Naturals), Some(outcome)) = (round.resolution(), round.outcome())
        {
            self.show(out, "Dealer", round.dealer(), false)?;
            writeln!(out, "{}", natural_message(outcome))?;
            return self.complete(&round_id, &round).map(RoundEnd::Finished);
        }

        while round.phase() == Phase::PlayerTurn {
            write!(out, "Hit or Stand? (h/s, q to quit): ")?;
            out.flush()?;
            let Some(line) = read_stdin_line(stdin) else {
                ui::display_warning(err, "input closed; treating as quit")?;
                writeln!(out, "Quitting game.")?;
                return Ok(RoundEnd::Quit);
            };
            match parse_turn_command(&line) {
                ParseResult::Action(PlayerAction::Hit) => {
                    round.hit()?;
                    self.show(out, "Player", round.player(), false)?;
                    if round.resolution() == Some(Resolution::PlayerBust) {
                        writeln!(out, "You busted!")?;
                    }
                }
                ParseResult::Action(PlayerAction::Stand) => {
                    writeln!(out)?;
                    self.show(out, "Dealer", round.dealer(), false)?;
                    round.stand()?;
                    self.show(out, "Dealer", round.dealer(), false)?;
                }
                ParseResult::Quit => {
                    writeln!(out, "Quitting game.")?;
                    return Ok(RoundEnd::Quit);
                }
                ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            }
        }

        let outcome = self.complete(&round_id, &round)?;
        writeln!(out, "{}", result_message(outcome))?;
        Ok(RoundEnd::Finished(outcome))
    }

    fn complete(&mut self, round_id: &str, round: &Round) -> Result<Outcome, CliError> {
        let record = RoundRecord::from_round(round_id, round)?;
        self.rounds.record_completed();
        let json = record.to_json().map_err(std::io::Error::other)?;
        tracing::info!(round = %json, "round complete");
        Ok(record.outcome)
    }

    fn show(
        &self,
        out: &mut dyn Write,
        who: &str,
        hand: &Hand,
        hide_first: bool,
    ) -> Result<(), CliError> {
        writeln!(out, "{}", format_hand_line(who, hand, hide_first, self.style))?;
        Ok(())
    }
}
