//! Input parsing for the interactive prompts.
//!
//! Parsers return enums rather than errors so the caller can decide between
//! acting, quitting and re-prompting.

use blackjack_engine::player::PlayerAction;

/// Guidance printed when the turn prompt gets something it does not understand.
pub const TURN_HELP: &str = "Please enter 'h' to hit, 's' to stand, or 'q' to quit.";

/// Result of parsing a line typed at the hit/stand prompt.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid player action parsed from input
    Action(PlayerAction),
    /// User entered q
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse a line typed at the `Hit or Stand?` prompt.
///
/// Case-insensitive: `h` hits, `s` or an empty line stands, `q` quits.
///
/// # Example
///
/// ```rust
/// # use blackjack_cli::validation::{parse_turn_command, ParseResult};
/// use blackjack_engine::player::PlayerAction;
///
/// assert_eq!(parse_turn_command("H"), ParseResult::Action(PlayerAction::Hit));
/// assert_eq!(parse_turn_command(""), ParseResult::Action(PlayerAction::Stand));
/// assert_eq!(parse_turn_command("q"), ParseResult::Quit);
/// assert!(matches!(parse_turn_command("x"), ParseResult::Invalid(_)));
/// ```
pub fn parse_turn_command(input: &str) -> ParseResult {
    match input.trim().to_lowercase().as_str() {
        "h" => ParseResult::Action(PlayerAction::Hit),
        "s" | "" => ParseResult::Action(PlayerAction::Stand),
        "q" => ParseResult::Quit,
        _ => ParseResult::Invalid(TURN_HELP.to_string()),
    }
}

/// Answer to `Play another round? (y/n)`: `n` and `q` stop, anything else
/// continues.
pub fn parse_continue(input: &str) -> bool {
    !matches!(input.trim().to_lowercase().as_str(), "n" | "q")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_and_case_are_ignored() {
        assert_eq!(
            parse_turn_command("  S  "),
            ParseResult::Action(PlayerAction::Stand)
        );
        assert_eq!(parse_turn_command("Q"), ParseResult::Quit);
    }

    #[test]
    fn words_are_not_accepted() {
        assert_eq!(
            parse_turn_command("hit"),
            ParseResult::Invalid(TURN_HELP.to_string())
        );
    }

    #[test]
    fn continue_answers() {
        assert!(parse_continue("y"));
        assert!(parse_continue(""));
        assert!(parse_continue("maybe"));
        assert!(!parse_continue("n"));
        assert!(!parse_continue("Q"));
    }
}
