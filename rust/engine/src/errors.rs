use thiserror::Error;

use crate::game::Phase;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Drawing from an exhausted deck. A 52-card deck always covers one
    /// round, so this signals misuse by the caller rather than a game state.
    #[error("cannot deal from an empty deck")]
    EmptyDeck,
    #[error("action not allowed during {phase}")]
    ActionNotAllowed { phase: Phase },
    #[error("round is still in progress")]
    RoundInProgress,
}
