use serde::{Deserialize, Serialize};

/// A decision the player can make during their turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    /// Take one more card
    Hit,
    /// Keep the current hand and hand over to the dealer
    Stand,
}

impl PlayerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::Hit => "hit",
            PlayerAction::Stand => "stand",
        }
    }
}
