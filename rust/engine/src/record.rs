use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::game::{Resolution, Round};
use crate::player::PlayerAction;
use crate::rules::Outcome;

/// Summary of one resolved round, kept in memory and logged as a JSON line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Identifier in the form `YYYYMMDD-NNNNNN`
    pub round_id: String,
    /// Shuffle seed of the round's deck; `None` for rigged decks
    pub seed: Option<u64>,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub player_value: u32,
    pub dealer_value: u32,
    /// Player decisions in the order they were taken
    pub actions: Vec<PlayerAction>,
    pub outcome: Outcome,
    pub resolution: Resolution,
    /// RFC3339 timestamp, UTC
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    pub fn from_round(round_id: impl Into<String>, round: &Round) -> Result<Self, GameError> {
        let (Some(outcome), Some(resolution)) = (round.outcome(), round.resolution()) else {
            return Err(GameError::RoundInProgress);
        };
        Ok(Self {
            round_id: round_id.into(),
            seed: round.seed(),
            player_cards: round.player().cards().to_vec(),
            dealer_cards: round.dealer().cards().to_vec(),
            player_value: round.player().value(),
            dealer_value: round.dealer().value(),
            actions: round.actions().to_vec(),
            outcome,
            resolution,
            ts: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Adapter-owned round counter. Issues ids for dealt rounds and counts the
/// rounds that were played to completion.
#[derive(Debug, Clone)]
pub struct RoundCounter {
    date: String,
    seq: u32,
    completed: u32,
}

impl Default for RoundCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundCounter {
    pub fn new() -> Self {
        Self::for_date(Utc::now().date_naive())
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: date.format("%Y%m%d").to_string(),
            seq: 0,
            completed: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn record_completed(&mut self) -> u32 {
        self.completed += 1;
        self.completed
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }
}
