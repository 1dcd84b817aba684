use blackjack_engine::engine::Engine;
use blackjack_engine::errors::GameError;
use blackjack_engine::game::{Phase, Resolution, Round};
use blackjack_engine::hand::Hand;
use blackjack_engine::player::PlayerAction;
use blackjack_engine::record::{RoundCounter, RoundRecord};
use blackjack_engine::rules::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

pub type SessionId = String;

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Placeholder sent in place of the dealer's hole card.
pub const HIDDEN_CARD: &str = "??";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Engine seed. Filled in with the effective seed once the session exists.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// A button press on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableAction {
    Hit,
    Stand,
    NewGame,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandView {
    pub cards: Vec<String>,
    /// `None` while part of the hand is face down.
    pub value: Option<u32>,
}

impl HandView {
    fn revealed(hand: &Hand) -> Self {
        Self {
            cards: hand.cards().iter().map(ToString::to_string).collect(),
            value: Some(hand.value()),
        }
    }

    fn hole_card_down(hand: &Hand) -> Self {
        let cards = hand
            .cards()
            .iter()
            .enumerate()
            .map(|(i, card)| {
                if i == 0 {
                    HIDDEN_CARD.to_string()
                } else {
                    card.to_string()
                }
            })
            .collect();
        Self { cards, value: None }
    }
}

/// Which buttons the page should enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub hit: bool,
    pub stand: bool,
    pub new_game: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub outcome: Outcome,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateResponse {
    pub session_id: SessionId,
    pub round_id: String,
    pub phase: Phase,
    pub dealer: HandView,
    pub player: HandView,
    pub controls: Controls,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<RoundResult>,
    pub rounds_played: u32,
}

/// Text for the result dialog of a resolved round.
pub fn result_message(round: &Round) -> Option<String> {
    let outcome = round.outcome()?;
    let player = round.player().value();
    let dealer = round.dealer().value();
    let message = match round.resolution()? {
        Resolution::Naturals => match outcome {
            Outcome::Push => "Both have Blackjack: Push".to_string(),
            Outcome::Blackjack => "Player has Blackjack! You win.".to_string(),
            _ => "Dealer has Blackjack. You lose.".to_string(),
        },
        Resolution::PlayerBust => "You busted!".to_string(),
        Resolution::Showdown if round.dealer().is_bust() => {
            format!("Dealer busted ({dealer}). You win!")
        }
        Resolution::Showdown => match outcome {
            Outcome::Win | Outcome::Blackjack => format!("You win! ({player} vs {dealer})"),
            Outcome::Lose => format!("You lose. ({player} vs {dealer})"),
            Outcome::Push => format!("Push (tie) ({player} vs {dealer})"),
        },
    };
    Some(message)
}

/// Server-side state of one browser table: the engine, the round on the
/// felt and the session's round counter.
#[derive(Debug)]
struct Table {
    engine: Engine,
    counter: RoundCounter,
    round_id: String,
    round: Round,
}

impl Table {
    fn open(mut engine: Engine) -> Result<Self, SessionError> {
        let mut counter = RoundCounter::new();
        let round_id = counter.next_id();
        let round = engine.start_round()?;
        let mut table = Self {
            engine,
            counter,
            round_id,
            round,
        };
        table.settle_if_resolved()?;
        Ok(table)
    }

    fn deal_next(&mut self) -> Result<(), SessionError> {
        if !self.round.is_resolved() {
            tracing::debug!(round_id = %self.round_id, "abandoning unfinished round");
        }
        self.round = self.engine.start_round()?;
        self.round_id = self.counter.next_id();
        self.settle_if_resolved()
    }

    fn play(&mut self, action: PlayerAction) -> Result<(), SessionError> {
        if self.round.phase() != Phase::PlayerTurn {
            return Err(SessionError::InvalidAction(format!(
                "cannot {} during {}",
                action.as_str(),
                self.round.phase()
            )));
        }
        self.round.apply(action)?;
        self.settle_if_resolved()
    }

    fn settle_if_resolved(&mut self) -> Result<(), SessionError> {
        if !self.round.is_resolved() {
            return Ok(());
        }
        let record = RoundRecord::from_round(self.round_id.clone(), &self.round)?;
        let played = self.counter.record_completed();
        tracing::info!(
            round_id = %record.round_id,
            outcome = %record.outcome,
            rounds_played = played,
            "round complete"
        );
        Ok(())
    }

    fn snapshot(&self, session_id: &SessionId) -> GameStateResponse {
        let resolved = self.round.is_resolved();
        let dealer = if self.round.phase() == Phase::PlayerTurn {
            HandView::hole_card_down(self.round.dealer())
        } else {
            HandView::revealed(self.round.dealer())
        };
        let result = self.round.outcome().and_then(|outcome| {
            result_message(&self.round).map(|message| RoundResult { outcome, message })
        });
        GameStateResponse {
            session_id: session_id.clone(),
            round_id: self.round_id.clone(),
            phase: self.round.phase(),
            dealer,
            player: HandView::revealed(self.round.player()),
            controls: Controls {
                hit: !resolved,
                stand: !resolved,
                new_game: true,
            },
            result,
            rounds_played: self.counter.completed(),
        }
    }
}

#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    config: GameConfig,
    table: Mutex<Table>,
    last_active: Mutex<Instant>,
}

impl GameSession {
    fn new(id: SessionId, config: GameConfig) -> Result<Self, SessionError> {
        let engine = Engine::new(config.seed);
        let config = GameConfig {
            seed: Some(engine.seed()),
        };
        Ok(Self {
            id,
            config,
            table: Mutex::new(Table::open(engine)?),
            last_active: Mutex::new(Instant::now()),
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn config(&self) -> GameConfig {
        self.config.clone()
    }

    pub fn state_snapshot(&self) -> Result<GameStateResponse, SessionError> {
        let table = self.table.lock().map_err(|_| SessionError::StoragePoisoned)?;
        Ok(table.snapshot(&self.id))
    }

    fn apply(&self, action: TableAction) -> Result<GameStateResponse, SessionError> {
        let mut table = self.table.lock().map_err(|_| SessionError::StoragePoisoned)?;
        match action {
            TableAction::Hit => table.play(PlayerAction::Hit)?,
            TableAction::Stand => table.play(PlayerAction::Stand)?,
            TableAction::NewGame => table.deal_next()?,
        }
        Ok(table.snapshot(&self.id))
    }

    fn touch(&self) {
        if let Ok(mut guard) = self.last_active.lock() {
            *guard = Instant::now();
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        match self.last_active.lock() {
            Ok(last) => last.elapsed() >= ttl,
            Err(_) => false,
        }
    }

    #[cfg(test)]
    fn force_last_active(&self, instant: Instant) {
        if let Ok(mut guard) = self.last_active.lock() {
            *guard = instant;
        }
    }

    #[cfg(test)]
    fn force_round(&self, round: Round) {
        if let Ok(mut table) = self.table.lock() {
            table.round = round;
            table.round_id = table.counter.next_id();
            let _ = table.settle_if_resolved();
        }
    }
}

/// Owns every open table, keyed by session id.
#[derive(Debug)]
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, Arc<GameSession>>>,
    session_ttl: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            session_ttl: ttl,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Opens a table and deals its first round.
    pub fn create_session(&self, config: GameConfig) -> Result<SessionId, SessionError> {
        let id = Uuid::new_v4().to_string();
        let session = Arc::new(GameSession::new(id.clone(), config)?);

        {
            let mut guard = self
                .sessions
                .write()
                .map_err(|_| SessionError::StoragePoisoned)?;
            guard.insert(id.clone(), Arc::clone(&session));
        }

        tracing::info!(
            session_id = %id,
            seed = ?session.config.seed,
            "session created"
        );
        Ok(id)
    }

    pub fn get_session(&self, id: &SessionId) -> Result<Arc<GameSession>, SessionError> {
        let guard = self
            .sessions
            .read()
            .map_err(|_| SessionError::StoragePoisoned)?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.clone()))
    }

    pub fn state(&self, session_id: &SessionId) -> Result<GameStateResponse, SessionError> {
        self.live_session(session_id)?.state_snapshot()
    }

    pub fn config(&self, session_id: &SessionId) -> Result<GameConfig, SessionError> {
        Ok(self.live_session(session_id)?.config())
    }

    pub fn process_action(
        &self,
        session_id: &SessionId,
        action: TableAction,
    ) -> Result<GameStateResponse, SessionError> {
        let session = self.live_session(session_id)?;
        tracing::debug!(session_id = %session_id, ?action, "processing table action");
        session.apply(action)
    }

    pub fn delete_session(&self, session_id: &SessionId) -> Result<(), SessionError> {
        match self.remove_session(session_id)? {
            Some(_) => {
                tracing::info!(session_id = %session_id, "session closed");
                Ok(())
            }
            None => Err(SessionError::NotFound(session_id.clone())),
        }
    }

    /// Drops every table idle for longer than the TTL. Returns how many went.
    pub fn cleanup_expired_sessions(&self) -> usize {
        let mut guard = match self.sessions.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = guard.len();
        guard.retain(|id, session| {
            let expired = session.is_expired(self.session_ttl);
            if expired {
                tracing::info!(session_id = %id, "session expired");
            }
            !expired
        });
        before - guard.len()
    }

    pub fn active_sessions(&self) -> Vec<SessionId> {
        match self.sessions.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Looks the session up, expiring it if it sat idle too long, and marks
    /// it active.
    fn live_session(&self, session_id: &SessionId) -> Result<Arc<GameSession>, SessionError> {
        let session = self.get_session(session_id)?;
        if session.is_expired(self.session_ttl) {
            self.remove_session(session_id)?;
            tracing::info!(session_id = %session_id, "session expired on access");
            return Err(SessionError::Expired(session_id.clone()));
        }
        session.touch();
        Ok(session)
    }

    fn remove_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Arc<GameSession>>, SessionError> {
        match self.sessions.write() {
            Ok(mut guard) => Ok(guard.remove(session_id)),
            Err(_) => Err(SessionError::StoragePoisoned),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("Game engine error: {0}")]
    EngineError(String),
    #[error("Session expired: {0}")]
    Expired(SessionId),
    #[error("Session storage poisoned")]
    StoragePoisoned,
}

impl From<GameError> for SessionError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::ActionNotAllowed { .. } => SessionError::InvalidAction(err.to_string()),
            other => SessionError::EngineError(other.to_string()),
        }
    }
}

impl crate::errors::IntoErrorResponse for SessionError {
    fn status_code(&self) -> warp::http::StatusCode {
        use warp::http::StatusCode;
        match self {
            SessionError::NotFound(_) => StatusCode::NOT_FOUND,
            SessionError::Expired(_) => StatusCode::GONE,
            SessionError::InvalidAction(_) => StatusCode::BAD_REQUEST,
            SessionError::EngineError(_) | SessionError::StoragePoisoned => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SessionError::NotFound(_) => "session_not_found",
            SessionError::Expired(_) => "session_expired",
            SessionError::InvalidAction(_) => "invalid_action",
            SessionError::EngineError(_) => "engine_error",
            SessionError::StoragePoisoned => "session_storage_error",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            SessionError::NotFound(id) => Some(serde_json::json!({ "session_id": id })),
            SessionError::Expired(id) => Some(serde_json::json!({
                "session_id": id,
                "reason": "Session expired due to inactivity"
            })),
            _ => None,
        }
    }

    fn severity(&self) -> crate::errors::ErrorSeverity {
        use crate::errors::ErrorSeverity;
        match self {
            SessionError::StoragePoisoned => ErrorSeverity::Critical,
            SessionError::EngineError(_) => ErrorSeverity::Server,
            _ => ErrorSeverity::Client,
        }
    }
}
