use crate::errors::IntoErrorResponse;
use crate::session::{
    GameConfig, GameStateResponse, SessionError, SessionId, SessionManager, TableAction,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CreateSessionRequest {
    fn into_config(self) -> GameConfig {
        GameConfig { seed: self.seed }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: SessionId,
    pub config: GameConfig,
    pub state: GameStateResponse,
}

#[derive(Debug, Deserialize)]
pub struct TableActionRequest {
    pub action: TableAction,
}

/// Opens a table and deals its first round.
///
/// - **Method**: POST
/// - **Path**: `/api/sessions`
///
/// Body `{ "seed": 42 }`, seed optional. Responds `201 Created` with
/// `{ session_id, config, state }`; `config.seed` is the seed actually used so
/// the session can be replayed.
pub async fn create_session(
    sessions: Arc<SessionManager>,
    request: CreateSessionRequest,
) -> Response {
    let created = sessions
        .create_session(request.into_config())
        .and_then(|id| {
            let session = sessions.get_session(&id)?;
            Ok(SessionResponse {
                config: session.config(),
                state: session.state_snapshot()?,
                session_id: id,
            })
        });
    match created {
        Ok(body) => success_response(StatusCode::CREATED, &body),
        Err(err) => err.into_http_response(),
    }
}

/// `GET /api/sessions/{id}`: config and current state.
///
/// `404 session_not_found` for unknown ids, `410 session_expired` once the
/// table sat idle past the TTL.
pub async fn get_session(sessions: Arc<SessionManager>, session_id: SessionId) -> Response {
    match assemble_session_response(&sessions, &session_id) {
        Ok(body) => success_response(StatusCode::OK, &body),
        Err(err) => err.into_http_response(),
    }
}

pub async fn get_session_state(sessions: Arc<SessionManager>, session_id: SessionId) -> Response {
    match sessions.state(&session_id) {
        Ok(state) => success_response(StatusCode::OK, &state),
        Err(err) => err.into_http_response(),
    }
}

/// Applies a button press.
///
/// - **Method**: POST
/// - **Path**: `/api/sessions/{id}/actions`
///
/// Body `{ "action": "hit" | "stand" | "new_game" }`. Responds `200 OK` with
/// the new state. `hit` and `stand` outside the player's turn are
/// `400 invalid_action`; `new_game` is always accepted and abandons an
/// unfinished round.
pub async fn submit_action(
    sessions: Arc<SessionManager>,
    session_id: SessionId,
    request: TableActionRequest,
) -> Response {
    match sessions.process_action(&session_id, request.action) {
        Ok(state) => success_response(StatusCode::OK, &state),
        Err(err) => err.into_http_response(),
    }
}

/// `DELETE /api/sessions/{id}`: the Quit button. `204 No Content`.
pub async fn delete_session(sessions: Arc<SessionManager>, session_id: SessionId) -> Response {
    match sessions.delete_session(&session_id) {
        Ok(()) => reply::with_status(warp::reply(), StatusCode::NO_CONTENT).into_response(),
        Err(err) => err.into_http_response(),
    }
}

fn assemble_session_response(
    sessions: &SessionManager,
    session_id: &SessionId,
) -> Result<SessionResponse, SessionError> {
    let config = sessions.config(session_id)?;
    let state = sessions.state(session_id)?;
    Ok(SessionResponse {
        session_id: session_id.clone(),
        config,
        state,
    })
}

fn success_response<T>(status: StatusCode, body: &T) -> Response
where
    T: Serialize,
{
    reply::with_status(reply::json(body), status).into_response()
}
