//! Browser front end for the Blackjack engine.
//!
//! A warp server keeps one [`session::GameSession`] per open table and
//! exposes it over a small JSON API; the page under `static/` renders the
//! table and sends button presses back.

pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod session;
pub mod static_handler;

pub use errors::{ErrorResponse, ErrorSeverity, IntoErrorResponse};
pub use logging::{init_logging, LogEntry, LogFormat, TestLogSubscriber};
pub use middleware::{log_response, with_request_logging};
pub use server::{AppContext, ServerConfig, ServerError, ServerHandle, WebServer};
pub use session::{
    Controls, GameConfig, GameSession, GameStateResponse, HandView, RoundResult, SessionError,
    SessionId, SessionManager, TableAction,
};
pub use static_handler::{StaticError, StaticHandler};
