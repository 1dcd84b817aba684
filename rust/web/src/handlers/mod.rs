pub mod game;
pub mod health;

pub use game::{
    create_session, delete_session, get_session, get_session_state, submit_action,
    CreateSessionRequest, SessionResponse, TableActionRequest,
};
pub use health::health;
