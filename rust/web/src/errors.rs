//! JSON error envelope shared by every API endpoint.
//!
//! Component errors implement [`IntoErrorResponse`]; the trait maps them to a
//! status code and a `{ error, message, details? }` body and logs them at a
//! level matching their severity.
use serde::{Deserialize, Serialize};
use std::fmt;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

/// Standard error body for all API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable code, e.g. `session_not_found`
    pub error: String,
    /// Human-readable message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn into_response(self, status: StatusCode) -> Response {
        reply::with_status(reply::json(&self), status).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 4xx: the caller got something wrong
    Client,
    /// 5xx: the server failed
    Server,
    /// Shared state can no longer be trusted
    Critical,
}

pub trait IntoErrorResponse {
    fn status_code(&self) -> StatusCode;

    fn error_code(&self) -> &'static str;

    fn error_message(&self) -> String;

    fn error_details(&self) -> Option<serde_json::Value> {
        None
    }

    fn severity(&self) -> ErrorSeverity {
        if self.status_code().is_server_error() {
            ErrorSeverity::Server
        } else {
            ErrorSeverity::Client
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self.error_details() {
            Some(details) => {
                ErrorResponse::with_details(self.error_code(), self.error_message(), details)
            }
            None => ErrorResponse::new(self.error_code(), self.error_message()),
        }
    }

    /// Logs the error and renders it as a JSON response.
    fn into_http_response(self) -> Response
    where
        Self: Sized,
    {
        let status = self.status_code();
        let body = self.to_error_response();
        log_error(self.severity(), status, &body);
        body.into_response(status)
    }
}

fn log_error(severity: ErrorSeverity, status: StatusCode, body: &ErrorResponse) {
    let status = status.as_u16();
    match severity {
        ErrorSeverity::Client => {
            tracing::info!(status, error = %body.error, detail = %body.message, "client error")
        }
        ErrorSeverity::Server => {
            tracing::error!(status, error = %body.error, detail = %body.message, "server error")
        }
        ErrorSeverity::Critical => tracing::error!(
            status,
            error = %body.error,
            detail = %body.message,
            critical = true,
            "critical error"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::TestLogSubscriber;
    use serde_json::json;
    use tracing::Level;

    struct Broken;

    impl IntoErrorResponse for Broken {
        fn status_code(&self) -> StatusCode {
            StatusCode::INTERNAL_SERVER_ERROR
        }

        fn error_code(&self) -> &'static str {
            "broken"
        }

        fn error_message(&self) -> String {
            "it broke".into()
        }
    }

    #[test]
    fn details_are_omitted_when_absent() {
        let error = ErrorResponse::new("invalid_action", "cannot hit during resolved");
        let json = serde_json::to_value(&error).expect("serialize");

        assert_eq!(json["error"], "invalid_action");
        assert_eq!(json["message"], "cannot hit during resolved");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn details_are_carried_through() {
        let error = ErrorResponse::with_details(
            "session_not_found",
            "Session not found: abc",
            json!({ "session_id": "abc" }),
        );
        let json = serde_json::to_value(&error).expect("serialize");
        assert_eq!(json["details"]["session_id"], "abc");
        assert_eq!(error.to_string(), "session_not_found: Session not found: abc");
    }

    #[test]
    fn default_severity_follows_status() {
        assert_eq!(Broken.severity(), ErrorSeverity::Server);
        assert_eq!(Broken.to_error_response().error, "broken");
    }

    #[test]
    fn server_errors_are_logged_at_error_level() {
        let logs = TestLogSubscriber::new();
        let response = logs.capture(|| Broken.into_http_response());

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let entry = logs
            .entries()
            .into_iter()
            .find(|e| e.message == "server error")
            .expect("error logged");
        assert_eq!(entry.level, Level::ERROR);
        assert_eq!(entry.field("error"), Some("broken"));
        assert_eq!(entry.field("status"), Some("500"));
    }
}
