use std::time::Instant;
use warp::http::{Method, StatusCode};
use warp::reject::Rejection;
use warp::reply::{Reply, Response};
use warp::Filter;

/// Logs each request on the way in and its status and latency on the way out.
pub fn with_request_logging<F, T>(
    filter: F,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone
where
    F: Filter<Extract = (T,), Error = Rejection> + Clone + Send + Sync + 'static,
    T: Reply,
{
    warp::any()
        .and(warp::path::full())
        .and(warp::method())
        .map(|path: warp::path::FullPath, method: Method| {
            tracing::info!(path = %path.as_str(), method = %method, "incoming request");
            (Instant::now(), path.as_str().to_string(), method)
        })
        .and(filter)
        .map(
            |(start, path, method): (Instant, String, Method), reply: T| {
                let response = reply.into_response();
                log_response(
                    response.status(),
                    &path,
                    method.as_str(),
                    start.elapsed().as_millis(),
                );
                response
            },
        )
}

pub fn log_response(status: StatusCode, path: &str, method: &str, duration_ms: u128) {
    let code = status.as_u16();
    if status.is_server_error() {
        tracing::error!(status = code, path, method, duration_ms, "request completed");
    } else if status.is_client_error() {
        tracing::warn!(status = code, path, method, duration_ms, "request completed");
    } else {
        tracing::info!(status = code, path, method, duration_ms, "request completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::TestLogSubscriber;
    use tracing::Level;

    #[test]
    fn client_errors_log_at_warn() {
        let logs = TestLogSubscriber::new();
        logs.capture(|| log_response(StatusCode::GONE, "/api/sessions/x/state", "GET", 3));

        let entries = logs.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::WARN);
        assert_eq!(entries[0].field("status"), Some("410"));
        assert_eq!(entries[0].field("path"), Some("/api/sessions/x/state"));
    }

    #[test]
    fn success_logs_at_info() {
        let logs = TestLogSubscriber::new();
        logs.capture(|| log_response(StatusCode::CREATED, "/api/sessions", "POST", 1));
        assert_eq!(logs.entries()[0].level, Level::INFO);
    }

    #[tokio::test]
    async fn wrapped_filter_logs_both_ends() {
        let logs = TestLogSubscriber::new();
        let route = with_request_logging(warp::path("health").map(|| "ok"));
        let registry = {
            use tracing_subscriber::layer::SubscriberExt;
            tracing_subscriber::Registry::default()
                .with(logs.clone().into_layer::<tracing_subscriber::Registry>())
        };
        let _guard = tracing::subscriber::set_default(registry);

        let response = warp::test::request().path("/health").reply(&route).await;
        assert_eq!(response.status(), StatusCode::OK);

        let messages = logs.messages();
        assert!(messages.contains(&"incoming request".to_string()));
        assert!(messages.contains(&"request completed".to_string()));
    }
}
