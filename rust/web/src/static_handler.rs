use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use mime_guess::{mime, MimeGuess};
use tokio::fs;
use warp::http::header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use warp::http::{Response, StatusCode};
use warp::hyper::Body;

use crate::errors::{ErrorSeverity, IntoErrorResponse};

#[derive(Debug, thiserror::Error)]
pub enum StaticError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("asset io error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoErrorResponse for StaticError {
    fn status_code(&self) -> StatusCode {
        match self {
            StaticError::NotFound(_) => StatusCode::NOT_FOUND,
            StaticError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StaticError::NotFound(_) => "static_not_found",
            StaticError::Io(_) => "static_io_error",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            StaticError::NotFound(_) => ErrorSeverity::Client,
            StaticError::Io(_) => ErrorSeverity::Server,
        }
    }
}

/// Serves the table page and its assets from one directory.
///
/// The page itself is never cached so a restarted server is picked up on
/// reload; scripts and styles are cached for a day.
#[derive(Debug, Clone)]
pub struct StaticHandler {
    root: Arc<PathBuf>,
}

impl StaticHandler {
    pub const INDEX: &'static str = "index.html";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    pub async fn index(&self) -> Result<warp::reply::Response, StaticError> {
        self.serve_relative(Self::INDEX).await
    }

    pub async fn asset(&self, path: &str) -> Result<warp::reply::Response, StaticError> {
        self.serve_relative(path).await
    }

    async fn serve_relative(&self, relative: &str) -> Result<warp::reply::Response, StaticError> {
        let resolved = self.resolve(relative)?;
        let bytes = match fs::read(&resolved).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StaticError::NotFound(relative.to_string()))
            }
            Err(err) => return Err(StaticError::Io(err)),
        };

        let mime = MimeGuess::from_path(&resolved).first_or_octet_stream();
        let cache = if relative == Self::INDEX {
            "no-cache"
        } else {
            "public, max-age=86400"
        };
        Ok(build_response(bytes, &mime, cache))
    }

    /// Maps a request path onto the root, refusing anything that climbs out.
    fn resolve(&self, path: &str) -> Result<PathBuf, StaticError> {
        let mut buf = PathBuf::new();
        for comp in Path::new(path).components() {
            match comp {
                Component::Normal(seg) => buf.push(seg),
                Component::CurDir | Component::RootDir => {}
                Component::Prefix(_) | Component::ParentDir => {
                    return Err(StaticError::NotFound(path.to_string()))
                }
            }
        }

        if buf.as_os_str().is_empty() {
            return Err(StaticError::NotFound(path.to_string()));
        }

        Ok(self.root.join(buf))
    }
}

fn build_response(bytes: Vec<u8>, mime: &mime::Mime, cache: &'static str) -> warp::reply::Response {
    let mut content_type = mime.essence_str().to_string();
    if mime.type_() == mime::TEXT || mime.subtype() == mime::JAVASCRIPT {
        content_type.push_str("; charset=utf-8");
    }

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_str(&content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(cache));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("index.html"), "<h1>Blackjack</h1>").expect("index");
        std::fs::write(dir.path().join("app.js"), "console.log('deal');").expect("js");
        dir
    }

    #[tokio::test]
    async fn index_is_html_and_not_cached() {
        let dir = site();
        let handler = StaticHandler::new(dir.path());
        let response = handler.index().await.expect("index");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(response.headers()[CACHE_CONTROL], "no-cache");
    }

    #[tokio::test]
    async fn assets_are_cached() {
        let dir = site();
        let handler = StaticHandler::new(dir.path());
        let response = handler.asset("app.js").await.expect("asset");
        assert_eq!(response.headers()[CACHE_CONTROL], "public, max-age=86400");
    }

    #[tokio::test]
    async fn traversal_and_missing_files_are_not_found() {
        let dir = site();
        let handler = StaticHandler::new(dir.path());

        let err = handler.asset("../secret").await.expect_err("traversal");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(matches!(
            handler.asset("missing.css").await,
            Err(StaticError::NotFound(_))
        ));
        assert!(matches!(handler.asset("").await, Err(StaticError::NotFound(_))));
    }
}
