use blackjack_web::server::{ServerConfig, WebServer};
use serde_json::{json, Value};
use std::time::Duration;
use warp::hyper::{self, Body, Client as HyperClient, Request};

async fn read_json(response: hyper::Response<Body>) -> Value {
    let bytes = hyper::body::to_bytes(response.into_body())
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn post_json(uri: String, body: Value) -> Request<Body> {
    Request::builder()
        .method(hyper::Method::POST)
        .uri(uri)
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

#[tokio::test]
async fn table_lifecycle_over_http() {
    let server = WebServer::new(ServerConfig::for_tests()).expect("construct server");
    let handle = server.start().await.expect("start server");
    let address = handle.address();
    let client = HyperClient::new();

    let created = client
        .request(post_json(
            format!("http://{address}/api/sessions"),
            json!({ "seed": 2024 }),
        ))
        .await
        .expect("create session");
    assert_eq!(created.status(), hyper::StatusCode::CREATED);
    let created = read_json(created).await;
    let session_id = created["session_id"].as_str().expect("session id").to_string();
    assert_eq!(created["config"]["seed"], 2024);

    // Whatever the opening deal, new_game is always allowed.
    let dealt = client
        .request(post_json(
            format!("http://{address}/api/sessions/{session_id}/actions"),
            json!({ "action": "new_game" }),
        ))
        .await
        .expect("new game");
    assert_eq!(dealt.status(), hyper::StatusCode::OK);
    let state = read_json(dealt).await;
    assert_eq!(state["session_id"], session_id.as_str());
    assert_eq!(state["controls"]["new_game"], true);

    let page: hyper::Uri = format!("http://{address}/").parse().expect("page uri");
    let page = client.get(page).await.expect("request page");
    assert_eq!(page.status(), hyper::StatusCode::OK);

    let session_uri = format!("http://{address}/api/sessions/{session_id}");
    let delete = Request::builder()
        .method(hyper::Method::DELETE)
        .uri(session_uri.clone())
        .body(Body::empty())
        .expect("build delete request");
    let deleted = client.request(delete).await.expect("delete session");
    assert_eq!(deleted.status(), hyper::StatusCode::NO_CONTENT);

    let missing = client
        .get(session_uri.parse().expect("session uri"))
        .await
        .expect("request deleted session");
    assert_eq!(missing.status(), hyper::StatusCode::NOT_FOUND);
    assert_eq!(read_json(missing).await["error"], "session_not_found");
    drop(client);

    tokio::time::timeout(Duration::from_secs(2), handle.shutdown())
        .await
        .expect("shutdown timed out")
        .expect("shutdown failed");
}

#[tokio::test]
async fn binding_a_taken_port_fails() {
    let first = WebServer::new(ServerConfig::for_tests())
        .expect("construct server")
        .start()
        .await
        .expect("start first");
    let port = first.address().port();
    let static_dir = ServerConfig::for_tests().static_dir().to_path_buf();

    let second = WebServer::new(ServerConfig::new("127.0.0.1", port, static_dir))
        .expect("construct server")
        .start()
        .await;
    assert!(second.is_err());

    first.shutdown().await.expect("shutdown");
}
