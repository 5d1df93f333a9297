//! HTTP API integration tests driven through the router with `oneshot`,
//! no listening socket needed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use server::{build_router, ServerConfig, ServerState};

fn seeded_state() -> Arc<ServerState> {
    let seed = serde_json::json!({
        "intents": [{
            "tag": "greeting",
            "patterns": ["halo", "hai"],
            "responses": ["Selamat datang!"]
        }],
        "books": [{
            "title": "Pemrograman Python Dasar",
            "subject": "teknologi",
            "availability": "tersedia",
            "location": "A1"
        }]
    });
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("seed.json");
    std::fs::write(&path, seed.to_string()).expect("write seed");

    let config = ServerConfig {
        seed_file: Some(path.to_string_lossy().into_owned()),
        ..ServerConfig::default()
    };
    // The seed file is read eagerly, so the tempdir can go away afterwards.
    Arc::new(ServerState::new(config).expect("server state"))
}

async fn get_json(uri: &str, state: Arc<ServerState>) -> (StatusCode, Value) {
    let response = build_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("router response");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

#[tokio::test]
async fn chat_answers_a_greeting() {
    let (status, body) = get_json("/get?msg=halo", seeded_state()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Selamat datang!");
    assert!(body["score"].as_f64().unwrap() >= 60.0);
    assert_eq!(body["pattern"], "halo");
}

#[tokio::test]
async fn chat_answers_a_title_lookup() {
    let (status, body) = get_json("/get?msg=pemrograman%20python%20dasar", seeded_state()).await;
    assert_eq!(status, StatusCode::OK);
    let response = body["response"].as_str().unwrap();
    assert!(response.contains("tersedia"), "got {response:?}");
    assert!(response.contains("A1"), "got {response:?}");
    assert!(body["score"].as_f64().unwrap() >= 75.0);
}

#[tokio::test]
async fn empty_message_gets_the_prompt() {
    let (status, body) = get_json("/get", seeded_state()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Mohon masukkan pesan Anda.");
    assert_eq!(body["score"], 0.0);
    assert_eq!(body["pattern"], "");
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = get_json("/health", seeded_state()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "tanya-server");
}

#[tokio::test]
async fn unknown_routes_return_404() {
    let (status, body) = get_json("/nope", seeded_state()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn reload_reports_the_intent_count() {
    let state = seeded_state();
    let response = build_router(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/reload")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("router response");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "reloaded");
    assert_eq!(body["intents"], 1);
}
