mod common;

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    body::Body,
    extract::Query,
    http::{Request, StatusCode},
    routing::get,
};
use gamevault_core::{ImageLookup, InMemoryGameRepository, RawgConfig, RawgImageLookup};
use gamevault_server::{create_app, infra::startup::build_state_with};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;

use common::{StubLookup, build_test_app_with, test_config};

#[tokio::test]
async fn returns_the_found_image() {
    let app = build_test_app_with(None, StubLookup::Found("https://media.rawg.io/halo.jpg"));

    let response = app
        .server
        .get("/game-image")
        .add_query_param("name", "Halo")
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "image": "https://media.rawg.io/halo.jpg" }));
}

#[tokio::test]
async fn returns_null_when_nothing_matches() {
    let app = build_test_app_with(None, StubLookup::Missing);

    let body: Value = app
        .server
        .get("/game-image")
        .add_query_param("name", "Obscure Title")
        .await
        .json();
    assert_eq!(body, json!({ "image": null }));
}

#[tokio::test]
async fn lookup_failures_are_server_errors() {
    let app = build_test_app_with(None, StubLookup::Failing("upstream exploded"));

    let response = app
        .server
        .get("/game-image")
        .add_query_param("name", "Halo")
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|m| m.contains("upstream exploded"))
    );
}

#[tokio::test]
async fn blank_or_missing_name_is_rejected() {
    let app = build_test_app_with(None, StubLookup::Found("https://unused"));

    let missing = app.server.get("/game-image").await;
    missing.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = missing.json();
    assert_eq!(body["message"], "Missing game name");

    app.server
        .get("/game-image")
        .add_query_param("name", "   ")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lookup_never_touches_the_store() {
    let games = Arc::new(InMemoryGameRepository::new());
    let state = build_state_with(
        Arc::new(test_config(None)),
        games.clone(),
        Arc::new(StubLookup::Found("https://media.rawg.io/zelda.jpg")),
    );

    let response = create_app(state)
        .oneshot(
            Request::builder()
                .uri("/game-image?name=Zelda")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(games.is_empty().await);
}

/// Serves a minimal stand-in for RAWG's `/games` search endpoint.
async fn spawn_rawg_stub() -> String {
    async fn search(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
        if params.get("key").map(String::as_str) != Some("test-key") {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" })));
        }
        assert_eq!(params.get("page_size").map(String::as_str), Some("1"));

        match params.get("search").map(String::as_str) {
            Some("Halo") => (
                StatusCode::OK,
                Json(json!({
                    "count": 1,
                    "results": [{ "name": "Halo", "background_image": "https://media.rawg.io/halo.jpg" }]
                })),
            ),
            _ => (StatusCode::OK, Json(json!({ "count": 0, "results": [] }))),
        }
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new().route("/api/games", get(search));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}/api")
}

fn rawg(base_url: String, api_key: &str) -> RawgImageLookup {
    RawgImageLookup::new(RawgConfig {
        base_url,
        api_key: Some(api_key.to_string()),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn rawg_client_reads_first_background_image() {
    let base = spawn_rawg_stub().await;
    let lookup = rawg(base, "test-key");

    assert_eq!(
        lookup.cover_image("Halo").await.unwrap().as_deref(),
        Some("https://media.rawg.io/halo.jpg")
    );
    assert_eq!(lookup.cover_image("Nothing Here").await.unwrap(), None);
}

#[tokio::test]
async fn rawg_client_surfaces_error_statuses() {
    let base = spawn_rawg_stub().await;
    let lookup = rawg(base, "wrong-key");

    let err = lookup.cover_image("Halo").await.unwrap_err();
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn rawg_client_behind_the_http_surface() {
    let base = spawn_rawg_stub().await;
    let state = build_state_with(
        Arc::new(test_config(None)),
        Arc::new(InMemoryGameRepository::new()),
        Arc::new(rawg(base, "test-key")),
    );
    let server = axum_test::TestServer::new(create_app(state)).unwrap();

    let body: Value = server
        .get("/game-image")
        .add_query_param("name", "Halo")
        .await
        .json();
    assert_eq!(body["image"], "https://media.rawg.io/halo.jpg");
}
