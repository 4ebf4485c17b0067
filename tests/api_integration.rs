//! API integration tests.
//!
//! These tests drive the router end-to-end using axum's test utilities.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use lcu_bridge::api::{create_router, AppState};
use lcu_bridge::ingest::{ConnectionHandle, SessionEvent, SessionEventHandler};
use lcu_bridge::{EventIngestor, Mutation, ServerConfig, SnapshotServer, StateStore};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper to create a request with an Origin header, as a browser would send.
fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap()
}

/// Helper to extract JSON from response.
async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

fn ingestor(store: &Arc<StateStore>) -> EventIngestor {
    let server = Arc::new(SnapshotServer::new(
        ServerConfig::new("127.0.0.1", 0),
        Arc::clone(store),
    ));
    EventIngestor::new(Arc::clone(store), server)
}

// ============================================================================
// GET /state
// ============================================================================

#[tokio::test]
async fn test_state_defaults() {
    let app = create_router(AppState::default());

    let response = app.oneshot(request(Method::GET, "/state")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));

    let json = response_json(response).await;
    assert_eq!(
        json,
        json!({
            "isConnected": false,
            "myChampionId": 0,
            "myPickIntentId": 0,
            "enemyIds": [],
            "assignedRole": "UNKNOWN",
            "guideText": "等待游戏连接..."
        })
    );
}

#[tokio::test]
async fn test_state_after_session_event() {
    let store = Arc::new(StateStore::new());
    let ingestor = ingestor(&store);
    let conn = ConnectionHandle::new(1, "test");

    ingestor.on_session_event(
        &conn,
        &SessionEvent::champ_select_update(json!({
            "localPlayerCellId": 2,
            "myTeam": [{"cellId": 2, "championId": 0, "championPickIntent": 45, "assignedPosition": "MIDDLE"}],
            "theirTeam": [{"championId": 0}, {"championId": 99}]
        })),
    );

    let app = create_router(AppState::new(Arc::clone(&store)));
    let response = app.oneshot(request(Method::GET, "/state")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["myChampionId"], 0);
    assert_eq!(json["myPickIntentId"], 45);
    assert_eq!(json["assignedRole"], "MIDDLE");
    assert_eq!(json["enemyIds"], json!([0, 99]));
}

#[tokio::test]
async fn test_state_after_disconnect_keeps_picks() {
    let store = Arc::new(StateStore::new());
    store.apply(Mutation::SetConnected(true));
    store.apply(Mutation::ReplaceEnemies(vec![11, 22]));
    store.apply(Mutation::SetConnected(false));

    let app = create_router(AppState::new(store));
    let response = app.oneshot(request(Method::GET, "/state")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["isConnected"], false);
    assert_eq!(json["enemyIds"], json!([11, 22]));
}

#[tokio::test]
async fn test_repeated_polls_are_stable() {
    let state = AppState::default();
    state.store.apply(Mutation::ReplaceEnemies(vec![1]));

    let mut bodies = Vec::new();
    for _ in 0..3 {
        let app = create_router(state.clone());
        let response = app.oneshot(request(Method::GET, "/state")).await.unwrap();
        bodies.push(response_json(response).await);
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
}

// ============================================================================
// Undefined routes and verbs
// ============================================================================

#[tokio::test]
async fn test_unknown_path_not_found() {
    let app = create_router(AppState::default());

    let response = app.oneshot(request(Method::GET, "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_state_not_allowed() {
    let app = create_router(AppState::default());

    let response = app.oneshot(request(Method::POST, "/state")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = create_router(AppState::default());

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/state")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(preflight).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
