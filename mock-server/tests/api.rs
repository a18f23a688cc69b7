use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_world, CommandLog, Player, Server, World, SERVER_KEY_HEADER};
use tower::ServiceExt;

const KEY: &str = "test-key";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str, key: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(SERVER_KEY_HEADER, key)
        .body(String::new())
        .unwrap()
}

fn command(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/v1/server/command")
        .header(SERVER_KEY_HEADER, KEY)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn wrong_key_is_forbidden() {
    let resp = app(KEY)
        .oneshot(get("/v1/server", "nope"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_key_is_forbidden() {
    let resp = app(KEY)
        .oneshot(
            Request::builder()
                .uri("/v1/server/players")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn forbidden_applies_to_command() {
    let resp = app(KEY)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/server/command")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(r#"{"command":":h hi"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// --- reads ---

#[tokio::test]
async fn server_returns_sample() {
    let resp = app(KEY).oneshot(get("/v1/server", KEY)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let server: Server = body_json(resp).await;
    assert_eq!(server.name, "Liberty County Mock");
    assert_eq!(server.max_players, 40);
}

#[tokio::test]
async fn players_returns_sample() {
    let resp = app(KEY)
        .oneshot(get("/v1/server/players", KEY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let players: Vec<Player> = body_json(resp).await;
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].callsign.as_deref(), Some("1A-01"));
}

#[tokio::test]
async fn every_read_route_answers() {
    for path in [
        "/v1/server/joinlogs",
        "/v1/server/queue",
        "/v1/server/killlogs",
        "/v1/server/commandlogs",
        "/v1/server/modcalls",
        "/v1/server/bans",
        "/v1/server/vehicles",
    ] {
        let resp = app(KEY).oneshot(get(path, KEY)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
        let value: serde_json::Value = body_json(resp).await;
        assert!(value.is_array() || value.is_object(), "{path}");
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let resp = app(KEY)
        .oneshot(get("/v1/server/weather", KEY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- command ---

#[tokio::test]
async fn blank_command_is_bad_request() {
    let resp = app(KEY)
        .oneshot(command(r#"{"command":"   "}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_command_body_returns_422() {
    let resp = app(KEY)
        .oneshot(command(r#"{"cmd":":h hi"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn command_on_empty_server_returns_422() {
    let resp = app_with_world(KEY, World::empty())
        .oneshot(command(r#"{"command":":h hi"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn command_is_appended_to_log() {
    use tower::Service;

    let mut app = app(KEY).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(command(r#"{"command":":h Hello"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/v1/server/commandlogs", KEY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let logs: Vec<CommandLog> = body_json(resp).await;
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[1].command, ":h Hello");
    assert!(logs[1].timestamp > 0);
}
