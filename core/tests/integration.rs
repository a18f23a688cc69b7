//! Full client walkthrough against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP through `ReqwestTransport`. Validates that the
//! core's request building and response parsing agree with the server's
//! schema end to end.

use erlc_core::{ApiError, ClientConfig, ErlcApi, ErlcClient, ReqwestTransport, Timestamped};
use tokio::net::TcpListener;

const KEY: &str = "integration-key";

/// Bind a random port, serve the sample world on it and return the base URL.
async fn spawn_mock(world: mock_server::World) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { mock_server::run_with_world(listener, KEY, world).await });
    format!("http://{addr}/v1")
}

fn client(base_url: &str, key: &str) -> ErlcClient {
    ErlcClient::with_transport(ErlcApi::with_base_url(base_url, key), ReqwestTransport::new())
}

#[tokio::test(flavor = "multi_thread")]
async fn full_walkthrough() {
    let base_url = spawn_mock(mock_server::World::sample()).await;
    let config = ClientConfig {
        base_url: Some(base_url),
        ..ClientConfig::new(KEY)
    };
    let client = ErlcClient::from_config(&config);

    // Step 1: server metadata.
    let server = client.fetch_server().await.unwrap();
    assert_eq!(server.name, "Liberty County Mock");
    assert!(server.is_owner(1002));
    assert_eq!(server.max_players, 40);

    // Step 2: players, through the server's delegate.
    let players = server.fetch_players().await.unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].player.name(), Some("OwnerUser"));
    assert_eq!(players[0].player.user_id(), Some(1001));
    assert!(players[1].callsign.is_none());

    // Step 3: logs.
    let joins = client.fetch_join_logs().await.unwrap();
    assert!(joins[0].join);
    assert!(!joins[1].join);
    assert_eq!(joins[0].time().unwrap().timestamp(), 1_704_067_200);

    let kills = server.fetch_kill_logs().await.unwrap();
    assert_eq!(kills[0].killer.name(), Some("OwnerUser"));

    let calls = client.fetch_mod_call_logs().await.unwrap();
    assert!(calls[0].is_answered());
    assert!(!calls[1].is_answered());

    // Step 4: queue, bans, vehicles.
    assert_eq!(client.fetch_queue().await.unwrap(), vec![3001, 3002]);
    let bans = server.fetch_bans().await.unwrap();
    assert_eq!(bans.get("4001").map(String::as_str), Some("Griefer"));
    let vehicles = client.fetch_spawned_vehicles().await.unwrap();
    assert_eq!(vehicles[0].name, "Falcon Interceptor Utility 2019");

    // Step 5: run a command, then see it in the command log.
    server.execute_command(":h Hello").await.unwrap();
    let commands = client.fetch_command_logs().await.unwrap();
    let last = commands.last().unwrap();
    assert_eq!(last.command, ":h Hello");
    assert_eq!(last.command_name(), Some("h"));
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_key_is_authentication_failure() {
    let base_url = spawn_mock(mock_server::World::sample()).await;
    let client = client(&base_url, "not-the-key");

    assert!(matches!(client.fetch_server().await, Err(ApiError::Authentication)));
    assert!(matches!(client.execute_command(":h hi").await, Err(ApiError::Authentication)));
}

#[tokio::test(flavor = "multi_thread")]
async fn command_on_empty_server_is_unprocessable() {
    let base_url = spawn_mock(mock_server::World::empty()).await;
    let client = client(&base_url, KEY);

    assert!(client.fetch_players().await.unwrap().is_empty());
    let err = client.execute_command(":h anyone?").await.unwrap_err();
    assert!(matches!(err, ApiError::Request { status: 422, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_host_is_transport_failure() {
    // Bind and drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{addr}/v1"), KEY);
    let err = client.fetch_queue().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
