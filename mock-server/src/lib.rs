//! In-memory stand-in for the ER:LC private server API.
//!
//! Serves the same paths under `/v1`, checks the `server-key` header the
//! same way (403 on mismatch) and answers with the upstream's PascalCase
//! JSON. `POST /v1/server/command` appends to the command log so tests can
//! observe side effects.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const SERVER_KEY_HEADER: &str = "server-key";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Server {
    pub name: String,
    pub owner_id: u64,
    pub co_owner_ids: Vec<u64>,
    pub current_players: u8,
    pub max_players: u8,
    pub join_key: String,
    pub acc_verified_req: String,
    pub team_balance: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    pub player: String,
    pub permission: String,
    pub callsign: Option<String>,
    pub team: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JoinLog {
    pub join: bool,
    pub timestamp: i64,
    pub player: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KillLog {
    pub killed: String,
    pub timestamp: i64,
    pub killer: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommandLog {
    pub player: String,
    pub timestamp: i64,
    pub command: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModCall {
    pub caller: String,
    pub moderator: Option<String>,
    pub timestamp: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vehicle {
    pub texture: Option<String>,
    pub name: String,
    pub owner: String,
}

#[derive(Deserialize)]
pub struct RunCommand {
    pub command: String,
}

/// Everything the mock serves.
#[derive(Clone, Debug)]
pub struct World {
    pub server: Server,
    pub players: Vec<Player>,
    pub join_logs: Vec<JoinLog>,
    pub queue: Vec<u64>,
    pub kill_logs: Vec<KillLog>,
    pub command_logs: Vec<CommandLog>,
    pub mod_calls: Vec<ModCall>,
    pub bans: HashMap<String, String>,
    pub vehicles: Vec<Vehicle>,
}

impl World {
    /// A small populated server.
    pub fn sample() -> Self {
        Self {
            server: Server {
                name: "Liberty County Mock".to_string(),
                owner_id: 1001,
                co_owner_ids: vec![1002],
                current_players: 2,
                max_players: 40,
                join_key: "MockKey".to_string(),
                acc_verified_req: "Disabled".to_string(),
                team_balance: true,
            },
            players: vec![
                Player {
                    player: "OwnerUser:1001".to_string(),
                    permission: "Server Owner".to_string(),
                    callsign: Some("1A-01".to_string()),
                    team: "Police".to_string(),
                },
                Player {
                    player: "CivUser:2001".to_string(),
                    permission: "Normal".to_string(),
                    callsign: None,
                    team: "Civilian".to_string(),
                },
            ],
            join_logs: vec![
                JoinLog {
                    join: true,
                    timestamp: 1_704_067_200,
                    player: "CivUser:2001".to_string(),
                },
                JoinLog {
                    join: false,
                    timestamp: 1_704_067_500,
                    player: "Leaver:2002".to_string(),
                },
            ],
            queue: vec![3001, 3002],
            kill_logs: vec![KillLog {
                killed: "CivUser:2001".to_string(),
                timestamp: 1_704_067_300,
                killer: "OwnerUser:1001".to_string(),
            }],
            command_logs: vec![CommandLog {
                player: "OwnerUser:1001".to_string(),
                timestamp: 1_704_067_400,
                command: ":h Welcome".to_string(),
            }],
            mod_calls: vec![
                ModCall {
                    caller: "CivUser:2001".to_string(),
                    moderator: Some("OwnerUser:1001".to_string()),
                    timestamp: 1_704_067_350,
                },
                ModCall {
                    caller: "CivUser:2001".to_string(),
                    moderator: None,
                    timestamp: 1_704_067_600,
                },
            ],
            bans: HashMap::from([("4001".to_string(), "Griefer".to_string())]),
            vehicles: vec![Vehicle {
                texture: Some("Standard".to_string()),
                name: "Falcon Interceptor Utility 2019".to_string(),
                owner: "OwnerUser".to_string(),
            }],
        }
    }

    /// A server nobody is playing on.
    pub fn empty() -> Self {
        let mut world = Self::sample();
        world.server.current_players = 0;
        world.players.clear();
        world.vehicles.clear();
        world
    }
}

#[derive(Clone)]
pub struct AppState {
    server_key: Arc<str>,
    world: Arc<RwLock<World>>,
}

pub fn app(server_key: &str) -> Router {
    app_with_world(server_key, World::sample())
}

pub fn app_with_world(server_key: &str, world: World) -> Router {
    let state = AppState {
        server_key: Arc::from(server_key),
        world: Arc::new(RwLock::new(world)),
    };
    let api = Router::new()
        .route("/server", get(server))
        .route("/server/players", get(players))
        .route("/server/joinlogs", get(join_logs))
        .route("/server/queue", get(queue))
        .route("/server/killlogs", get(kill_logs))
        .route("/server/commandlogs", get(command_logs))
        .route("/server/modcalls", get(mod_calls))
        .route("/server/bans", get(bans))
        .route("/server/vehicles", get(vehicles))
        .route("/server/command", post(run_command))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_key))
        .with_state(state);
    Router::new()
        .nest("/v1", api)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, server_key: &str) -> Result<(), std::io::Error> {
    run_with_world(listener, server_key, World::sample()).await
}

pub async fn run_with_world(
    listener: TcpListener,
    server_key: &str,
    world: World,
) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock ER:LC API listening");
    }
    axum::serve(listener, app_with_world(server_key, world)).await
}

async fn require_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let provided = request
        .headers()
        .get(SERVER_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if provided != Some(&*state.server_key) {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(next.run(request).await)
}

async fn server(State(state): State<AppState>) -> Json<Server> {
    Json(state.world.read().await.server.clone())
}

async fn players(State(state): State<AppState>) -> Json<Vec<Player>> {
    Json(state.world.read().await.players.clone())
}

async fn join_logs(State(state): State<AppState>) -> Json<Vec<JoinLog>> {
    Json(state.world.read().await.join_logs.clone())
}

async fn queue(State(state): State<AppState>) -> Json<Vec<u64>> {
    Json(state.world.read().await.queue.clone())
}

async fn kill_logs(State(state): State<AppState>) -> Json<Vec<KillLog>> {
    Json(state.world.read().await.kill_logs.clone())
}

async fn command_logs(State(state): State<AppState>) -> Json<Vec<CommandLog>> {
    Json(state.world.read().await.command_logs.clone())
}

async fn mod_calls(State(state): State<AppState>) -> Json<Vec<ModCall>> {
    Json(state.world.read().await.mod_calls.clone())
}

async fn bans(State(state): State<AppState>) -> Json<HashMap<String, String>> {
    Json(state.world.read().await.bans.clone())
}

async fn vehicles(State(state): State<AppState>) -> Json<Vec<Vehicle>> {
    Json(state.world.read().await.vehicles.clone())
}

/// 400 for a blank command, 422 when nobody is online to run it.
async fn run_command(
    State(state): State<AppState>,
    Json(input): Json<RunCommand>,
) -> StatusCode {
    if input.command.trim().is_empty() {
        return StatusCode::BAD_REQUEST;
    }
    let mut world = state.world.write().await;
    if world.players.is_empty() {
        return StatusCode::UNPROCESSABLE_ENTITY;
    }
    world.command_logs.push(CommandLog {
        player: "Remote Server:1".to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        command: input.command,
    });
    StatusCode::OK
}
