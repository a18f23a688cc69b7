//! Server metadata and the convenience calls scoped to it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::client::ErlcClient;
use crate::error::ApiError;
use crate::types::{
    BanList, CommandRecord, JoinEvent, KillEvent, ModCallRecord, OnlinePlayer, SpawnedVehicle,
};

/// Information about the server the key belongs to.
///
/// Values returned by `ErlcClient::fetch_server` keep a handle to that
/// client, so the `fetch_*` methods here forward to it. A `ServerInfo`
/// deserialized any other way is detached and those calls return
/// `ApiError::Detached`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerInfo {
    pub name: String,
    pub owner_id: u64,
    #[serde(default)]
    pub co_owner_ids: BTreeSet<u64>,
    pub current_players: u8,
    /// One slot is reserved for the owner.
    pub max_players: u8,
    /// Can start the server; not meant to be handed to players.
    pub join_key: String,
    pub acc_verified_req: String,
    pub team_balance: bool,
    #[serde(skip)]
    client: Option<ErlcClient>,
}

impl PartialEq for ServerInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.owner_id == other.owner_id
            && self.co_owner_ids == other.co_owner_ids
            && self.current_players == other.current_players
            && self.max_players == other.max_players
            && self.join_key == other.join_key
            && self.acc_verified_req == other.acc_verified_req
            && self.team_balance == other.team_balance
    }
}

impl Eq for ServerInfo {}

impl ServerInfo {
    pub(crate) fn attach(&mut self, client: ErlcClient) {
        self.client = Some(client);
    }

    /// The client that fetched this value, if any.
    pub fn client(&self) -> Option<&ErlcClient> {
        self.client.as_ref()
    }

    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owner_id == user_id || self.co_owner_ids.contains(&user_id)
    }

    pub fn is_full(&self) -> bool {
        self.current_players >= self.max_players
    }

    fn require_client(&self) -> Result<&ErlcClient, ApiError> {
        self.client.as_ref().ok_or(ApiError::Detached)
    }

    pub async fn fetch_players(&self) -> Result<Vec<OnlinePlayer>, ApiError> {
        self.require_client()?.fetch_players().await
    }

    pub async fn fetch_join_logs(&self) -> Result<Vec<JoinEvent>, ApiError> {
        self.require_client()?.fetch_join_logs().await
    }

    pub async fn fetch_queue(&self) -> Result<Vec<u64>, ApiError> {
        self.require_client()?.fetch_queue().await
    }

    pub async fn fetch_kill_logs(&self) -> Result<Vec<KillEvent>, ApiError> {
        self.require_client()?.fetch_kill_logs().await
    }

    pub async fn fetch_command_logs(&self) -> Result<Vec<CommandRecord>, ApiError> {
        self.require_client()?.fetch_command_logs().await
    }

    pub async fn fetch_mod_call_logs(&self) -> Result<Vec<ModCallRecord>, ApiError> {
        self.require_client()?.fetch_mod_call_logs().await
    }

    pub async fn fetch_bans(&self) -> Result<BanList, ApiError> {
        self.require_client()?.fetch_bans().await
    }

    pub async fn fetch_spawned_vehicles(&self) -> Result<Vec<SpawnedVehicle>, ApiError> {
        self.require_client()?.fetch_spawned_vehicles().await
    }

    pub async fn execute_command(&self, command: &str) -> Result<(), ApiError> {
        self.require_client()?.execute_command(command).await
    }
}
