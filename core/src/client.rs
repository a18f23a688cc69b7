//! Async client for the ER:LC API.
//!
//! # Design
//! `ErlcClient` pairs an `ErlcApi` (request building and response
//! classification) with a `Transport` (the actual round-trip). Both sit
//! behind one `Arc`, so clones are cheap handles to the same immutable
//! configuration and can be used from many tasks at once without locking.
//! Every operation is exactly one request; nothing is retried or cached.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::api::ErlcApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::server::ServerInfo;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{
    BanList, CommandRecord, JoinEvent, KillEvent, ModCallRecord, OnlinePlayer, SpawnedVehicle,
};

#[derive(Clone)]
pub struct ErlcClient {
    inner: Arc<Inner>,
}

struct Inner {
    api: ErlcApi,
    transport: Box<dyn Transport>,
}

impl fmt::Debug for ErlcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErlcClient")
            .field("api", &self.inner.api)
            .finish_non_exhaustive()
    }
}

impl ErlcClient {
    /// Creates a client for the public API. Performs no I/O.
    pub fn new(server_key: impl Into<String>, version: u8) -> Self {
        Self::with_transport(ErlcApi::new(server_key, version), ReqwestTransport::new())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(config.api(), ReqwestTransport::new())
    }

    pub fn with_transport<T>(api: ErlcApi, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                api,
                transport: Box::new(transport),
            }),
        }
    }

    pub fn api(&self) -> &ErlcApi {
        &self.inner.api
    }

    /// Returns `true` if both handles share the same configuration.
    pub fn same_client(&self, other: &ErlcClient) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.inner.transport.send(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    /// Fetches the server this key belongs to and binds the result to this
    /// client so its convenience methods reuse the same configuration.
    pub async fn fetch_server(&self) -> Result<ServerInfo, ApiError> {
        let response = self.execute(self.api().build_fetch_server()).await?;
        let mut server = self.api().parse_fetch_server(response)?;
        server.attach(self.clone());
        Ok(server)
    }

    pub async fn fetch_players(&self) -> Result<Vec<OnlinePlayer>, ApiError> {
        let response = self.execute(self.api().build_fetch_players()).await?;
        self.api().parse_fetch_players(response)
    }

    pub async fn fetch_join_logs(&self) -> Result<Vec<JoinEvent>, ApiError> {
        let response = self.execute(self.api().build_fetch_join_logs()).await?;
        self.api().parse_fetch_join_logs(response)
    }

    /// Platform ids of players waiting in the join queue.
    pub async fn fetch_queue(&self) -> Result<Vec<u64>, ApiError> {
        let response = self.execute(self.api().build_fetch_queue()).await?;
        self.api().parse_fetch_queue(response)
    }

    pub async fn fetch_kill_logs(&self) -> Result<Vec<KillEvent>, ApiError> {
        let response = self.execute(self.api().build_fetch_kill_logs()).await?;
        self.api().parse_fetch_kill_logs(response)
    }

    pub async fn fetch_command_logs(&self) -> Result<Vec<CommandRecord>, ApiError> {
        let response = self.execute(self.api().build_fetch_command_logs()).await?;
        self.api().parse_fetch_command_logs(response)
    }

    pub async fn fetch_mod_call_logs(&self) -> Result<Vec<ModCallRecord>, ApiError> {
        let response = self.execute(self.api().build_fetch_mod_call_logs()).await?;
        self.api().parse_fetch_mod_call_logs(response)
    }

    pub async fn fetch_bans(&self) -> Result<BanList, ApiError> {
        let response = self.execute(self.api().build_fetch_bans()).await?;
        self.api().parse_fetch_bans(response)
    }

    pub async fn fetch_spawned_vehicles(&self) -> Result<Vec<SpawnedVehicle>, ApiError> {
        let response = self.execute(self.api().build_fetch_spawned_vehicles()).await?;
        self.api().parse_fetch_spawned_vehicles(response)
    }

    /// Runs an in-game command, e.g. `:h Hello`.
    pub async fn execute_command(&self, command: &str) -> Result<(), ApiError> {
        let request = self.api().build_execute_command(command)?;
        let response = self.execute(request).await?;
        self.api().parse_execute_command(response)
    }
}
