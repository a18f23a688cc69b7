//! Stateless HTTP request builder and response parser for the ER:LC API.
//!
//! # Design
//! `ErlcApi` holds only the base URL and the server key. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. Every parse method runs
//! the same classification: 403 first, then any other non-2xx status, then
//! JSON decoding of the body.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::server::ServerInfo;
use crate::types::{
    BanList, CommandRecord, CommandRequest, JoinEvent, KillEvent, ModCallRecord, OnlinePlayer,
    SpawnedVehicle,
};

pub const DEFAULT_HOST: &str = "https://api.policeroleplay.community";
pub const DEFAULT_API_VERSION: u8 = 1;
pub const SERVER_KEY_HEADER: &str = "server-key";

/// Synchronous, stateless request builder for the ER:LC API.
#[derive(Clone)]
pub struct ErlcApi {
    base_url: String,
    server_key: String,
}

impl fmt::Debug for ErlcApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErlcApi")
            .field("base_url", &self.base_url)
            .field("server_key", &"<redacted>")
            .finish()
    }
}

impl ErlcApi {
    /// Targets `https://api.policeroleplay.community/v{version}`.
    pub fn new(server_key: impl Into<String>, version: u8) -> Self {
        Self {
            base_url: format!("{DEFAULT_HOST}/v{version}"),
            server_key: server_key.into(),
        }
    }

    /// Targets an arbitrary base URL, version segment included.
    pub fn with_base_url(base_url: &str, server_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            server_key: server_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}/{path}", self.base_url),
            headers: vec![(SERVER_KEY_HEADER.to_string(), self.server_key.clone())],
            body: None,
        }
    }

    pub fn build_fetch_server(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "server")
    }

    pub fn build_fetch_players(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "server/players")
    }

    pub fn build_fetch_join_logs(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "server/joinlogs")
    }

    pub fn build_fetch_queue(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "server/queue")
    }

    pub fn build_fetch_kill_logs(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "server/killlogs")
    }

    pub fn build_fetch_command_logs(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "server/commandlogs")
    }

    pub fn build_fetch_mod_call_logs(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "server/modcalls")
    }

    pub fn build_fetch_bans(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "server/bans")
    }

    pub fn build_fetch_spawned_vehicles(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "server/vehicles")
    }

    pub fn build_execute_command(&self, command: &str) -> Result<HttpRequest, ApiError> {
        let payload = CommandRequest {
            command: command.to_string(),
        };
        let body = serde_json::to_string(&payload)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut request = self.request(HttpMethod::Post, "server/command");
        request
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(request)
    }

    /// The returned value is detached; `ErlcClient::fetch_server` attaches it.
    pub fn parse_fetch_server(&self, response: HttpResponse) -> Result<ServerInfo, ApiError> {
        parse_json(response)
    }

    pub fn parse_fetch_players(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<OnlinePlayer>, ApiError> {
        parse_json(response)
    }

    pub fn parse_fetch_join_logs(&self, response: HttpResponse) -> Result<Vec<JoinEvent>, ApiError> {
        parse_json(response)
    }

    pub fn parse_fetch_queue(&self, response: HttpResponse) -> Result<Vec<u64>, ApiError> {
        parse_json(response)
    }

    pub fn parse_fetch_kill_logs(&self, response: HttpResponse) -> Result<Vec<KillEvent>, ApiError> {
        parse_json(response)
    }

    pub fn parse_fetch_command_logs(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<CommandRecord>, ApiError> {
        parse_json(response)
    }

    pub fn parse_fetch_mod_call_logs(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<ModCallRecord>, ApiError> {
        parse_json(response)
    }

    pub fn parse_fetch_bans(&self, response: HttpResponse) -> Result<BanList, ApiError> {
        parse_json(response)
    }

    pub fn parse_fetch_spawned_vehicles(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<SpawnedVehicle>, ApiError> {
        parse_json(response)
    }

    /// Success is decided by status code alone; the body is ignored.
    pub fn parse_execute_command(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 403 {
        return Err(ApiError::Authentication);
    }
    if !response.is_success() {
        return Err(ApiError::Request {
            status: response.status,
            body: response.body.clone(),
        });
    }
    Ok(())
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
}
