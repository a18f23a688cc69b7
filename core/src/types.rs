//! Entity DTOs for the ER:LC API.
//!
//! # Design
//! Field names mirror the upstream's PascalCase JSON keys. Player identities
//! travel as one combined `"name:id"` string and are split lazily by
//! `PlayerIdentity`'s accessors, so a malformed identity never fails a
//! whole response. Timestamps are stored as the raw epoch seconds the API
//! sends and converted on read through `Timestamped`.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Banned players keyed by platform id, mapping to their display name.
pub type BanList = HashMap<String, String>;

/// A player as the API names them: `"<name>:<id>"`.
///
/// No validation happens on construction. `name` and `id` return `None`
/// when the value has no colon or either half is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerIdentity(String);

impl PlayerIdentity {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_parts(name: &str, id: u64) -> Self {
        Self(format!("{name}:{id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Display name, the part before the first colon.
    pub fn name(&self) -> Option<&str> {
        self.split().map(|(name, _)| name)
    }

    /// Platform user id as text, the part after the first colon.
    pub fn id(&self) -> Option<&str> {
        self.split().map(|(_, id)| id)
    }

    /// Platform user id, if it is numeric.
    pub fn user_id(&self) -> Option<u64> {
        self.id()?.parse().ok()
    }

    fn split(&self) -> Option<(&str, &str)> {
        self.0
            .split_once(':')
            .filter(|(name, id)| !name.is_empty() && !id.is_empty())
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Log entries that carry a Unix-epoch-seconds timestamp.
pub trait Timestamped {
    /// Seconds since the Unix epoch, as sent by the API.
    fn timestamp(&self) -> i64;

    /// `timestamp` as a UTC point in time. `None` if out of chrono's range.
    fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp(), 0)
    }
}

/// A player currently in the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OnlinePlayer {
    pub player: PlayerIdentity,
    /// Free text, e.g. `Normal`, `Server Administrator`, `Server Owner`.
    pub permission: String,
    /// Only present while on a non-civilian team.
    #[serde(default)]
    pub callsign: Option<String>,
    pub team: String,
}

/// A player joining or leaving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JoinEvent {
    /// `true` on join, `false` on leave.
    pub join: bool,
    pub timestamp: i64,
    pub player: PlayerIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KillEvent {
    pub killed: PlayerIdentity,
    pub timestamp: i64,
    pub killer: PlayerIdentity,
}

/// A command run in-game, e.g. `:h Hello guys!`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommandRecord {
    pub player: PlayerIdentity,
    pub timestamp: i64,
    /// Raw text including the prefix character and arguments.
    pub command: String,
}

impl CommandRecord {
    /// The command word without its `:` prefix (`h` for `:h Hello`).
    pub fn command_name(&self) -> Option<&str> {
        let text = self.command.trim_start();
        let text = text.strip_prefix(':').unwrap_or(text);
        text.split_whitespace().next()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModCallRecord {
    pub caller: PlayerIdentity,
    /// `None` while nobody has answered the call.
    #[serde(default)]
    pub moderator: Option<PlayerIdentity>,
    pub timestamp: i64,
}

impl ModCallRecord {
    pub fn is_answered(&self) -> bool {
        self.moderator.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpawnedVehicle {
    #[serde(default)]
    pub texture: Option<String>,
    /// Model name, e.g. `Falcon Interceptor Utility 2019`.
    pub name: String,
    /// Owner exactly as the API reports it.
    pub owner: String,
}

/// Request payload for `POST server/command`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

impl Timestamped for JoinEvent {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl Timestamped for KillEvent {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl Timestamped for CommandRecord {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl Timestamped for ModCallRecord {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}
