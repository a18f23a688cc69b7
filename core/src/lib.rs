//! Typed client for the ER:LC private server API.
//!
//! # Overview
//! `ErlcApi` builds `HttpRequest` values and classifies `HttpResponse`
//! values without touching the network. `ErlcClient` drives it over a
//! `Transport` (by default `reqwest`) and exposes one async method per API
//! resource.
//!
//! # Design
//! - Request building and response classification stay free of I/O, so the
//!   whole error taxonomy is testable with canned responses.
//! - `ErlcClient` is a cheap `Arc` handle; concurrent calls share only
//!   immutable configuration.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod server;
pub mod transport;
pub mod types;

pub use api::ErlcApi;
pub use client::ErlcClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use server::ServerInfo;
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    BanList, CommandRecord, CommandRequest, JoinEvent, KillEvent, ModCallRecord, OnlinePlayer,
    PlayerIdentity, SpawnedVehicle, Timestamped,
};
