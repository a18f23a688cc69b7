//! Client configuration loaded from the environment.
//!
//! Required:
//! - `ERLC_SERVER_KEY` -- the private server API key
//!
//! Optional:
//! - `ERLC_API_VERSION` -- API version, defaults to `1`
//! - `ERLC_BASE_URL` -- full base URL override (version segment included),
//!   used to point the client at a mock server

use std::env;
use std::fmt;

use thiserror::Error;

use crate::api::{ErlcApi, DEFAULT_API_VERSION};

pub const SERVER_KEY_VAR: &str = "ERLC_SERVER_KEY";
pub const API_VERSION_VAR: &str = "ERLC_API_VERSION";
pub const BASE_URL_VAR: &str = "ERLC_BASE_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ERLC_SERVER_KEY is not set")]
    MissingServerKey,

    #[error("ERLC_API_VERSION must be an integer between 1 and 255, got {0:?}")]
    InvalidVersion(String),
}

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_key: String,
    pub api_version: u8,
    pub base_url: Option<String>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(server_key: impl Into<String>) -> Self {
        Self {
            server_key: server_key.into(),
            api_version: DEFAULT_API_VERSION,
            base_url: None,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_key = lookup(SERVER_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingServerKey)?;

        let api_version = match lookup(API_VERSION_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or(ConfigError::InvalidVersion(raw))?,
            None => DEFAULT_API_VERSION,
        };

        let base_url = lookup(BASE_URL_VAR).filter(|url| !url.trim().is_empty());

        Ok(Self {
            server_key,
            api_version,
            base_url,
        })
    }

    /// The request builder this configuration describes.
    pub fn api(&self) -> ErlcApi {
        match &self.base_url {
            Some(url) => ErlcApi::with_base_url(url, self.server_key.clone()),
            None => ErlcApi::new(self.server_key.clone(), self.api_version),
        }
    }
}
