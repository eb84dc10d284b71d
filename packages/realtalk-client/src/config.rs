//! Endpoint map and environment configuration.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;

use dotenvy::dotenv;

use crate::error::{ClientError, Result};
use crate::transport::DEFAULT_TIMEOUT;

/// Production service root.
pub const DEFAULT_BASE_URL: &str = "http://realtalkserverbeta.herokuapp.com/";

/// Every call the client can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Authenticate,
    Register,
    Unregister,
    ChangePassword,
    ChangeRegistrationId,
    CreateRoom,
    JoinRoom,
    LeaveRoom,
    PostMessage,
    ChatLog,
    RecentChat,
    NearbyRooms,
    UserRooms,
}

impl Operation {
    pub const ALL: [Operation; 13] = [
        Operation::Authenticate,
        Operation::Register,
        Operation::Unregister,
        Operation::ChangePassword,
        Operation::ChangeRegistrationId,
        Operation::CreateRoom,
        Operation::JoinRoom,
        Operation::LeaveRoom,
        Operation::PostMessage,
        Operation::ChatLog,
        Operation::RecentChat,
        Operation::NearbyRooms,
        Operation::UserRooms,
    ];

    /// Path of the servlet handling this operation, relative to the base URL.
    pub fn default_path(self) -> &'static str {
        match self {
            Operation::Authenticate => "authenticate",
            Operation::Register => "register",
            Operation::Unregister => "unregister",
            Operation::ChangePassword => "changePwd",
            Operation::ChangeRegistrationId => "changeRegId",
            Operation::CreateRoom => "addRoom",
            Operation::JoinRoom => "joinRoom",
            Operation::LeaveRoom => "leaveRoom",
            Operation::PostMessage => "post",
            Operation::ChatLog => "pullChat",
            Operation::RecentChat => "pullRecentChat",
            Operation::NearbyRooms => "nearbyRooms",
            Operation::UserRooms => "userRooms",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_path())
    }
}

/// Where each operation is sent.
///
/// Built once and handed to the client; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    overrides: HashMap<Operation, String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    /// Use the default paths under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            overrides: HashMap::new(),
        }
    }

    /// Send `operation` to `path` instead of its default path.
    ///
    /// An absolute `http(s)://` path replaces the base URL entirely.
    pub fn with_path(mut self, operation: Operation, path: impl Into<String>) -> Self {
        self.overrides.insert(operation, path.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `operation`.
    pub fn url_for(&self, operation: Operation) -> String {
        let path = self
            .overrides
            .get(&operation)
            .map(String::as_str)
            .unwrap_or_else(|| operation.default_path());

        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Client settings loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// - `REALTALK_BASE_URL`: service root (optional)
    /// - `REALTALK_TIMEOUT_SECS`: per-request timeout in seconds (optional, default 30)
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let base_url = lookup("REALTALK_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.base_url);

        let timeout = match lookup("REALTALK_TIMEOUT_SECS") {
            Some(secs) => secs
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| {
                    ClientError::Config(format!(
                        "REALTALK_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                        secs
                    ))
                })?,
            None => defaults.timeout,
        };

        Ok(Self { base_url, timeout })
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn default_urls_join_base_and_path() {
        let endpoints = Endpoints::default();

        assert_eq!(
            endpoints.url_for(Operation::ChangePassword),
            "http://realtalkserverbeta.herokuapp.com/changePwd"
        );
        assert_eq!(
            endpoints.url_for(Operation::RecentChat),
            "http://realtalkserverbeta.herokuapp.com/pullRecentChat"
        );
    }

    #[test]
    fn base_without_trailing_slash() {
        let endpoints = Endpoints::new("http://localhost:8080");

        assert_eq!(endpoints.url_for(Operation::Register), "http://localhost:8080/register");
    }

    #[test]
    fn overrides_replace_single_paths() {
        let endpoints = Endpoints::new("http://localhost:8080/api/")
            .with_path(Operation::NearbyRooms, "/v2/nearby")
            .with_path(Operation::UserRooms, "https://rooms.example.com/mine");

        assert_eq!(
            endpoints.url_for(Operation::NearbyRooms),
            "http://localhost:8080/api/v2/nearby"
        );
        assert_eq!(
            endpoints.url_for(Operation::UserRooms),
            "https://rooms.example.com/mine"
        );
        assert_eq!(
            endpoints.url_for(Operation::JoinRoom),
            "http://localhost:8080/api/joinRoom"
        );
    }

    #[test]
    fn every_operation_has_a_distinct_path() {
        let mut paths: Vec<_> = Operation::ALL.iter().map(|op| op.default_path()).collect();
        paths.sort();
        paths.dedup();

        assert_eq!(paths.len(), Operation::ALL.len());
    }

    #[test]
    fn config_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn config_reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("REALTALK_BASE_URL", "http://127.0.0.1:9000"),
            ("REALTALK_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn config_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("REALTALK_TIMEOUT_SECS", "soon")]))
            .unwrap_err();

        assert!(matches!(err, ClientError::Config(_)));
    }
}
