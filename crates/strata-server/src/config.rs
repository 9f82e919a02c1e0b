use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Serving-peer configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener on.
    pub bind_addr: SocketAddr,
    /// Commits returned per history probe call.
    pub history_send_limit: usize,
    /// Commits per pack round served from `/repo/batchobjects`; `None`
    /// streams a whole history in one round.
    pub pack_commit_limit: Option<usize>,
    /// Largest accepted upload body, in bytes.
    pub max_pack_size: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8182".parse().expect("valid literal"),
            history_send_limit: 1000,
            pack_commit_limit: Some(10_000),
            max_pack_size: 512 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load from a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
