use std::sync::Arc;

use strata_sync::{LocalRemote, LocalRemoteOptions, Repository};

use crate::config::ServerConfig;

/// Shared state behind every handler: the served repository (wrapped in
/// the in-process peer) and the server limits.
#[derive(Clone)]
pub struct AppState {
    pub peer: Arc<LocalRemote>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(repo: Repository, config: ServerConfig) -> Self {
        let options = LocalRemoteOptions {
            history_send_limit: config.history_send_limit,
            pack_commit_limit: config.pack_commit_limit,
        };
        Self {
            peer: Arc::new(LocalRemote::with_options(repo, options)),
            config: Arc::new(config),
        }
    }
}
