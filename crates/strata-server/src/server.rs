use tokio::net::TcpListener;

use strata_sync::Repository;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// The serving peer: a repository exposed over the HTTP protocol.
pub struct StrataServer {
    config: ServerConfig,
    repo: Repository,
}

impl StrataServer {
    pub fn new(repo: Repository, config: ServerConfig) -> Self {
        Self { config, repo }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for tests and embedding).
    pub fn router(&self) -> axum::Router {
        build_router(AppState::new(self.repo.clone(), self.config.clone()))
    }

    /// Bind and serve until the process is stopped.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("strata peer listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
