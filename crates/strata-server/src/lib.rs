//! The Strata serving peer.
//!
//! Exposes a repository over HTTP for other peers to fetch from and push
//! to: the ref manifest, pack download and upload, the history probe, the
//! push session bracket, and single-ref resolution and updates.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::StrataServer;
pub use state::AppState;
