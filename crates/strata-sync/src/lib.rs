//! Synchronization between Strata repositories.
//!
//! Push and fetch exchange commit history as packed-object streams over
//! the peer protocol. The drivers compute minimal `want`/`have` sets —
//! probing the peer's commit graph where the ref tips alone cannot
//! describe the common frontier — and move refs with compare-and-swap so
//! concurrent pushes never clobber each other.
//!
//! # Entry points
//!
//! - [`fetch_ref`] — pull a branch from a peer into the local database
//! - [`push_ref`] — send a branch (or delete one) on a peer
//! - [`HttpRemote`] / [`LocalRemote`] — the two [`RemoteRepo`] transports

pub mod backoff;
pub mod error;
pub mod fetch;
pub mod http;
pub mod local;
pub mod negotiation;
pub mod push;
pub mod refspec;
pub mod remote;
pub mod repository;

pub use backoff::{with_retries, RetryPolicy};
pub use error::{SyncError, SyncResult};
pub use fetch::{fetch_ref, FetchResult};
pub use http::HttpRemote;
pub use local::{LocalRemote, LocalRemoteOptions};
pub use negotiation::common_frontier;
pub use push::{push_ref, PushStats};
pub use refspec::RefSpec;
pub use remote::RemoteRepo;
pub use repository::Repository;
