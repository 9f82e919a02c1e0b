//! The remote repository interface the sync drivers work against.

use async_trait::async_trait;
use strata_graph::HistorySlice;
use strata_protocol::{ManifestEntry, RefDocument};
use strata_types::ObjectId;

use crate::error::SyncResult;

/// A peer repository reachable through the sync protocol.
///
/// Implementations are scoped resources: `open` before use, `close` on all
/// exit paths. The HTTP implementation talks to a serving peer; the local
/// implementation wraps an in-process repository for tests and same-host
/// sync.
#[async_trait]
pub trait RemoteRepo: Send + Sync {
    /// Open the session. Idempotent.
    async fn open(&self) -> SyncResult<()>;

    /// Close the session. Idempotent.
    async fn close(&self) -> SyncResult<()>;

    /// The peer's ref listing, HEAD first.
    async fn manifest(&self) -> SyncResult<Vec<ManifestEntry>>;

    /// Resolve one ref on the peer. `Ok(None)` if it does not exist.
    async fn ref_parse(&self, name: &str) -> SyncResult<Option<RefDocument>>;

    /// Request a pack stream of objects reachable from `want` but not
    /// from `have`. The peer may bound the round; the driver re-requests
    /// until its `want` set drains.
    async fn batch_objects(&self, want: &[ObjectId], have: &[ObjectId]) -> SyncResult<Vec<u8>>;

    /// Upload a pack stream for the peer to ingest.
    async fn send_objects(&self, pack: Vec<u8>) -> SyncResult<()>;

    /// Ask for a bounded commit adjacency slice from `want` toward `have`.
    async fn history_probe(&self, want: &[ObjectId], have: &[ObjectId])
        -> SyncResult<HistorySlice>;

    /// Open a push session on the peer.
    async fn begin_push(&self) -> SyncResult<()>;

    /// Close the push session, atomically moving `refspec` from
    /// `expected_old` to `new_id`. A concurrent move on the peer fails
    /// with `RemoteHasChanges`.
    async fn end_push(
        &self,
        refspec: &str,
        new_id: ObjectId,
        expected_old: ObjectId,
    ) -> SyncResult<()>;

    /// Point a ref at a value directly, or delete it.
    async fn update_ref(&self, name: &str, value: Option<ObjectId>) -> SyncResult<()>;
}
