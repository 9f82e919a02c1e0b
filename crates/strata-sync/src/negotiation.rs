//! Common-frontier discovery.
//!
//! Both drivers need to know where the peer's history and the local
//! history meet. The peer's tip alone is not enough once branches diverge
//! or a transfer was interrupted, so the driver walks the peer's commit
//! adjacency in bounded slices until it reaches commits the local database
//! already holds.

use std::collections::HashSet;

use strata_types::ObjectId;
use tracing::debug;

use crate::error::{SyncError, SyncResult};
use crate::remote::RemoteRepo;
use crate::repository::Repository;

/// Walk the peer's history from `tip` toward the local refs, returning the
/// frontier of commits present on both sides.
///
/// Each probe returns at most a server-bounded slice, so deep histories
/// take several round-trips (re-probing from the slice's unexplored
/// parents). An empty result means the histories share nothing. A peer
/// that does not know a commit we probed from fails with
/// `RemoteUnknownCommit`.
pub async fn common_frontier(
    local: &Repository,
    remote: &dyn RemoteRepo,
    tip: ObjectId,
) -> SyncResult<HashSet<ObjectId>> {
    // The trivial frontier: we already hold the peer's tip.
    if local.objects.exists(&tip)? {
        return Ok(HashSet::from([tip]));
    }

    let local_tips = local.local_tips()?;
    let mut frontier = vec![tip];
    let mut seen: HashSet<ObjectId> = HashSet::new();
    let mut roots = HashSet::new();

    while !frontier.is_empty() {
        let slice = remote.history_probe(&frontier, &local_tips).await?;
        for id in &frontier {
            if slice.missing.contains(id) {
                return Err(SyncError::RemoteUnknownCommit(*id));
            }
        }
        if slice.history.is_empty() {
            break;
        }
        let entry_ids: HashSet<ObjectId> = slice.history.iter().map(|e| e.id).collect();
        let mut next = Vec::new();
        for entry in &slice.history {
            seen.insert(entry.id);
            if local.objects.exists(&entry.id)? {
                // Common commit: part of the frontier, nothing deeper needed.
                roots.insert(entry.id);
                continue;
            }
            for parent in &entry.parents {
                if !seen.contains(parent) && !entry_ids.contains(parent) && !next.contains(parent)
                {
                    next.push(*parent);
                }
            }
        }
        frontier = next;
    }
    debug!(roots = roots.len(), probed = seen.len(), "common frontier");
    Ok(roots)
}
