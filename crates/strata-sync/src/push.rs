//! The push driver: send new history to a peer and move its ref with a
//! compare-and-swap.

use std::collections::HashSet;

use strata_graph::is_ancestor;
use strata_pack::{write_pack, CancelToken, PackOptions};
use strata_types::{ObjectId, RevObject};
use tracing::{debug, info};

use crate::error::{SyncError, SyncResult};
use crate::negotiation::common_frontier;
use crate::refspec::RefSpec;
use crate::remote::RemoteRepo;
use crate::repository::Repository;

/// Counters from a completed push.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PushStats {
    pub objects_sent: usize,
    pub commits_sent: usize,
    pub bytes_sent: u64,
}

/// Push one refspec to a peer.
///
/// The fast-forward precondition (unless the spec carries the force flag):
/// the remote tip must equal the local tip (`NothingToPush`), be an
/// ancestor of it (fast-forward), or be absent (new branch). Anything else
/// is `RemoteHasChanges`. On success the peer's ref moves atomically from
/// its old value to the local tip; a concurrent move on the peer surfaces
/// as `RemoteHasChanges` from the final CAS.
pub async fn push_ref(
    local: &Repository,
    remote: &dyn RemoteRepo,
    spec: &RefSpec,
    cancel: &CancelToken,
) -> SyncResult<PushStats> {
    remote.open().await?;
    let result = push_inner(local, remote, spec, cancel).await;
    let _ = remote.close().await;
    result
}

async fn push_inner(
    local: &Repository,
    remote: &dyn RemoteRepo,
    spec: &RefSpec,
    cancel: &CancelToken,
) -> SyncResult<PushStats> {
    if spec.is_delete() {
        debug!(refspec = %spec.dst, "deleting remote ref");
        remote.update_ref(&spec.dst, None).await?;
        return Ok(PushStats::default());
    }

    let local_tip = local
        .resolve_ref(&spec.src)?
        .ok_or_else(|| SyncError::MissingRef(spec.src.clone()))?;
    let remote_tip = remote
        .ref_parse(&spec.dst)
        .await?
        .map(|doc| doc.object_id);

    if !spec.force {
        check_fast_forward(local, local_tip, remote_tip)?;
    } else if remote_tip == Some(local_tip) {
        // Even a forced push of an identical tip moves nothing.
        return Err(SyncError::NothingToPush);
    }

    // The remote tip alone cannot describe the common frontier once
    // branches diverge; walk the peer's history until commits we hold.
    let mut roots: HashSet<ObjectId> = match remote_tip {
        Some(tip) => common_frontier(local, remote, tip).await?,
        None => HashSet::new(),
    };

    remote.begin_push().await?;

    let mut have: Vec<ObjectId> = roots.iter().copied().collect();
    have.sort();
    let mut pack = Vec::new();
    let mut sent = HashSet::new();
    let stats = write_pack(
        local.objects.as_ref(),
        &mut pack,
        &[local_tip],
        &have,
        &mut sent,
        &PackOptions::default(),
        cancel,
        |id, object| {
            // Keep the frontier current as commits flow, so a resumed or
            // chunked upload negotiates from the right place.
            if let RevObject::Commit(commit) = object {
                for parent in &commit.parents {
                    roots.remove(parent);
                }
                roots.insert(*id);
            }
        },
    )?;
    if cancel.is_cancelled() {
        return Err(SyncError::Cancelled);
    }

    if stats.objects_written > 0 {
        remote.send_objects(pack).await?;
    }
    remote
        .end_push(&spec.dst, local_tip, remote_tip.unwrap_or(ObjectId::null()))
        .await?;

    info!(
        refspec = %spec.dst,
        objects = stats.objects_written,
        commits = stats.commits_written,
        "push complete"
    );
    Ok(PushStats {
        objects_sent: stats.objects_written,
        commits_sent: stats.commits_written,
        bytes_sent: stats.bytes_written,
    })
}

fn check_fast_forward(
    local: &Repository,
    local_tip: ObjectId,
    remote_tip: Option<ObjectId>,
) -> SyncResult<()> {
    let Some(remote_tip) = remote_tip else {
        // New branch on the peer.
        return Ok(());
    };
    if remote_tip == local_tip {
        return Err(SyncError::NothingToPush);
    }
    if !local.objects.exists(&remote_tip)? {
        // The peer has history we have never seen.
        return Err(SyncError::RemoteHasChanges);
    }
    if is_ancestor(local.objects.as_ref(), &remote_tip, &local_tip)? {
        return Ok(());
    }
    if is_ancestor(local.objects.as_ref(), &local_tip, &remote_tip)? {
        // The peer is strictly ahead of us.
        return Err(SyncError::NothingToPush);
    }
    Err(SyncError::RemoteHasChanges)
}
