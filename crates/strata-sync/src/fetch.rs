//! The fetch driver: pull new history from a peer into the local
//! database and advance the remote-tracking ref.

use std::collections::HashSet;

use strata_pack::{ingest, CancelToken};
use strata_refs::{branch_ref, remote_ref, Ref};
use strata_types::{ObjectId, RevObject};
use tracing::{debug, info};

use crate::error::{SyncError, SyncResult};
use crate::negotiation::common_frontier;
use crate::remote::RemoteRepo;
use crate::repository::Repository;

/// Outcome of one fetch.
#[derive(Clone, Debug, Default)]
pub struct FetchResult {
    /// Negotiation rounds driven (0 when already up to date).
    pub rounds: usize,
    pub objects_inserted: usize,
    pub objects_existing: usize,
    /// The remote tip the tracking ref now points at.
    pub tip: Option<ObjectId>,
    /// The remote-tracking ref that was updated.
    pub updated_ref: Option<String>,
}

/// Fetch one branch from a peer.
///
/// Negotiation re-iterates because the peer may bound each pack round:
/// every ingested commit moves from `want` to `have`, so an interrupted
/// transfer resumes exactly where it stopped.
pub async fn fetch_ref(
    local: &Repository,
    remote: &dyn RemoteRepo,
    remote_name: &str,
    branch: &str,
    cancel: &CancelToken,
) -> SyncResult<FetchResult> {
    remote.open().await?;
    let result = fetch_inner(local, remote, remote_name, branch, cancel).await;
    let _ = remote.close().await;
    result
}

async fn fetch_inner(
    local: &Repository,
    remote: &dyn RemoteRepo,
    remote_name: &str,
    branch: &str,
    cancel: &CancelToken,
) -> SyncResult<FetchResult> {
    let source_ref = branch_ref(branch);
    let tracking_ref = remote_ref(remote_name, branch);

    let Some(doc) = remote.ref_parse(&source_ref).await? else {
        return Err(SyncError::MissingRef(source_ref));
    };
    let tip = doc.object_id;

    let mut result = FetchResult {
        tip: Some(tip),
        ..FetchResult::default()
    };

    if local.objects.exists(&tip)? {
        debug!(tip = %tip.short_hex(), "already have remote tip");
        local.refs.put(Ref::direct(&tracking_ref, tip))?;
        result.updated_ref = Some(tracking_ref);
        return Ok(result);
    }

    let mut want: Vec<ObjectId> = vec![tip];
    let mut have: HashSet<ObjectId> = local.local_tips()?.into_iter().collect();
    // An interrupted earlier transfer may have landed commits no ref points
    // at yet; probing the peer's history finds them so they are not re-sent.
    have.extend(common_frontier(local, remote, tip).await?);

    while !want.is_empty() {
        if cancel.is_cancelled() {
            return Err(SyncError::Cancelled);
        }
        let mut have_list: Vec<ObjectId> = have.iter().copied().collect();
        have_list.sort();
        let pack = remote.batch_objects(&want, &have_list).await?;

        let stats = ingest(
            &mut pack.as_slice(),
            local.objects.as_ref(),
            cancel,
            |id, object| match object {
                RevObject::Commit(commit) => {
                    want.retain(|w| w != id);
                    for parent in &commit.parents {
                        have.remove(parent);
                    }
                    have.insert(*id);
                }
                RevObject::Tag(tag) => {
                    want.retain(|w| w != id);
                    have.remove(&tag.commit);
                    have.insert(*id);
                }
                _ => {}
            },
        )?;
        result.rounds += 1;
        result.objects_inserted += stats.inserted;
        result.objects_existing += stats.existing;
        debug!(
            round = result.rounds,
            inserted = stats.inserted,
            remaining = want.len(),
            "fetch round complete"
        );
        if stats.total() == 0 && !want.is_empty() {
            return Err(SyncError::NoProgress);
        }
    }

    local.refs.put(Ref::direct(&tracking_ref, tip))?;
    result.updated_ref = Some(tracking_ref);
    info!(
        branch,
        remote = remote_name,
        inserted = result.objects_inserted,
        rounds = result.rounds,
        "fetch complete"
    );
    Ok(result)
}
