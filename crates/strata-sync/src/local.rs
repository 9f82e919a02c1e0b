//! An in-process peer: the serving-side semantics of the protocol applied
//! directly to a [`Repository`].
//!
//! Used for same-host sync and as the test double for the HTTP remote —
//! both implement [`RemoteRepo`] and the drivers cannot tell them apart.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use strata_graph::HistorySlice;
use strata_pack::{ingest, write_pack, CancelToken, PackOptions};
use strata_protocol::{ManifestEntry, RefDocument};
use strata_refs::{Ref, RefError, HEAD};
use strata_types::ObjectId;
use tracing::debug;

use crate::error::{SyncError, SyncResult};
use crate::remote::RemoteRepo;
use crate::repository::Repository;

/// Serving-side limits, mirroring a peer's server configuration.
#[derive(Clone, Copy, Debug)]
pub struct LocalRemoteOptions {
    /// Commits per history probe response.
    pub history_send_limit: usize,
    /// Commits per pack round; `None` streams everything at once.
    pub pack_commit_limit: Option<usize>,
}

impl Default for LocalRemoteOptions {
    fn default() -> Self {
        Self {
            history_send_limit: 1000,
            pack_commit_limit: Some(10_000),
        }
    }
}

/// A [`RemoteRepo`] over an in-process [`Repository`].
pub struct LocalRemote {
    repo: Repository,
    options: LocalRemoteOptions,
    push_open: AtomicBool,
}

impl LocalRemote {
    pub fn new(repo: Repository) -> Self {
        Self::with_options(repo, LocalRemoteOptions::default())
    }

    pub fn with_options(repo: Repository, options: LocalRemoteOptions) -> Self {
        Self {
            repo,
            options,
            push_open: AtomicBool::new(false),
        }
    }

    /// The wrapped repository (the "peer side" in tests).
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    fn entry_for(&self, name: &str, reference: &Ref) -> SyncResult<Option<ManifestEntry>> {
        match reference {
            Ref::Direct { target, .. } => Ok(Some(ManifestEntry::direct(name, *target))),
            Ref::Symbolic { target, .. } => match self.repo.refs.resolve(name)? {
                Some(resolved) => Ok(resolved
                    .target_id()
                    .map(|id| ManifestEntry::symbolic(name, target.clone(), id))),
                None => Ok(None),
            },
        }
    }
}

#[async_trait]
impl RemoteRepo for LocalRemote {
    async fn open(&self) -> SyncResult<()> {
        Ok(())
    }

    async fn close(&self) -> SyncResult<()> {
        Ok(())
    }

    async fn manifest(&self) -> SyncResult<Vec<ManifestEntry>> {
        let refs = self.repo.refs.list()?;
        let mut entries = Vec::new();
        if let Some(head) = refs.get(HEAD) {
            if let Some(entry) = self.entry_for(HEAD, head)? {
                entries.push(entry);
            }
        }
        for (name, reference) in &refs {
            if name == HEAD {
                continue;
            }
            if let Some(entry) = self.entry_for(name, reference)? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    async fn ref_parse(&self, name: &str) -> SyncResult<Option<RefDocument>> {
        let Some(reference) = self.repo.refs.get(name)? else {
            return Ok(None);
        };
        match reference {
            Ref::Direct { target, .. } => Ok(Some(RefDocument {
                name: name.to_string(),
                object_id: target,
                target: None,
            })),
            Ref::Symbolic { target, .. } => match self.repo.refs.resolve(name)? {
                Some(resolved) => Ok(resolved.target_id().map(|id| RefDocument {
                    name: name.to_string(),
                    object_id: id,
                    target: Some(target),
                })),
                None => Ok(None),
            },
        }
    }

    async fn batch_objects(&self, want: &[ObjectId], have: &[ObjectId]) -> SyncResult<Vec<u8>> {
        let mut out = Vec::new();
        let mut sent = HashSet::new();
        let stats = write_pack(
            self.repo.objects.as_ref(),
            &mut out,
            want,
            have,
            &mut sent,
            &PackOptions {
                max_commits: self.options.pack_commit_limit,
            },
            &CancelToken::new(),
            |_, _| {},
        )?;
        debug!(objects = stats.objects_written, "served pack round");
        Ok(out)
    }

    async fn send_objects(&self, pack: Vec<u8>) -> SyncResult<()> {
        ingest(
            &mut pack.as_slice(),
            self.repo.objects.as_ref(),
            &CancelToken::new(),
            |_, _| {},
        )?;
        Ok(())
    }

    async fn history_probe(
        &self,
        want: &[ObjectId],
        have: &[ObjectId],
    ) -> SyncResult<HistorySlice> {
        Ok(strata_graph::history_slice(
            self.repo.objects.as_ref(),
            want,
            have,
            self.options.history_send_limit,
        )?)
    }

    async fn begin_push(&self) -> SyncResult<()> {
        self.push_open.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn end_push(
        &self,
        refspec: &str,
        new_id: ObjectId,
        expected_old: ObjectId,
    ) -> SyncResult<()> {
        self.push_open.store(false, Ordering::SeqCst);
        let expected = if expected_old.is_null() {
            None
        } else {
            Some(expected_old)
        };
        match self.repo.refs.update_ref(refspec, expected, new_id) {
            Ok(_) => Ok(()),
            Err(RefError::CasMismatch { .. }) => Err(SyncError::RemoteHasChanges),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_ref(&self, name: &str, value: Option<ObjectId>) -> SyncResult<()> {
        match value {
            Some(id) => self.repo.refs.put(Ref::direct(name, id))?,
            None => {
                self.repo.refs.remove(name)?;
            }
        }
        Ok(())
    }
}
