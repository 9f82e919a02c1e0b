//! The explicit context record every sync operation works against.

use std::sync::Arc;

use strata_refs::{InMemoryRefStore, Ref, RefStore};
use strata_store::{InMemoryObjectDatabase, ObjectDatabase};
use strata_types::ObjectId;

use crate::error::SyncResult;

/// A repository: the object database plus its reference store.
///
/// Collaborators are wired explicitly rather than through a container;
/// everything a driver touches goes through this record.
#[derive(Clone)]
pub struct Repository {
    pub objects: Arc<dyn ObjectDatabase>,
    pub refs: Arc<dyn RefStore>,
}

impl Repository {
    pub fn new(objects: Arc<dyn ObjectDatabase>, refs: Arc<dyn RefStore>) -> Self {
        Self { objects, refs }
    }

    /// A fresh repository over in-memory backends.
    pub fn in_memory() -> Self {
        Self {
            objects: Arc::new(InMemoryObjectDatabase::new()),
            refs: Arc::new(InMemoryRefStore::new()),
        }
    }

    /// Resolve a ref name to the object it ultimately points at.
    pub fn resolve_ref(&self, name: &str) -> SyncResult<Option<ObjectId>> {
        Ok(self.refs.resolve(name)?.and_then(|r| r.target_id()))
    }

    /// The tips of every direct local ref whose target object is actually
    /// present — the starting `have` frontier for fetch negotiation.
    pub fn local_tips(&self) -> SyncResult<Vec<ObjectId>> {
        let mut tips = Vec::new();
        for (_, reference) in self.refs.list()? {
            if let Ref::Direct { target, .. } = reference {
                if !target.is_null() && self.objects.exists(&target)? && !tips.contains(&target) {
                    tips.push(target);
                }
            }
        }
        Ok(tips)
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_refs::{branch_ref, HEAD};
    use strata_types::{Person, RevCommit, RevObject, RevTree};

    fn put_commit(repo: &Repository, message: &str) -> ObjectId {
        let tree = repo
            .objects
            .put(&RevObject::Tree(RevTree::empty()))
            .unwrap();
        repo.objects
            .put(&RevObject::Commit(RevCommit {
                tree,
                parents: vec![],
                author: Person::anonymous(0),
                committer: Person::anonymous(0),
                message: message.into(),
            }))
            .unwrap()
    }

    #[test]
    fn resolve_ref_through_head() {
        let repo = Repository::in_memory();
        let tip = put_commit(&repo, "tip");
        repo.refs.put(Ref::direct(branch_ref("master"), tip)).unwrap();
        repo.refs
            .put(Ref::symbolic(HEAD, branch_ref("master")))
            .unwrap();
        assert_eq!(repo.resolve_ref(HEAD).unwrap(), Some(tip));
        assert_eq!(repo.resolve_ref("refs/heads/ghost").unwrap(), None);
    }

    #[test]
    fn local_tips_skip_missing_objects_and_duplicates() {
        let repo = Repository::in_memory();
        let tip = put_commit(&repo, "real");
        repo.refs.put(Ref::direct(branch_ref("a"), tip)).unwrap();
        repo.refs.put(Ref::direct(branch_ref("b"), tip)).unwrap();
        repo.refs
            .put(Ref::direct(
                branch_ref("dangling"),
                ObjectId::hash_of(b"not stored"),
            ))
            .unwrap();
        assert_eq!(repo.local_tips().unwrap(), vec![tip]);
    }
}
