//! Commit-history queries: ancestry tests, bounded adjacency slices for
//! sync negotiation, and reference integrity checks.

use std::collections::{HashSet, VecDeque};

use strata_store::ObjectDatabase;
use strata_types::{ObjectId, RevObject};
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::walk::successor_ids;

/// One commit in a history slice: its id and parent ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: ObjectId,
    pub parents: Vec<ObjectId>,
}

/// A bounded slice of commit history, plus the requested ids the database
/// does not hold.
#[derive(Clone, Debug, Default)]
pub struct HistorySlice {
    pub history: Vec<HistoryEntry>,
    pub missing: Vec<ObjectId>,
}

/// Whether `ancestor` is reachable from `descendant` through commit
/// parents. A commit is its own ancestor.
pub fn is_ancestor(
    db: &dyn ObjectDatabase,
    ancestor: &ObjectId,
    descendant: &ObjectId,
) -> GraphResult<bool> {
    if ancestor == descendant {
        return Ok(true);
    }
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(*descendant);
    visited.insert(*descendant);
    while let Some(current) = queue.pop_front() {
        let Some(object) = db.get_if_present(&current)? else {
            // A truncated local history just ends this path.
            continue;
        };
        if let RevObject::Commit(commit) = object {
            for parent in commit.parents {
                if parent == *ancestor {
                    return Ok(true);
                }
                if visited.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
    }
    Ok(false)
}

/// BFS a commit adjacency slice from each `want` toward `have`, bounded by
/// `limit` entries.
///
/// Parents of returned commits are enqueued unless they appear in `have`,
/// so a requester can iterate slices toward the common frontier. Requested
/// ids (want or have) absent from the database are reported in `missing`.
pub fn history_slice(
    db: &dyn ObjectDatabase,
    want: &[ObjectId],
    have: &[ObjectId],
    limit: usize,
) -> GraphResult<HistorySlice> {
    let stop: HashSet<ObjectId> = have.iter().copied().collect();
    let mut slice = HistorySlice::default();
    let mut sent = HashSet::new();
    let mut queue: VecDeque<ObjectId> = VecDeque::new();

    for id in want.iter().chain(have.iter()) {
        if !db.exists(id)? {
            slice.missing.push(*id);
        }
    }
    for id in want {
        if db.exists(id)? {
            queue.push_back(*id);
        }
    }

    let mut budget = limit;
    while let Some(id) = queue.pop_front() {
        if budget == 0 {
            break;
        }
        if !sent.insert(id) {
            continue;
        }
        let Some(RevObject::Commit(commit)) = db.get_if_present(&id)? else {
            continue;
        };
        for parent in &commit.parents {
            if !sent.contains(parent) && !stop.contains(parent) {
                queue.push_back(*parent);
            }
        }
        slice.history.push(HistoryEntry {
            id,
            parents: commit.parents,
        });
        budget -= 1;
    }
    debug!(
        entries = slice.history.len(),
        missing = slice.missing.len(),
        "computed history slice"
    );
    Ok(slice)
}

/// Walk from `root` verifying that every referenced digest is present.
///
/// The first gap aborts the check; after a pack ingest this distinguishes a
/// complete transfer from one that must be re-fetched.
pub fn verify_connectivity(db: &dyn ObjectDatabase, root: ObjectId) -> GraphResult<()> {
    if !db.exists(&root)? {
        return Err(GraphError::IntegrityGap {
            referer: root,
            missing: root,
        });
    }
    let mut checked = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(root);
    checked.insert(root);
    while let Some(id) = queue.pop_front() {
        let object = db.get(&id)?;
        for referenced in successor_ids(&object) {
            if !db.exists(&referenced)? {
                return Err(GraphError::IntegrityGap {
                    referer: id,
                    missing: referenced,
                });
            }
            if checked.insert(referenced) {
                queue.push_back(referenced);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_store::InMemoryObjectDatabase;
    use strata_types::{Node, Person, RevCommit, RevTree};

    fn put_commit(
        db: &InMemoryObjectDatabase,
        tree: ObjectId,
        parents: Vec<ObjectId>,
        message: &str,
    ) -> ObjectId {
        db.put(&RevObject::Commit(RevCommit {
            tree,
            parents,
            author: Person::anonymous(0),
            committer: Person::anonymous(0),
            message: message.into(),
        }))
        .unwrap()
    }

    fn put_tree(db: &InMemoryObjectDatabase) -> ObjectId {
        db.put(&RevObject::Tree(RevTree::empty())).unwrap()
    }

    /// Linear history a <- b <- c over one empty tree.
    fn linear(db: &InMemoryObjectDatabase) -> (ObjectId, ObjectId, ObjectId) {
        let tree = put_tree(db);
        let a = put_commit(db, tree, vec![], "a");
        let b = put_commit(db, tree, vec![a], "b");
        let c = put_commit(db, tree, vec![b], "c");
        (a, b, c)
    }

    #[test]
    fn ancestor_in_linear_history() {
        let db = InMemoryObjectDatabase::new();
        let (a, b, c) = linear(&db);
        assert!(is_ancestor(&db, &a, &c).unwrap());
        assert!(is_ancestor(&db, &b, &c).unwrap());
        assert!(!is_ancestor(&db, &c, &a).unwrap());
        assert!(is_ancestor(&db, &a, &a).unwrap());
    }

    #[test]
    fn unrelated_commits_are_not_ancestors() {
        let db = InMemoryObjectDatabase::new();
        let tree = put_tree(&db);
        let a = put_commit(&db, tree, vec![], "a");
        let x = put_commit(&db, tree, vec![], "x");
        assert!(!is_ancestor(&db, &a, &x).unwrap());
    }

    #[test]
    fn slice_walks_from_want_to_have() {
        let db = InMemoryObjectDatabase::new();
        let (a, b, c) = linear(&db);
        let slice = history_slice(&db, &[c], &[a], 100).unwrap();
        let ids: Vec<ObjectId> = slice.history.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![c, b]);
        assert!(slice.missing.is_empty());
        assert_eq!(slice.history[0].parents, vec![b]);
    }

    #[test]
    fn slice_respects_limit() {
        let db = InMemoryObjectDatabase::new();
        let tree = put_tree(&db);
        let mut tip = put_commit(&db, tree, vec![], "0");
        for i in 1..50 {
            tip = put_commit(&db, tree, vec![tip], &i.to_string());
        }
        let slice = history_slice(&db, &[tip], &[], 10).unwrap();
        assert_eq!(slice.history.len(), 10);
        // the most recent commits come first
        assert_eq!(slice.history[0].id, tip);
    }

    #[test]
    fn slice_reports_missing_requested_ids() {
        let db = InMemoryObjectDatabase::new();
        let (_, _, c) = linear(&db);
        let ghost = ObjectId::hash_of(b"ghost");
        let slice = history_slice(&db, &[c, ghost], &[ghost], 100).unwrap();
        assert_eq!(slice.missing, vec![ghost, ghost]);
        assert!(!slice.history.is_empty());
    }

    #[test]
    fn slice_of_merge_history_covers_both_parents() {
        let db = InMemoryObjectDatabase::new();
        let tree = put_tree(&db);
        let root = put_commit(&db, tree, vec![], "root");
        let left = put_commit(&db, tree, vec![root], "left");
        let right = put_commit(&db, tree, vec![root], "right");
        let merge = put_commit(&db, tree, vec![left, right], "merge");
        let slice = history_slice(&db, &[merge], &[], 100).unwrap();
        let ids: HashSet<ObjectId> = slice.history.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 4);
        assert!(ids.contains(&left) && ids.contains(&right));
    }

    #[test]
    fn connectivity_holds_for_complete_graph() {
        let db = InMemoryObjectDatabase::new();
        let (_, _, c) = linear(&db);
        verify_connectivity(&db, c).unwrap();
    }

    #[test]
    fn connectivity_reports_gap() {
        let db = InMemoryObjectDatabase::new();
        let ghost = ObjectId::hash_of(b"never stored");
        let tree = db
            .put(&RevObject::Tree(RevTree::leaf(
                1,
                0,
                vec![Node::feature("gone", ghost)],
                vec![],
            )))
            .unwrap();
        let c = put_commit(&db, tree, vec![], "broken");
        let err = verify_connectivity(&db, c).unwrap_err();
        match err {
            GraphError::IntegrityGap { referer, missing } => {
                assert_eq!(referer, tree);
                assert_eq!(missing, ghost);
            }
            other => panic!("expected integrity gap, got {other}"),
        }
    }
}
