//! Post-order traversal of the object graph.
//!
//! The walk enumerates every object reachable from a root, emitting each
//! object only after everything it references has been emitted. It runs on
//! an explicit frame stack — one frame per level of pending children — so
//! arbitrarily deep histories never recurse on the call stack.

use std::collections::VecDeque;

use strata_store::ObjectDatabase;
use strata_types::{ObjectId, RevObject, RevTree};

use crate::error::GraphResult;

/// A lazy post-order walk over every object reachable from a root.
///
/// Yields `(id, object)` pairs. Objects referenced from more than one place
/// are yielded more than once; consumers dedupe with a visited set. The
/// sequence is finite because the object graph is acyclic by construction,
/// and non-restartable: materialize it if more than one pass is needed.
pub struct PostOrderWalk<'a> {
    db: &'a dyn ObjectDatabase,
    frames: Vec<VecDeque<ObjectId>>,
    descending: bool,
}

impl<'a> PostOrderWalk<'a> {
    /// Start a walk at `root`.
    pub fn new(db: &'a dyn ObjectDatabase, root: ObjectId) -> Self {
        let mut first = VecDeque::new();
        first.push_back(root);
        Self {
            db,
            frames: vec![first],
            descending: true,
        }
    }

    fn step(&mut self) -> GraphResult<Option<(ObjectId, RevObject)>> {
        while let Some(top) = self.frames.last_mut() {
            if top.is_empty() {
                // Finished a subtree: surface and emit its parent next.
                self.frames.pop();
                self.descending = false;
            } else if self.descending {
                let next = *top.front().expect("non-empty frame");
                let successors = successor_ids(&self.db.get(&next)?);
                self.frames.push(successors.into());
            } else {
                self.descending = true;
                let id = self
                    .frames
                    .last_mut()
                    .expect("non-empty stack")
                    .pop_front()
                    .expect("non-empty frame");
                let object = self.db.get(&id)?;
                return Ok(Some((id, object)));
            }
        }
        Ok(None)
    }
}

impl Iterator for PostOrderWalk<'_> {
    type Item = GraphResult<(ObjectId, RevObject)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().transpose()
    }
}

/// The digests an object directly references, in deterministic order.
///
/// Commits list parents before their tree; leaf trees list feature nodes
/// (target then metadata) before subtree nodes; bucketed trees list child
/// subtrees in ascending bucket order. Features, feature types, and tags
/// reference nothing the walk descends into.
pub fn successor_ids(object: &RevObject) -> Vec<ObjectId> {
    match object {
        RevObject::Commit(commit) => {
            let mut ids = commit.parents.clone();
            ids.push(commit.tree);
            ids
        }
        RevObject::Tree(tree) => tree_successor_ids(tree),
        RevObject::Feature { .. } | RevObject::FeatureType(_) | RevObject::Tag(_) => Vec::new(),
    }
}

fn tree_successor_ids(tree: &RevTree) -> Vec<ObjectId> {
    let mut ids = Vec::new();
    for node in tree.features.iter().chain(tree.trees.iter()) {
        ids.push(node.target);
        if let Some(metadata) = node.metadata {
            ids.push(metadata);
        }
    }
    for bucket in tree.buckets.values() {
        ids.push(bucket.target);
    }
    ids
}
