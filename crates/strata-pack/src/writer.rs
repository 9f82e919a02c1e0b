//! Pack stream writer.
//!
//! A pack stream is a concatenation of `digest ‖ canonical_bytes` records
//! with no framing beyond the objects' self-delimiting form. The writer
//! walks each wanted root in post-order, so every object is preceded by
//! everything it references, and skips anything reachable from the peer's
//! `have` frontier.

use std::collections::HashSet;
use std::io::Write;

use strata_graph::{successor_ids, PostOrderWalk};
use strata_store::ObjectDatabase;
use strata_types::{ObjectId, RevObject};
use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::{PackError, PackResult};

/// Knobs for one pack round.
#[derive(Clone, Debug, Default)]
pub struct PackOptions {
    /// Stop the round after this many commits have been written. The
    /// stream stays valid at the record boundary; the peer re-negotiates
    /// for the remainder. `None` writes everything in one round.
    pub max_commits: Option<usize>,
}

/// Counters for one pack round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PackStats {
    pub objects_written: usize,
    pub commits_written: usize,
    pub bytes_written: u64,
}

/// Write a pack stream carrying everything reachable from `want` that is
/// not reachable from `have`.
///
/// `sent` persists negotiation state across rounds: ids already in it are
/// never re-sent, and every id written is added. The callback observes each
/// written object once, in stream order, letting the push driver keep its
/// root frontier current as commits flow.
pub fn write_pack<W: Write>(
    db: &dyn ObjectDatabase,
    out: &mut W,
    want: &[ObjectId],
    have: &[ObjectId],
    sent: &mut HashSet<ObjectId>,
    options: &PackOptions,
    cancel: &CancelToken,
    mut callback: impl FnMut(&ObjectId, &RevObject),
) -> PackResult<PackStats> {
    for id in want {
        if !db.exists(id)? {
            return Err(PackError::WantNotFound(*id));
        }
    }

    // Previsit: everything transitively reachable from the peer's frontier
    // is marked sent so it never enters the stream.
    for id in have {
        previsit(db, *id, sent)?;
    }

    let mut stats = PackStats::default();
    'roots: for root in want {
        for item in PostOrderWalk::new(db, *root) {
            if cancel.is_cancelled() {
                break 'roots;
            }
            let (id, object) = item?;
            if !sent.insert(id) {
                continue;
            }
            let bytes = db.get_raw(&id)?;
            out.write_all(id.as_bytes())?;
            out.write_all(&bytes)?;
            stats.objects_written += 1;
            stats.bytes_written += 20 + bytes.len() as u64;
            let is_commit = matches!(object, RevObject::Commit(_));
            callback(&id, &object);
            if is_commit {
                stats.commits_written += 1;
                if options
                    .max_commits
                    .is_some_and(|cap| stats.commits_written >= cap)
                {
                    break 'roots;
                }
            }
        }
    }
    debug!(
        objects = stats.objects_written,
        commits = stats.commits_written,
        bytes = stats.bytes_written,
        "pack round written"
    );
    Ok(stats)
}

/// Mark everything reachable from `id` as sent, tolerating gaps: a
/// partially-known frontier contributes whatever it can.
fn previsit(
    db: &dyn ObjectDatabase,
    id: ObjectId,
    sent: &mut HashSet<ObjectId>,
) -> PackResult<()> {
    let mut queue = vec![id];
    while let Some(here) = queue.pop() {
        if sent.contains(&here) {
            continue;
        }
        let Some(object) = db.get_if_present(&here)? else {
            continue;
        };
        queue.extend(successor_ids(&object));
        sent.insert(here);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_store::InMemoryObjectDatabase;
    use strata_types::{FieldValue, Node, Person, RevCommit, RevTree};

    fn feature(name: &str) -> RevObject {
        RevObject::Feature {
            values: vec![FieldValue::String(name.into())],
        }
    }

    fn put_chain(db: &InMemoryObjectDatabase, name: &str, parents: Vec<ObjectId>) -> ObjectId {
        let f = db.put(&feature(name)).unwrap();
        let t = db
            .put(&RevObject::Tree(RevTree::leaf(
                1,
                0,
                vec![Node::feature(name, f)],
                vec![],
            )))
            .unwrap();
        db.put(&RevObject::Commit(RevCommit {
            tree: t,
            parents,
            author: Person::anonymous(0),
            committer: Person::anonymous(0),
            message: name.into(),
        }))
        .unwrap()
    }

    fn write_to_vec(
        db: &InMemoryObjectDatabase,
        want: &[ObjectId],
        have: &[ObjectId],
    ) -> (Vec<u8>, PackStats) {
        let mut out = Vec::new();
        let mut sent = HashSet::new();
        let stats = write_pack(
            db,
            &mut out,
            want,
            have,
            &mut sent,
            &PackOptions::default(),
            &CancelToken::new(),
            |_, _| {},
        )
        .unwrap();
        (out, stats)
    }

    #[test]
    fn full_history_pack_contains_every_object() {
        let db = InMemoryObjectDatabase::new();
        let a = put_chain(&db, "a", vec![]);
        let b = put_chain(&db, "b", vec![a]);
        let (_, stats) = write_to_vec(&db, &[b], &[]);
        // two commits, two trees, two features
        assert_eq!(stats.objects_written, 6);
        assert_eq!(stats.commits_written, 2);
    }

    #[test]
    fn have_frontier_excludes_reachable_objects() {
        let db = InMemoryObjectDatabase::new();
        let a = put_chain(&db, "a", vec![]);
        let b = put_chain(&db, "b", vec![a]);
        let (_, stats) = write_to_vec(&db, &[b], &[a]);
        // only b's commit, tree, feature
        assert_eq!(stats.objects_written, 3);
        assert_eq!(stats.commits_written, 1);
    }

    #[test]
    fn no_object_appears_twice_in_one_stream() {
        let db = InMemoryObjectDatabase::new();
        let a = put_chain(&db, "a", vec![]);
        let b = put_chain(&db, "b", vec![a]);
        let mut out = Vec::new();
        let mut sent = HashSet::new();
        let mut seen = Vec::new();
        write_pack(
            &db,
            &mut out,
            &[a, b],
            &[],
            &mut sent,
            &PackOptions::default(),
            &CancelToken::new(),
            |id, _| seen.push(*id),
        )
        .unwrap();
        let unique: HashSet<ObjectId> = seen.iter().copied().collect();
        assert_eq!(unique.len(), seen.len());
    }

    #[test]
    fn unknown_want_is_rejected() {
        let db = InMemoryObjectDatabase::new();
        let ghost = ObjectId::hash_of(b"ghost");
        let mut out = Vec::new();
        let mut sent = HashSet::new();
        let err = write_pack(
            &db,
            &mut out,
            &[ghost],
            &[],
            &mut sent,
            &PackOptions::default(),
            &CancelToken::new(),
            |_, _| {},
        )
        .unwrap_err();
        assert!(matches!(err, PackError::WantNotFound(id) if id == ghost));
        assert!(out.is_empty());
    }

    #[test]
    fn trees_stream_before_their_commits() {
        let db = InMemoryObjectDatabase::new();
        let tip = put_chain(&db, "only", vec![]);
        let mut out = Vec::new();
        let mut sent = HashSet::new();
        let mut kinds = Vec::new();
        write_pack(
            &db,
            &mut out,
            &[tip],
            &[],
            &mut sent,
            &PackOptions::default(),
            &CancelToken::new(),
            |_, object| kinds.push(object.kind()),
        )
        .unwrap();
        use strata_types::ObjectKind;
        assert_eq!(
            kinds,
            vec![ObjectKind::Feature, ObjectKind::Tree, ObjectKind::Commit]
        );
    }

    #[test]
    fn commit_cap_bounds_the_round() {
        let db = InMemoryObjectDatabase::new();
        let mut tip = put_chain(&db, "0", vec![]);
        for i in 1..5 {
            tip = put_chain(&db, &i.to_string(), vec![tip]);
        }
        let mut out = Vec::new();
        let mut sent = HashSet::new();
        let stats = write_pack(
            &db,
            &mut out,
            &[tip],
            &[],
            &mut sent,
            &PackOptions {
                max_commits: Some(2),
            },
            &CancelToken::new(),
            |_, _| {},
        )
        .unwrap();
        assert_eq!(stats.commits_written, 2);
        // a second round with the same sent set picks up the rest
        let mut out2 = Vec::new();
        let stats2 = write_pack(
            &db,
            &mut out2,
            &[tip],
            &[],
            &mut sent,
            &PackOptions::default(),
            &CancelToken::new(),
            |_, _| {},
        )
        .unwrap();
        assert_eq!(stats2.commits_written, 3);
    }

    #[test]
    fn cancellation_stops_at_a_record_boundary() {
        let db = InMemoryObjectDatabase::new();
        let tip = put_chain(&db, "x", vec![]);
        let cancel = CancelToken::new();
        let mut out = Vec::new();
        let mut sent = HashSet::new();
        let cancel_in_callback = cancel.clone();
        let stats = write_pack(
            &db,
            &mut out,
            &[tip],
            &[],
            &mut sent,
            &PackOptions::default(),
            &cancel,
            move |_, _| cancel_in_callback.cancel(),
        )
        .unwrap();
        // the first record was written, then the signal took effect
        assert_eq!(stats.objects_written, 1);
    }

    #[test]
    fn resumed_round_skips_already_sent() {
        let db = InMemoryObjectDatabase::new();
        let tip = put_chain(&db, "r", vec![]);
        let mut sent = HashSet::new();
        let mut out = Vec::new();
        write_pack(
            &db,
            &mut out,
            &[tip],
            &[],
            &mut sent,
            &PackOptions::default(),
            &CancelToken::new(),
            |_, _| {},
        )
        .unwrap();
        let mut out2 = Vec::new();
        let stats2 = write_pack(
            &db,
            &mut out2,
            &[tip],
            &[],
            &mut sent,
            &PackOptions::default(),
            &CancelToken::new(),
            |_, _| {},
        )
        .unwrap();
        assert_eq!(stats2.objects_written, 0);
        assert!(out2.is_empty());
    }
}
