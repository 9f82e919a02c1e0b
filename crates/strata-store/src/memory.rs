use std::collections::HashMap;
use std::sync::RwLock;

use strata_types::{ObjectId, RevObject};
use tracing::trace;

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectDatabase;

/// In-memory, HashMap-based object database.
///
/// Stores canonical bytes keyed by digest behind a `RwLock`. Intended for
/// tests, serving fixtures, and embedding; durable backends live behind the
/// same [`ObjectDatabase`] trait elsewhere.
pub struct InMemoryObjectDatabase {
    objects: RwLock<HashMap<ObjectId, Vec<u8>>>,
}

impl InMemoryObjectDatabase {
    /// Create a new empty database.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the database is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored objects.
    pub fn total_bytes(&self) -> u64 {
        self.objects
            .read()
            .expect("lock poisoned")
            .values()
            .map(|bytes| bytes.len() as u64)
            .sum()
    }

    /// Return a sorted list of all object IDs.
    pub fn all_ids(&self) -> Vec<ObjectId> {
        let map = self.objects.read().expect("lock poisoned");
        let mut ids: Vec<ObjectId> = map.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryObjectDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectDatabase for InMemoryObjectDatabase {
    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }

    fn get(&self, id: &ObjectId) -> StoreResult<RevObject> {
        self.get_if_present(id)?
            .ok_or(StoreError::NotFound(*id))
    }

    fn get_if_present(&self, id: &ObjectId) -> StoreResult<Option<RevObject>> {
        let map = self.objects.read().expect("lock poisoned");
        match map.get(id) {
            Some(bytes) => {
                let object = strata_codec::decode(bytes)
                    .map_err(|source| StoreError::Corrupt { id: *id, source })?;
                Ok(Some(object))
            }
            None => Ok(None),
        }
    }

    fn get_raw(&self, id: &ObjectId) -> StoreResult<Vec<u8>> {
        let map = self.objects.read().expect("lock poisoned");
        map.get(id).cloned().ok_or(StoreError::NotFound(*id))
    }

    fn put(&self, object: &RevObject) -> StoreResult<ObjectId> {
        let bytes = strata_codec::encode(object);
        let id = ObjectId::hash_of(&bytes);
        self.put_raw(id, bytes)?;
        Ok(id)
    }

    fn put_raw(&self, id: ObjectId, bytes: Vec<u8>) -> StoreResult<()> {
        if id.is_null() {
            return Err(StoreError::NullObjectId);
        }
        let mut map = self.objects.write().expect("lock poisoned");
        // Idempotent: an existing entry wins; content-addressing guarantees
        // the same id always maps to the same bytes.
        if map.insert(id, bytes).is_none() {
            trace!(id = %id.short_hex(), "stored object");
        }
        Ok(())
    }

    fn delete(&self, _id: &ObjectId) -> StoreResult<bool> {
        Err(StoreError::Unsupported(
            "the object database is append-only",
        ))
    }
}

impl std::fmt::Debug for InMemoryObjectDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectDatabase")
            .field("object_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_types::{Coord, FieldValue, Geometry, Person, RevCommit, RevTree};

    fn make_feature(name: &str) -> RevObject {
        RevObject::Feature {
            values: vec![
                FieldValue::String(name.into()),
                FieldValue::Geometry(Geometry::Point(Coord::new(1.0, 2.0))),
            ],
        }
    }

    fn make_commit(message: &str) -> RevObject {
        RevObject::Commit(RevCommit {
            tree: ObjectId::hash_of(b"tree"),
            parents: vec![],
            author: Person::anonymous(0),
            committer: Person::anonymous(0),
            message: message.into(),
        })
    }

    // -----------------------------------------------------------------------
    // Core contract
    // -----------------------------------------------------------------------

    #[test]
    fn put_then_get() {
        let db = InMemoryObjectDatabase::new();
        let object = make_feature("road-1");
        let id = db.put(&object).unwrap();
        assert!(!id.is_null());
        assert!(db.exists(&id).unwrap());

        let read_back = db.get(&id).unwrap();
        assert_eq!(read_back, object);
    }

    #[test]
    fn get_missing_is_not_found() {
        let db = InMemoryObjectDatabase::new();
        let id = ObjectId::hash_of(b"missing");
        assert!(matches!(db.get(&id), Err(StoreError::NotFound(_))));
        assert!(db.get_if_present(&id).unwrap().is_none());
        assert!(matches!(db.get_raw(&id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn put_is_idempotent() {
        let db = InMemoryObjectDatabase::new();
        let object = make_commit("same");
        let id1 = db.put(&object).unwrap();
        let id2 = db.put(&object).unwrap();
        assert_eq!(id1, id2);
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn raw_bytes_roundtrip_through_digest() {
        let db = InMemoryObjectDatabase::new();
        let object = make_commit("raw");
        let id = db.put(&object).unwrap();
        let raw = db.get_raw(&id).unwrap();
        assert_eq!(ObjectId::hash_of(&raw), id);
        assert_eq!(strata_codec::decode(&raw).unwrap(), object);
    }

    #[test]
    fn put_raw_then_get() {
        let db = InMemoryObjectDatabase::new();
        let object = make_feature("direct");
        let bytes = strata_codec::encode(&object);
        let id = ObjectId::hash_of(&bytes);
        db.put_raw(id, bytes).unwrap();
        assert_eq!(db.get(&id).unwrap(), object);
    }

    #[test]
    fn put_raw_rejects_null_id() {
        let db = InMemoryObjectDatabase::new();
        let err = db.put_raw(ObjectId::null(), vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, StoreError::NullObjectId));
    }

    #[test]
    fn delete_is_unsupported() {
        let db = InMemoryObjectDatabase::new();
        let id = db.put(&make_feature("keep")).unwrap();
        assert!(matches!(db.delete(&id), Err(StoreError::Unsupported(_))));
        assert!(db.exists(&id).unwrap());
    }

    #[test]
    fn distinct_objects_distinct_ids() {
        let db = InMemoryObjectDatabase::new();
        let id1 = db.put(&make_feature("a")).unwrap();
        let id2 = db.put(&make_feature("b")).unwrap();
        assert_ne!(id1, id2);
        assert_eq!(db.len(), 2);
    }

    #[test]
    fn empty_tree_stores_fine() {
        let db = InMemoryObjectDatabase::new();
        let id = db.put(&RevObject::Tree(RevTree::empty())).unwrap();
        assert!(db.exists(&id).unwrap());
    }

    #[test]
    fn exists_batch_defaults() {
        let db = InMemoryObjectDatabase::new();
        let id1 = db.put(&make_feature("x")).unwrap();
        let id2 = ObjectId::hash_of(b"not there");
        assert_eq!(db.exists_batch(&[id1, id2]).unwrap(), vec![true, false]);
    }

    #[test]
    fn corrupt_bytes_surface_as_corrupt() {
        let db = InMemoryObjectDatabase::new();
        let id = ObjectId::hash_of(b"garbage");
        db.put_raw(id, vec![0xFF, 0xFF]).unwrap();
        assert!(matches!(db.get(&id), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn utility_accessors() {
        let db = InMemoryObjectDatabase::new();
        assert!(db.is_empty());
        db.put(&make_feature("a")).unwrap();
        db.put(&make_feature("b")).unwrap();
        assert_eq!(db.len(), 2);
        assert!(db.total_bytes() > 0);
        let ids = db.all_ids();
        assert_eq!(ids.len(), 2);
        assert!(ids[0] <= ids[1]);
    }

    // -----------------------------------------------------------------------
    // Concurrency
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_same_id_puts_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let db = Arc::new(InMemoryObjectDatabase::new());
        let object = make_commit("contended");
        let expected = strata_codec::hash_object(&object);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let db = Arc::clone(&db);
                let object = object.clone();
                thread::spawn(move || db.put(&object).unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().expect("thread should not panic"), expected);
        }
        assert_eq!(db.len(), 1);
        assert_eq!(db.get(&expected).unwrap(), object);
    }
}
