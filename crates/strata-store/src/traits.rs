use strata_types::{ObjectId, RevObject};

use crate::error::StoreResult;

/// Content-addressed object database.
///
/// All implementations must satisfy these invariants:
/// - Objects are write-once and immutable. Content-addressing guarantees
///   this: the same canonical bytes always produce the same ID.
/// - `put` is idempotent; a concurrent `put` of the same id is a no-op and
///   never corrupts the stored bytes.
/// - After `put` returns, `exists` is true and any subsequent `get` in any
///   thread observes an object that re-serializes to the same bytes.
/// - The null ID is never a valid key.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectDatabase: Send + Sync {
    /// Check whether an object exists.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Read and decode an object, failing with `NotFound` if absent.
    fn get(&self, id: &ObjectId) -> StoreResult<RevObject>;

    /// Read and decode an object, returning `None` if absent.
    fn get_if_present(&self, id: &ObjectId) -> StoreResult<Option<RevObject>>;

    /// Read an object's canonical bytes, failing with `NotFound` if absent.
    fn get_raw(&self, id: &ObjectId) -> StoreResult<Vec<u8>>;

    /// Encode and store an object, returning its content-addressed ID.
    fn put(&self, object: &RevObject) -> StoreResult<ObjectId>;

    /// Store pre-encoded canonical bytes under a caller-supplied ID.
    ///
    /// The caller vouches that `bytes` are the canonical form hashing to
    /// `id`; this is the ingest fast path for pack streams.
    fn put_raw(&self, id: ObjectId, bytes: Vec<u8>) -> StoreResult<()>;

    /// Remove an object.
    ///
    /// Only staging databases support removal; the object database proper
    /// fails with `Unsupported`.
    fn delete(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Check a batch of IDs for existence.
    ///
    /// Default implementation calls `exists` per ID; backends may override
    /// to batch I/O.
    fn exists_batch(&self, ids: &[ObjectId]) -> StoreResult<Vec<bool>> {
        ids.iter().map(|id| self.exists(id)).collect()
    }
}
