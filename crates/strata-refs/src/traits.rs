//! The [`RefStore`] trait defining the reference storage interface.
//!
//! Any backend (in-memory, filesystem, database) implements this trait to
//! provide named reference management. The namespace is hierarchical:
//!
//! - `refs/heads/*` for branches
//! - `refs/tags/*` for tags
//! - `refs/remotes/{remote}/*` for remote-tracking refs
//! - `HEAD`, normally a symbolic ref into `refs/heads/`

use std::collections::BTreeMap;

use strata_types::ObjectId;

use crate::error::RefResult;
use crate::types::{Ref, HEADS_PREFIX, TAGS_PREFIX};

/// Maximum symbolic-ref hops [`RefStore::resolve`] will follow.
pub const MAX_SYMREF_DEPTH: usize = 8;

/// Storage backend for named references.
///
/// Implementations must be thread-safe and atomic against concurrent
/// readers in the same process; cross-process atomicity is delegated to
/// the backing store.
pub trait RefStore: Send + Sync {
    /// All refs, keyed by canonical name, in name order.
    fn list(&self) -> RefResult<BTreeMap<String, Ref>>;

    /// Read a ref by canonical name. `Ok(None)` if absent.
    fn get(&self, name: &str) -> RefResult<Option<Ref>>;

    /// Create or overwrite a ref.
    fn put(&self, reference: Ref) -> RefResult<()>;

    /// Delete a ref, returning the previous value if it existed.
    fn remove(&self, name: &str) -> RefResult<Option<Ref>>;

    /// Follow symbolic refs from `name` to the direct ref at the end of
    /// the chain.
    ///
    /// Returns `Ok(None)` if the name (or a link in the chain) does not
    /// exist; fails with `SymrefLoop` past [`MAX_SYMREF_DEPTH`] hops.
    fn resolve(&self, name: &str) -> RefResult<Option<Ref>>;

    /// Compare-and-swap update of a direct ref.
    ///
    /// Atomically sets `name` to `new` if its current direct value equals
    /// `expected_old` (`None` = the ref must not exist). On mismatch the
    /// update fails with `CasMismatch` and the store is unchanged.
    fn update_ref(
        &self,
        name: &str,
        expected_old: Option<ObjectId>,
        new: ObjectId,
    ) -> RefResult<Ref>;

    /// All branch refs.
    fn branches(&self) -> RefResult<Vec<Ref>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|(name, _)| name.starts_with(HEADS_PREFIX))
            .map(|(_, r)| r)
            .collect())
    }

    /// All tag refs.
    fn tags(&self) -> RefResult<Vec<Ref>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|(name, _)| name.starts_with(TAGS_PREFIX))
            .map(|(_, r)| r)
            .collect())
    }
}
