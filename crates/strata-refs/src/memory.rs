//! In-memory reference store for tests, serving fixtures, and embedding.

use std::collections::BTreeMap;
use std::sync::RwLock;

use strata_types::ObjectId;

use crate::error::{RefError, RefResult};
use crate::names::validate_ref_name;
use crate::traits::{RefStore, MAX_SYMREF_DEPTH};
use crate::types::Ref;

/// An in-memory implementation of [`RefStore`].
///
/// All refs live in a `BTreeMap` behind a `RwLock`, so updates are atomic
/// against concurrent readers in this process.
#[derive(Debug, Default)]
pub struct InMemoryRefStore {
    refs: RwLock<BTreeMap<String, Ref>>,
}

impl InMemoryRefStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_lock(&self) -> RefResult<std::sync::RwLockReadGuard<'_, BTreeMap<String, Ref>>> {
        self.refs
            .read()
            .map_err(|e| RefError::Internal(format!("lock poisoned: {e}")))
    }

    fn write_lock(&self) -> RefResult<std::sync::RwLockWriteGuard<'_, BTreeMap<String, Ref>>> {
        self.refs
            .write()
            .map_err(|e| RefError::Internal(format!("lock poisoned: {e}")))
    }
}

impl RefStore for InMemoryRefStore {
    fn list(&self) -> RefResult<BTreeMap<String, Ref>> {
        Ok(self.read_lock()?.clone())
    }

    fn get(&self, name: &str) -> RefResult<Option<Ref>> {
        Ok(self.read_lock()?.get(name).cloned())
    }

    fn put(&self, reference: Ref) -> RefResult<()> {
        validate_ref_name(reference.name())?;
        if let Some(target) = reference.symbolic_target() {
            validate_ref_name(target)?;
        }
        self.write_lock()?
            .insert(reference.name().to_string(), reference);
        Ok(())
    }

    fn remove(&self, name: &str) -> RefResult<Option<Ref>> {
        Ok(self.write_lock()?.remove(name))
    }

    fn resolve(&self, name: &str) -> RefResult<Option<Ref>> {
        let refs = self.read_lock()?;
        let mut current = name.to_string();
        for _ in 0..MAX_SYMREF_DEPTH {
            match refs.get(&current) {
                None => return Ok(None),
                Some(direct @ Ref::Direct { .. }) => return Ok(Some(direct.clone())),
                Some(Ref::Symbolic { target, .. }) => current = target.clone(),
            }
        }
        Err(RefError::SymrefLoop {
            name: name.to_string(),
        })
    }

    fn update_ref(
        &self,
        name: &str,
        expected_old: Option<ObjectId>,
        new: ObjectId,
    ) -> RefResult<Ref> {
        validate_ref_name(name)?;
        let mut refs = self.write_lock()?;
        let actual = match refs.get(name) {
            Some(Ref::Direct { target, .. }) => Some(*target),
            Some(Ref::Symbolic { .. }) | None => None,
        };
        if actual != expected_old {
            return Err(RefError::CasMismatch {
                name: name.to_string(),
                expected: expected_old,
                actual,
            });
        }
        let updated = Ref::direct(name, new);
        refs.insert(name.to_string(), updated.clone());
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{branch_ref, HEAD};

    fn id(byte: u8) -> ObjectId {
        ObjectId::from_raw([byte; 20])
    }

    #[test]
    fn put_get_remove_roundtrip() {
        let store = InMemoryRefStore::new();
        let r = Ref::direct("refs/heads/master", id(1));
        store.put(r.clone()).unwrap();
        assert_eq!(store.get("refs/heads/master").unwrap(), Some(r.clone()));
        assert_eq!(store.remove("refs/heads/master").unwrap(), Some(r));
        assert_eq!(store.get("refs/heads/master").unwrap(), None);
    }

    #[test]
    fn remove_missing_returns_none() {
        let store = InMemoryRefStore::new();
        assert!(store.remove("refs/heads/ghost").unwrap().is_none());
    }

    #[test]
    fn list_is_sorted_by_name() {
        let store = InMemoryRefStore::new();
        store.put(Ref::direct("refs/tags/v1", id(1))).unwrap();
        store.put(Ref::direct("refs/heads/b", id(2))).unwrap();
        store.put(Ref::direct("refs/heads/a", id(3))).unwrap();
        let names: Vec<String> = store.list().unwrap().into_keys().collect();
        assert_eq!(
            names,
            vec!["refs/heads/a", "refs/heads/b", "refs/tags/v1"]
        );
    }

    #[test]
    fn branches_and_tags_filters() {
        let store = InMemoryRefStore::new();
        store.put(Ref::direct(branch_ref("master"), id(1))).unwrap();
        store.put(Ref::direct("refs/tags/v1", id(2))).unwrap();
        store
            .put(Ref::direct("refs/remotes/origin/master", id(3)))
            .unwrap();
        assert_eq!(store.branches().unwrap().len(), 1);
        assert_eq!(store.tags().unwrap().len(), 1);
    }

    #[test]
    fn head_resolves_through_symref() {
        let store = InMemoryRefStore::new();
        store.put(Ref::direct(branch_ref("master"), id(9))).unwrap();
        store
            .put(Ref::symbolic(HEAD, branch_ref("master")))
            .unwrap();
        let resolved = store.resolve(HEAD).unwrap().unwrap();
        assert_eq!(resolved.target_id(), Some(id(9)));
        assert_eq!(resolved.name(), "refs/heads/master");
    }

    #[test]
    fn resolve_direct_is_identity() {
        let store = InMemoryRefStore::new();
        store.put(Ref::direct(branch_ref("master"), id(4))).unwrap();
        let resolved = store.resolve(&branch_ref("master")).unwrap().unwrap();
        assert_eq!(resolved.target_id(), Some(id(4)));
    }

    #[test]
    fn resolve_missing_is_none() {
        let store = InMemoryRefStore::new();
        assert!(store.resolve("refs/heads/ghost").unwrap().is_none());
        // symref to a missing branch also resolves to nothing
        store
            .put(Ref::symbolic(HEAD, branch_ref("ghost")))
            .unwrap();
        assert!(store.resolve(HEAD).unwrap().is_none());
    }

    #[test]
    fn symref_loop_is_capped() {
        let store = InMemoryRefStore::new();
        store
            .put(Ref::symbolic("refs/heads/a", "refs/heads/b"))
            .unwrap();
        store
            .put(Ref::symbolic("refs/heads/b", "refs/heads/a"))
            .unwrap();
        let err = store.resolve("refs/heads/a").unwrap_err();
        assert!(matches!(err, RefError::SymrefLoop { .. }));
    }

    #[test]
    fn cas_succeeds_on_expected_value() {
        let store = InMemoryRefStore::new();
        store.put(Ref::direct(branch_ref("master"), id(1))).unwrap();
        let updated = store
            .update_ref(&branch_ref("master"), Some(id(1)), id(2))
            .unwrap();
        assert_eq!(updated.target_id(), Some(id(2)));
        assert_eq!(
            store.get(&branch_ref("master")).unwrap().unwrap().target_id(),
            Some(id(2))
        );
    }

    #[test]
    fn cas_fails_on_moved_ref() {
        let store = InMemoryRefStore::new();
        store.put(Ref::direct(branch_ref("master"), id(3))).unwrap();
        let err = store
            .update_ref(&branch_ref("master"), Some(id(1)), id(2))
            .unwrap_err();
        assert!(matches!(err, RefError::CasMismatch { .. }));
        // unchanged
        assert_eq!(
            store.get(&branch_ref("master")).unwrap().unwrap().target_id(),
            Some(id(3))
        );
    }

    #[test]
    fn cas_creates_new_ref_when_none_expected() {
        let store = InMemoryRefStore::new();
        store
            .update_ref(&branch_ref("fresh"), None, id(5))
            .unwrap();
        assert_eq!(
            store.get(&branch_ref("fresh")).unwrap().unwrap().target_id(),
            Some(id(5))
        );
    }

    #[test]
    fn cas_none_expected_fails_if_present() {
        let store = InMemoryRefStore::new();
        store.put(Ref::direct(branch_ref("master"), id(1))).unwrap();
        let err = store
            .update_ref(&branch_ref("master"), None, id(2))
            .unwrap_err();
        assert!(matches!(err, RefError::CasMismatch { .. }));
    }

    #[test]
    fn put_rejects_invalid_names() {
        let store = InMemoryRefStore::new();
        assert!(store.put(Ref::direct("refs/heads/a..b", id(1))).is_err());
        assert!(store
            .put(Ref::symbolic("HEAD", "refs/heads/bad name"))
            .is_err());
    }
}
