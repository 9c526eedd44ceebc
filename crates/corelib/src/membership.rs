//! Authoritative member registry.
//!
//! The store maps identities to the caller's member objects and carries the
//! all-or-nothing validation used by batch mutations: every `check_*` method
//! inspects the whole batch before anything is changed.

use crate::error::{Error, Result};
use crate::node::Member;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Identity -> member map.
pub struct MemberStore<M: Member> {
    members: HashMap<String, Arc<M>>,
}

impl<M: Member> Default for MemberStore<M> {
    fn default() -> Self {
        Self {
            members: HashMap::new(),
        }
    }
}

impl<M: Member> MemberStore<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject members whose capacity is not a finite positive number.
    pub fn check_capacities(members: &[Arc<M>]) -> Result<()> {
        for m in members {
            let capacity = m.capacity();
            if !(capacity > 0.0 && capacity.is_finite()) {
                return Err(Error::InvalidCapacity {
                    id: m.id().to_owned(),
                    capacity,
                });
            }
        }
        Ok(())
    }

    /// Reject a batch that repeats an identity within itself.
    pub fn check_distinct(members: &[Arc<M>]) -> Result<()> {
        let mut seen = HashSet::with_capacity(members.len());
        for m in members {
            if !seen.insert(m.id()) {
                return Err(Error::MemberExists(m.id().to_owned()));
            }
        }
        Ok(())
    }

    /// Validate a batch about to be added to this store.
    ///
    /// Capacities are checked first, then identities against both the store
    /// and the rest of the batch.
    pub fn check_new(&self, members: &[Arc<M>]) -> Result<()> {
        Self::check_capacities(members)?;
        if let Some(m) = members.iter().find(|m| self.contains(m.id())) {
            return Err(Error::MemberExists(m.id().to_owned()));
        }
        Self::check_distinct(members)
    }

    /// Validate that every identity is present.
    pub fn check_known<S: AsRef<str>>(&self, ids: &[S]) -> Result<()> {
        match ids.iter().find(|id| !self.contains(id.as_ref())) {
            Some(id) => Err(Error::MemberNotExists(id.as_ref().to_owned())),
            None => Ok(()),
        }
    }

    /// Insert a validated batch.
    pub fn insert(&mut self, members: &[Arc<M>]) {
        for m in members {
            self.members.insert(m.id().to_owned(), Arc::clone(m));
        }
    }

    /// Remove a validated batch of identities.
    pub fn remove<S: AsRef<str>>(&mut self, ids: &[S]) {
        for id in ids {
            self.members.remove(id.as_ref());
        }
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<M>> {
        self.members.get(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn nodes(spec: &[(&str, f64)]) -> Vec<Arc<Node>> {
        spec.iter().map(|(id, c)| Arc::new(Node::new(*id, *c))).collect()
    }

    #[test]
    fn test_check_new() {
        let mut store = MemberStore::new();
        store.insert(&nodes(&[("a", 1.0)]));

        assert!(store.check_new(&nodes(&[("b", 1.0)])).is_ok());
        assert_eq!(
            store.check_new(&nodes(&[("b", 1.0), ("a", 1.0)])),
            Err(Error::MemberExists("a".into()))
        );
        assert_eq!(
            store.check_new(&nodes(&[("b", 1.0), ("b", 2.0)])),
            Err(Error::MemberExists("b".into()))
        );
        assert!(matches!(
            store.check_new(&nodes(&[("c", 0.0)])),
            Err(Error::InvalidCapacity { .. })
        ));
        assert!(matches!(
            store.check_new(&nodes(&[("c", f64::NAN)])),
            Err(Error::InvalidCapacity { .. })
        ));
    }

    #[test]
    fn test_check_known_and_remove() {
        let mut store = MemberStore::new();
        store.insert(&nodes(&[("a", 1.0), ("b", 3.0)]));

        assert_eq!(
            store.check_known(&["a", "x"]),
            Err(Error::MemberNotExists("x".into()))
        );
        assert!(store.check_known(&["a", "b"]).is_ok());

        store.remove(&["a"]);
        assert_eq!(store.len(), 1);
        assert!(store.get("a").is_none());
        assert!(store.contains("b"));
    }
}
