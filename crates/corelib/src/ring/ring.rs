//! Hash ring data structure.
//!
//! # Layout
//!
//! The ring is a sorted `Vec` of [`RingPosition`]s, one per member, placed at
//! `hash(member.id())`. It is rebuilt on membership changes and walked
//! sequentially by every distribution pass.
//!
//! # Performance Characteristics
//!
//! - **Insert**: O((n + k) log(n + k)) for a batch of k members (append + sort)
//! - **Remove**: O(n * k) for a batch of k identities
//! - **Search / successor / predecessor**: O(log n)

use crate::hasher::Hasher;
use crate::node::Member;
use crate::ring::position::RingPosition;
use std::sync::Arc;
use tracing::trace;

/// Sorted ring of member positions.
pub struct HashRing<M: Member> {
    positions: Vec<RingPosition<M>>,
    hasher: Arc<dyn Hasher>,
}

impl<M: Member> HashRing<M> {
    /// Create an empty ring placing members with `hasher`.
    pub fn new(hasher: Arc<dyn Hasher>) -> Self {
        Self {
            positions: Vec::new(),
            hasher,
        }
    }

    /// Ring position of a member identity.
    #[inline]
    pub fn hash_id(&self, id: &str) -> u64 {
        self.hasher.sum64(id.as_bytes())
    }

    /// Insert positions for a batch of members and restore ordering.
    ///
    /// Callers are expected to have rejected duplicate identities already.
    pub fn insert(&mut self, members: &[Arc<M>]) {
        self.positions.reserve(members.len());
        for member in members {
            let hash = self.hash_id(member.id());
            trace!(member = member.id(), hash, "placing member");
            self.positions.push(RingPosition::new(hash, Arc::clone(member)));
        }
        self.positions.sort_unstable();
    }

    /// Remove every position owned by one of `ids`, returning how many went away.
    pub fn remove(&mut self, ids: &[&str]) -> usize {
        let before = self.positions.len();
        self.positions.retain(|p| !ids.iter().any(|id| *id == p.id()));
        before - self.positions.len()
    }

    /// Drop every position.
    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Number of positions on the ring.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All positions in ring order.
    pub fn positions(&self) -> &[RingPosition<M>] {
        &self.positions
    }

    /// Position at `idx`, wrapping around the end of the ring.
    ///
    /// # Panics
    /// Panics if the ring is empty.
    #[inline]
    pub fn at(&self, idx: usize) -> &RingPosition<M> {
        &self.positions[idx % self.positions.len()]
    }

    /// Index of the first position with a hash `>= hash`.
    ///
    /// Wraps to 0 past the last position, so on a non-empty ring the result
    /// is always a valid index. Returns 0 on an empty ring.
    pub fn search(&self, hash: u64) -> usize {
        let idx = self.positions.partition_point(|p| p.hash() < hash);
        if idx == self.positions.len() {
            0
        } else {
            idx
        }
    }

    /// Member owning the next position clockwise from `id`'s position.
    ///
    /// On a ring of one member this is the member itself.
    pub fn successor(&self, id: &str) -> Option<&Arc<M>> {
        if self.positions.is_empty() {
            return None;
        }
        let hash = self.hash_id(id);
        let idx = self
            .positions
            .partition_point(|p| p.cmp_key(hash, id).is_le());
        Some(self.at(idx).member())
    }

    /// Member owning the previous position counter-clockwise from `id`'s position.
    ///
    /// On a ring of one member this is the member itself.
    pub fn predecessor(&self, id: &str) -> Option<&Arc<M>> {
        if self.positions.is_empty() {
            return None;
        }
        let hash = self.hash_id(id);
        let idx = self
            .positions
            .partition_point(|p| p.cmp_key(hash, id).is_lt());
        let idx = if idx == 0 { self.positions.len() - 1 } else { idx - 1 };
        Some(self.positions[idx].member())
    }

    /// Members in ring order.
    pub fn members(&self) -> impl Iterator<Item = &Arc<M>> + '_ {
        self.positions.iter().map(RingPosition::member)
    }
}

impl<M: Member> std::fmt::Debug for HashRing<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashRing")
            .field("hasher", &self.hasher.name())
            .field("positions", &self.positions)
            .finish()
    }
}
