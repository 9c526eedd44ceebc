//! Fixed-size partition table.
//!
//! Partition hashes are computed once at construction as `hash("p" + index)`.
//! Replica lists are replaced wholesale by every distribution pass; a list
//! handed out to a reader is an immutable snapshot that stays valid after
//! the table moves on.

use corelib::hasher::Hasher;
use corelib::node::Member;
use std::sync::Arc;

/// Ordered replica list of one partition, primary first.
pub type Replicas<M> = Arc<[Arc<M>]>;

#[allow(clippy::len_without_is_empty)]
pub struct PartitionTable<M: Member> {
    hashes: Vec<u64>,
    replicas: Vec<Replicas<M>>,
}

impl<M: Member> PartitionTable<M> {
    /// Precompute `count` partition hashes with `hasher`; every replica list starts empty.
    pub fn new(count: usize, hasher: &dyn Hasher) -> Self {
        let hashes = (0..count)
            .map(|i| hasher.sum64(format!("p{}", i).as_bytes()))
            .collect();
        let empty: Replicas<M> = Arc::from(Vec::new());
        Self {
            hashes,
            replicas: vec![empty; count],
        }
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Fixed hash of partition `index`.
    pub fn hash(&self, index: usize) -> u64 {
        self.hashes[index]
    }

    /// Replica list of partition `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&Replicas<M>> {
        self.replicas.get(index)
    }

    /// Replace the replica list of partition `index`.
    pub fn set(&mut self, index: usize, replicas: Replicas<M>) {
        self.replicas[index] = replicas;
    }

    /// Empty every replica list.
    pub fn clear(&mut self) {
        let empty: Replicas<M> = Arc::from(Vec::new());
        for slot in &mut self.replicas {
            *slot = Arc::clone(&empty);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Replicas<M>> + '_ {
        self.replicas.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::hasher::XxHash64;
    use corelib::node::Node;

    #[test]
    fn test_partition_hashes() {
        let table: PartitionTable<Node> = PartitionTable::new(16, &XxHash64);
        assert_eq!(table.len(), 16);
        assert_eq!(table.hash(3), XxHash64.sum64(b"p3"));
        assert!(table.iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_set_and_clear() {
        let mut table = PartitionTable::new(10, &XxHash64);
        let node = Arc::new(Node::new("a", 1.0));
        table.set(2, Arc::from(vec![Arc::clone(&node)]));

        let snapshot = Arc::clone(table.get(2).unwrap());
        table.clear();

        assert!(table.get(2).unwrap().is_empty());
        // Readers keep the list they were handed.
        assert_eq!(snapshot[0].id(), "a");
        assert!(table.get(10).is_none());
    }
}
