//! Concurrency-guarded partitioned ring.
//!
//! [`CHash`] ties the member registry, the ring and the partition table
//! together behind a single reader/writer lock. Mutations hold the write lock
//! for the whole call, including the redistribution pass, so readers never
//! observe a half-distributed table. Reads share the lock and never run the
//! distributor.

use crate::config::Config;
use crate::distributor::Distributor;
use crate::partition::{PartitionTable, Replicas};
use corelib::error::{Error, Result};
use corelib::hasher::Hasher;
use corelib::membership::MemberStore;
use corelib::node::Member;
use corelib::ring::HashRing;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

struct State<M: Member> {
    members: MemberStore<M>,
    ring: HashRing<M>,
    table: PartitionTable<M>,
}

/// Capacity-aware consistent hash over a fixed number of partitions.
///
/// # Example
///
/// ```rust
/// use corelib::Node;
/// use replication::{CHash, Config};
/// use std::sync::Arc;
///
/// let chash = CHash::new(Config::new(100, 2)).unwrap();
/// chash
///     .add_members(vec![Arc::new(Node::new("a", 1.0)), Arc::new(Node::new("b", 2.0))])
///     .unwrap();
///
/// let replicas = chash.get_members("user:42");
/// assert_eq!(replicas.len(), 2);
/// ```
pub struct CHash<M: Member> {
    partition_count: usize,
    replication_factor: usize,
    hasher: Arc<dyn Hasher>,
    distributor: Distributor,
    state: RwLock<State<M>>,
}

impl<M: Member> CHash<M> {
    /// Validate `config` and precompute the partition hashes.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let hasher = config.hasher_or_default();
        let partition_count = config.partition_count as usize;
        let state = State {
            members: MemberStore::new(),
            ring: HashRing::new(Arc::clone(&hasher)),
            table: PartitionTable::new(partition_count, &*hasher),
        };
        let distributor = Distributor::new(config.strategy_or_default());
        debug!(
            partition_count,
            replication_factor = config.effective_replication_factor(),
            hasher = hasher.name(),
            strategy = distributor.strategy_name(),
            "created partitioned ring"
        );
        Ok(Self {
            partition_count,
            replication_factor: config.effective_replication_factor(),
            hasher,
            distributor,
            state: RwLock::new(state),
        })
    }

    /// Add one or more members and redistribute.
    ///
    /// Fails with [`Error::InvalidCapacity`] if a capacity is not `> 0`, and
    /// with [`Error::MemberExists`] if an identity is already present or
    /// repeated in the batch. Nothing changes on failure.
    pub fn add_members<I>(&self, members: I) -> Result<()>
    where
        I: IntoIterator<Item = Arc<M>>,
    {
        let members: Vec<Arc<M>> = members.into_iter().collect();
        let mut state = self.state.write();
        state.members.check_new(&members)?;
        state.members.insert(&members);
        state.ring.insert(&members);
        debug!(added = members.len(), total = state.members.len(), "added members");
        self.redistribute(&mut state);
        Ok(())
    }

    /// Remove members by identity and redistribute.
    ///
    /// Fails with [`Error::MemberNotExists`] if any identity is unknown.
    /// Nothing changes on failure.
    pub fn remove_members<S: AsRef<str>>(&self, ids: &[S]) -> Result<()> {
        let mut state = self.state.write();
        state.members.check_known(ids)?;
        let ids: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
        state.ring.remove(&ids);
        state.members.remove(&ids);
        debug!(removed = ids.len(), total = state.members.len(), "removed members");
        self.redistribute(&mut state);
        Ok(())
    }

    /// Replace the whole member set.
    ///
    /// The resulting table is identical to the one produced by adding the
    /// same members to an empty ring.
    pub fn reconfigure<I>(&self, members: I) -> Result<()>
    where
        I: IntoIterator<Item = Arc<M>>,
    {
        let members: Vec<Arc<M>> = members.into_iter().collect();
        let mut state = self.state.write();
        MemberStore::check_capacities(&members)?;
        MemberStore::check_distinct(&members)?;
        state.members.clear();
        state.ring.clear();
        state.members.insert(&members);
        state.ring.insert(&members);
        debug!(total = members.len(), "reconfigured members");
        self.redistribute(&mut state);
        Ok(())
    }

    /// Recompute every partition.
    ///
    /// Needed after member capacities were changed in place.
    pub fn distribute(&self) {
        let mut state = self.state.write();
        self.redistribute(&mut state);
    }

    fn redistribute(&self, state: &mut State<M>) {
        let State { ring, table, .. } = state;
        self.distributor.distribute(ring, table, self.replication_factor);
    }

    /// Replicas responsible for `key`, primary first.
    ///
    /// The list is shared with the table; it is a snapshot that stays valid
    /// after later mutations but no longer reflects them.
    pub fn get_members(&self, key: &str) -> Replicas<M> {
        let partition = self.get_partition(key);
        let state = self.state.read();
        state.table.get(partition).cloned().unwrap_or_else(empty)
    }

    /// Partition of `key`: `hash(key) mod partition_count`.
    pub fn get_partition(&self, key: &str) -> usize {
        (self.hasher.sum64(key.as_bytes()) % self.partition_count as u64) as usize
    }

    /// Replicas of partition `index`, primary first.
    pub fn get_partition_members(&self, index: usize) -> Result<Replicas<M>> {
        let state = self.state.read();
        state
            .table
            .get(index)
            .map(Arc::clone)
            .ok_or(Error::PartitionNotExists(index))
    }

    /// Next member clockwise on the ring from member `id`.
    pub fn get_next(&self, id: &str) -> Result<Arc<M>> {
        let state = self.state.read();
        if !state.members.contains(id) {
            return Err(Error::MemberNotExists(id.to_owned()));
        }
        state
            .ring
            .successor(id)
            .map(Arc::clone)
            .ok_or_else(|| Error::MemberNotExists(id.to_owned()))
    }

    /// Previous member counter-clockwise on the ring from member `id`.
    pub fn get_prev(&self, id: &str) -> Result<Arc<M>> {
        let state = self.state.read();
        if !state.members.contains(id) {
            return Err(Error::MemberNotExists(id.to_owned()));
        }
        state
            .ring
            .predecessor(id)
            .map(Arc::clone)
            .ok_or_else(|| Error::MemberNotExists(id.to_owned()))
    }

    pub fn partition_count(&self) -> usize {
        self.partition_count
    }

    /// Configured replication factor (0 normalized to 1).
    pub fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    pub fn member_count(&self) -> usize {
        self.state.read().members.len()
    }

    pub fn get_member(&self, id: &str) -> Option<Arc<M>> {
        self.state.read().members.get(id).cloned()
    }

    /// Live members in ring order.
    pub fn members(&self) -> Vec<Arc<M>> {
        self.state.read().ring.members().cloned().collect()
    }

    /// Replica slots held by each member across the table, in ring order.
    pub fn partition_load(&self) -> Vec<(String, usize)> {
        let state = self.state.read();
        let mut load: HashMap<&str, usize> = HashMap::with_capacity(state.members.len());
        for replicas in state.table.iter() {
            for m in replicas.iter() {
                *load.entry(m.id()).or_default() += 1;
            }
        }
        state
            .ring
            .members()
            .map(|m| (m.id().to_owned(), load.get(m.id()).copied().unwrap_or(0)))
            .collect()
    }
}

fn empty<M: Member>() -> Replicas<M> {
    Arc::from(Vec::new())
}
