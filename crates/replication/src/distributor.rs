//! Capacity-aware replica distribution.
//!
//! # Algorithm
//!
//! 1. With no members, every partition gets an empty replica list.
//! 2. `rf = min(replication_factor, members)`; each member receives a quota
//!    from the configured [`DistributionStrategy`].
//! 3. For every partition, in index order, start at the first ring position
//!    whose hash is `>=` the partition hash and walk clockwise (wrapping at
//!    the end) until `rf` distinct members are chosen:
//!    - a member already chosen for this partition is skipped and bumps the
//!      partition's `overflow` counter;
//!    - any other member is chosen iff `quota > -overflow`, consuming one
//!      unit of quota.
//! 4. The chosen members, in walk order, become the partition's replicas
//!    (primary first).
//!
//! Overflow only grows while the walk keeps meeting members it already took,
//! so exhausted members become eligible again once the ring has been circled
//! enough times. Combined with a quota sum `>= slots` this guarantees every
//! walk terminates.
//!
//! Quotas and overflow counters live only for the duration of one pass.
//!
//! # Performance
//!
//! O(P * (log n + w)) where P = partitions, n = members and w is the walk
//! length, which stays close to `rf` while quotas are not exhausted.

use crate::partition::{PartitionTable, Replicas};
use crate::strategy::DistributionStrategy;
use corelib::node::Member;
use corelib::ring::HashRing;
use metrics::{counter, gauge, histogram};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Recomputes a whole partition table from a ring.
#[derive(Clone)]
pub struct Distributor {
    strategy: Arc<dyn DistributionStrategy>,
}

impl Distributor {
    pub fn new(strategy: Arc<dyn DistributionStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Assign `min(replication_factor, ring.len())` distinct members to every partition.
    pub fn distribute<M: Member>(
        &self,
        ring: &HashRing<M>,
        table: &mut PartitionTable<M>,
        replication_factor: usize,
    ) {
        let started = Instant::now();
        gauge!("chash_members").set(ring.len() as f64);

        if ring.is_empty() {
            table.clear();
            counter!("chash_distributions_total").increment(1);
            debug!("ring is empty, cleared every partition");
            return;
        }

        let rf = replication_factor.min(ring.len());
        let capacities = capacities(ring);
        let slots = table.len() as u64 * rf as u64;
        let mut pieces = self.strategy.quotas(&capacities, slots);
        for (pos, quota) in ring.positions().iter().zip(&pieces) {
            trace!(member = pos.id(), quota, "member quota");
        }

        let mut chosen = Vec::with_capacity(rf);
        for index in 0..table.len() {
            fill(ring, table.hash(index), rf, &mut pieces, &mut chosen);
            let replicas: Replicas<M> = chosen
                .iter()
                .map(|&i| Arc::clone(ring.at(i).member()))
                .collect();
            table.set(index, replicas);
        }

        let elapsed = started.elapsed();
        counter!("chash_distributions_total").increment(1);
        histogram!("chash_distribution_seconds").record(elapsed.as_secs_f64());
        debug!(
            members = ring.len(),
            rf,
            partitions = table.len(),
            total_capacity = capacities.iter().sum::<f64>(),
            strategy = self.strategy.name(),
            ?elapsed,
            "distributed partitions"
        );
    }
}

/// Member capacities in ring order.
///
/// Summing in ring order keeps the floating point total independent of
/// insertion history. Capacities that turned invalid after admission (they
/// can be changed in place) are treated as zero; if nothing valid is left
/// every member counts equally. A total past `f64::MAX` is handled by the
/// quota strategies.
fn capacities<M: Member>(ring: &HashRing<M>) -> Vec<f64> {
    let mut capacities: Vec<f64> = ring
        .members()
        .map(|m| {
            let c = m.capacity();
            if c > 0.0 && c.is_finite() {
                c
            } else {
                warn!(member = m.id(), capacity = c, "ignoring invalid capacity");
                0.0
            }
        })
        .collect();
    let total: f64 = capacities.iter().sum();
    if !(total > 0.0) {
        capacities.iter_mut().for_each(|c| *c = 1.0);
    }
    capacities
}

/// Walk the ring from `hash`, collecting `rf` distinct ring indices into `chosen`.
fn fill<M: Member>(
    ring: &HashRing<M>,
    hash: u64,
    rf: usize,
    pieces: &mut [i64],
    chosen: &mut Vec<usize>,
) {
    chosen.clear();
    let mut idx = ring.search(hash);
    let mut overflow: i64 = 0;
    while chosen.len() < rf {
        if idx == ring.len() {
            idx = 0;
        }
        if chosen.contains(&idx) {
            overflow += 1;
        } else if pieces[idx] > -overflow {
            pieces[idx] -= 1;
            chosen.push(idx);
        }
        idx += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{ExactQuota, GenerousQuota};
    use corelib::hasher::XxHash64;
    use corelib::node::Node;
    use std::collections::HashSet;

    fn ring_of(spec: &[(&str, f64)]) -> HashRing<Node> {
        let mut ring = HashRing::new(Arc::new(XxHash64));
        let members: Vec<_> = spec
            .iter()
            .map(|(id, c)| Arc::new(Node::new(*id, *c)))
            .collect();
        ring.insert(&members);
        ring
    }

    #[test]
    fn test_fill_picks_distinct_members() {
        let ring = ring_of(&[("a", 1.0), ("b", 1.0), ("c", 1.0)]);
        let mut pieces = vec![10, 10, 10];
        let mut chosen = Vec::new();
        fill(&ring, 0, 3, &mut pieces, &mut chosen);
        assert_eq!(chosen, vec![0, 1, 2]);
        assert_eq!(pieces, vec![9, 9, 9]);
    }

    #[test]
    fn test_fill_skips_exhausted_member() {
        let ring = ring_of(&[("a", 1.0), ("b", 1.0), ("c", 1.0)]);
        let mut pieces = vec![0, 5, 5];
        let mut chosen = Vec::new();
        fill(&ring, 0, 2, &mut pieces, &mut chosen);
        assert_eq!(chosen, vec![1, 2]);
        assert_eq!(pieces, vec![0, 4, 4]);
    }

    #[test]
    fn test_fill_overflow_relaxes_quota() {
        let ring = ring_of(&[("a", 1.0), ("b", 1.0), ("c", 1.0)]);
        // Only one member has quota left, the others need the overflow relaxation.
        let mut pieces = vec![0, 0, 1];
        let mut chosen = Vec::new();
        fill(&ring, 0, 3, &mut pieces, &mut chosen);
        let distinct: HashSet<_> = chosen.iter().collect();
        assert_eq!(distinct.len(), 3);
        assert_eq!(chosen[0], 2);
        assert_eq!(pieces, vec![-1, -1, 0]);
    }

    #[test]
    fn test_distribute_fills_every_partition() {
        let ring = ring_of(&[("1", 1.0), ("3", 0.5), ("4", 1.0)]);
        let mut table = PartitionTable::new(10, &XxHash64);
        for strategy in [
            Arc::new(GenerousQuota) as Arc<dyn DistributionStrategy>,
            Arc::new(ExactQuota),
        ] {
            Distributor::new(strategy).distribute(&ring, &mut table, 3);
            for replicas in table.iter() {
                let ids: HashSet<_> = replicas.iter().map(|m| m.id()).collect();
                assert_eq!(ids.len(), 3);
            }
        }
    }

    #[test]
    fn test_distribute_caps_rf_at_member_count() {
        let ring = ring_of(&[("a", 1.0), ("b", 2.0)]);
        let mut table = PartitionTable::new(20, &XxHash64);
        Distributor::new(Arc::new(GenerousQuota)).distribute(&ring, &mut table, 5);
        assert!(table.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn test_invalid_capacities_fall_back_to_equal_weights() {
        let ring = ring_of(&[("a", 1.0), ("b", 1.0)]);
        for m in ring.members() {
            m.set_capacity(0.0);
        }
        assert_eq!(capacities(&ring), vec![1.0, 1.0]);

        let mut table = PartitionTable::new(10, &XxHash64);
        Distributor::new(Arc::new(GenerousQuota)).distribute(&ring, &mut table, 2);
        assert!(table.iter().all(|r| r.len() == 2));
    }
}
