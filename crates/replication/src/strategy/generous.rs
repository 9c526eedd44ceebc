//! Generous quota strategy.
//!
//! Every member gets its floor-rounded share plus one. Even the smallest
//! member takes part in a pass, and the quota sum is strictly above the slot
//! count.

use crate::strategy::{floor_shares, DistributionStrategy};

/// `floor(slots * capacity / total) + 1` pieces per member.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerousQuota;

impl DistributionStrategy for GenerousQuota {
    fn quotas(&self, capacities: &[f64], slots: u64) -> Vec<i64> {
        let mut quotas = floor_shares(capacities, slots);
        for q in &mut quotas {
            *q = q.saturating_add(1);
        }
        quotas
    }

    fn name(&self) -> &'static str {
        "GenerousQuota"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generous_quotas() {
        // 10 partitions, rf 3, capacities 1, 0.5, 1.
        let quotas = GenerousQuota.quotas(&[1.0, 0.5, 1.0], 30);
        assert_eq!(quotas, vec![13, 7, 13]);
        assert!(quotas.iter().sum::<i64>() > 30);
    }

    #[test]
    fn test_smallest_member_gets_a_piece() {
        let quotas = GenerousQuota.quotas(&[1000.0, 0.001], 10);
        assert_eq!(quotas[1], 1);
    }

    #[test]
    fn test_huge_capacities() {
        assert_eq!(GenerousQuota.quotas(&[1e308], 10), vec![11]);
        assert_eq!(GenerousQuota.quotas(&[1e308, 1e307], 10), vec![10, 1]);
    }
}
