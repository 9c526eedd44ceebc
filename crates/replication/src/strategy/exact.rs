//! Exact quota strategy.
//!
//! Floor-rounded shares lose up to one piece per member. This strategy hands
//! the missing pieces back one at a time, walking members in ring order, so
//! quotas add up to exactly the number of slots.

use crate::strategy::{floor_shares, DistributionStrategy};

/// Floor-rounded shares topped up round-robin to exactly `slots`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactQuota;

impl DistributionStrategy for ExactQuota {
    fn quotas(&self, capacities: &[f64], slots: u64) -> Vec<i64> {
        let mut quotas = floor_shares(capacities, slots);
        if quotas.is_empty() {
            return quotas;
        }
        let assigned = quotas.iter().fold(0i64, |sum, q| sum.saturating_add(*q));
        let deficit = (slots as i64).saturating_sub(assigned).max(0) as usize;
        let n = quotas.len();
        for i in 0..deficit {
            quotas[i % n] += 1;
        }
        quotas
    }

    fn name(&self) -> &'static str {
        "ExactQuota"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_sum() {
        let quotas = ExactQuota.quotas(&[1.0, 0.5, 1.0], 30);
        // Shares are 12, 6, 12 with no remainder.
        assert_eq!(quotas, vec![12, 6, 12]);

        let quotas = ExactQuota.quotas(&[1.0, 1.0, 1.0], 10);
        assert_eq!(quotas, vec![4, 3, 3]);
        assert_eq!(quotas.iter().sum::<i64>(), 10);
    }

    #[test]
    fn test_huge_capacities() {
        let quotas = ExactQuota.quotas(&[1e308, 1e307], 10);
        assert_eq!(quotas, vec![10, 0]);
        assert_eq!(quotas.iter().sum::<i64>(), 10);
    }

    #[test]
    fn test_empty() {
        assert!(ExactQuota.quotas(&[], 10).is_empty());
    }
}
