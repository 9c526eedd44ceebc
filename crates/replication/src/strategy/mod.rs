//! Quota strategies.
//!
//! A distribution pass needs `partition_count * rf` replica slots filled.
//! Strategies decide how many of those slots ("pieces") each member may take,
//! proportionally to its capacity. The ring walk that consumes the quotas is
//! shared and lives in [`crate::distributor`].
//!
//! - **GenerousQuota**: `floor(share) + 1` for every member (default)
//! - **ExactQuota**: `floor(share)`, remainder handed out round-robin in ring order
//!
//! # Termination contract
//!
//! The ring walk only terminates if, before every partition, at least one
//! member still has a positive quota. A strategy must therefore return quotas
//! whose sum is at least `slots`.

pub mod exact;
pub mod generous;

pub use exact::ExactQuota;
pub use generous::GenerousQuota;

/// Trait for quota strategies.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (Send + Sync) as they are shared by
/// every handle built from the same configuration.
pub trait DistributionStrategy: Send + Sync + 'static {
    /// Compute per-member quotas.
    ///
    /// # Arguments
    /// * `capacities` - Strictly positive member capacities, in ring order
    /// * `slots` - Replica slots to fill (`partition_count * effective rf`)
    ///
    /// # Returns
    /// One quota per entry of `capacities`, same order. The sum must be `>= slots`.
    fn quotas(&self, capacities: &[f64], slots: u64) -> Vec<i64>;

    /// Get the strategy name (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// `floor(capacity / total * slots)` for every member, clamped to `[0, slots]`.
///
/// The share is divided before it is scaled so huge capacities cannot
/// overflow. If the capacities themselves sum past `f64::MAX`, they are
/// first scaled down by the largest one.
pub(crate) fn floor_shares(capacities: &[f64], slots: u64) -> Vec<i64> {
    let mut scale = 1.0;
    let mut total: f64 = capacities.iter().sum();
    if total.is_infinite() {
        scale = capacities.iter().copied().fold(0.0, f64::max);
        total = capacities.iter().map(|c| c / scale).sum();
    }
    let slots = slots as f64;
    capacities
        .iter()
        .map(|c| ((c / scale) / total * slots).floor().clamp(0.0, slots) as i64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_shares_huge_capacities() {
        assert_eq!(floor_shares(&[1e308], 10), vec![10]);
        assert_eq!(floor_shares(&[1e308, 1e307], 10), vec![9, 0]);
        // The sum overflows f64; equal members still split evenly.
        assert_eq!(floor_shares(&[f64::MAX, f64::MAX], 10), vec![5, 5]);
    }

    #[test]
    fn test_floor_shares_stay_within_slots() {
        let shares = floor_shares(&[1e-300, 1.0, 1e300], 1000);
        assert!(shares.iter().all(|s| (0..=1000).contains(s)));
        assert_eq!(shares[2], 1000);
    }
}
