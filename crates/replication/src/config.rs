//! Construction parameters for a partitioned ring.

use crate::strategy::{DistributionStrategy, GenerousQuota};
use corelib::error::{Error, Result};
use corelib::hasher::{default_hasher, Hasher};
use std::fmt;
use std::sync::Arc;

/// Smallest accepted partition count.
pub const MIN_PARTITION_COUNT: u64 = 10;

/// Configuration of a [`CHash`](crate::CHash).
///
/// # Example
///
/// ```rust
/// use replication::Config;
/// use corelib::hasher::SipHash13;
/// use std::sync::Arc;
///
/// let config = Config::new(1024, 3).with_hasher(Arc::new(SipHash13));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Config {
    /// How many partitions keys are spread over; reasonable values are 100 to 10k.
    pub partition_count: u64,
    /// How many distinct members each partition is assigned. 0 means 1.
    pub replication_factor: i64,
    /// Hash function for members, partitions and keys. xxHash64 when unset.
    pub hasher: Option<Arc<dyn Hasher>>,
    /// Quota policy. [`GenerousQuota`] when unset.
    pub strategy: Option<Arc<dyn DistributionStrategy>>,
}

impl Config {
    pub fn new(partition_count: u64, replication_factor: i64) -> Self {
        Self {
            partition_count,
            replication_factor,
            hasher: None,
            strategy: None,
        }
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn Hasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn DistributionStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Check the partition count and replication factor.
    pub fn validate(&self) -> Result<()> {
        if self.replication_factor < 0 {
            return Err(Error::Config(format!(
                "replication factor must be >= 1, got {}",
                self.replication_factor
            )));
        }
        if self.partition_count < MIN_PARTITION_COUNT {
            return Err(Error::Config(format!(
                "partition count must be >= {}, got {}",
                MIN_PARTITION_COUNT, self.partition_count
            )));
        }
        Ok(())
    }

    /// Replication factor with 0 normalized to 1.
    pub fn effective_replication_factor(&self) -> usize {
        self.replication_factor.max(1) as usize
    }

    pub(crate) fn hasher_or_default(&self) -> Arc<dyn Hasher> {
        self.hasher.clone().unwrap_or_else(default_hasher)
    }

    pub(crate) fn strategy_or_default(&self) -> Arc<dyn DistributionStrategy> {
        self.strategy
            .clone()
            .unwrap_or_else(|| Arc::new(GenerousQuota))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("partition_count", &self.partition_count)
            .field("replication_factor", &self.replication_factor)
            .field("hasher", &self.hasher.as_ref().map(|h| h.name()))
            .field("strategy", &self.strategy.as_ref().map(|s| s.name()))
            .finish()
    }
}
