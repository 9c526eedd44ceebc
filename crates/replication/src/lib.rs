//! Capacity-aware partition distribution.
//!
//! This crate assigns every partition of a fixed-size table an ordered set
//! of distinct replica members:
//! - How many slots each member may take (quota strategies)
//! - Which members serve which partition (ring walk with overflow relaxation)
//! - Concurrent access to the resulting table

pub mod chash;
pub mod config;
pub mod distributor;
pub mod partition;
pub mod strategy;

pub use chash::CHash;
pub use config::{Config, MIN_PARTITION_COUNT};
pub use distributor::Distributor;
pub use partition::{PartitionTable, Replicas};
pub use strategy::{DistributionStrategy, ExactQuota, GenerousQuota};
