//! Error types for the core library.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or mutating a partitioned ring.
///
/// Every failure is reported before any state is touched, so a returned
/// error always means the call had no effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Invalid partition count or replication factor
    #[error("invalid configuration: {0}")]
    Config(String),
    /// A member was supplied with a capacity that is not strictly positive
    #[error("member {id:?} capacity must be > 0, got {capacity}")]
    InvalidCapacity { id: String, capacity: f64 },
    /// A member with this identity is already part of the ring
    #[error("member {0:?} exists")]
    MemberExists(String),
    /// No member with this identity is part of the ring
    #[error("member {0:?} does not exist")]
    MemberNotExists(String),
    /// Partition index outside `[0, partition_count)`
    #[error("partition {0} does not exist")]
    PartitionNotExists(usize),
}
