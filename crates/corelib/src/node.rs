//! Member abstractions for the partitioned ring.
//!
//! A member is any caller-owned object that exposes a stable identity and a
//! relative capacity. The ring never copies or mutates members; it only keeps
//! shared references to them.

use crossbeam::atomic::AtomicCell;
use std::fmt;

/// A participant of the ring.
///
/// `capacity` is an opaque relative weight (disk size, QPS budget, ...). Only
/// its ratio to the total capacity matters, and it must be strictly positive
/// to be accepted.
pub trait Member: Send + Sync + 'static {
    /// Unique identity of this member.
    fn id(&self) -> &str;

    /// Relative capacity of this member.
    fn capacity(&self) -> f64;
}

/// Ready-made member with an in-place adjustable capacity.
///
/// Changing the capacity is not observed by the ring automatically; call
/// `distribute` on the owning handle afterwards.
#[derive(Debug)]
pub struct Node {
    id: String,
    capacity: AtomicCell<f64>,
}

impl Node {
    /// Construct a new node.
    pub fn new(id: impl Into<String>, capacity: f64) -> Self {
        Self {
            id: id.into(),
            capacity: AtomicCell::new(capacity),
        }
    }

    /// Replace the capacity, returning the previous value.
    pub fn set_capacity(&self, capacity: f64) -> f64 {
        self.capacity.swap(capacity)
    }
}

impl Member for Node {
    fn id(&self) -> &str {
        &self.id
    }

    fn capacity(&self) -> f64 {
        self.capacity.load()
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        Self::new(self.id.clone(), self.capacity())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.id, self.capacity())
    }
}
