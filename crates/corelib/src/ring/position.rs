//! Ring position implementation.

use crate::node::Member;
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// A virtual position of a member on the ring.
///
/// Positions order by hash first and member identity second, so members
/// whose identities collide on the same hash still have a total order.
pub struct RingPosition<M: Member> {
    hash: u64,
    member: Arc<M>,
}

impl<M: Member> RingPosition<M> {
    /// Creates a new position for `member` at `hash`.
    pub fn new(hash: u64, member: Arc<M>) -> Self {
        Self { hash, member }
    }

    /// Position of this entry on the ring.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// The member owning this position.
    #[inline]
    pub fn member(&self) -> &Arc<M> {
        &self.member
    }

    /// Identity of the owning member.
    #[inline]
    pub fn id(&self) -> &str {
        self.member.id()
    }

    /// Compares this position against a `(hash, id)` key.
    #[inline]
    pub fn cmp_key(&self, hash: u64, id: &str) -> Ordering {
        self.hash.cmp(&hash).then_with(|| self.id().cmp(id))
    }
}

impl<M: Member> Clone for RingPosition<M> {
    fn clone(&self) -> Self {
        Self {
            hash: self.hash,
            member: Arc::clone(&self.member),
        }
    }
}

impl<M: Member> PartialEq for RingPosition<M> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<M: Member> Eq for RingPosition<M> {}

impl<M: Member> PartialOrd for RingPosition<M> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<M: Member> Ord for RingPosition<M> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_key(other.hash, other.id())
    }
}

impl<M: Member> Debug for RingPosition<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingPosition")
            .field("hash", &format_args!("{:016x}", self.hash))
            .field("member", &self.id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn pos(hash: u64, id: &str) -> RingPosition<Node> {
        RingPosition::new(hash, Arc::new(Node::new(id, 1.0)))
    }

    #[test]
    fn test_position_ordering() {
        assert!(pos(100, "b") < pos(200, "a"));
        // Equal hashes fall back to identity.
        assert!(pos(100, "a") < pos(100, "b"));
        assert_eq!(pos(100, "a"), pos(100, "a"));
    }

    #[test]
    fn test_cmp_key() {
        let p = pos(100, "m");
        assert_eq!(p.cmp_key(100, "m"), Ordering::Equal);
        assert_eq!(p.cmp_key(100, "z"), Ordering::Less);
        assert_eq!(p.cmp_key(99, "z"), Ordering::Greater);
    }
}
