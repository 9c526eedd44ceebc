//! Consistent hash ring implementation.
//!
//! The ring keeps one position per live member, hashed from the member's
//! identity, and answers "first position at or after h" as well as
//! successor/predecessor queries between members.

pub mod position;
#[allow(clippy::module_inception)]
pub mod ring;

pub use position::RingPosition;
pub use ring::HashRing;

/// Alias for the main ring type (used by lib.rs).
pub type Ring<M> = HashRing<M>;
