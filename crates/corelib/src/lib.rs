//! Core library for capacity-aware consistent hashing.
//!
//! This crate provides the building blocks the partition engine is made of:
//! - Pluggable 64-bit hashers
//! - The member capability and a ready-made node type
//! - The ring of member positions with successor/predecessor navigation
//! - The member registry with all-or-nothing batch validation

pub mod error;
pub mod hasher;
pub mod membership;
pub mod node;
pub mod ring;

pub use error::{Error, Result};
pub use hasher::Hasher;
pub use membership::MemberStore;
pub use node::{Member, Node};
pub use ring::{HashRing, Ring, RingPosition};
