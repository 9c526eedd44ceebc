//! SipHash-1-3 hasher.

use crate::hasher::traits::Hasher;
use siphasher::sip::SipHasher13;
use std::hash::Hasher as _;

/// SipHash-1-3 with zero keys.
///
/// Slower than xxHash but resistant to hash flooding when keys come from
/// untrusted clients.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipHash13;

impl Hasher for SipHash13 {
    fn sum64(&self, data: &[u8]) -> u64 {
        let mut hasher = SipHasher13::new();
        hasher.write(data);
        hasher.finish()
    }

    fn name(&self) -> &'static str {
        "siphash13"
    }
}
