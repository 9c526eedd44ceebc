//! BLAKE3 hasher truncated to 64 bits.

use crate::hasher::traits::Hasher;

/// First 8 bytes of the BLAKE3 digest, read little endian.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Hash;

impl Hasher for Blake3Hash {
    fn sum64(&self, data: &[u8]) -> u64 {
        let hash = blake3::hash(data);
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    fn name(&self) -> &'static str {
        "blake3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spread() {
        let a = Blake3Hash.sum64(b"node-a");
        let b = Blake3Hash.sum64(b"node-b");
        assert_ne!(a, b);
        assert_eq!(a, Blake3Hash.sum64(b"node-a"));
    }
}
