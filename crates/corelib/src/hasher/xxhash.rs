//! xxHash based hashers.

use crate::hasher::traits::Hasher;
use xxhash_rust::xxh3::xxh3_64;
use xxhash_rust::xxh64::xxh64;

/// xxHash64 with a zero seed. The default hasher.
#[derive(Clone, Copy, Debug, Default)]
pub struct XxHash64;

impl Hasher for XxHash64 {
    fn sum64(&self, data: &[u8]) -> u64 {
        xxh64(data, 0)
    }

    fn name(&self) -> &'static str {
        "xxh64"
    }
}

/// XXH3 64-bit variant, faster on short keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3;

impl Hasher for Xxh3 {
    fn sum64(&self, data: &[u8]) -> u64 {
        xxh3_64(data)
    }

    fn name(&self) -> &'static str {
        "xxh3"
    }
}
