//! Core hasher trait definitions.

/// Maps an arbitrary byte sequence to a 64-bit position.
///
/// Hashers are stateless and thread-safe, allowing concurrent hashing
/// from any number of readers without synchronization.
pub trait Hasher: Send + Sync + 'static {
    /// Hashes `data` to a 64-bit value.
    fn sum64(&self, data: &[u8]) -> u64;

    /// Returns the name of this hasher (for logging/debugging).
    fn name(&self) -> &'static str;
}
