//! Hash function abstraction for ring placement.
//!
//! Every position on the ring, every partition and every lookup key is mapped
//! to a `u64` through a [`Hasher`]. The ring stays correct for any hash with
//! reasonable avalanche behaviour; [`XxHash64`] is the default.

pub mod blake;
pub mod sip;
pub mod traits;
pub mod xxhash;

pub use blake::Blake3Hash;
pub use sip::SipHash13;
pub use traits::Hasher;
pub use xxhash::{Xxh3, XxHash64};

use std::sync::Arc;

/// The hasher used when a configuration does not supply one.
pub fn default_hasher() -> Arc<dyn Hasher> {
    Arc::new(XxHash64)
}
