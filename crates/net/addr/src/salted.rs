use std::hash::BuildHasher;

use rand::Rng;
use siphasher::sip::SipHasher24;

/// [`BuildHasher`] keyed with a random per-instance salt, for hash
/// containers keyed by [`NetAddr`](crate::NetAddr), [`Subnet`](crate::Subnet)
/// or [`Endpoint`](crate::Endpoint).
///
/// The salt stops an attacker who controls address insertions from
/// forcing pathological bucket collisions. SipHash-2-4 over the values'
/// `Hash` serialization; never used for protocol or security decisions.
#[derive(Debug, Clone, Copy)]
pub struct SaltedState {
    k0: u64,
    k1: u64,
}

impl SaltedState {
    /// Fresh state with random keys.
    pub fn new() -> Self {
        let mut rng = rand::rng();
        Self {
            k0: rng.random(),
            k1: rng.random(),
        }
    }

    /// State with caller-chosen keys, for deterministic tests or
    /// persisted orderings.
    pub const fn with_keys(k0: u64, k1: u64) -> Self {
        Self { k0, k1 }
    }
}

impl Default for SaltedState {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildHasher for SaltedState {
    type Hasher = SipHasher24;

    fn build_hasher(&self) -> SipHasher24 {
        SipHasher24::new_with_keys(self.k0, self.k1)
    }
}
