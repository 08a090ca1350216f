//! Network endpoint identity primitives for the strand P2P node.
//!
//! Every address, whatever its family, is canonicalized into a single
//! 16-byte IPv6-shaped buffer at construction: IPv4 under the standard
//! mapped prefix, Tor onion services under the OnionCat prefix, and
//! synthetic "internal" addresses (used to track logical sources such as
//! DNS seeds) under a hash-derived unique-local prefix. The family is
//! decided once, by prefix dispatch, and cached; everything downstream is
//! a pure function of the tag and the bytes.
//!
//! # Core Types
//!
//! - [`NetAddr`] - canonical address with classification predicates
//! - [`Subnet`] - contiguous-prefix subnet with validity tracking
//! - [`Endpoint`] - address plus port, convertible to socket addresses
//! - [`Reachability`] - ordinal score for advertising a local address
//! - [`SaltedState`] - salted SipHash state for hash containers
//!
//! All types are immutable values: cheap to copy, safe to share across
//! threads, and total under equality and ordering.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod addr;
mod endpoint;
mod reachability;
mod salted;
mod subnet;

pub use addr::{
    AddrParseError, INTERNAL_PREFIX, IPV4_IN_IPV6_PREFIX, NetAddr, Network, ONIONCAT_PREFIX,
};
pub use endpoint::Endpoint;
pub use reachability::Reachability;
pub use salted::SaltedState;
pub use subnet::Subnet;
