//! Network group bucketing for peer diversity.
//!
//! Outbound peer selection diversifies across network groups so that no
//! single origin can monopolize a node's connection slots. The group key
//! for an address comes either from an externally supplied AS-map (bucket
//! by autonomous system) or, without one, from a class-dependent address
//! prefix.
//!
//! # Core Types
//!
//! - [`NetGroup`] - opaque, ordered bucket key
//! - [`AsMap`] - lookup interface over the external AS-map trie
//! - [`net_group`] - derives the key for an address
//!
//! The AS-map itself (a serialized binary trie) is decoded elsewhere;
//! this crate only drives lookups through the [`AsMap`] seam.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod asmap;
mod group;

pub use asmap::{AsMap, NoAsMap, mapped_asn};
pub use group::{NetGroup, net_group};
