use strand_net_addr::{IPV4_IN_IPV6_PREFIX, NetAddr, Network};
use tracing::trace;

/// Lookup interface over an externally supplied AS-map: a validated,
/// serialized binary trie mapping IP bit-prefixes to autonomous system
/// numbers. This crate never inspects the trie encoding; it only asks for
/// lookups.
pub trait AsMap {
    /// True if the map holds no entries. Bucketing then falls back to
    /// structural prefix groups.
    fn is_empty(&self) -> bool;

    /// Maps a 128-bit address, most significant bit first, to an AS
    /// number. Returns 0 when no entry matches (AS 0 is reserved per
    /// RFC 7607, so it can never be a real mapping).
    fn interpret(&self, ip_bits: &[bool; 128]) -> u32;
}

impl<M: AsMap + ?Sized> AsMap for &M {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn interpret(&self, ip_bits: &[bool; 128]) -> u32 {
        (**self).interpret(ip_bits)
    }
}

/// The always-empty map, for callers that have not loaded one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAsMap;

impl AsMap for NoAsMap {
    fn is_empty(&self) -> bool {
        true
    }

    fn interpret(&self, _ip_bits: &[bool; 128]) -> u32 {
        0
    }
}

/// The autonomous system `addr` belongs to, if the map knows one.
///
/// Only the IPv4 and IPv6 classes participate: Tor, internal and
/// unroutable addresses have no meaningful AS. Addresses with an embedded
/// IPv4 payload are looked up as if they were that plain IPv4 address
/// (mapped prefix plus the 32 payload bits), so a Teredo client and its
/// native IPv4 address land on the same AS.
pub fn mapped_asn<M: AsMap>(addr: &NetAddr, asmap: &M) -> Option<u32> {
    if asmap.is_empty() {
        return None;
    }
    if !matches!(addr.network_class(), Network::Ipv4 | Network::Ipv6) {
        return None;
    }
    let bits = lookup_bits(addr);
    match asmap.interpret(&bits) {
        0 => None,
        asn => {
            trace!(%addr, asn, "address mapped to autonomous system");
            Some(asn)
        }
    }
}

/// The 128-bit lookup vector for `addr`, most significant bit first.
fn lookup_bits(addr: &NetAddr) -> [bool; 128] {
    let mut bits = [false; 128];
    match addr.linked_ipv4() {
        Some(ipv4) if addr.is_routable() => {
            let (prefix, payload) = bits.split_at_mut(96);
            expand(prefix, &IPV4_IN_IPV6_PREFIX);
            expand(payload, &ipv4.to_be_bytes());
        }
        _ => expand(&mut bits, addr.as_bytes()),
    }
    bits
}

fn expand(dst: &mut [bool], bytes: &[u8]) {
    for (chunk, byte) in dst.chunks_mut(8).zip(bytes) {
        for (i, bit) in chunk.iter_mut().enumerate() {
            *bit = (byte >> (7 - i)) & 1 == 1;
        }
    }
}
