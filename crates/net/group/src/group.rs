use bytes::{BufMut, Bytes, BytesMut};
use strand_net_addr::{INTERNAL_PREFIX, NetAddr, Network};

use crate::asmap::{AsMap, mapped_asn};

/// Opaque bucket key identifying an address's network group.
///
/// Equality and ordering are plain byte-sequence semantics: two addresses
/// with equal keys count as one origin for peer-diversity purposes. Keys
/// are assigned so that acquiring addresses across many groups is costly
/// for an attacker, while acquiring many addresses inside one group stays
/// cheap and useless.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetGroup(Bytes);

impl NetGroup {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for NetGroup {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Derives the group key for `addr`.
///
/// With a non-empty AS-map and an AS-mappable address, the key is the
/// autonomous system number (IPv4 and IPv6 addresses on the same AS
/// deliberately share a bucket: the defense is against control of many
/// origins, not address families). Otherwise the key is the network class
/// followed by a class-dependent number of address prefix bits:
///
/// - local and unroutable addresses: no bits (one bucket each)
/// - internal addresses: all 80 name-hash bits (every name its own bucket)
/// - anything with an embedded IPv4 payload: the payload's /16
/// - Tor: 4 bits of onion key material
/// - Hurricane Electric tunnel space: /36
/// - all other IPv6: /32
pub fn net_group<M: AsMap>(addr: &NetAddr, asmap: &M) -> NetGroup {
    let mut key = BytesMut::new();

    if let Some(asn) = mapped_asn(addr, asmap) {
        key.put_u8(Network::Ipv6 as u8);
        key.put_slice(&asn.to_le_bytes());
        return NetGroup(key.freeze());
    }

    key.put_u8(addr.network_class() as u8);
    let mut start = 0;
    let bits;

    if addr.is_local() {
        bits = 0;
    } else if addr.is_internal() {
        start = INTERNAL_PREFIX.len();
        bits = (16 - INTERNAL_PREFIX.len()) * 8;
    } else if !addr.is_routable() {
        bits = 0;
    } else if let Some(ipv4) = addr.linked_ipv4() {
        // embedded IPv4 payloads group at /16
        key.put_u8((ipv4 >> 24) as u8);
        key.put_u8((ipv4 >> 16) as u8);
        return NetGroup(key.freeze());
    } else if addr.is_tor() {
        start = 6;
        bits = 4;
    } else if addr.is_hurricane_electric() {
        bits = 36;
    } else {
        bits = 32;
    }

    let mut remaining = bits;
    for &byte in addr.as_bytes().iter().skip(start) {
        if remaining >= 8 {
            key.put_u8(byte);
            remaining -= 8;
        } else {
            // the trailing partial byte gets its unused low bits forced
            // to 1, so equal prefixes compare equal without a bit count
            if remaining > 0 {
                key.put_u8(byte | ((1u8 << (8 - remaining)) - 1));
            }
            break;
        }
    }

    NetGroup(key.freeze())
}
