use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use data_encoding::BASE32_NOPAD;
use sha2::{Digest, Sha256};

/// Prefix under which IPv4 addresses are embedded in the 16-byte buffer
/// (the standard `::ffff:0:0/96` IPv4-mapped range).
pub const IPV4_IN_IPV6_PREFIX: [u8; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff];

/// OnionCat prefix (`fd87:d87e:eb43::/48`) under which Tor onion service
/// keys are embedded. Falls inside the RFC 4193 unique-local range, so
/// these dummy addresses can never collide with routable IPv6 space.
pub const ONIONCAT_PREFIX: [u8; 6] = [0xfd, 0x87, 0xd8, 0x7e, 0xeb, 0x43];

/// Prefix for synthetic internal addresses (`fd6b:88c0:8724::/48`):
/// `0xFD` followed by `sha256("bitcoin")[0..5]`. Also unique-local, so
/// guaranteed non-routable.
pub const INTERNAL_PREFIX: [u8; 6] = [0xfd, 0x6b, 0x88, 0xc0, 0x87, 0x24];

const ONION_SUFFIX: &str = ".onion";

/// Network family of a [`NetAddr`].
///
/// The discriminant values are stable: they are the leading tag byte of
/// group keys produced by the grouping engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Network {
    /// Valid but not publicly reachable. Never stored on an address;
    /// only produced by [`NetAddr::network_class`].
    Unroutable = 0,
    Ipv4 = 1,
    Ipv6 = 2,
    /// Tor onion service, embedded under the OnionCat prefix.
    Onion = 3,
    /// Synthetic name-derived address, embedded under the internal prefix.
    Internal = 4,
}

/// Failure to build a [`NetAddr`] from one of the special textual forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddrParseError {
    #[error("internal address name is empty")]
    EmptyInternalName,
    #[error("onion address must end with `.onion`")]
    MissingOnionSuffix,
    #[error("invalid base32 in onion address: {0}")]
    InvalidBase32(#[from] data_encoding::DecodeError),
    #[error("onion payload must be 10 bytes, got {0}")]
    OnionPayloadLength(usize),
}

/// A canonicalized network address.
///
/// All families share a single 16-byte IPv6-shaped buffer: IPv4 lives
/// under [`IPV4_IN_IPV6_PREFIX`], Tor under [`ONIONCAT_PREFIX`] and
/// internal addresses under [`INTERNAL_PREFIX`]. The family tag is derived
/// from the byte pattern once, at construction, and is always recomputable
/// from the bytes alone (no two families share a prefix).
///
/// Immutable value type; equality, ordering and hashing cover the family
/// tag and the bytes but not the IPv6 scope id.
#[derive(Debug, Clone, Copy)]
pub struct NetAddr {
    pub(crate) net: Network,
    pub(crate) addr: [u8; 16],
    pub(crate) scope_id: u32,
}

impl NetAddr {
    /// Derives the family from the 16-byte pattern. This three-way prefix
    /// dispatch is the canonicalization step; nothing else assigns a family.
    fn classify(addr: &[u8; 16]) -> Network {
        if addr.starts_with(&IPV4_IN_IPV6_PREFIX) {
            Network::Ipv4
        } else if addr.starts_with(&ONIONCAT_PREFIX) {
            Network::Onion
        } else if addr.starts_with(&INTERNAL_PREFIX) {
            Network::Internal
        } else {
            Network::Ipv6
        }
    }

    /// Reuses already-classified bytes, preserving the family tag. Used by
    /// subnet normalization, where masking must not re-derive the family.
    pub(crate) const fn from_raw(net: Network, addr: [u8; 16], scope_id: u32) -> Self {
        Self { net, addr, scope_id }
    }

    /// Builds the IPv4-mapped form.
    pub fn from_ipv4(addr: Ipv4Addr) -> Self {
        Self::from_ipv6(addr.to_ipv6_mapped(), 0)
    }

    /// Canonicalizes 16 raw bytes, dispatching on the embedded prefixes.
    /// `scope_id` is the IPv6 zone index, meaningful for plain IPv6 only.
    pub fn from_ipv6(addr: Ipv6Addr, scope_id: u32) -> Self {
        let octets = addr.octets();
        Self {
            net: Self::classify(&octets),
            addr: octets,
            scope_id,
        }
    }

    /// Builds a synthetic address from a logical name:
    /// [`INTERNAL_PREFIX`] followed by `sha256(name)[0..10]`.
    ///
    /// Deterministic, so the same name always maps to the same address.
    /// Lets a node track distinct logical sources (e.g. DNS seeds) without
    /// consuming a real address slot.
    pub fn from_internal_name(name: &str) -> Result<Self, AddrParseError> {
        if name.is_empty() {
            return Err(AddrParseError::EmptyInternalName);
        }
        let digest = Sha256::digest(name.as_bytes());
        let mut addr = [0u8; 16];
        addr[..6].copy_from_slice(&INTERNAL_PREFIX);
        addr[6..].copy_from_slice(&digest[..10]);
        Ok(Self {
            net: Network::Internal,
            addr,
            scope_id: 0,
        })
    }

    /// Parses a `<base32>.onion` address into its OnionCat form. The
    /// decoded payload must be exactly 10 bytes of onion service key.
    pub fn from_onion(text: &str) -> Result<Self, AddrParseError> {
        let payload = text
            .strip_suffix(ONION_SUFFIX)
            .ok_or(AddrParseError::MissingOnionSuffix)?;
        let decoded = BASE32_NOPAD.decode(payload.to_ascii_uppercase().as_bytes())?;
        if decoded.len() != 10 {
            return Err(AddrParseError::OnionPayloadLength(decoded.len()));
        }
        let mut addr = [0u8; 16];
        addr[..6].copy_from_slice(&ONIONCAT_PREFIX);
        addr[6..].copy_from_slice(&decoded);
        Ok(Self {
            net: Network::Onion,
            addr,
            scope_id: 0,
        })
    }

    /// The stored network family.
    pub const fn net(&self) -> Network {
        self.net
    }

    /// The full 16-byte canonical buffer.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.addr
    }

    /// The family-appropriate byte span: the trailing 4 bytes for IPv4,
    /// the full buffer otherwise.
    pub fn addr_bytes(&self) -> &[u8] {
        match self.net {
            Network::Ipv4 => self.addr.split_at(12).1,
            _ => &self.addr,
        }
    }

    /// IPv6 zone index. Zero unless set at construction.
    pub const fn scope_id(&self) -> u32 {
        self.scope_id
    }

    pub const fn is_ipv4(&self) -> bool {
        matches!(self.net, Network::Ipv4)
    }

    pub const fn is_ipv6(&self) -> bool {
        matches!(self.net, Network::Ipv6)
    }

    /// True for OnionCat-embedded Tor addresses.
    pub const fn is_tor(&self) -> bool {
        matches!(self.net, Network::Onion)
    }

    /// True for synthetic name-derived addresses.
    pub const fn is_internal(&self) -> bool {
        matches!(self.net, Network::Internal)
    }

    /// IPv4 private ranges (RFC 1918): 10/8, 172.16/12, 192.168/16.
    pub const fn is_private(&self) -> bool {
        self.is_ipv4()
            && (self.addr[12] == 10
                || (self.addr[12] == 192 && self.addr[13] == 168)
                || (self.addr[12] == 172 && self.addr[13] >= 16 && self.addr[13] <= 31))
    }

    /// IPv4 benchmarking range (RFC 2544): 198.18/15.
    pub const fn is_benchmarking(&self) -> bool {
        self.is_ipv4() && self.addr[12] == 198 && (self.addr[13] == 18 || self.addr[13] == 19)
    }

    /// IPv4 link-local range (RFC 3927): 169.254/16.
    pub const fn is_link_local(&self) -> bool {
        self.is_ipv4() && self.addr[12] == 169 && self.addr[13] == 254
    }

    /// IPv4 shared carrier-grade NAT range (RFC 6598): 100.64/10.
    pub const fn is_carrier_grade_nat(&self) -> bool {
        self.is_ipv4() && self.addr[12] == 100 && self.addr[13] >= 64 && self.addr[13] <= 127
    }

    /// IPv4 documentation ranges (RFC 5737): 192.0.2/24, 198.51.100/24,
    /// 203.0.113/24.
    pub const fn is_documentation(&self) -> bool {
        self.is_ipv4()
            && ((self.addr[12] == 192 && self.addr[13] == 0 && self.addr[14] == 2)
                || (self.addr[12] == 198 && self.addr[13] == 51 && self.addr[14] == 100)
                || (self.addr[12] == 203 && self.addr[13] == 0 && self.addr[14] == 113))
    }

    /// IPv6 documentation range (RFC 3849): 2001:db8::/32.
    pub const fn is_ipv6_documentation(&self) -> bool {
        self.is_ipv6()
            && self.addr[0] == 0x20
            && self.addr[1] == 0x01
            && self.addr[2] == 0x0d
            && self.addr[3] == 0xb8
    }

    /// 6to4 tunnel encoding (RFC 3964): 2002::/16, IPv4 in bytes 2..6.
    pub const fn is_6to4(&self) -> bool {
        self.is_ipv6() && self.addr[0] == 0x20 && self.addr[1] == 0x02
    }

    /// NAT64 well-known prefix (RFC 6052): 64:ff9b::/96.
    pub fn is_nat64(&self) -> bool {
        const PREFIX: [u8; 12] = [0, 0x64, 0xff, 0x9b, 0, 0, 0, 0, 0, 0, 0, 0];
        self.is_ipv6() && self.addr.starts_with(&PREFIX)
    }

    /// Teredo tunnel encoding (RFC 4380): 2001::/32, IPv4 bit-inverted in
    /// the last 4 bytes.
    pub const fn is_teredo(&self) -> bool {
        self.is_ipv6()
            && self.addr[0] == 0x20
            && self.addr[1] == 0x01
            && self.addr[2] == 0
            && self.addr[3] == 0
    }

    /// IPv6 link-local unicast (RFC 4862): fe80::/64.
    pub fn is_unicast_link_local(&self) -> bool {
        const PREFIX: [u8; 8] = [0xfe, 0x80, 0, 0, 0, 0, 0, 0];
        self.is_ipv6() && self.addr.starts_with(&PREFIX)
    }

    /// IPv6 unique-local range (RFC 4193): fc00::/7. Note that the Tor and
    /// internal embeddings also live here, but carry their own family tag.
    pub const fn is_unique_local(&self) -> bool {
        self.is_ipv6() && (self.addr[0] & 0xfe) == 0xfc
    }

    /// SIIT translation encoding (RFC 6145): ::ffff:0:0:0/96.
    pub fn is_siit(&self) -> bool {
        const PREFIX: [u8; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 0, 0];
        self.is_ipv6() && self.addr.starts_with(&PREFIX)
    }

    /// ORCHID range (RFC 4843, deprecated): 2001:10::/28.
    pub const fn is_orchid(&self) -> bool {
        self.is_ipv6()
            && self.addr[0] == 0x20
            && self.addr[1] == 0x01
            && self.addr[2] == 0
            && (self.addr[3] & 0xf0) == 0x10
    }

    /// ORCHIDv2 range (RFC 7343): 2001:20::/28.
    pub const fn is_orchid_v2(&self) -> bool {
        self.is_ipv6()
            && self.addr[0] == 0x20
            && self.addr[1] == 0x01
            && self.addr[2] == 0
            && (self.addr[3] & 0xf0) == 0x20
    }

    /// Hurricane Electric tunnel broker allocation: 2001:470::/32. Grouped
    /// at /36 because HE hands out /48s and larger from this block.
    pub const fn is_hurricane_electric(&self) -> bool {
        self.is_ipv6()
            && self.addr[0] == 0x20
            && self.addr[1] == 0x01
            && self.addr[2] == 0x04
            && self.addr[3] == 0x70
    }

    /// Loopback and zero-network addresses: 127/8 and 0/8, or ::1.
    pub fn is_local(&self) -> bool {
        if self.is_ipv4() && (self.addr[12] == 127 || self.addr[12] == 0) {
            return true;
        }
        const LOOPBACK_V6: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        self.is_ipv6() && self.addr == LOOPBACK_V6
    }

    /// Whether this address could refer to an actual host. A superset of
    /// the routable addresses: a valid address may still be private,
    /// link-local, etc.
    pub fn is_valid(&self) -> bool {
        // unspecified IPv6 address (::/128)
        if self.is_ipv6() && self.addr == [0u8; 16] {
            return false;
        }
        if self.is_ipv6_documentation() {
            return false;
        }
        if self.is_internal() {
            return false;
        }
        if self.is_ipv4() {
            // 0.0.0.0 and the 255.255.255.255 broadcast sentinel
            let host = self.addr.split_at(12).1;
            if host == [0, 0, 0, 0] || host == [0xff, 0xff, 0xff, 0xff] {
                return false;
            }
        }
        true
    }

    /// Whether this address is publicly reachable on the open internet.
    /// Always a subset of [`is_valid`](Self::is_valid).
    pub fn is_routable(&self) -> bool {
        self.is_valid()
            && !(self.is_private()
                || self.is_benchmarking()
                || self.is_link_local()
                || self.is_unicast_link_local()
                || self.is_carrier_grade_nat()
                || self.is_documentation()
                || (self.is_unique_local() && !self.is_tor())
                || self.is_orchid()
                || self.is_orchid_v2()
                || self.is_local()
                || self.is_internal())
    }

    /// The class used for bucketing by the grouping engine. Internal and
    /// unroutable addresses are synthetic classes outside AS-mapping, and
    /// any address carrying an embedded IPv4 payload collapses to
    /// [`Network::Ipv4`] even though it is stored as IPv6 bytes.
    pub fn network_class(&self) -> Network {
        if self.is_internal() {
            Network::Internal
        } else if !self.is_routable() {
            Network::Unroutable
        } else if self.has_linked_ipv4() {
            Network::Ipv4
        } else if self.is_tor() {
            Network::Onion
        } else {
            Network::Ipv6
        }
    }

    /// True if this address is routable and embeds an IPv4 payload
    /// extractable via [`linked_ipv4`](Self::linked_ipv4).
    pub fn has_linked_ipv4(&self) -> bool {
        self.is_routable() && self.linked_ipv4().is_some()
    }

    /// Extracts the embedded IPv4 payload: native IPv4, SIIT and NAT64
    /// carry it in the last 4 bytes, 6to4 in bytes 2..6, and Teredo in the
    /// last 4 bytes bit-inverted. `None` if no encoding applies.
    pub fn linked_ipv4(&self) -> Option<u32> {
        let tail = u32::from_be_bytes([self.addr[12], self.addr[13], self.addr[14], self.addr[15]]);
        if self.is_ipv4() || self.is_siit() || self.is_nat64() {
            Some(tail)
        } else if self.is_6to4() {
            Some(u32::from_be_bytes([
                self.addr[2],
                self.addr[3],
                self.addr[4],
                self.addr[5],
            ]))
        } else if self.is_teredo() {
            Some(!tail)
        } else {
            None
        }
    }

    /// The native IPv4 address, for the IPv4 family only.
    pub fn ipv4_addr(&self) -> Option<Ipv4Addr> {
        if !self.is_ipv4() {
            return None;
        }
        Some(Ipv4Addr::new(
            self.addr[12],
            self.addr[13],
            self.addr[14],
            self.addr[15],
        ))
    }

    /// The native IPv6 address, for the IPv6 family only.
    pub fn ipv6_addr(&self) -> Option<Ipv6Addr> {
        if !self.is_ipv6() {
            return None;
        }
        Some(Ipv6Addr::from(self.addr))
    }

    /// The 10-byte onion service key material, for Tor addresses only.
    pub fn onion_payload(&self) -> Option<&[u8]> {
        if self.is_tor() {
            self.addr.get(6..)
        } else {
            None
        }
    }
}

impl From<Ipv4Addr> for NetAddr {
    fn from(addr: Ipv4Addr) -> Self {
        Self::from_ipv4(addr)
    }
}

impl From<Ipv6Addr> for NetAddr {
    fn from(addr: Ipv6Addr) -> Self {
        Self::from_ipv6(addr, 0)
    }
}

impl From<IpAddr> for NetAddr {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => Self::from_ipv4(v4),
            IpAddr::V6(v6) => Self::from_ipv6(v6, 0),
        }
    }
}

// Scope id is carried for socket-address round-trips but takes no part in
// identity, matching the byte-content-only semantics of the address.
impl PartialEq for NetAddr {
    fn eq(&self, other: &Self) -> bool {
        self.net == other.net && self.addr == other.addr
    }
}

impl Eq for NetAddr {}

impl PartialOrd for NetAddr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NetAddr {
    fn cmp(&self, other: &Self) -> Ordering {
        self.net
            .cmp(&other.net)
            .then_with(|| self.addr.cmp(&other.addr))
    }
}

impl Hash for NetAddr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.net.hash(state);
        self.addr.hash(state);
    }
}

impl fmt::Display for NetAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.net {
            Network::Onion | Network::Internal => {
                let suffix = if self.is_tor() { "onion" } else { "internal" };
                let payload = self.addr.get(6..).unwrap_or_default();
                write!(
                    f,
                    "{}.{suffix}",
                    BASE32_NOPAD.encode(payload).to_ascii_lowercase()
                )
            }
            Network::Ipv4 => write!(
                f,
                "{}.{}.{}.{}",
                self.addr[12], self.addr[13], self.addr[14], self.addr[15]
            ),
            Network::Ipv6 | Network::Unroutable => write!(f, "{}", Ipv6Addr::from(self.addr)),
        }
    }
}

// Serialized as (bytes, scope id); the family is re-derived on
// deserialization so the prefix-dispatch invariant survives decoding.
#[cfg(feature = "serde")]
impl serde::Serialize for NetAddr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.addr, self.scope_id).serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NetAddr {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (addr, scope_id) = <([u8; 16], u32)>::deserialize(deserializer)?;
        Ok(Self::from_ipv6(Ipv6Addr::from(addr), scope_id))
    }
}

impl<'a> arbitrary::Arbitrary<'a> for NetAddr {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        match u.int_in_range(0u8..=3)? {
            0 => Ok(Self::from_ipv4(Ipv4Addr::from(u.arbitrary::<[u8; 4]>()?))),
            1 => Ok(Self::from_ipv6(
                Ipv6Addr::from(u.arbitrary::<[u8; 16]>()?),
                0,
            )),
            2 => {
                let mut addr = [0u8; 16];
                addr[..6].copy_from_slice(&ONIONCAT_PREFIX);
                addr[6..].copy_from_slice(&u.arbitrary::<[u8; 10]>()?);
                Ok(Self::from_ipv6(Ipv6Addr::from(addr), 0))
            }
            _ => {
                let mut addr = [0u8; 16];
                addr[..6].copy_from_slice(&INTERNAL_PREFIX);
                addr[6..].copy_from_slice(&u.arbitrary::<[u8; 10]>()?);
                Ok(Self::from_ipv6(Ipv6Addr::from(addr), 0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;

    fn v4(s: &str) -> NetAddr {
        NetAddr::from_ipv4(s.parse().unwrap())
    }

    fn v6(s: &str) -> NetAddr {
        NetAddr::from_ipv6(s.parse().unwrap(), 0)
    }

    #[test]
    fn test_internal_prefix_derivation() {
        // 0xFD followed by the first five bytes of sha256("bitcoin")
        let digest = Sha256::digest(b"bitcoin");
        assert_eq!(INTERNAL_PREFIX[0], 0xfd);
        assert_eq!(&INTERNAL_PREFIX[1..], &digest[..5]);
    }

    #[test]
    fn test_prefix_dispatch() {
        assert!(v6("::ffff:1.2.3.4").is_ipv4());
        assert!(v6("fd87:d87e:eb43::1").is_tor());
        assert!(v6("fd6b:88c0:8724::1").is_internal());
        assert!(v6("2606:4700::1").is_ipv6());
        assert!(v6("::").is_ipv6());
    }

    #[test]
    fn test_family_recomputable_from_bytes() {
        for addr in [
            v4("1.2.3.4"),
            v6("2606:4700::1"),
            v6("fd87:d87e:eb43::1"),
            NetAddr::from_internal_name("seed.example.org").unwrap(),
            NetAddr::from_onion("vww6ybal4bd7szmg.onion").unwrap(),
        ] {
            let rebuilt = NetAddr::from_ipv6(Ipv6Addr::from(*addr.as_bytes()), 0);
            assert_eq!(addr.net(), rebuilt.net());
            assert_eq!(addr, rebuilt);
        }
    }

    #[test]
    fn test_internal_name_deterministic() {
        let a = NetAddr::from_internal_name("seed.example.org").unwrap();
        let b = NetAddr::from_internal_name("seed.example.org").unwrap();
        let c = NetAddr::from_internal_name("other.example.org").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.is_internal());
        assert!(!a.is_valid());
        assert_eq!(
            NetAddr::from_internal_name(""),
            Err(AddrParseError::EmptyInternalName)
        );
    }

    #[test]
    fn test_onion_parsing() {
        let addr = NetAddr::from_onion("vww6ybal4bd7szmg.onion").unwrap();
        assert!(addr.is_tor());
        assert_eq!(addr.onion_payload().unwrap().len(), 10);
        assert_eq!(addr.to_string(), "vww6ybal4bd7szmg.onion");

        assert_eq!(
            NetAddr::from_onion("vww6ybal4bd7szmg"),
            Err(AddrParseError::MissingOnionSuffix)
        );
        // 8 chars decode to 5 bytes, not 10
        assert_eq!(
            NetAddr::from_onion("vww6ybal.onion"),
            Err(AddrParseError::OnionPayloadLength(5))
        );
        // '1' and '8' are outside the base32 alphabet
        assert!(matches!(
            NetAddr::from_onion("vww6ybal4bd7szm1.onion"),
            Err(AddrParseError::InvalidBase32(_))
        ));
    }

    proptest! {
        #[test]
        fn test_onion_payload_roundtrip(payload in any::<[u8; 10]>()) {
            let text = format!("{}.onion", BASE32_NOPAD.encode(&payload).to_ascii_lowercase());
            let addr = NetAddr::from_onion(&text).unwrap();
            prop_assert_eq!(addr.onion_payload().unwrap(), &payload);
            prop_assert_eq!(addr.to_string(), text);
        }

        #[test]
        fn test_ipv4_class(octets in any::<[u8; 4]>()) {
            let addr = NetAddr::from_ipv4(Ipv4Addr::from(octets));
            prop_assert!(addr.is_ipv4());
            prop_assert!(!addr.is_ipv6());
            prop_assert!(matches!(addr.network_class(), Network::Ipv4 | Network::Unroutable));
        }

        #[test]
        fn test_routable_implies_valid(addr in arb::<NetAddr>()) {
            if addr.is_routable() {
                prop_assert!(addr.is_valid());
            }
        }

        #[test]
        fn test_ipv4_roundtrip(octets in any::<[u8; 4]>()) {
            let ip = Ipv4Addr::from(octets);
            prop_assert_eq!(NetAddr::from_ipv4(ip).ipv4_addr(), Some(ip));
        }
    }

    #[test]
    fn test_validity() {
        assert!(!v6("::").is_valid());
        assert!(!v6("2001:db8::1").is_valid());
        assert!(!v4("0.0.0.0").is_valid());
        assert!(!v4("255.255.255.255").is_valid());
        assert!(!NetAddr::from_internal_name("seed").unwrap().is_valid());

        assert!(v4("8.8.8.8").is_valid());
        // valid but not routable
        assert!(v4("10.0.0.1").is_valid());
        assert!(!v4("10.0.0.1").is_routable());
    }

    #[test]
    fn test_routability() {
        for unroutable in [
            v4("10.0.0.1"),
            v4("172.16.0.1"),
            v4("192.168.1.1"),
            v4("198.18.0.1"),
            v4("169.254.1.1"),
            v4("100.64.0.1"),
            v4("192.0.2.1"),
            v4("198.51.100.1"),
            v4("203.0.113.1"),
            v4("127.0.0.1"),
            v6("::1"),
            v6("fe80::1"),
            v6("fc00::1"),
            v6("2001:10::1"),
            v6("2001:20::1"),
        ] {
            assert!(!unroutable.is_routable(), "{unroutable} should be unroutable");
        }

        for routable in [
            v4("8.8.8.8"),
            v6("2606:4700::1"),
            // Teredo and 6to4 tunnels are routable
            v6("2001::1"),
            v6("2002:0102:0304::1"),
            NetAddr::from_onion("vww6ybal4bd7szmg.onion").unwrap(),
        ] {
            assert!(routable.is_routable(), "{routable} should be routable");
        }
    }

    #[test]
    fn test_network_class() {
        assert_eq!(v4("8.8.8.8").network_class(), Network::Ipv4);
        assert_eq!(v4("10.0.0.1").network_class(), Network::Unroutable);
        assert_eq!(v6("2606:4700::1").network_class(), Network::Ipv6);
        // tunnelled IPv4 collapses to the IPv4 class
        assert_eq!(v6("2001::ffff").network_class(), Network::Ipv4);
        assert_eq!(v6("2002:0102:0304::1").network_class(), Network::Ipv4);
        assert_eq!(
            NetAddr::from_onion("vww6ybal4bd7szmg.onion")
                .unwrap()
                .network_class(),
            Network::Onion
        );
        assert_eq!(
            NetAddr::from_internal_name("seed").unwrap().network_class(),
            Network::Internal
        );
    }

    #[test]
    fn test_linked_ipv4() {
        let want = u32::from_be_bytes([1, 2, 3, 4]);
        assert_eq!(v4("1.2.3.4").linked_ipv4(), Some(want));
        assert_eq!(v6("64:ff9b::102:304").linked_ipv4(), Some(want));
        assert_eq!(v6("::ffff:0:102:304").linked_ipv4(), Some(want));
        assert_eq!(v6("2002:102:304::").linked_ipv4(), Some(want));
        // Teredo stores the client address bit-inverted
        assert_eq!(v6("2001::fefd:fcfb").linked_ipv4(), Some(want));
        assert_eq!(v6("2606:4700::1").linked_ipv4(), None);

        assert!(v4("1.2.3.4").has_linked_ipv4());
        // unroutable addresses never report a linked payload
        assert!(!v4("10.0.0.1").has_linked_ipv4());
        assert_eq!(v4("10.0.0.1").linked_ipv4(), Some(u32::from_be_bytes([10, 0, 0, 1])));
    }

    #[test]
    fn test_display() {
        assert_eq!(v4("1.2.3.4").to_string(), "1.2.3.4");
        assert_eq!(v6("::1").to_string(), "::1");
        assert_eq!(v6("2606:4700::1").to_string(), "2606:4700::1");
        assert!(
            NetAddr::from_internal_name("seed")
                .unwrap()
                .to_string()
                .ends_with(".internal")
        );
    }

    #[test]
    fn test_identity_ignores_scope_id() {
        let ip: Ipv6Addr = "fe80::1".parse().unwrap();
        let a = NetAddr::from_ipv6(ip, 0);
        let b = NetAddr::from_ipv6(ip, 7);
        assert_eq!(a, b);
        assert_eq!(b.scope_id(), 7);
    }

    #[test]
    fn test_ordering_is_family_major() {
        let a = v4("255.255.255.254");
        let b = v6("::1");
        assert!(a < b);
    }
}
