use std::fmt;
use std::net::{SocketAddr, SocketAddrV4, SocketAddrV6};

use crate::addr::NetAddr;

/// A network endpoint: an address plus a transport port.
///
/// Ports are held in host order; [`identity_key`](Self::identity_key)
/// and socket-address conversion emit network (big-endian) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endpoint {
    addr: NetAddr,
    port: u16,
}

impl Endpoint {
    pub const fn new(addr: NetAddr, port: u16) -> Self {
        Self { addr, port }
    }

    pub const fn addr(&self) -> &NetAddr {
        &self.addr
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    /// The native socket address, for the IPv4/IPv6 families only. Tor and
    /// internal addresses have no socket representation.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        if let Some(v4) = self.addr.ipv4_addr() {
            return Some(SocketAddr::V4(SocketAddrV4::new(v4, self.port)));
        }
        self.addr.ipv6_addr().map(|v6| {
            SocketAddr::V6(SocketAddrV6::new(v6, self.port, 0, self.addr.scope_id()))
        })
    }

    /// A stable external identifier: the family-appropriate address span
    /// followed by the port, most significant byte first.
    pub fn identity_key(&self) -> Vec<u8> {
        let mut key = self.addr.addr_bytes().to_vec();
        key.extend_from_slice(&self.port.to_be_bytes());
        key
    }
}

impl From<SocketAddrV4> for Endpoint {
    fn from(sock: SocketAddrV4) -> Self {
        Self::new(NetAddr::from_ipv4(*sock.ip()), sock.port())
    }
}

impl From<SocketAddrV6> for Endpoint {
    fn from(sock: SocketAddrV6) -> Self {
        Self::new(NetAddr::from_ipv6(*sock.ip(), sock.scope_id()), sock.port())
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(sock: SocketAddr) -> Self {
        match sock {
            SocketAddr::V4(v4) => v4.into(),
            SocketAddr::V6(v6) => v6.into(),
        }
    }
}

impl fmt::Display for Endpoint {
    /// `addr:port`, with IPv6 addresses bracketed. Tor and internal
    /// addresses render unbracketed since they contain no colons.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.addr.is_ipv6() {
            write!(f, "[{}]:{}", self.addr, self.port)
        } else {
            write!(f, "{}:{}", self.addr, self.port)
        }
    }
}

impl<'a> arbitrary::Arbitrary<'a> for Endpoint {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::new(u.arbitrary()?, u.arbitrary()?))
    }
}
