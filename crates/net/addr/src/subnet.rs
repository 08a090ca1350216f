use std::fmt;

use crate::addr::NetAddr;

const ALL_ONES: [u8; 16] = [0xff; 16];

/// The number of leading 1-bits if `x` is a well-formed netmask byte
/// (all 1-bits before all 0-bits), `None` otherwise.
const fn netmask_bits(x: u8) -> Option<u32> {
    if x.count_ones() == x.leading_ones() {
        Some(x.leading_ones())
    } else {
        None
    }
}

/// Byte offset at which the family-relevant part of the buffer begins:
/// IPv4 occupies only the trailing 4 bytes, everything else all 16.
const fn family_offset(addr: &NetAddr) -> usize {
    if addr.is_ipv4() { 12 } else { 0 }
}

/// A contiguous-prefix subnet over a [`NetAddr`].
///
/// The stored network address is normalized (masked) at construction, so
/// `network & mask == network` always holds. Malformed inputs produce a
/// subnet with `valid == false` that constructs fine but never matches;
/// callers that care must check [`is_valid`](Self::is_valid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subnet {
    network: NetAddr,
    netmask: [u8; 16],
    valid: bool,
}

impl Subnet {
    /// Subnet from a prefix length. `bits` counts from the family offset,
    /// so the valid range is `0..=32` for IPv4 and `0..=128` for the rest;
    /// out-of-range lengths yield an invalid subnet.
    pub fn from_prefix(addr: NetAddr, bits: u32) -> Self {
        let offset = family_offset(&addr);
        let valid = bits as usize <= 128 - offset * 8;
        let mut netmask = ALL_ONES;
        if valid {
            // 1-bits occupy [0, full); everything after is cleared
            let full = bits as usize + offset * 8;
            for (i, byte) in netmask.iter_mut().enumerate() {
                let start = i * 8;
                *byte = if full >= start + 8 {
                    0xff
                } else if full <= start {
                    0x00
                } else {
                    0xffu8 << (8 - (full - start))
                };
            }
        }
        Self::normalized(addr, netmask, valid)
    }

    /// Subnet from an explicit netmask, given as a second address. The
    /// mask bytes from the family offset onward must form a contiguous
    /// run of 1-bits; any 0-then-1 pattern invalidates the subnet.
    pub fn from_netmask(addr: NetAddr, mask: &NetAddr) -> Self {
        let mut zeros_seen = false;
        for &byte in mask.as_bytes().iter().skip(family_offset(mask)) {
            let Some(ones) = netmask_bits(byte) else {
                return Self::invalid(addr);
            };
            if zeros_seen && ones != 0 {
                return Self::invalid(addr);
            }
            if ones < 8 {
                zeros_seen = true;
            }
        }

        // Bytes before the family offset always match exactly.
        let mut netmask = ALL_ONES;
        let offset = family_offset(&addr);
        netmask
            .iter_mut()
            .skip(offset)
            .zip(mask.as_bytes().iter().skip(offset))
            .for_each(|(dst, src)| *dst = *src);
        Self::normalized(addr, netmask, true)
    }

    /// Subnet matching exactly one address (all-ones mask). Valid iff the
    /// address itself is valid.
    pub fn single(addr: NetAddr) -> Self {
        Self {
            valid: addr.is_valid(),
            network: addr,
            netmask: ALL_ONES,
        }
    }

    fn invalid(addr: NetAddr) -> Self {
        Self {
            network: addr,
            netmask: ALL_ONES,
            valid: false,
        }
    }

    /// Masks the network bytes, preserving the already-derived family tag.
    fn normalized(addr: NetAddr, netmask: [u8; 16], valid: bool) -> Self {
        let mut bytes = *addr.as_bytes();
        bytes
            .iter_mut()
            .zip(netmask)
            .for_each(|(byte, mask)| *byte &= mask);
        Self {
            network: NetAddr::from_raw(addr.net(), bytes, addr.scope_id()),
            netmask,
            valid,
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// The masked network address.
    pub const fn network(&self) -> &NetAddr {
        &self.network
    }

    /// True if the mask is all ones, i.e. the subnet matches exactly one
    /// address.
    pub fn is_single_ip(&self) -> bool {
        self.netmask == ALL_ONES
    }

    /// True iff this subnet is valid, `addr` is valid, the families agree
    /// and the masked address equals the network.
    pub fn contains(&self, addr: &NetAddr) -> bool {
        if !self.valid || !addr.is_valid() || self.network.net() != addr.net() {
            return false;
        }
        addr.as_bytes()
            .iter()
            .zip(self.netmask)
            .zip(self.network.as_bytes())
            .all(|((byte, mask), net)| byte & mask == *net)
    }
}

impl fmt::Display for Subnet {
    /// Renders `<network>/<prefix-bits>`, counting leading 1-bits from the
    /// family offset and stopping at the first zero byte.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cidr = 0;
        for &byte in self.netmask.iter().skip(family_offset(&self.network)) {
            if byte == 0 {
                break;
            }
            if let Some(ones) = netmask_bits(byte) {
                cidr += ones;
            }
        }
        write!(f, "{}/{}", self.network, cidr)
    }
}
