//! Reachability scoring: which local address to advertise to a peer.
//!
//! When a node knows several of its own addresses, it advertises the one
//! the remote peer is most likely to be able to dial back. The score is a
//! pure function of the two addresses' (extended) network classes, looked
//! up in a fixed decision table so every combination is explicit and
//! exhaustively testable.

use crate::addr::{NetAddr, Network};

/// Ordinal quality of advertising a local address to a given partner.
/// Higher is better; `Private` (Tor-to-Tor) ranks highest because it
/// preserves the strongest anonymity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[repr(u8)]
pub enum Reachability {
    Unreachable = 0,
    /// The table lists no preference for this combination.
    Default = 1,
    Teredo = 2,
    /// Tunnelled IPv6: dialable, but a native address would be better.
    Ipv6Weak = 3,
    Ipv4 = 4,
    /// Native, untunnelled IPv6.
    Ipv6Strong = 5,
    Private = 6,
}

/// Classification of the local address for the lookup. Richer than
/// [`Network`]: Teredo overrides IPv6, and tunnelled IPv6 (6to4, NAT64,
/// SIIT) is split out so it can be scored below native IPv6.
#[derive(Debug, Clone, Copy)]
#[repr(usize)]
enum LocalClass {
    Ipv4 = 0,
    Ipv6 = 1,
    Ipv6Tunnel = 2,
    Onion = 3,
    Teredo = 4,
}

/// Classification of the remote partner. Absent, unroutable and internal
/// partners all collapse to `Unknown`: nothing is known about what they
/// can dial.
#[derive(Debug, Clone, Copy)]
#[repr(usize)]
enum PartnerClass {
    Ipv4 = 0,
    Ipv6 = 1,
    Onion = 2,
    Teredo = 3,
    Unknown = 4,
}

/// Decision table, indexed `[partner][local]`. Exact-family matches score
/// high, tunnelled IPv6 is preferred below native IPv6, and Tor partners
/// only hear about our IPv4 or onion addresses.
const REACHABILITY: [[Reachability; 5]; 5] = {
    use Reachability::*;
    [
        // partner: IPv4
        [Ipv4, Default, Default, Default, Default],
        // partner: IPv6
        [Ipv4, Ipv6Strong, Ipv6Weak, Default, Teredo],
        // partner: Onion
        [Ipv4, Default, Default, Private, Default],
        // partner: Teredo
        [Ipv4, Ipv6Weak, Ipv6Weak, Default, Teredo],
        // partner: Unknown
        [Ipv4, Ipv6Weak, Ipv6Weak, Private, Teredo],
    ]
};

fn local_class(addr: &NetAddr) -> LocalClass {
    if addr.is_teredo() {
        return LocalClass::Teredo;
    }
    match addr.net() {
        Network::Ipv4 => LocalClass::Ipv4,
        Network::Onion => LocalClass::Onion,
        // 6to4 / NAT64 / SIIT carry the IPv6 family tag but are tunnels
        _ if addr.is_6to4() || addr.is_nat64() || addr.is_siit() => LocalClass::Ipv6Tunnel,
        _ => LocalClass::Ipv6,
    }
}

fn partner_class(partner: Option<&NetAddr>) -> PartnerClass {
    let Some(addr) = partner else {
        return PartnerClass::Unknown;
    };
    if addr.is_teredo() {
        return PartnerClass::Teredo;
    }
    if addr.is_internal() || !addr.is_routable() {
        return PartnerClass::Unknown;
    }
    match addr.net() {
        Network::Ipv4 => PartnerClass::Ipv4,
        Network::Onion => PartnerClass::Onion,
        _ => PartnerClass::Ipv6,
    }
}

impl NetAddr {
    /// Scores how reachable this (local) address is from `partner`,
    /// `None` meaning an unknown remote. Unroutable and internal local
    /// addresses are never worth advertising.
    pub fn reachability_from(&self, partner: Option<&NetAddr>) -> Reachability {
        if !self.is_routable() || self.is_internal() {
            return Reachability::Unreachable;
        }
        REACHABILITY[partner_class(partner) as usize][local_class(self) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(s: &str) -> NetAddr {
        NetAddr::from_ipv4(s.parse().unwrap())
    }

    fn v6(s: &str) -> NetAddr {
        NetAddr::from_ipv6(s.parse().unwrap(), 0)
    }

    fn onion() -> NetAddr {
        NetAddr::from_onion("vww6ybal4bd7szmg.onion").unwrap()
    }

    #[test]
    fn test_score_ordering() {
        use Reachability::*;
        assert!(Unreachable < Default);
        assert!(Default < Teredo);
        assert!(Teredo < Ipv6Weak);
        assert!(Ipv6Weak < Ipv4);
        assert!(Ipv4 < Ipv6Strong);
        assert!(Ipv6Strong < Private);
    }

    #[test]
    fn test_unreachable_locals() {
        let partner = v4("8.8.8.8");
        for local in [
            v4("10.0.0.1"),
            v4("127.0.0.1"),
            v6("fe80::1"),
            NetAddr::from_internal_name("seed").unwrap(),
        ] {
            assert_eq!(
                local.reachability_from(Some(&partner)),
                Reachability::Unreachable
            );
            assert_eq!(local.reachability_from(None), Reachability::Unreachable);
        }
    }

    #[test]
    fn test_exact_family_matches() {
        assert_eq!(
            v4("8.8.8.8").reachability_from(Some(&v4("1.1.1.1"))),
            Reachability::Ipv4
        );
        assert_eq!(
            v6("2606:4700::1").reachability_from(Some(&v6("2620:fe::fe"))),
            Reachability::Ipv6Strong
        );
        // Tor to Tor is the highest score of all
        assert_eq!(
            onion().reachability_from(Some(&onion())),
            Reachability::Private
        );
    }

    #[test]
    fn test_tunnel_downgrade_for_ipv6_partner() {
        let partner = v6("2620:fe::fe");
        assert_eq!(
            v6("2002:102:304::1").reachability_from(Some(&partner)),
            Reachability::Ipv6Weak
        );
        assert_eq!(
            v6("64:ff9b::102:304").reachability_from(Some(&partner)),
            Reachability::Ipv6Weak
        );
        assert_eq!(
            v6("2001::1234").reachability_from(Some(&partner)),
            Reachability::Teredo
        );
    }

    #[test]
    fn test_teredo_partner() {
        let partner = v6("2001::1234");
        assert_eq!(
            v6("2606:4700::1").reachability_from(Some(&partner)),
            Reachability::Ipv6Weak
        );
        assert_eq!(
            v6("2001::5678").reachability_from(Some(&partner)),
            Reachability::Teredo
        );
        assert_eq!(
            v4("8.8.8.8").reachability_from(Some(&partner)),
            Reachability::Ipv4
        );
    }

    #[test]
    fn test_unknown_partner() {
        assert_eq!(v4("8.8.8.8").reachability_from(None), Reachability::Ipv4);
        assert_eq!(
            v6("2606:4700::1").reachability_from(None),
            Reachability::Ipv6Weak
        );
        assert_eq!(onion().reachability_from(None), Reachability::Private);
        assert_eq!(v6("2001::1").reachability_from(None), Reachability::Teredo);

        // unroutable and internal partners are treated as unknown
        let private = v4("10.0.0.1");
        let internal = NetAddr::from_internal_name("seed").unwrap();
        assert_eq!(
            onion().reachability_from(Some(&private)),
            Reachability::Private
        );
        assert_eq!(
            v6("2606:4700::1").reachability_from(Some(&internal)),
            Reachability::Ipv6Weak
        );
    }

    #[test]
    fn test_no_preference_defaults() {
        // an IPv4-only partner hears nothing useful about our IPv6
        assert_eq!(
            v6("2606:4700::1").reachability_from(Some(&v4("8.8.8.8"))),
            Reachability::Default
        );
        // an onion partner gets no IPv6 preference either
        assert_eq!(
            v6("2606:4700::1").reachability_from(Some(&onion())),
            Reachability::Default
        );
        assert_eq!(
            onion().reachability_from(Some(&v6("2620:fe::fe"))),
            Reachability::Default
        );
    }
}
