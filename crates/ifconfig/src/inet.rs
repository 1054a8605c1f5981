//! IPv4 and IPv6 address details and IPv6 neighbor discovery settings.
//!
//! IPv4 details come straight from the interface address list. IPv6 flags
//! and lifetimes, and the per-interface neighbor discovery record, are
//! queried on an `AF_INET6` socket.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::iface::{IfAddr, Interface};
use crate::ifreq::{In6IfReq, In6NdiReq};
use crate::ioctl::Request;
use crate::sys::{AddressFamily, Platform};

pub use crate::ifreq::AddrLifetime;

/// `IN6_IFF_*` address flags.
pub mod in6_flags {
    pub const ANYCAST: u32 = 0x01;
    pub const TENTATIVE: u32 = 0x02;
    pub const DUPLICATED: u32 = 0x04;
    pub const DETACHED: u32 = 0x08;
    pub const DEPRECATED: u32 = 0x10;
    pub const NODAD: u32 = 0x20;
    pub const AUTOCONF: u32 = 0x40;
    pub const TEMPORARY: u32 = 0x80;
    pub const PREFER_SOURCE: u32 = 0x100;

    pub(crate) const NAMES: &[(u32, &str)] = &[
        (ANYCAST, "anycast"),
        (TENTATIVE, "tentative"),
        (DUPLICATED, "duplicated"),
        (DETACHED, "detached"),
        (DEPRECATED, "deprecated"),
        (NODAD, "no_dad"),
        (AUTOCONF, "autoconf"),
        (TEMPORARY, "temporary"),
        (PREFER_SOURCE, "prefer_source"),
    ];
}

/// `ND6_IFF_*` interface flags.
pub mod nd6_flags {
    pub const PERFORMNUD: u32 = 0x01;
    pub const ACCEPT_RTADV: u32 = 0x02;
    pub const PREFER_SOURCE: u32 = 0x04;
    pub const IFDISABLED: u32 = 0x08;
    pub const DONT_SET_IFROUTE: u32 = 0x10;
    pub const AUTO_LINKLOCAL: u32 = 0x20;
    pub const NO_RADR: u32 = 0x40;
    pub const NO_PREFER_IFACE: u32 = 0x80;
    pub const NO_DAD: u32 = 0x100;

    pub(crate) const NAMES: &[(u32, &str)] = &[
        (PERFORMNUD, "PERFORMNUD"),
        (ACCEPT_RTADV, "ACCEPT_RTADV"),
        (PREFER_SOURCE, "PREFER_SOURCE"),
        (IFDISABLED, "IFDISABLED"),
        (DONT_SET_IFROUTE, "DONT_SET_IFROUTE"),
        (AUTO_LINKLOCAL, "AUTO_LINKLOCAL"),
        (NO_RADR, "NO_RADR"),
        (NO_PREFER_IFACE, "NO_PREFER_IFACE"),
        (NO_DAD, "NO_DAD"),
    ];
}

fn flag_names(flags: u32, names: &[(u32, &'static str)]) -> Vec<&'static str> {
    names
        .iter()
        .filter(|(bit, _)| flags & bit != 0)
        .map(|(_, name)| *name)
        .collect()
}

/// Details of an IPv4 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InetAddr {
    pub addr: Ipv4Addr,
    pub netmask: Option<Ipv4Addr>,
    pub prefix_len: u8,
    /// Peer address, only on point-to-point links.
    pub dst: Option<Ipv4Addr>,
    /// Broadcast address, only on broadcast-capable links.
    pub broadcast: Option<Ipv4Addr>,
    pub vhid: u8,
}

/// Details of an IPv6 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Inet6Addr {
    pub addr: Ipv6Addr,
    pub scope_id: u32,
    /// Peer address, only on point-to-point links.
    pub dst: Option<Ipv6Addr>,
    pub prefix_len: u8,
    /// `IN6_IFF_*` flags, see [`in6_flags`].
    pub flags: u32,
    pub lifetime: AddrLifetime,
    pub vhid: u8,
}

impl Inet6Addr {
    /// Names of the set address flags, in bit order.
    pub fn flag_names(&self) -> Vec<&'static str> {
        flag_names(self.flags, in6_flags::NAMES)
    }
}

/// Per-interface IPv6 neighbor discovery settings (`struct nd_ifinfo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NdInfo {
    pub link_mtu: u32,
    pub max_mtu: u32,
    /// Base reachable time, in milliseconds.
    pub base_reachable: u32,
    /// Reachable time, in milliseconds.
    pub reachable: u32,
    /// Retransmission timer, in milliseconds.
    pub retrans: u32,
    /// `ND6_IFF_*` flags, see [`nd6_flags`].
    pub flags: u32,
    /// Current hop limit.
    pub hop_limit: u8,
}

impl NdInfo {
    /// Names of the set flags, in bit order.
    pub fn flag_names(&self) -> Vec<&'static str> {
        flag_names(self.flags, nd6_flags::NAMES)
    }
}

impl From<&In6NdiReq> for NdInfo {
    fn from(nd: &In6NdiReq) -> Self {
        Self {
            link_mtu: nd.linkmtu,
            max_mtu: nd.maxmtu,
            base_reachable: nd.basereachable,
            reachable: nd.reachable,
            retrans: nd.retrans,
            flags: nd.flags,
            hop_limit: nd.chlim,
        }
    }
}

fn v4(addr: Option<IpAddr>) -> Option<Ipv4Addr> {
    match addr {
        Some(IpAddr::V4(a)) => Some(a),
        _ => None,
    }
}

fn v6(addr: Option<IpAddr>) -> Option<Ipv6Addr> {
    match addr {
        Some(IpAddr::V6(a)) => Some(a),
        _ => None,
    }
}

impl<P: Platform> Handle<P> {
    /// Get the details of the IPv4 address `addr` of `iface`.
    ///
    /// The destination is reported as the peer on point-to-point links and
    /// as the broadcast address on broadcast links.
    pub fn inet_addrinfo(&mut self, iface: &Interface, addr: &IfAddr) -> Result<InetAddr> {
        self.tracked(|_| {
            let IpAddr::V4(sin) = addr.addr else {
                return Err(Error::InvalidArgument(format!(
                    "{} is not an IPv4 address",
                    addr.addr
                )));
            };
            let dst = v4(addr.dst);
            Ok(InetAddr {
                addr: sin,
                netmask: v4(addr.netmask),
                prefix_len: addr.prefix_len(),
                dst: dst.filter(|_| iface.is_point_to_point()),
                broadcast: dst.filter(|_| !iface.is_point_to_point() && iface.is_broadcast()),
                vhid: addr.vhid,
            })
        })
    }

    /// Get the details of the IPv6 address `addr` of `iface`.
    ///
    /// Flags and lifetimes come from two queries on the IPv6 socket.
    pub fn inet6_addrinfo(&mut self, iface: &Interface, addr: &IfAddr) -> Result<Inet6Addr> {
        self.tracked(|h| {
            let IpAddr::V6(sin6) = addr.addr else {
                return Err(Error::InvalidArgument(format!(
                    "{} is not an IPv6 address",
                    addr.addr
                )));
            };

            let mut ifr6 = In6IfReq::new(&iface.name, &sin6, addr.scope_id)?;
            h.ioctl(AddressFamily::INET6, Request::SIOCGIFAFLAG_IN6, &mut ifr6)?;
            let flags = ifr6.flags6();

            let mut ifr6 = In6IfReq::new(&iface.name, &sin6, addr.scope_id)?;
            h.ioctl(AddressFamily::INET6, Request::SIOCGIFALIFETIME_IN6, &mut ifr6)?;

            Ok(Inet6Addr {
                addr: sin6,
                scope_id: addr.scope_id,
                dst: v6(addr.dst).filter(|_| iface.is_point_to_point()),
                prefix_len: addr.prefix_len(),
                flags,
                lifetime: ifr6.lifetime(),
                vhid: addr.vhid,
            })
        })
    }

    /// Get the IPv6 neighbor discovery settings of `name`.
    pub fn nd6(&mut self, name: &str) -> Result<NdInfo> {
        self.tracked(|h| {
            let mut nd = In6NdiReq::new(name)?;
            h.ioctl(AddressFamily::INET6, Request::SIOCGIFINFO_IN6, &mut nd)?;
            Ok(NdInfo::from(&nd))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fixtures::{MockPlatform, edit, os_error};

    fn iface(flags: i32, addresses: Vec<IfAddr>) -> Interface {
        Interface {
            name: "em0".into(),
            flags: (libc::IFF_UP | flags) as u32,
            addresses,
        }
    }

    fn ip(text: &str) -> IpAddr {
        text.parse().unwrap()
    }

    #[test]
    fn test_inet_broadcast() {
        let addr = IfAddr {
            netmask: Some(ip("255.255.255.0")),
            dst: Some(ip("192.0.2.255")),
            vhid: 3,
            ..IfAddr::new(ip("192.0.2.10"))
        };
        let em0 = iface(libc::IFF_BROADCAST, vec![addr.clone()]);
        let platform = MockPlatform::new();
        let mut h = Handle::with_platform(platform.clone());

        let info = h.inet_addrinfo(&em0, &addr).unwrap();
        assert_eq!(info.addr, Ipv4Addr::new(192, 0, 2, 10));
        assert_eq!(info.netmask, Some(Ipv4Addr::new(255, 255, 255, 0)));
        assert_eq!(info.prefix_len, 24);
        assert_eq!(info.broadcast, Some(Ipv4Addr::new(192, 0, 2, 255)));
        assert_eq!(info.dst, None);
        assert_eq!(info.vhid, 3);
        assert!(platform.requests().is_empty());
    }

    #[test]
    fn test_inet_point_to_point() {
        let addr = IfAddr {
            netmask: Some(ip("255.255.255.255")),
            dst: Some(ip("198.51.100.1")),
            ..IfAddr::new(ip("198.51.100.2"))
        };
        let tun0 = iface(libc::IFF_POINTOPOINT, vec![addr.clone()]);
        let mut h = Handle::with_platform(MockPlatform::new());

        let info = h.inet_addrinfo(&tun0, &addr).unwrap();
        assert_eq!(info.dst, Some(Ipv4Addr::new(198, 51, 100, 1)));
        assert_eq!(info.broadcast, None);
        assert_eq!(info.prefix_len, 32);
    }

    #[test]
    fn test_inet_rejects_ipv6() {
        let addr = IfAddr::new(ip("2001:db8::1"));
        let em0 = iface(0, vec![addr.clone()]);
        let mut h = Handle::with_platform(MockPlatform::new());

        let err = h.inet_addrinfo(&em0, &addr).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(h.error_kind(), ErrorKind::Other);
        assert_eq!(h.error_code(), libc::EINVAL);
    }

    /// Answer address queries about `fe80::1` on `em0`.
    fn in6_kernel(
        flags: u32,
        lifetime: AddrLifetime,
    ) -> impl FnMut(Request, &mut [u8]) -> std::io::Result<i32> {
        move |req: Request, arg: &mut [u8]| {
            edit(arg, |ifr6: &mut In6IfReq| {
                assert_eq!(ifr6.name(), "em0");
                assert_eq!(ifr6.addr(), "fe80::1".parse::<Ipv6Addr>().unwrap());
                match req {
                    Request::SIOCGIFAFLAG_IN6 => ifr6.set_flags6(flags),
                    Request::SIOCGIFALIFETIME_IN6 => ifr6.set_lifetime(&lifetime),
                    other => panic!("unexpected request {other}"),
                }
            });
            Ok(0)
        }
    }

    #[test]
    fn test_inet6_addrinfo() {
        let lifetime = AddrLifetime {
            expire: 0,
            preferred: 0,
            valid_lifetime: u32::MAX,
            preferred_lifetime: u32::MAX,
        };
        let flags = in6_flags::AUTOCONF | in6_flags::TENTATIVE;
        let platform = MockPlatform::new().on_ioctl(in6_kernel(flags, lifetime));
        let mut h = Handle::with_platform(platform.clone());

        let addr = IfAddr {
            netmask: Some(ip("ffff:ffff:ffff:ffff::")),
            scope_id: 1,
            ..IfAddr::new(ip("fe80::1"))
        };
        let em0 = iface(libc::IFF_BROADCAST, vec![addr.clone()]);

        let info = h.inet6_addrinfo(&em0, &addr).unwrap();
        assert_eq!(info.prefix_len, 64);
        assert_eq!(info.scope_id, 1);
        assert_eq!(info.flags, flags);
        assert_eq!(info.flag_names(), vec!["tentative", "autoconf"]);
        assert_eq!(info.lifetime, lifetime);
        assert_eq!(info.dst, None);

        assert_eq!(
            platform.requests(),
            vec![Request::SIOCGIFAFLAG_IN6, Request::SIOCGIFALIFETIME_IN6]
        );
        let families: Vec<_> = platform.opened().into_iter().map(|(f, _)| f).collect();
        assert_eq!(families, vec![AddressFamily::INET6]);
    }

    #[test]
    fn test_inet6_flag_failure_skips_lifetime() {
        let platform = MockPlatform::new().on_ioctl(|_, _| Err(os_error(libc::EADDRNOTAVAIL)));
        let mut h = Handle::with_platform(platform.clone());
        let addr = IfAddr::new(ip("fe80::1"));
        let em0 = iface(0, vec![addr.clone()]);

        assert!(h.inet6_addrinfo(&em0, &addr).is_err());
        assert_eq!(h.error_kind(), ErrorKind::Ioctl);
        assert_eq!(h.error_request(), Some(Request::SIOCGIFAFLAG_IN6));
        assert_eq!(h.error_code(), libc::EADDRNOTAVAIL);
        assert_eq!(platform.requests().len(), 1);
    }

    #[test]
    fn test_inet6_without_ipv6_socket() {
        let platform = MockPlatform::new().fail_socket(AddressFamily::INET6, libc::EAFNOSUPPORT);
        let mut h = Handle::with_platform(platform.clone());
        let addr = IfAddr::new(ip("2001:db8::1"));
        let em0 = iface(0, vec![addr.clone()]);

        assert!(h.inet6_addrinfo(&em0, &addr).is_err());
        assert_eq!(h.error_kind(), ErrorKind::Socket);
        assert!(platform.requests().is_empty());

        assert!(h.inet6_addrinfo(&em0, &IfAddr::new(ip("192.0.2.1"))).is_err());
        assert_eq!(h.error_kind(), ErrorKind::Other);
    }

    #[test]
    fn test_nd6() {
        let platform = MockPlatform::new().on_ioctl(|req, arg| {
            assert_eq!(req, Request::SIOCGIFINFO_IN6);
            edit(arg, |nd: &mut In6NdiReq| {
                assert_eq!(nd.name(), "em0");
                nd.linkmtu = 1500;
                nd.maxmtu = 9000;
                nd.basereachable = 30_000;
                nd.reachable = 28_500;
                nd.retrans = 1_000;
                nd.flags = nd6_flags::PERFORMNUD | nd6_flags::AUTO_LINKLOCAL;
                nd.chlim = 64;
            });
            Ok(0)
        });
        let mut h = Handle::with_platform(platform.clone());

        let nd = h.nd6("em0").unwrap();
        assert_eq!(
            nd,
            NdInfo {
                link_mtu: 1500,
                max_mtu: 9000,
                base_reachable: 30_000,
                reachable: 28_500,
                retrans: 1_000,
                flags: 0x21,
                hop_limit: 64,
            }
        );
        assert_eq!(nd.flag_names(), vec!["PERFORMNUD", "AUTO_LINKLOCAL"]);
        assert_eq!(platform.opened()[0].0, AddressFamily::INET6);
    }

    #[test]
    fn test_nd6_invalid_name_sends_nothing() {
        let platform = MockPlatform::new();
        let mut h = Handle::with_platform(platform.clone());
        assert!(matches!(h.nd6("bad name"), Err(Error::InvalidName(_))));
        assert!(platform.opened().is_empty());
    }
}
