//! Interface enumeration.
//!
//! Walks the kernel's interface address list (`getifaddrs`) and folds it
//! into one [`Interface`] per name, in the order the kernel reports them.

use std::ffi::CStr;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::Result;
use crate::handle::Handle;
use crate::sys::Platform;

/// One IPv4 or IPv6 address of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IfAddr {
    /// The address.
    pub addr: IpAddr,
    /// Netmask, if the kernel reported one.
    pub netmask: Option<IpAddr>,
    /// Peer address on point-to-point links, broadcast address otherwise.
    pub dst: Option<IpAddr>,
    /// IPv6 scope zone, 0 for IPv4 and global addresses.
    pub scope_id: u32,
    /// CARP virtual host id, 0 when none.
    pub vhid: u8,
}

impl IfAddr {
    /// An address with no netmask, destination, scope or vhid.
    pub fn new(addr: IpAddr) -> Self {
        Self {
            addr,
            netmask: None,
            dst: None,
            scope_id: 0,
            vhid: 0,
        }
    }

    /// Prefix length of the netmask; a host prefix when there is none.
    pub fn prefix_len(&self) -> u8 {
        match (self.netmask, self.addr) {
            (Some(IpAddr::V4(mask)), _) => u32::from(mask).leading_ones() as u8,
            (Some(IpAddr::V6(mask)), _) => u128::from(mask).leading_ones() as u8,
            (None, IpAddr::V4(_)) => 32,
            (None, IpAddr::V6(_)) => 128,
        }
    }
}

/// A network interface and its IP addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Interface {
    /// Interface name.
    pub name: String,
    /// `IFF_*` flags.
    pub flags: u32,
    /// IPv4 and IPv6 addresses, in kernel order.
    pub addresses: Vec<IfAddr>,
}

impl Interface {
    /// Check if the interface is administratively up.
    pub fn is_up(&self) -> bool {
        self.flags & libc::IFF_UP as u32 != 0
    }

    /// Check if the interface is a loopback interface.
    pub fn is_loopback(&self) -> bool {
        self.flags & libc::IFF_LOOPBACK as u32 != 0
    }

    /// Check if the interface is a point-to-point link.
    pub fn is_point_to_point(&self) -> bool {
        self.flags & libc::IFF_POINTOPOINT as u32 != 0
    }

    /// Check if the interface has a valid broadcast address.
    pub fn is_broadcast(&self) -> bool {
        self.flags & libc::IFF_BROADCAST as u32 != 0
    }
}

/// Owned `getifaddrs` list, released on drop.
struct IfAddrs(*mut libc::ifaddrs);

impl IfAddrs {
    fn new() -> io::Result<Self> {
        let mut head = std::ptr::null_mut();
        // SAFETY: `head` is a valid out pointer.
        if unsafe { libc::getifaddrs(&mut head) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(Self(head))
    }

    fn iter(&self) -> impl Iterator<Item = &libc::ifaddrs> {
        // SAFETY: the list stays valid and unmodified until `self` drops.
        std::iter::successors(unsafe { self.0.as_ref() }, |ifa| unsafe {
            ifa.ifa_next.as_ref()
        })
    }
}

impl Drop for IfAddrs {
    fn drop(&mut self) {
        if !self.0.is_null() {
            // SAFETY: the pointer came from getifaddrs and is freed once.
            unsafe { libc::freeifaddrs(self.0) };
        }
    }
}

/// Read an IP address out of a generic socket address.
///
/// # Safety
///
/// `sa` must be null or point to a socket address whose storage matches its
/// `sa_family`.
unsafe fn ip_addr(sa: *const libc::sockaddr) -> Option<(IpAddr, u32)> {
    // SAFETY: guaranteed by the caller.
    let family = i32::from(unsafe { sa.as_ref()? }.sa_family);
    match family {
        libc::AF_INET => {
            // SAFETY: AF_INET addresses are stored as sockaddr_in.
            let sin = unsafe { &*sa.cast::<libc::sockaddr_in>() };
            let addr = Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr));
            Some((IpAddr::V4(addr), 0))
        }
        libc::AF_INET6 => {
            // SAFETY: AF_INET6 addresses are stored as sockaddr_in6.
            let sin6 = unsafe { &*sa.cast::<libc::sockaddr_in6>() };
            let (addr, scope_id) = unembed_scope(sin6.sin6_addr.s6_addr, sin6.sin6_scope_id);
            Some((IpAddr::V6(addr), scope_id))
        }
        _ => None,
    }
}

/// Move a scope zone the kernel embedded in a link-local address (bytes 2
/// and 3) into the scope id.
fn unembed_scope(mut octets: [u8; 16], scope_id: u32) -> (Ipv6Addr, u32) {
    let embedded = u16::from_be_bytes([octets[2], octets[3]]);
    let link_local = octets[0] == 0xfe && octets[1] & 0xc0 == 0x80;
    if !link_local || embedded == 0 {
        return (Ipv6Addr::from(octets), scope_id);
    }
    octets[2] = 0;
    octets[3] = 0;
    let scope_id = if scope_id == 0 { u32::from(embedded) } else { scope_id };
    (Ipv6Addr::from(octets), scope_id)
}

/// Virtual host id of an address entry.
#[cfg(target_os = "freebsd")]
fn vhid(ifa: &libc::ifaddrs) -> u8 {
    // `ifi_vhid` follows type, physical, addrlen, hdrlen and link_state.
    const IFI_VHID: usize = 5;
    if ifa.ifa_data.is_null() {
        return 0;
    }
    // SAFETY: for address entries `ifa_data` points to a `struct if_data`,
    // which starts with at least six single-byte fields.
    unsafe { *ifa.ifa_data.cast::<u8>().add(IFI_VHID) }
}

#[cfg(not(target_os = "freebsd"))]
fn vhid(_: &libc::ifaddrs) -> u8 {
    0
}

/// Destination or broadcast member of an entry.
#[cfg(any(target_os = "linux", target_os = "android"))]
fn dst_sockaddr(ifa: &libc::ifaddrs) -> *const libc::sockaddr {
    ifa.ifa_ifu
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn dst_sockaddr(ifa: &libc::ifaddrs) -> *const libc::sockaddr {
    ifa.ifa_dstaddr
}

/// Read the address, netmask and destination of one list entry.
///
/// # Safety
///
/// The socket address pointers of `ifa` must be null or valid.
unsafe fn if_addr(ifa: &libc::ifaddrs) -> Option<IfAddr> {
    // SAFETY: guaranteed by the caller.
    let (addr, scope_id) = unsafe { ip_addr(ifa.ifa_addr) }?;
    let netmask = unsafe { ip_addr(ifa.ifa_netmask) }.map(|(mask, _)| mask);
    let flags = ifa.ifa_flags as u32;
    let has_dst = flags & (libc::IFF_POINTOPOINT | libc::IFF_BROADCAST) as u32 != 0;
    let dst = if has_dst {
        unsafe { ip_addr(dst_sockaddr(ifa)) }.map(|(dst, _)| dst)
    } else {
        None
    };
    Some(IfAddr {
        addr,
        netmask,
        dst,
        scope_id,
        vhid: vhid(ifa),
    })
}

/// Fold `(name, flags, address)` entries into interfaces, keeping the order
/// in which names first appear.
fn fold(entries: impl IntoIterator<Item = (String, u32, Option<IfAddr>)>) -> Vec<Interface> {
    let mut interfaces: Vec<Interface> = Vec::new();
    for (name, flags, addr) in entries {
        let iface = match interfaces.iter().position(|i| i.name == name) {
            Some(idx) => &mut interfaces[idx],
            None => {
                interfaces.push(Interface {
                    name,
                    flags,
                    addresses: Vec::new(),
                });
                let last = interfaces.len() - 1;
                &mut interfaces[last]
            }
        };
        if let Some(addr) = addr {
            iface.addresses.push(addr);
        }
    }
    interfaces
}

/// List every interface on the system.
pub fn interfaces() -> Result<Vec<Interface>> {
    let list = IfAddrs::new()?;
    let entries = list.iter().filter(|ifa| !ifa.ifa_name.is_null()).map(|ifa| {
        // SAFETY: getifaddrs fills in NUL-terminated names and well-formed
        // addresses.
        let name = unsafe { CStr::from_ptr(ifa.ifa_name) }
            .to_string_lossy()
            .into_owned();
        let addr = unsafe { if_addr(ifa) };
        (name, ifa.ifa_flags as u32, addr)
    });
    Ok(fold(entries))
}

impl<P: Platform> Handle<P> {
    /// Call `f` with this handle for every interface on the system.
    ///
    /// Stops at the first error `f` returns.
    pub fn for_each_interface<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&mut Self, &Interface) -> Result<()>,
    {
        let list = self.tracked(|_| interfaces())?;
        for iface in &list {
            f(self, iface)?;
        }
        Ok(())
    }

    /// Call `f` with this handle for every IPv4 and IPv6 address of `iface`.
    ///
    /// Stops at the first error `f` returns.
    pub fn for_each_ifaddr<F>(&mut self, iface: &Interface, mut f: F) -> Result<()>
    where
        F: FnMut(&mut Self, &IfAddr) -> Result<()>,
    {
        for addr in &iface.addresses {
            f(self, addr)?;
        }
        Ok(())
    }
}
