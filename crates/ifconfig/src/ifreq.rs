//! Kernel request structures.
//!
//! These mirror the LP64 layouts of `struct ifreq`, `struct ifmediareq`,
//! `struct ifgroupreq`, `struct ifstat`, `struct vlanreq` and the IPv6
//! `struct in6_ifreq` and `struct in6_ndireq`. Unions are
//! kept as raw byte arrays with typed accessors; pointer members are stored
//! as integers so the structures stay plain data.

use std::net::Ipv6Addr;

use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout};

use crate::error::{Error, Result};

/// Maximum interface name length (including null terminator).
pub const IFNAMSIZ: usize = 16;

/// Size of the text buffer in [`IfStat`].
pub const IFSTATMAX: usize = 800;

/// Validate an interface name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName("empty name".to_string()));
    }

    if name.len() >= IFNAMSIZ {
        return Err(Error::InvalidName(format!(
            "name too long (max {} chars)",
            IFNAMSIZ - 1
        )));
    }

    if name.contains('/') || name.contains('\0') {
        return Err(Error::InvalidName(
            "name contains invalid characters".to_string(),
        ));
    }

    if name.chars().any(|c| c.is_whitespace()) {
        return Err(Error::InvalidName("name contains whitespace".to_string()));
    }

    Ok(())
}

fn encode_name(name: &str) -> Result<[u8; IFNAMSIZ]> {
    validate_name(name)?;
    let mut buf = [0u8; IFNAMSIZ];
    buf[..name.len()].copy_from_slice(name.as_bytes());
    Ok(buf)
}

/// Decode a NUL-terminated byte string.
pub(crate) fn decode_cstr(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&c| c == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..len]).into_owned()
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[..8]);
    u64::from_ne_bytes(raw)
}

fn read_i32(bytes: &[u8]) -> i32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[..4]);
    i32::from_ne_bytes(raw)
}

/// `struct ifreq`.
#[repr(C, align(8))]
#[derive(Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct IfReq {
    name: [u8; IFNAMSIZ],
    ifru: [u8; 16],
}

impl IfReq {
    /// Create a zeroed request for the named interface.
    pub fn new(name: &str) -> Result<Self> {
        let mut ifr = Self::new_zeroed();
        ifr.name = encode_name(name)?;
        Ok(ifr)
    }

    /// Interface name, as possibly rewritten by the kernel.
    pub fn name(&self) -> String {
        decode_cstr(&self.name)
    }

    /// `ifr_mtu`, `ifr_metric` and friends.
    pub fn int(&self) -> i32 {
        read_i32(&self.ifru[..4])
    }

    pub fn set_int(&mut self, value: i32) {
        self.ifru[..4].copy_from_slice(&value.to_ne_bytes());
    }

    /// `ifr_fib`.
    pub fn uint(&self) -> u32 {
        self.int() as u32
    }

    pub fn set_uint(&mut self, value: u32) {
        self.set_int(value as i32);
    }

    /// `ifr_reqcap`.
    pub fn reqcap(&self) -> i32 {
        read_i32(&self.ifru[..4])
    }

    pub fn set_reqcap(&mut self, value: i32) {
        self.ifru[..4].copy_from_slice(&value.to_ne_bytes());
    }

    /// `ifr_curcap`.
    pub fn curcap(&self) -> i32 {
        read_i32(&self.ifru[4..8])
    }

    pub fn set_curcap(&mut self, value: i32) {
        self.ifru[4..8].copy_from_slice(&value.to_ne_bytes());
    }

    /// Point `ifr_buffer` at `buf`.
    ///
    /// `buf` must outlive every request issued with this structure.
    pub fn set_buffer(&mut self, buf: &mut [u8]) {
        self.set_raw_buffer(buf.as_mut_ptr() as usize as u64, buf.len());
    }

    /// Clear `ifr_buffer`.
    pub fn clear_buffer(&mut self) {
        self.set_raw_buffer(0, 0);
    }

    pub(crate) fn set_raw_buffer(&mut self, addr: u64, len: usize) {
        self.ifru[..8].copy_from_slice(&(len as u64).to_ne_bytes());
        self.ifru[8..16].copy_from_slice(&addr.to_ne_bytes());
    }

    /// `ifr_buffer` as `(address, length)`.
    pub fn buffer(&self) -> (u64, usize) {
        let len = read_u64(&self.ifru[..8]) as usize;
        let addr = read_u64(&self.ifru[8..16]);
        (addr, len)
    }

    /// Point `ifr_data` at `data`.
    ///
    /// `data` must outlive every request issued with this structure.
    pub fn set_data<T: IntoBytes + FromBytes>(&mut self, data: &mut T) {
        let addr = data.as_mut_bytes().as_mut_ptr() as usize as u64;
        self.ifru[..8].copy_from_slice(&addr.to_ne_bytes());
    }

    /// `ifr_data` as an address.
    pub fn data(&self) -> u64 {
        read_u64(&self.ifru[..8])
    }
}

/// `struct ifmediareq`.
#[repr(C)]
#[derive(Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct IfMediaReq {
    name: [u8; IFNAMSIZ],
    /// Current media options.
    pub current: i32,
    /// Don't-care mask.
    pub mask: i32,
    /// Media status bits.
    pub status: i32,
    /// Active media options.
    pub active: i32,
    /// Number of entries in (or required for) the media list.
    pub count: i32,
    _pad: [u8; 4],
    ulist: u64,
}

impl IfMediaReq {
    /// Create a zeroed media request for the named interface.
    pub fn new(name: &str) -> Result<Self> {
        let mut ifmr = Self::new_zeroed();
        ifmr.name = encode_name(name)?;
        Ok(ifmr)
    }

    /// Point the media list at `list`, setting the count to its length.
    ///
    /// `list` must outlive every request issued with this structure.
    pub fn set_list(&mut self, list: &mut [i32]) {
        self.count = list.len() as i32;
        self.ulist = list.as_mut_ptr() as usize as u64;
    }

    /// Address of the media list, 0 when unset.
    pub fn list_addr(&self) -> u64 {
        self.ulist
    }
}

/// `struct ifg_req`: one group name.
pub type IfgReq = [u8; IFNAMSIZ];

/// `struct ifgroupreq`.
#[repr(C, align(8))]
#[derive(Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct IfGroupReq {
    name: [u8; IFNAMSIZ],
    /// Size in bytes of the group list.
    pub len: u32,
    _pad: [u8; 4],
    ifgru: [u8; 16],
}

impl IfGroupReq {
    /// Create a zeroed group request for the named interface.
    pub fn new(name: &str) -> Result<Self> {
        let mut ifgr = Self::new_zeroed();
        ifgr.name = encode_name(name)?;
        Ok(ifgr)
    }

    /// Point `ifgr_groups` at `groups`, setting the length accordingly.
    ///
    /// `groups` must outlive every request issued with this structure.
    pub fn set_groups(&mut self, groups: &mut [IfgReq]) {
        self.len = size_of_val(groups) as u32;
        let addr = groups.as_mut_ptr() as usize as u64;
        self.ifgru[..8].copy_from_slice(&addr.to_ne_bytes());
    }

    /// Address of the group list, 0 when unset.
    pub fn groups_addr(&self) -> u64 {
        read_u64(&self.ifgru[..8])
    }

    /// Number of whole group entries covered by `len`.
    pub fn entries(&self) -> usize {
        self.len as usize / IFNAMSIZ
    }
}

/// `struct ifstat`.
#[repr(C)]
#[derive(Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct IfStat {
    name: [u8; IFNAMSIZ],
    ascii: [u8; IFSTATMAX + 1],
}

impl IfStat {
    /// Create a zeroed status request for the named interface.
    pub fn new(name: &str) -> Result<Self> {
        let mut ifs = Self::new_zeroed();
        ifs.name = encode_name(name)?;
        Ok(ifs)
    }

    /// Status text filled in by the driver.
    pub fn text(&self) -> String {
        decode_cstr(&self.ascii)
    }
}

/// `struct vlanreq`.
#[repr(C)]
#[derive(Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct VlanReq {
    parent: [u8; IFNAMSIZ],
    /// VLAN tag.
    pub tag: u16,
    /// Encapsulation protocol, 0 for the driver default.
    pub proto: u16,
}

impl VlanReq {
    /// Create a VLAN request on `parent` with `tag`.
    pub fn new(parent: &str, tag: u16) -> Result<Self> {
        if tag == 0 {
            return Err(Error::InvalidArgument("VLAN tag must not be 0".to_string()));
        }
        let mut vlr = Self::new_zeroed();
        vlr.parent = encode_name(parent)?;
        vlr.tag = tag;
        Ok(vlr)
    }

    /// Parent interface name.
    pub fn parent(&self) -> String {
        decode_cstr(&self.parent)
    }
}

/// Size of `struct sockaddr_in6`.
const SOCKADDR_IN6_LEN: usize = 28;

/// `struct in6_ifreq`.
///
/// The union is large enough for the per-interface ICMPv6 statistics; only
/// the address, `ifru_flags6` and `ifru_lifetime` members are used here.
#[repr(C, align(8))]
#[derive(Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct In6IfReq {
    name: [u8; IFNAMSIZ],
    ifru: [u8; 272],
}

impl In6IfReq {
    /// Create a request about `addr` on the named interface.
    pub fn new(name: &str, addr: &Ipv6Addr, scope_id: u32) -> Result<Self> {
        let mut ifr6 = Self::new_zeroed();
        ifr6.name = encode_name(name)?;
        let sin6 = &mut ifr6.ifru[..SOCKADDR_IN6_LEN];
        sin6[0] = SOCKADDR_IN6_LEN as u8;
        sin6[1] = libc::AF_INET6 as u8;
        sin6[8..24].copy_from_slice(&addr.octets());
        sin6[24..28].copy_from_slice(&scope_id.to_ne_bytes());
        Ok(ifr6)
    }

    /// Interface name.
    pub fn name(&self) -> String {
        decode_cstr(&self.name)
    }

    /// Address the request is about.
    pub fn addr(&self) -> Ipv6Addr {
        let mut octets = [0u8; 16];
        octets.copy_from_slice(&self.ifru[8..24]);
        Ipv6Addr::from(octets)
    }

    /// `ifru_flags6`.
    pub fn flags6(&self) -> u32 {
        read_i32(&self.ifru[..4]) as u32
    }

    pub fn set_flags6(&mut self, flags: u32) {
        self.ifru[..4].copy_from_slice(&flags.to_ne_bytes());
    }

    /// `ifru_lifetime`.
    pub fn lifetime(&self) -> AddrLifetime {
        AddrLifetime {
            expire: read_u64(&self.ifru[..8]) as i64,
            preferred: read_u64(&self.ifru[8..16]) as i64,
            valid_lifetime: read_i32(&self.ifru[16..20]) as u32,
            preferred_lifetime: read_i32(&self.ifru[20..24]) as u32,
        }
    }

    pub fn set_lifetime(&mut self, lifetime: &AddrLifetime) {
        self.ifru[..8].copy_from_slice(&lifetime.expire.to_ne_bytes());
        self.ifru[8..16].copy_from_slice(&lifetime.preferred.to_ne_bytes());
        self.ifru[16..20].copy_from_slice(&lifetime.valid_lifetime.to_ne_bytes());
        self.ifru[20..24].copy_from_slice(&lifetime.preferred_lifetime.to_ne_bytes());
    }
}

/// `struct in6_addrlifetime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AddrLifetime {
    /// Time the address becomes invalid, 0 for never.
    pub expire: i64,
    /// Time the address becomes deprecated, 0 for never.
    pub preferred: i64,
    /// Valid lifetime in seconds.
    pub valid_lifetime: u32,
    /// Preferred lifetime in seconds.
    pub preferred_lifetime: u32,
}

/// `struct in6_ndireq`: interface name and `struct nd_ifinfo`.
#[repr(C)]
#[derive(Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct In6NdiReq {
    name: [u8; IFNAMSIZ],
    pub linkmtu: u32,
    pub maxmtu: u32,
    pub basereachable: u32,
    pub reachable: u32,
    pub retrans: u32,
    pub flags: u32,
    pub recalctm: i32,
    pub chlim: u8,
    pub initialized: u8,
    randomseed0: [u8; 8],
    randomseed1: [u8; 8],
    randomid: [u8; 8],
    _pad: [u8; 2],
}

impl In6NdiReq {
    /// Create a zeroed neighbor discovery request for the named interface.
    pub fn new(name: &str) -> Result<Self> {
        let mut nd = Self::new_zeroed();
        nd.name = encode_name(name)?;
        Ok(nd)
    }

    /// Interface name.
    pub fn name(&self) -> String {
        decode_cstr(&self.name)
    }
}
