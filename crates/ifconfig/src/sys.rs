//! System call layer.
//!
//! [`Platform`] is the seam between the handle and the kernel: it creates
//! datagram sockets, issues control requests on them and closes them. [`Os`]
//! is the real implementation on top of `libc`.

use std::fmt;
use std::io;
use std::os::unix::io::RawFd;

use crate::ioctl::Request;

/// Socket address family.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AddressFamily(i32);

impl AddressFamily {
    /// Local (unix domain) sockets; used for most interface requests.
    pub const LOCAL: Self = Self(libc::AF_UNIX);
    /// IPv4.
    pub const INET: Self = Self(libc::AF_INET);
    /// IPv6.
    pub const INET6: Self = Self(libc::AF_INET6);

    /// Wrap a raw `AF_*` value.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw `AF_*` value.
    pub const fn as_raw(self) -> i32 {
        self.0
    }

    /// Symbolic name for the common families.
    pub fn name(self) -> Option<&'static str> {
        match self.0 {
            libc::AF_UNIX => Some("AF_LOCAL"),
            libc::AF_INET => Some("AF_INET"),
            libc::AF_INET6 => Some("AF_INET6"),
            _ => None,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "AF_{}", self.0),
        }
    }
}

impl fmt::Debug for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddressFamily({self})")
    }
}

/// System calls used by a [`Handle`](crate::Handle).
pub trait Platform {
    /// Create a datagram socket for `family`.
    fn socket(&self, family: AddressFamily) -> io::Result<RawFd>;

    /// Issue `request` on `fd` with `arg` as the parameter structure.
    fn ioctl(&self, fd: RawFd, request: Request, arg: &mut [u8]) -> io::Result<libc::c_int>;

    /// Close a descriptor returned by [`socket`](Self::socket).
    fn close(&self, fd: RawFd);
}

/// The running kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Os;

impl Platform for Os {
    fn socket(&self, family: AddressFamily) -> io::Result<RawFd> {
        // SAFETY: socket(2) takes no pointers.
        let fd = unsafe { libc::socket(family.as_raw(), libc::SOCK_DGRAM, 0) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(fd)
    }

    fn ioctl(&self, fd: RawFd, request: Request, arg: &mut [u8]) -> io::Result<libc::c_int> {
        debug_assert!(arg.len() >= request.param_len());
        // SAFETY: `arg` is an exclusively borrowed buffer at least as large as
        // the structure encoded in `request`, and stays alive for the call.
        // Pointers embedded in it are owned by the caller for the same span.
        let ret = unsafe { libc::ioctl(fd, request.as_raw() as _, arg.as_mut_ptr()) };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(ret)
    }

    fn close(&self, fd: RawFd) {
        // SAFETY: `fd` came from `socket` and is closed exactly once by the
        // socket cache.
        unsafe {
            libc::close(fd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_display() {
        assert_eq!(AddressFamily::LOCAL.to_string(), "AF_LOCAL");
        assert_eq!(AddressFamily::INET6.to_string(), "AF_INET6");
        assert_eq!(AddressFamily::from_raw(200).to_string(), "AF_200");
    }

    #[test]
    fn test_os_socket_roundtrip() {
        let fd = Os.socket(AddressFamily::INET).unwrap();
        assert!(fd >= 0);
        Os.close(fd);
    }
}
