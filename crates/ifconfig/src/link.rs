//! Per-interface attributes: description, name, MTU, metric, FIB,
//! capabilities, groups and driver status.

use tracing::debug;

use crate::alloc;
use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::ifreq::{IFNAMSIZ, IfGroupReq, IfReq, IfStat, IfgReq, decode_cstr, validate_name};
use crate::ioctl::Request;
use crate::sys::{AddressFamily, Platform};

/// Size of the first description buffer.
const DESCR_INITIAL: usize = 64;

/// Interface capability bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Capabilities {
    /// Enabled capabilities (`ifr_curcap`).
    pub current: i32,
    /// Capabilities the driver supports (`ifr_reqcap`).
    pub supported: i32,
}

impl Capabilities {
    /// Check if every bit of `cap` is enabled.
    pub fn is_enabled(&self, cap: i32) -> bool {
        self.current & cap == cap
    }

    /// Check if every bit of `cap` is supported.
    pub fn is_supported(&self, cap: i32) -> bool {
        self.supported & cap == cap
    }

    /// Capability word after applying a signed change: a negative value
    /// clears its magnitude's bits, a positive one sets them. The result is
    /// limited to supported capabilities.
    pub fn apply(&self, change: i32) -> i32 {
        let flags = if change < 0 {
            self.current & !change.wrapping_neg()
        } else {
            self.current | change
        };
        flags & self.supported
    }
}

impl<P: Platform> Handle<P> {
    pub(crate) fn local(&mut self, request: Request, ifr: &mut IfReq) -> Result<libc::c_int> {
        self.ioctl(AddressFamily::LOCAL, request, ifr)
    }

    fn get_int(&mut self, name: &str, request: Request) -> Result<i32> {
        self.tracked(|h| {
            let mut ifr = IfReq::new(name)?;
            h.local(request, &mut ifr)?;
            Ok(ifr.int())
        })
    }

    fn set_int(&mut self, name: &str, request: Request, value: i32) -> Result<()> {
        self.tracked(|h| {
            let mut ifr = IfReq::new(name)?;
            ifr.set_int(value);
            h.local(request, &mut ifr)?;
            Ok(())
        })
    }

    /// Get the description of `name`, `None` if it has none.
    pub fn description(&mut self, name: &str) -> Result<Option<String>> {
        self.tracked(|h| {
            let mut ifr = IfReq::new(name)?;
            let mut buf = vec![0u8; DESCR_INITIAL];
            let mut attempts = 0;

            loop {
                ifr.set_buffer(&mut buf);
                match h.local(Request::SIOCGIFDESCR, &mut ifr) {
                    Err(e) if e.errno() == Some(libc::ENOMSG) => return Ok(None),
                    result => result?,
                };
                attempts += 1;

                let (addr, len) = ifr.buffer();
                if addr == buf.as_ptr() as usize as u64 {
                    let text = decode_cstr(&buf);
                    return Ok((!text.is_empty()).then_some(text));
                }
                // The kernel clears the pointer when the buffer is too small.
                if len <= buf.len() {
                    return Ok(None);
                }
                if attempts > h.resize_retries() {
                    return Err(Error::RetryExhausted {
                        request: Request::SIOCGIFDESCR,
                        attempts,
                    });
                }
                debug!(name, len, "description buffer too small");
                buf = alloc::zeroed(len)?;
            }
        })
    }

    /// Set the description of `name`. An empty text removes it.
    pub fn set_description(&mut self, name: &str, text: &str) -> Result<()> {
        if text.is_empty() {
            return self.unset_description(name);
        }
        self.tracked(|h| {
            if text.contains('\0') {
                return Err(Error::InvalidArgument(
                    "description contains a NUL byte".to_string(),
                ));
            }
            let mut ifr = IfReq::new(name)?;
            let mut buf = Vec::with_capacity(text.len() + 1);
            buf.extend_from_slice(text.as_bytes());
            buf.push(0);
            ifr.set_buffer(&mut buf);
            h.local(Request::SIOCSIFDESCR, &mut ifr)?;
            Ok(())
        })
    }

    /// Remove the description of `name`.
    pub fn unset_description(&mut self, name: &str) -> Result<()> {
        self.tracked(|h| {
            let mut ifr = IfReq::new(name)?;
            ifr.clear_buffer();
            h.local(Request::SIOCSIFDESCR, &mut ifr)?;
            Ok(())
        })
    }

    /// Rename `name` to `new_name`.
    pub fn set_name(&mut self, name: &str, new_name: &str) -> Result<()> {
        self.tracked(|h| {
            validate_name(new_name)?;
            let mut ifr = IfReq::new(name)?;
            let mut new = [0u8; IFNAMSIZ];
            new[..new_name.len()].copy_from_slice(new_name.as_bytes());
            ifr.set_data(&mut new);
            h.local(Request::SIOCSIFNAME, &mut ifr)?;
            Ok(())
        })
    }

    /// Get the MTU of `name`.
    pub fn mtu(&mut self, name: &str) -> Result<i32> {
        self.get_int(name, Request::SIOCGIFMTU)
    }

    /// Set the MTU of `name`.
    pub fn set_mtu(&mut self, name: &str, mtu: i32) -> Result<()> {
        self.set_int(name, Request::SIOCSIFMTU, mtu)
    }

    /// Get the routing metric of `name`.
    pub fn metric(&mut self, name: &str) -> Result<i32> {
        self.get_int(name, Request::SIOCGIFMETRIC)
    }

    /// Set the routing metric of `name`.
    pub fn set_metric(&mut self, name: &str, metric: i32) -> Result<()> {
        self.set_int(name, Request::SIOCSIFMETRIC, metric)
    }

    /// Get the routing table (FIB) of `name`.
    pub fn fib(&mut self, name: &str) -> Result<u32> {
        self.get_int(name, Request::SIOCGIFFIB).map(|fib| fib as u32)
    }

    /// Set the routing table (FIB) of `name`.
    pub fn set_fib(&mut self, name: &str, fib: u32) -> Result<()> {
        self.set_int(name, Request::SIOCSIFFIB, fib as i32)
    }

    /// Get the capabilities of `name`.
    pub fn capabilities(&mut self, name: &str) -> Result<Capabilities> {
        self.tracked(|h| h.query_capabilities(name))
    }

    fn query_capabilities(&mut self, name: &str) -> Result<Capabilities> {
        let mut ifr = IfReq::new(name)?;
        self.local(Request::SIOCGIFCAP, &mut ifr)?;
        Ok(Capabilities {
            current: ifr.curcap(),
            supported: ifr.reqcap(),
        })
    }

    /// Enable (positive `cap`) or disable (negative `cap`) capabilities.
    ///
    /// Bits the driver does not support are dropped.
    pub fn set_capability(&mut self, name: &str, cap: i32) -> Result<()> {
        self.tracked(|h| {
            let caps = h.query_capabilities(name)?;
            let mut ifr = IfReq::new(name)?;
            ifr.set_reqcap(caps.apply(cap));
            h.local(Request::SIOCSIFCAP, &mut ifr)?;
            Ok(())
        })
    }

    /// Get the groups `name` belongs to.
    pub fn groups(&mut self, name: &str) -> Result<Vec<String>> {
        self.tracked(|h| {
            let mut ifgr = IfGroupReq::new(name)?;
            h.ioctl(AddressFamily::LOCAL, Request::SIOCGIFGROUP, &mut ifgr)?;

            let mut groups: Vec<IfgReq> = alloc::zeroed(ifgr.entries())?;
            if groups.is_empty() {
                return Ok(Vec::new());
            }
            ifgr.set_groups(&mut groups);
            h.ioctl(AddressFamily::LOCAL, Request::SIOCGIFGROUP, &mut ifgr)?;

            Ok(groups
                .iter()
                .take(ifgr.entries())
                .map(|g| decode_cstr(g))
                .filter(|g| !g.is_empty())
                .collect())
        })
    }

    /// Get the driver's status text for `name`.
    pub fn status_text(&mut self, name: &str) -> Result<String> {
        self.tracked(|h| {
            let mut ifs = IfStat::new(name)?;
            h.ioctl(AddressFamily::LOCAL, Request::SIOCGIFSTATUS, &mut ifs)?;
            Ok(ifs.text())
        })
    }
}
