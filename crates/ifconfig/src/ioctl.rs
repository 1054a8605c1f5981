//! Control request identifiers.
//!
//! Request numbers follow the BSD `_IOC` encoding: direction bits, the
//! parameter length, a group letter and a command number. The lengths used
//! here are those of the structures in [`crate::ifreq`].

use std::fmt;

use crate::ifreq::{IfGroupReq, IfMediaReq, IfReq, IfStat, In6IfReq, In6NdiReq};

const IOCPARM_MASK: u32 = (1 << 13) - 1;
const IOC_OUT: u32 = 0x4000_0000;
const IOC_IN: u32 = 0x8000_0000;
const IOC_INOUT: u32 = IOC_IN | IOC_OUT;

const fn ioc(inout: u32, group: u8, num: u8, len: usize) -> Request {
    Request(inout | ((len as u32 & IOCPARM_MASK) << 16) | ((group as u32) << 8) | num as u32)
}

const fn iow(group: u8, num: u8, len: usize) -> Request {
    ioc(IOC_IN, group, num, len)
}

const fn iowr(group: u8, num: u8, len: usize) -> Request {
    ioc(IOC_INOUT, group, num, len)
}

const IFREQ: usize = size_of::<IfReq>();
const IFMEDIAREQ: usize = size_of::<IfMediaReq>();
const IN6_IFREQ: usize = size_of::<In6IfReq>();

/// An ioctl request number.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Request(u32);

impl Request {
    pub const SIOCGIFMETRIC: Self = iowr(b'i', 23, IFREQ);
    pub const SIOCSIFMETRIC: Self = iow(b'i', 24, IFREQ);
    pub const SIOCSIFCAP: Self = iow(b'i', 30, IFREQ);
    pub const SIOCGIFCAP: Self = iowr(b'i', 31, IFREQ);
    pub const SIOCSIFNAME: Self = iow(b'i', 40, IFREQ);
    pub const SIOCSIFDESCR: Self = iow(b'i', 41, IFREQ);
    pub const SIOCGIFDESCR: Self = iowr(b'i', 42, IFREQ);
    pub const SIOCGIFMTU: Self = iowr(b'i', 51, IFREQ);
    pub const SIOCSIFMTU: Self = iow(b'i', 52, IFREQ);
    pub const SIOCGIFMEDIA: Self = iowr(b'i', 56, IFMEDIAREQ);
    pub const SIOCSIFGENERIC: Self = iow(b'i', 57, IFREQ);
    pub const SIOCGIFGENERIC: Self = iowr(b'i', 58, IFREQ);
    pub const SIOCGIFSTATUS: Self = iowr(b'i', 59, size_of::<IfStat>());
    pub const SIOCGIFAFLAG_IN6: Self = iowr(b'i', 73, IN6_IFREQ);
    pub const SIOCGIFALIFETIME_IN6: Self = iowr(b'i', 81, IN6_IFREQ);
    pub const SIOCGIFFIB: Self = iowr(b'i', 92, IFREQ);
    pub const SIOCSIFFIB: Self = iow(b'i', 93, IFREQ);
    pub const SIOCGIFINFO_IN6: Self = iowr(b'i', 108, size_of::<In6NdiReq>());
    pub const SIOCIFDESTROY: Self = iow(b'i', 121, IFREQ);
    pub const SIOCIFCREATE2: Self = iowr(b'i', 124, IFREQ);
    pub const SIOCGIFGROUP: Self = iowr(b'i', 136, size_of::<IfGroupReq>());
    pub const SIOCGIFXMEDIA: Self = iowr(b'i', 139, IFMEDIAREQ);

    /// VLAN configuration rides on the generic driver request.
    pub const SIOCSETVLAN: Self = Self::SIOCSIFGENERIC;

    const NAMES: &'static [(Request, &'static str)] = &[
        (Self::SIOCGIFMETRIC, "SIOCGIFMETRIC"),
        (Self::SIOCSIFMETRIC, "SIOCSIFMETRIC"),
        (Self::SIOCSIFCAP, "SIOCSIFCAP"),
        (Self::SIOCGIFCAP, "SIOCGIFCAP"),
        (Self::SIOCSIFNAME, "SIOCSIFNAME"),
        (Self::SIOCSIFDESCR, "SIOCSIFDESCR"),
        (Self::SIOCGIFDESCR, "SIOCGIFDESCR"),
        (Self::SIOCGIFMTU, "SIOCGIFMTU"),
        (Self::SIOCSIFMTU, "SIOCSIFMTU"),
        (Self::SIOCGIFMEDIA, "SIOCGIFMEDIA"),
        (Self::SIOCSIFGENERIC, "SIOCSIFGENERIC"),
        (Self::SIOCGIFGENERIC, "SIOCGIFGENERIC"),
        (Self::SIOCGIFSTATUS, "SIOCGIFSTATUS"),
        (Self::SIOCGIFAFLAG_IN6, "SIOCGIFAFLAG_IN6"),
        (Self::SIOCGIFALIFETIME_IN6, "SIOCGIFALIFETIME_IN6"),
        (Self::SIOCGIFFIB, "SIOCGIFFIB"),
        (Self::SIOCSIFFIB, "SIOCSIFFIB"),
        (Self::SIOCGIFINFO_IN6, "SIOCGIFINFO_IN6"),
        (Self::SIOCIFDESTROY, "SIOCIFDESTROY"),
        (Self::SIOCIFCREATE2, "SIOCIFCREATE2"),
        (Self::SIOCGIFGROUP, "SIOCGIFGROUP"),
        (Self::SIOCGIFXMEDIA, "SIOCGIFXMEDIA"),
    ];

    /// Wrap a raw request number.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw request number.
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Symbolic name, if this is one of the known requests.
    pub fn name(self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(req, _)| *req == self)
            .map(|(_, name)| *name)
    }

    /// Size of the parameter structure encoded in the request.
    pub const fn param_len(self) -> usize {
        ((self.0 >> 16) & IOCPARM_MASK) as usize
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:#010x}", self.0),
        }
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_encodings() {
        // Values from <sys/sockio.h> on LP64.
        assert_eq!(Request::SIOCGIFMTU.as_raw(), 0xc020_6933);
        assert_eq!(Request::SIOCSIFMTU.as_raw(), 0x8020_6934);
        assert_eq!(Request::SIOCGIFMEDIA.as_raw(), 0xc030_6938);
        assert_eq!(Request::SIOCGIFXMEDIA.as_raw(), 0xc030_698b);
        // <netinet6/in6_var.h>, <netinet6/nd6.h>
        assert_eq!(Request::SIOCGIFAFLAG_IN6.as_raw(), 0xc120_6949);
        assert_eq!(Request::SIOCGIFALIFETIME_IN6.as_raw(), 0xc120_6951);
        assert_eq!(Request::SIOCGIFINFO_IN6.as_raw(), 0xc048_696c);
    }

    #[test]
    fn test_param_len() {
        assert_eq!(Request::SIOCGIFMTU.param_len(), 32);
        assert_eq!(Request::SIOCGIFMEDIA.param_len(), 48);
        assert_eq!(Request::SIOCGIFGROUP.param_len(), 40);
    }

    #[test]
    fn test_display() {
        assert_eq!(Request::SIOCGIFDESCR.to_string(), "SIOCGIFDESCR");
        assert_eq!(Request::SIOCSETVLAN.to_string(), "SIOCSIFGENERIC");
        assert_eq!(Request::from_raw(0x1234).to_string(), "0x00001234");
    }

    #[test]
    fn test_names_are_unique() {
        for (i, (a, _)) in Request::NAMES.iter().enumerate() {
            for (b, _) in &Request::NAMES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
