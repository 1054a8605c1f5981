//! Interface media.
//!
//! [`Handle::get_media`] reads the current, active and supported media of an
//! interface. The [`decode`] functions turn media words into the names
//! `ifconfig` prints; [`tables`] holds the taxonomy they are built from.

pub mod decode;
pub mod tables;
pub mod word;

use tracing::debug;

use crate::alloc;
use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::ifreq::IfMediaReq;
use crate::ioctl::Request;
use crate::sys::{AddressFamily, Platform};

pub use decode::{
    UNKNOWN_SUBTYPE, UNKNOWN_TYPE, decode_mode, decode_options, decode_status, decode_subtype,
    decode_type, lookup_mode, lookup_options, lookup_subtype, lookup_type,
};
pub use word::MediaWord;

/// Media state of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MediaDescriptor {
    /// Configured media.
    pub current: MediaWord,
    /// Bits the driver ignores when matching media.
    pub mask: MediaWord,
    /// `IFM_AVALID` / `IFM_ACTIVE` status bits.
    pub status: u32,
    /// Media actually in use; differs from `current` when autoselecting.
    pub active: MediaWord,
    /// Every media word the interface supports.
    pub supported: Vec<MediaWord>,
}

impl MediaDescriptor {
    /// Check if the status bits are meaningful.
    pub fn status_valid(&self) -> bool {
        self.status & word::IFM_AVALID != 0
    }

    /// Check if the link is up.
    pub fn is_active(&self) -> bool {
        self.status & word::IFM_ACTIVE != 0
    }

    /// Link status text, e.g. `"active"` or `"no carrier"`.
    pub fn status_text(&self) -> &'static str {
        decode_status(self)
    }
}

impl<P: Platform> Handle<P> {
    /// Get the media state of `name`.
    ///
    /// Tries the extended media query first and falls back to the legacy
    /// one. An interface that answers neither has no media support; this is
    /// reported as [`Error::NotSupported`], which [`Error::is_unsupported`]
    /// recognises and which leaves the error state at
    /// [`ErrorKind::Ok`](crate::ErrorKind::Ok).
    pub fn get_media(&mut self, name: &str) -> Result<MediaDescriptor> {
        let result = self.query_media(name);
        self.track(result)
    }

    fn query_media(&mut self, name: &str) -> Result<MediaDescriptor> {
        let mut ifmr = IfMediaReq::new(name)?;

        let request = match self.media_request(&mut ifmr)? {
            Some(request) => request,
            None => {
                debug!(name, "interface has no media support");
                return Err(Error::NotSupported(format!("{name}: no media support")));
            }
        };

        let mut words: Vec<i32> = Vec::new();
        let mut attempts = 0;
        while reported(&ifmr) > words.len() {
            if attempts > self.resize_retries() {
                return Err(Error::RetryExhausted { request, attempts });
            }
            words = alloc::zeroed(reported(&ifmr))?;
            ifmr.set_list(&mut words);
            self.ioctl(AddressFamily::LOCAL, request, &mut ifmr)?;
            attempts += 1;
        }
        words.truncate(reported(&ifmr));

        Ok(MediaDescriptor {
            current: ifmr.current.into(),
            mask: ifmr.mask.into(),
            status: ifmr.status as u32,
            active: ifmr.active.into(),
            supported: words.into_iter().map(MediaWord::from).collect(),
        })
    }

    /// Find the media query the interface answers, if any.
    fn media_request(&mut self, ifmr: &mut IfMediaReq) -> Result<Option<Request>> {
        for request in [Request::SIOCGIFXMEDIA, Request::SIOCGIFMEDIA] {
            match self.ioctl(AddressFamily::LOCAL, request, ifmr) {
                Ok(_) => return Ok(Some(request)),
                Err(Error::Ioctl { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }
}

fn reported(ifmr: &IfMediaReq) -> usize {
    usize::try_from(ifmr.count).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::word::*;
    use super::*;
    use crate::error::ErrorKind;
    use crate::fixtures::{MockPlatform, edit, os_error, write_at};

    const WORDS: [i32; 3] = [
        (IFM_ETHER | IFM_AUTO) as i32,
        (IFM_ETHER | IFM_1000_T | IFM_FDX) as i32,
        (IFM_ETHER | IFM_100_TX) as i32,
    ];

    /// Answer media queries like a driver with `words` supported media.
    fn driver(words: Vec<i32>) -> impl FnMut(&mut [u8]) {
        move |arg: &mut [u8]| {
            edit(arg, |ifmr: &mut IfMediaReq| {
                ifmr.current = (IFM_ETHER | IFM_AUTO) as i32;
                ifmr.active = (IFM_ETHER | IFM_1000_T | IFM_FDX) as i32;
                ifmr.status = (IFM_AVALID | IFM_ACTIVE) as i32;
                let room = usize::try_from(ifmr.count).unwrap();
                if ifmr.list_addr() != 0 {
                    let n = room.min(words.len());
                    unsafe { write_at(ifmr.list_addr(), &words[..n]) };
                }
                ifmr.count = words.len() as i32;
            })
        }
    }

    #[test]
    fn test_legacy_fallback() {
        let mut fill = driver(WORDS.to_vec());
        let platform = MockPlatform::new().on_ioctl(move |req, arg| {
            if req == Request::SIOCGIFXMEDIA {
                return Err(os_error(libc::EINVAL));
            }
            fill(arg);
            Ok(0)
        });
        let mut h = Handle::with_platform(platform.clone());

        let media = h.get_media("em0").unwrap();
        assert_eq!(platform.count(Request::SIOCGIFXMEDIA), 1);
        assert_eq!(platform.count(Request::SIOCGIFMEDIA), 2);
        assert_eq!(
            media.supported,
            WORDS.iter().map(|&w| MediaWord::from(w)).collect::<Vec<_>>()
        );
        assert_eq!(media.status_text(), "active");
        assert!(media.status_valid());
        assert_eq!(decode_subtype(media.active), "1000baseT");
    }

    #[test]
    fn test_extended_query_used_for_fill() {
        let mut fill = driver(WORDS.to_vec());
        let platform = MockPlatform::new().on_ioctl(move |_, arg| {
            fill(arg);
            Ok(0)
        });
        let mut h = Handle::with_platform(platform.clone());

        let media = h.get_media("ix0").unwrap();
        assert_eq!(media.supported.len(), 3);
        assert_eq!(
            platform.requests(),
            vec![Request::SIOCGIFXMEDIA, Request::SIOCGIFXMEDIA]
        );
    }

    #[test]
    fn test_unsupported() {
        let platform = MockPlatform::new().on_ioctl(|_, _| Err(os_error(libc::EINVAL)));
        let mut h = Handle::with_platform(platform.clone());

        let err = h.get_media("lo0").unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(h.error_kind(), ErrorKind::Ok);
        assert_eq!(platform.requests().len(), 2);
    }

    #[test]
    fn test_no_media_words() {
        let mut fill = driver(Vec::new());
        let platform = MockPlatform::new().on_ioctl(move |_, arg| {
            fill(arg);
            Ok(0)
        });
        let mut h = Handle::with_platform(platform.clone());

        let media = h.get_media("tap0").unwrap();
        assert!(media.supported.is_empty());
        // No fill call.
        assert_eq!(platform.requests().len(), 1);
    }

    #[test]
    fn test_fill_failure_is_recorded() {
        let platform = MockPlatform::new().on_ioctl(|_, arg| {
            let mut failed = false;
            edit(arg, |ifmr: &mut IfMediaReq| {
                failed = ifmr.list_addr() != 0;
                ifmr.count = 2;
            });
            if failed {
                Err(os_error(libc::ENXIO))
            } else {
                Ok(0)
            }
        });
        let mut h = Handle::with_platform(platform);

        let err = h.get_media("em0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Ioctl);
        assert_eq!(h.error_request(), Some(Request::SIOCGIFXMEDIA));
        assert_eq!(h.error_code(), libc::ENXIO);
    }

    #[test]
    fn test_growing_list_retries() {
        // Each call reports one more word than the last.
        let mut count = 2;
        let platform = MockPlatform::new().on_ioctl(move |_, arg| {
            let mut fill = driver((0..count).map(|i| (IFM_ETHER | 3 + i) as i32).collect());
            fill(arg);
            if count < 4 {
                count += 1;
            }
            Ok(0)
        });
        let mut h = Handle::with_platform(platform.clone());

        let media = h.get_media("em0").unwrap();
        assert_eq!(media.supported.len(), 4);
        // Size query, then fills of 2, 3 and 4 words.
        assert_eq!(platform.count(Request::SIOCGIFXMEDIA), 4);
    }

    #[test]
    fn test_retry_exhausted() {
        let mut count = 1;
        let platform = MockPlatform::new().on_ioctl(move |_, arg| {
            edit(arg, |ifmr: &mut IfMediaReq| ifmr.count = count);
            count += 1;
            Ok(0)
        });
        let mut h = Handle::builder()
            .resize_retries(2)
            .build_with(platform.clone());

        let err = h.get_media("em0").unwrap_err();
        assert!(matches!(
            err,
            Error::RetryExhausted {
                request: Request::SIOCGIFXMEDIA,
                attempts: 3
            }
        ));
        assert_eq!(h.error_kind(), ErrorKind::Other);
        // One size query plus three fills.
        assert_eq!(platform.requests().len(), 4);
    }

    #[test]
    fn test_socket_failure_is_not_unsupported() {
        let platform = MockPlatform::new().fail_socket(AddressFamily::LOCAL, libc::EMFILE);
        let mut h = Handle::with_platform(platform);

        let err = h.get_media("em0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Socket);
        assert_eq!(h.error_kind(), ErrorKind::Socket);
    }

    #[test]
    fn test_invalid_name() {
        let mut h = Handle::with_platform(MockPlatform::new());
        assert!(matches!(
            h.get_media("not a name"),
            Err(Error::InvalidName(_))
        ));
    }
}
