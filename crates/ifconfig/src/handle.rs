//! The handle: socket cache, request dispatch and error state.

use std::os::unix::io::RawFd;

use tracing::debug;
use zerocopy::{FromBytes, IntoBytes};

use crate::cache::SocketCache;
use crate::error::{Error, ErrorKind, ErrorState, Result};
use crate::ioctl::Request;
use crate::sys::{AddressFamily, Os, Platform};

/// Default number of refills for variable-length results.
const DEFAULT_RESIZE_RETRIES: usize = 3;

/// State object for interface operations.
///
/// A handle owns one datagram socket per address family it has needed so
/// far, and remembers the last failure. Close it with
/// [`close`](Self::close); dropping it has the same effect.
///
/// # Example
///
/// ```ignore
/// use ifconfig::Handle;
///
/// let mut h = Handle::open();
/// let mtu = h.mtu("em0")?;
/// h.set_mtu("em0", 9000)?;
/// h.close();
/// ```
pub struct Handle<P: Platform = Os> {
    sockets: SocketCache<P>,
    error: ErrorState,
    resize_retries: usize,
}

impl Handle<Os> {
    /// Open a handle on the running kernel.
    pub fn open() -> Self {
        Self::builder().build()
    }

    /// Start configuring a handle.
    pub fn builder() -> HandleBuilder {
        HandleBuilder::new()
    }
}

impl<P: Platform> Handle<P> {
    /// Open a handle that issues its system calls through `platform`.
    pub fn with_platform(platform: P) -> Self {
        HandleBuilder::new().build_with(platform)
    }

    /// Close every cached socket and dispose of the handle.
    pub fn close(mut self) {
        self.sockets.teardown();
    }

    /// Get the socket cache.
    pub fn sockets(&self) -> &SocketCache<P> {
        &self.sockets
    }

    /// Get the socket for `family`, creating it if needed.
    pub fn socket(&mut self, family: AddressFamily) -> Result<RawFd> {
        let result = self.sockets.acquire(family);
        self.track(result)
    }

    /// Issue `request` with `payload` on the socket for `family`.
    ///
    /// This is the single path through which every attribute operation
    /// reaches the kernel. On failure the error is returned and recorded as
    /// the handle's last error.
    pub fn dispatch<T>(
        &mut self,
        family: AddressFamily,
        request: Request,
        payload: &mut T,
    ) -> Result<libc::c_int>
    where
        T: IntoBytes + FromBytes,
    {
        let result = self.ioctl(family, request, payload);
        self.track(result)
    }

    /// [`dispatch`](Self::dispatch) without touching the error state.
    pub(crate) fn ioctl<T>(
        &mut self,
        family: AddressFamily,
        request: Request,
        payload: &mut T,
    ) -> Result<libc::c_int>
    where
        T: IntoBytes + FromBytes,
    {
        let fd = self.sockets.acquire(family)?;
        self.sockets
            .platform()
            .ioctl(fd, request, payload.as_mut_bytes())
            .map_err(|source| {
                debug!(%request, %family, error = %source, "ioctl failed");
                Error::Ioctl { request, source }
            })
    }

    /// Run `op` and record its error, if any.
    pub(crate) fn tracked<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let result = op(self);
        self.track(result)
    }

    /// Record the error of a failed public operation.
    pub(crate) fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.error = err.state();
        }
        result
    }

    /// Refill budget for variable-length results.
    pub(crate) fn resize_retries(&self) -> usize {
        self.resize_retries
    }

    /// The last recorded failure.
    ///
    /// Only meaningful right after an operation returned an error.
    pub fn last_error(&self) -> ErrorState {
        self.error
    }

    /// Category of the last failure.
    pub fn error_kind(&self) -> ErrorKind {
        self.error.kind
    }

    /// OS error code of the last failure, 0 if it had none.
    pub fn error_code(&self) -> i32 {
        self.error.errno
    }

    /// The request that failed last, if the last failure was a request.
    pub fn error_request(&self) -> Option<Request> {
        self.error.request
    }
}

/// Builder for [`Handle`].
#[derive(Debug, Clone)]
pub struct HandleBuilder {
    max_sockets: Option<usize>,
    resize_retries: usize,
}

impl HandleBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            max_sockets: None,
            resize_retries: DEFAULT_RESIZE_RETRIES,
        }
    }

    /// Limit the number of sockets (address families) the handle may cache.
    ///
    /// A request needing one more family fails with
    /// [`Error::Alloc`](crate::Error::Alloc), kind `Other`, errno `ENOMEM`.
    pub fn max_sockets(mut self, max: usize) -> Self {
        self.max_sockets = Some(max);
        self
    }

    /// How many times a variable-length query (media list, description,
    /// groups) may be reissued when the kernel reports a larger size.
    pub fn resize_retries(mut self, retries: usize) -> Self {
        self.resize_retries = retries;
        self
    }

    /// Build a handle on the running kernel.
    pub fn build(self) -> Handle<Os> {
        self.build_with(Os)
    }

    /// Build a handle on a custom platform.
    pub fn build_with<P: Platform>(self, platform: P) -> Handle<P> {
        let mut sockets = SocketCache::new(platform);
        if let Some(max) = self.max_sockets {
            sockets = sockets.with_max_sockets(max);
        }
        Handle {
            sockets,
            error: ErrorState::default(),
            resize_retries: self.resize_retries,
        }
    }
}

impl Default for HandleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
