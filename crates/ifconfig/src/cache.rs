//! Per-handle socket cache.
//!
//! Maps an address family to an open datagram socket. Sockets are created
//! on first use and kept until teardown; there is no eviction. The number of
//! distinct families a process touches is tiny, so lookups are a linear scan
//! over two parallel arrays.

use std::os::unix::io::RawFd;

use tracing::{debug, trace};

use crate::alloc;
use crate::error::{Error, Result};
use crate::sys::{AddressFamily, Platform};

/// Capacity of the first allocation.
const INITIAL_CAPACITY: usize = 4;

/// Family to socket store owned by a handle.
pub struct SocketCache<P: Platform> {
    platform: P,
    keys: Vec<AddressFamily>,
    values: Vec<RawFd>,
    /// Slots reserved so far; doubles on each growth.
    capacity: usize,
    max_sockets: Option<usize>,
}

impl<P: Platform> SocketCache<P> {
    /// Create an empty cache.
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            keys: Vec::new(),
            values: Vec::new(),
            capacity: 0,
            max_sockets: None,
        }
    }

    /// Refuse to grow past `max` sockets.
    ///
    /// Reaching the ceiling fails like running out of memory: the request
    /// returns [`Error::Alloc`] and the cache keeps its current entries.
    pub fn with_max_sockets(mut self, max: usize) -> Self {
        self.max_sockets = Some(max);
        self
    }

    /// Get the platform this cache creates sockets with.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Number of cached sockets.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no socket has been created yet.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Slots currently reserved.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up the socket for `family` without creating one.
    pub fn get(&self, family: AddressFamily) -> Option<RawFd> {
        self.keys
            .iter()
            .position(|&k| k == family)
            .map(|i| self.values[i])
    }

    /// Cached `(family, socket)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (AddressFamily, RawFd)> + '_ {
        self.keys.iter().copied().zip(self.values.iter().copied())
    }

    /// Get the socket for `family`, creating it if needed.
    pub fn acquire(&mut self, family: AddressFamily) -> Result<RawFd> {
        if let Some(fd) = self.get(family) {
            return Ok(fd);
        }

        if self.keys.len() == self.capacity {
            self.grow()?;
        }

        let fd = self
            .platform
            .socket(family)
            .map_err(|source| Error::Socket { family, source })?;
        debug!(%family, fd, "created socket");

        self.values.push(fd);
        self.keys.push(family);
        Ok(fd)
    }

    fn grow(&mut self) -> Result<()> {
        let mut requested = if self.capacity == 0 {
            INITIAL_CAPACITY
        } else {
            self.capacity * 2
        };
        if let Some(max) = self.max_sockets {
            requested = requested.min(max);
        }
        if requested <= self.capacity {
            return Err(Error::Alloc { requested: self.capacity + 1 });
        }

        let additional = requested - self.keys.len();
        // Values first, so a key is never visible without its socket.
        alloc::reserve(&mut self.values, additional)?;
        alloc::reserve(&mut self.keys, additional)?;

        trace!(from = self.capacity, to = requested, "grew socket cache");
        self.capacity = requested;
        Ok(())
    }

    /// Close every cached socket and release the storage.
    pub fn teardown(&mut self) {
        for fd in self.values.drain(..) {
            self.platform.close(fd);
        }
        self.keys = Vec::new();
        self.values = Vec::new();
        self.capacity = 0;
    }
}

impl<P: Platform> Drop for SocketCache<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}
