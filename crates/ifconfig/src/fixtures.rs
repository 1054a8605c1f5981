//! Scriptable platform for unit tests.
//!
//! [`MockPlatform`] hands out fake descriptors, records every socket,
//! request and close, and lets each test decide how requests behave.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::os::unix::io::RawFd;
use std::rc::Rc;

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::ioctl::Request;
use crate::sys::{AddressFamily, Platform};

type IoctlHandler = Box<dyn FnMut(Request, &mut [u8]) -> io::Result<libc::c_int>>;

#[derive(Default)]
struct Log {
    next_fd: RawFd,
    opened: Vec<(AddressFamily, RawFd)>,
    closed: Vec<RawFd>,
    requests: Vec<(RawFd, Request)>,
    socket_errors: HashMap<AddressFamily, i32>,
}

struct Inner {
    log: RefCell<Log>,
    handler: RefCell<IoctlHandler>,
}

/// Cloneable handle on a shared mock kernel.
#[derive(Clone)]
pub(crate) struct MockPlatform(Rc<Inner>);

impl MockPlatform {
    pub(crate) fn new() -> Self {
        Self(Rc::new(Inner {
            log: RefCell::new(Log {
                next_fd: 100,
                ..Default::default()
            }),
            handler: RefCell::new(Box::new(|_, _| Ok(0))),
        }))
    }

    /// Replace the request handler.
    pub(crate) fn on_ioctl(
        self,
        handler: impl FnMut(Request, &mut [u8]) -> io::Result<libc::c_int> + 'static,
    ) -> Self {
        *self.0.handler.borrow_mut() = Box::new(handler);
        self
    }

    /// Make socket creation for `family` fail with `errno`.
    pub(crate) fn fail_socket(self, family: AddressFamily, errno: i32) -> Self {
        self.0.log.borrow_mut().socket_errors.insert(family, errno);
        self
    }

    pub(crate) fn opened(&self) -> Vec<(AddressFamily, RawFd)> {
        self.0.log.borrow().opened.clone()
    }

    pub(crate) fn closed(&self) -> Vec<RawFd> {
        self.0.log.borrow().closed.clone()
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.0.log.borrow().requests.iter().map(|(_, r)| *r).collect()
    }

    pub(crate) fn count(&self, request: Request) -> usize {
        self.requests().iter().filter(|r| **r == request).count()
    }
}

impl Platform for MockPlatform {
    fn socket(&self, family: AddressFamily) -> io::Result<RawFd> {
        let mut log = self.0.log.borrow_mut();
        if let Some(errno) = log.socket_errors.get(&family) {
            return Err(io::Error::from_raw_os_error(*errno));
        }
        let fd = log.next_fd;
        log.next_fd += 1;
        log.opened.push((family, fd));
        Ok(fd)
    }

    fn ioctl(&self, fd: RawFd, request: Request, arg: &mut [u8]) -> io::Result<libc::c_int> {
        self.0.log.borrow_mut().requests.push((fd, request));
        (self.0.handler.borrow_mut())(request, arg)
    }

    fn close(&self, fd: RawFd) {
        self.0.log.borrow_mut().closed.push(fd);
    }
}

/// Shorthand for an errno-carrying failure.
pub(crate) fn os_error(errno: i32) -> io::Error {
    io::Error::from_raw_os_error(errno)
}

/// Decode the request structure in `arg`, let `f` change it, write it back.
pub(crate) fn edit<T>(arg: &mut [u8], f: impl FnOnce(&mut T))
where
    T: FromBytes + IntoBytes + Immutable,
{
    let mut value = T::read_from_bytes(arg)
        .ok()
        .expect("payload has the wrong size");
    f(&mut value);
    arg.copy_from_slice(value.as_bytes());
}

/// Copy `items` to the caller-owned buffer at `addr`, as a driver would.
///
/// # Safety
///
/// `addr` must point to a live, writable buffer of at least `items.len()`
/// elements of `T`.
pub(crate) unsafe fn write_at<T: Copy>(addr: u64, items: &[T]) {
    unsafe {
        std::ptr::copy_nonoverlapping(items.as_ptr(), addr as usize as *mut T, items.len());
    }
}

/// Read `len` bytes from the caller-owned buffer at `addr`.
///
/// # Safety
///
/// `addr` must point to a live buffer of at least `len` bytes.
pub(crate) unsafe fn read_at(addr: u64, len: usize) -> Vec<u8> {
    unsafe { std::slice::from_raw_parts(addr as usize as *const u8, len).to_vec() }
}
