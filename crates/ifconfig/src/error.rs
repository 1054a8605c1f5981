//! Error types for interface operations.
//!
//! Every fallible operation returns [`Result`]. The [`Handle`](crate::Handle)
//! additionally keeps an [`ErrorState`] snapshot of the last failure so
//! callers that prefer the classic "check the handle" style can still ask
//! what went wrong after the fact.

use std::io;

use crate::ioctl::Request;
use crate::sys::AddressFamily;

/// Result type for interface operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the kernel.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A buffer could not be allocated.
    ///
    /// Also returned when the socket cache would grow past its configured
    /// `max_sockets` ceiling.
    #[error("out of memory allocating {requested} entries")]
    Alloc {
        /// Number of entries asked for.
        requested: usize,
    },

    /// Creating a datagram socket failed.
    #[error("socket({family}) failed: {source}")]
    Socket {
        /// Address family of the socket.
        family: AddressFamily,
        /// The underlying error.
        source: io::Error,
    },

    /// A control request returned an error.
    #[error("ioctl {request} failed: {source}")]
    Ioctl {
        /// The failing request.
        request: Request,
        /// The underlying error.
        source: io::Error,
    },

    /// The interface has no support for the queried feature.
    ///
    /// This is not a fault: it reports that the operation legitimately has
    /// no result for this interface.
    #[error("operation not supported: {0}")]
    NotSupported(String),

    /// Invalid interface name.
    #[error("invalid interface name: {0}")]
    InvalidName(String),

    /// Invalid argument to an operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A variable-length result kept growing between size query and fill.
    #[error("{request}: result size still changing after {attempts} attempts")]
    RetryExhausted {
        /// The request that was being retried.
        request: Request,
        /// Number of fill attempts made.
        attempts: usize,
    },

    /// I/O error outside of the ioctl path (e.g. address list walking).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Error category, as recorded in [`ErrorState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ErrorKind {
    /// No error, or "feature not available on this interface".
    #[default]
    Ok,
    /// Allocation or other non-request, non-socket failure.
    Other,
    /// A control request failed.
    Ioctl,
    /// Socket creation failed.
    Socket,
}

/// Snapshot of the last failure seen by a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ErrorState {
    /// Error category.
    pub kind: ErrorKind,
    /// The failing request, only set for [`ErrorKind::Ioctl`].
    pub request: Option<Request>,
    /// OS error code, 0 when the failure did not come from a system call.
    pub errno: i32,
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotSupported(_) => ErrorKind::Ok,
            Self::Ioctl { .. } => ErrorKind::Ioctl,
            Self::Socket { .. } => ErrorKind::Socket,
            Self::Alloc { .. }
            | Self::InvalidName(_)
            | Self::InvalidArgument(_)
            | Self::RetryExhausted { .. }
            | Self::Io(_) => ErrorKind::Other,
        }
    }

    /// Get the OS error code, if there is one.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Alloc { .. } => Some(libc::ENOMEM),
            Self::InvalidName(_) | Self::InvalidArgument(_) => Some(libc::EINVAL),
            Self::Socket { source, .. } | Self::Ioctl { source, .. } | Self::Io(source) => {
                source.raw_os_error()
            }
            Self::NotSupported(_) | Self::RetryExhausted { .. } => None,
        }
    }

    /// The failing control request, if this is a request failure.
    pub fn request(&self) -> Option<Request> {
        match self {
            Self::Ioctl { request, .. } => Some(*request),
            _ => None,
        }
    }

    /// Record this error as an [`ErrorState`].
    pub fn state(&self) -> ErrorState {
        ErrorState {
            kind: self.kind(),
            request: self.request(),
            errno: self.errno().unwrap_or(0),
        }
    }

    /// Check if the interface simply lacks the feature.
    pub fn is_unsupported(&self) -> bool {
        self.kind() == ErrorKind::Ok
    }

    /// Check if this is a "no such interface" error (ENXIO, ENODEV, ENOENT).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.errno(),
            Some(libc::ENXIO) | Some(libc::ENODEV) | Some(libc::ENOENT)
        )
    }

    /// Check if this is a permission error (EPERM, EACCES).
    pub fn is_permission_denied(&self) -> bool {
        matches!(self.errno(), Some(libc::EPERM) | Some(libc::EACCES))
    }
}
