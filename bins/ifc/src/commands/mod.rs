//! ifc command implementations.

pub mod clone;
pub mod media;
pub mod set;
pub mod status;

use ifconfig::{Error, Result};

/// Turn "this interface cannot answer that" into `None`.
///
/// Missing interfaces and non-request failures still propagate.
pub(crate) fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_unsupported() => Ok(None),
        Err(e @ Error::Ioctl { .. }) if !e.is_not_found() => {
            tracing::trace!(error = %e, "attribute unavailable");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
