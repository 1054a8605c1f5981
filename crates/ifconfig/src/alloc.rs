//! Fallible allocation for buffers whose size comes from the kernel.
//!
//! A reported count is untrusted; running out of memory for it is returned
//! as [`Error::Alloc`] instead of aborting.

use crate::error::{Error, Result};

/// Reserve room for exactly `additional` more elements of `v`.
///
/// The error carries the total length that was asked for.
pub(crate) fn reserve<T>(v: &mut Vec<T>, additional: usize) -> Result<()> {
    v.try_reserve_exact(additional).map_err(|_| Error::Alloc {
        requested: v.len().saturating_add(additional),
    })
}

/// A vector of `len` default (zero) elements.
pub(crate) fn zeroed<T: Clone + Default>(len: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    reserve(&mut v, len)?;
    v.resize(len, T::default());
    Ok(v)
}
