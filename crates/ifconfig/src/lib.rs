//! Network interface configuration through socket ioctls.
//!
//! This crate is a thin, typed layer over the BSD interface control
//! requests (`SIOCGIFMTU`, `SIOCGIFMEDIA`, `SIOCIFCREATE2`, ...). A
//! [`Handle`] owns one datagram socket per address family it has needed,
//! issues requests on them and records the last failure.
//!
//! # Features
//!
//! - `serde` - `Serialize` for result types
//! - `integration` - integration tests against real interfaces
//!
//! # Example
//!
//! ```ignore
//! use ifconfig::{Handle, media};
//!
//! fn main() -> ifconfig::Result<()> {
//!     let mut h = Handle::open();
//!
//!     println!("mtu {}", h.mtu("em0")?);
//!
//!     match h.get_media("em0") {
//!         Ok(m) => println!("{} ({})", m.active, m.status_text()),
//!         Err(e) if e.is_unsupported() => println!("no media"),
//!         Err(e) => return Err(e),
//!     }
//!
//!     h.close();
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every operation returns [`Result`]. The handle also keeps an
//! [`ErrorState`] snapshot of the last failure, readable through
//! [`Handle::error_kind`], [`Handle::error_code`] and
//! [`Handle::error_request`].

mod alloc;
pub mod cache;
pub mod clone;
pub mod error;
pub mod handle;
pub mod iface;
pub mod ifreq;
pub mod inet;
pub mod ioctl;
pub mod link;
pub mod media;
pub mod sys;

#[cfg(test)]
mod fixtures;

pub use cache::SocketCache;
pub use error::{Error, ErrorKind, ErrorState, Result};
pub use handle::{Handle, HandleBuilder};
pub use iface::{IfAddr, Interface, interfaces};
pub use inet::{Inet6Addr, InetAddr, NdInfo};
pub use ioctl::Request;
pub use link::Capabilities;
pub use media::{MediaDescriptor, MediaWord};
pub use sys::{AddressFamily, Os, Platform};
