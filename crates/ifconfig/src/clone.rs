//! Cloned interfaces: create, destroy and VLAN setup.

use tracing::debug;

use crate::error::Result;
use crate::handle::Handle;
use crate::ifreq::{IfReq, VlanReq};
use crate::ioctl::Request;
use crate::sys::Platform;

impl<P: Platform> Handle<P> {
    /// Create a cloned interface and return the name the kernel gave it.
    ///
    /// `name` is either a full name (`"tap3"`) or a cloner name (`"tap"`),
    /// in which case the kernel picks the unit number.
    pub fn create_interface(&mut self, name: &str) -> Result<String> {
        self.tracked(|h| {
            let mut ifr = IfReq::new(name)?;
            h.local(Request::SIOCIFCREATE2, &mut ifr)?;
            let created = ifr.name();
            debug!(requested = name, %created, "created interface");
            Ok(created)
        })
    }

    /// Destroy a cloned interface.
    pub fn destroy_interface(&mut self, name: &str) -> Result<()> {
        self.tracked(|h| {
            let mut ifr = IfReq::new(name)?;
            h.local(Request::SIOCIFDESTROY, &mut ifr)?;
            Ok(())
        })
    }

    /// Create a VLAN interface with `tag` on top of `parent`.
    ///
    /// Returns the name of the new interface.
    pub fn create_vlan(&mut self, name: &str, parent: &str, tag: u16) -> Result<String> {
        self.tracked(|h| {
            let mut vlr = VlanReq::new(parent, tag)?;
            let mut ifr = IfReq::new(name)?;
            ifr.set_data(&mut vlr);
            h.local(Request::SIOCIFCREATE2, &mut ifr)?;
            let created = ifr.name();
            debug!(%created, parent, tag, "created vlan");
            Ok(created)
        })
    }

    /// Attach an existing VLAN interface to `parent` with `tag`.
    pub fn set_vlan_tag(&mut self, name: &str, parent: &str, tag: u16) -> Result<()> {
        self.tracked(|h| {
            let mut vlr = VlanReq::new(parent, tag)?;
            let mut ifr = IfReq::new(name)?;
            ifr.set_data(&mut vlr);
            h.local(Request::SIOCSETVLAN, &mut ifr)?;
            Ok(())
        })
    }
}
