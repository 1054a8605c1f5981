//! Common test utilities for integration tests.
//!
//! Provides `TestClone` for cloned interfaces that are destroyed on drop,
//! and helper macros for conditional test execution.

use ifconfig::{Handle, Result, interfaces};

/// A cloned interface destroyed when dropped.
pub struct TestClone {
    name: String,
}

impl TestClone {
    /// Create an interface from `cloner` (e.g. `"tap"`), letting the kernel
    /// pick the unit.
    pub fn new(h: &mut Handle, cloner: &str) -> Result<Self> {
        let name = h.create_interface(cloner)?;
        Ok(Self { name })
    }

    /// Name the kernel gave the interface.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for TestClone {
    fn drop(&mut self) {
        let _ = Handle::open().destroy_interface(&self.name);
    }
}

/// Name of the first loopback interface.
pub fn loopback() -> String {
    interfaces()
        .expect("getifaddrs")
        .into_iter()
        .find(|i| i.is_loopback())
        .map(|i| i.name)
        .expect("no loopback interface")
}

/// Check if running as root.
pub fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

/// Skip the test if not running as root.
#[macro_export]
macro_rules! require_root {
    () => {
        if !crate::common::is_root() {
            eprintln!("Skipping test: requires root");
            return Ok(());
        }
    };
}
