//! Cloned interface integration tests.
//!
//! Creates tap and vlan interfaces; requires root.

use ifconfig::{Handle, Result};

use crate::common::TestClone;

#[test]
fn test_create_and_destroy_tap() -> Result<()> {
    require_root!();

    let mut h = Handle::open();
    let name = h.create_interface("tap")?;
    assert!(name.starts_with("tap"), "unexpected name {name}");

    h.destroy_interface(&name)?;
    assert!(h.mtu(&name).unwrap_err().is_not_found());
    Ok(())
}

#[test]
fn test_configure_tap() -> Result<()> {
    require_root!();

    let mut h = Handle::open();
    let tap = TestClone::new(&mut h, "tap")?;

    h.set_mtu(tap.name(), 1400)?;
    assert_eq!(h.mtu(tap.name())?, 1400);

    h.set_metric(tap.name(), 7)?;
    assert_eq!(h.metric(tap.name())?, 7);

    assert_eq!(h.description(tap.name())?, None);
    h.set_description(tap.name(), "ifconfig integration test")?;
    assert_eq!(
        h.description(tap.name())?.as_deref(),
        Some("ifconfig integration test")
    );
    h.unset_description(tap.name())?;
    assert_eq!(h.description(tap.name())?, None);

    assert!(h.status_text(tap.name()).is_ok());
    Ok(())
}

#[test]
fn test_vlan_on_loopback_is_refused() -> Result<()> {
    require_root!();

    let mut h = Handle::open();
    let lo = crate::common::loopback();
    let err = h.create_vlan("vlan", &lo, 100).unwrap_err();
    assert!(err.request().is_some(), "unexpected error: {err}");
    Ok(())
}
