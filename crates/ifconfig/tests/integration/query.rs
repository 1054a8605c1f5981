//! Query integration tests.
//!
//! Read-only requests against the loopback interface.

use ifconfig::{ErrorKind, Handle, Result};

use crate::common::loopback;

#[test]
fn test_loopback_mtu() -> Result<()> {
    let lo = loopback();
    let mut h = Handle::open();

    let mtu = h.mtu(&lo)?;
    assert!(mtu > 0, "loopback MTU should be positive, got {mtu}");
    assert_eq!(h.sockets().len(), 1);

    h.close();
    Ok(())
}

#[test]
fn test_loopback_has_no_media() {
    let lo = loopback();
    let mut h = Handle::open();

    let err = h.get_media(&lo).unwrap_err();
    assert!(err.is_unsupported(), "unexpected error: {err}");
    assert_eq!(h.error_kind(), ErrorKind::Ok);
}

#[test]
fn test_missing_interface() {
    let mut h = Handle::open();

    let err = h.mtu("nosuchif99").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Ioctl);
    assert!(err.is_not_found(), "unexpected error: {err}");
    assert_eq!(h.error_request(), Some(ifconfig::Request::SIOCGIFMTU));
}

#[test]
fn test_loopback_capabilities_and_groups() -> Result<()> {
    let lo = loopback();
    let mut h = Handle::open();

    let caps = h.capabilities(&lo)?;
    assert_eq!(caps.current & !caps.supported, 0);

    let groups = h.groups(&lo)?;
    assert!(groups.iter().any(|g| g == "lo"), "groups: {groups:?}");
    Ok(())
}

#[test]
fn test_enumeration_includes_loopback() -> Result<()> {
    let lo = loopback();
    let mut h = Handle::open();

    let mut found = false;
    h.for_each_interface(|h, iface| {
        if iface.name == lo {
            found = true;
            assert!(h.mtu(&iface.name)? > 0);
        }
        Ok(())
    })?;
    assert!(found);
    Ok(())
}
