//! ifc status command implementation.

use std::io::{self, Write};
use std::net::{IpAddr, Ipv4Addr};

use clap::Args;
use ifconfig::{
    Capabilities, Error, ErrorKind, Handle, Inet6Addr, InetAddr, Interface, MediaDescriptor,
    NdInfo, Result,
};
use serde_json::json;

use super::media::{media_json, print_media};
use super::optional;
use crate::output::{OutputFormat, OutputOptions, Printable, format_flags, print_all};

#[derive(Args, Default)]
pub struct StatusCmd {
    /// Interface name; all interfaces when omitted.
    dev: Option<String>,

    /// Only show interfaces that are up.
    #[arg(short = 'u', long, conflicts_with = "down")]
    up: bool,

    /// Only show interfaces that are down.
    #[arg(short = 'd', long)]
    down: bool,
}

impl StatusCmd {
    pub fn run(self, handle: &mut Handle, format: OutputFormat, opts: &OutputOptions) -> Result<()> {
        let mut reports = Vec::new();
        handle.for_each_interface(|h, iface| {
            if self.dev.as_deref().is_some_and(|dev| dev != iface.name) {
                return Ok(());
            }
            if (self.up && !iface.is_up()) || (self.down && iface.is_up()) {
                return Ok(());
            }
            reports.push(Report::collect(h, iface)?);
            Ok(())
        })?;

        if let Some(dev) = &self.dev {
            if reports.is_empty() {
                return Err(Error::InvalidArgument(format!(
                    "interface {dev} does not exist"
                )));
            }
        }

        print_all(&reports, &mut io::stdout().lock(), format, opts)?;
        Ok(())
    }
}

/// Everything the status view shows about one interface.
///
/// Attributes the driver does not implement are left out.
struct Report {
    name: String,
    flags: u32,
    addresses: Vec<Address>,
    metric: Option<i32>,
    mtu: Option<i32>,
    fib: Option<u32>,
    description: Option<String>,
    capabilities: Option<Capabilities>,
    media: Option<MediaDescriptor>,
    groups: Vec<String>,
    driver_status: Option<String>,
    nd6: Option<NdInfo>,
}

/// One address line, with as much detail as the kernel gave.
enum Address {
    Inet(InetAddr),
    Inet6(Inet6Addr),
    Bare(IpAddr),
}

impl Address {
    fn print_text<W: Write>(&self, w: &mut W, ifname: &str) -> io::Result<()> {
        match self {
            Self::Inet(a) => {
                write!(w, "\tinet {}", a.addr)?;
                if let Some(dst) = a.dst {
                    write!(w, " --> {dst}")?;
                }
                let mask = a.netmask.unwrap_or(Ipv4Addr::BROADCAST);
                write!(w, " netmask {:#010x}", u32::from(mask))?;
                if let Some(brd) = a.broadcast {
                    write!(w, " broadcast {brd}")?;
                }
                if a.vhid != 0 {
                    write!(w, " vhid {}", a.vhid)?;
                }
            }
            Self::Inet6(a) => {
                write!(w, "\tinet6 {}", a.addr)?;
                if a.scope_id != 0 {
                    write!(w, "%{ifname}")?;
                }
                if let Some(dst) = a.dst {
                    write!(w, " --> {dst}")?;
                }
                write!(w, " prefixlen {}", a.prefix_len)?;
                for flag in a.flag_names() {
                    write!(w, " {flag}")?;
                }
                if a.scope_id != 0 {
                    write!(w, " scopeid {:#x}", a.scope_id)?;
                }
                if a.vhid != 0 {
                    write!(w, " vhid {}", a.vhid)?;
                }
            }
            Self::Bare(IpAddr::V4(a)) => write!(w, "\tinet {a}")?,
            Self::Bare(IpAddr::V6(a)) => write!(w, "\tinet6 {a}")?,
        }
        writeln!(w)
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Inet(a) => json!({ "family": "inet", "info": a }),
            Self::Inet6(a) => json!({
                "family": "inet6",
                "info": a,
                "flag_names": a.flag_names(),
            }),
            Self::Bare(addr) => json!({
                "family": if addr.is_ipv4() { "inet" } else { "inet6" },
                "info": { "addr": addr },
            }),
        }
    }
}

/// Like [`optional`], but a host without IPv6 sockets also yields `None`.
fn optional_inet6<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Err(e) if e.kind() == ErrorKind::Socket => {
            tracing::debug!(error = %e, "no IPv6 socket");
            Ok(None)
        }
        result => optional(result),
    }
}

impl Report {
    fn collect(h: &mut Handle, iface: &Interface) -> Result<Self> {
        let name = iface.name.as_str();

        let mut addresses = Vec::new();
        h.for_each_ifaddr(iface, |h, addr| {
            let detail = match addr.addr {
                IpAddr::V4(_) => optional(h.inet_addrinfo(iface, addr))?.map(Address::Inet),
                IpAddr::V6(_) => {
                    optional_inet6(h.inet6_addrinfo(iface, addr))?.map(Address::Inet6)
                }
            };
            addresses.push(detail.unwrap_or(Address::Bare(addr.addr)));
            Ok(())
        })?;

        Ok(Self {
            name: iface.name.clone(),
            flags: iface.flags,
            addresses,
            metric: optional(h.metric(name))?,
            mtu: optional(h.mtu(name))?,
            fib: optional(h.fib(name))?,
            description: optional(h.description(name))?.flatten(),
            capabilities: optional(h.capabilities(name))?,
            media: optional(h.get_media(name))?,
            groups: optional(h.groups(name))?.unwrap_or_default(),
            driver_status: optional(h.status_text(name))?.filter(|s| !s.is_empty()),
            nd6: optional_inet6(h.nd6(name))?,
        })
    }
}

impl Printable for Report {
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> io::Result<()> {
        write!(w, "{}: flags={}", self.name, format_flags(self.flags))?;
        if let Some(metric) = self.metric {
            write!(w, " metric {metric}")?;
        }
        if let Some(mtu) = self.mtu {
            write!(w, " mtu {mtu}")?;
        }
        writeln!(w)?;

        if let Some(descr) = &self.description {
            writeln!(w, "\tdescription: {descr}")?;
        }
        if let Some(caps) = &self.capabilities {
            if caps.current != 0 {
                writeln!(w, "\toptions={:x}", caps.current)?;
            }
            if caps.supported != 0 {
                writeln!(w, "\tcapabilities={:x}", caps.supported)?;
            }
        }
        if let Some(fib) = self.fib.filter(|&fib| fib != 0) {
            writeln!(w, "\tfib: {fib}")?;
        }
        for addr in &self.addresses {
            addr.print_text(w, &self.name)?;
        }
        if let Some(media) = &self.media {
            print_media(w, media, opts)?;
        }
        if !self.groups.is_empty() {
            writeln!(w, "\tgroups: {}", self.groups.join(" "))?;
        }
        if let Some(status) = &self.driver_status {
            for line in status.lines() {
                writeln!(w, "\t{line}")?;
            }
        }
        if let Some(nd) = self.nd6.filter(|nd| nd.flags != 0) {
            writeln!(w, "\tnd6 options={:x}<{}>", nd.flags, nd.flag_names().join(","))?;
        }
        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "ifname": self.name,
            "flags": self.flags,
            "metric": self.metric,
            "mtu": self.mtu,
            "fib": self.fib,
            "description": self.description,
            "capabilities": self.capabilities,
            "addresses": self.addresses.iter().map(Address::to_json).collect::<Vec<_>>(),
            "media": self.media.as_ref().map(media_json),
            "groups": self.groups,
            "status": self.driver_status,
            "nd6": self.nd6,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv6Addr;

    use super::*;
    use ifconfig::MediaWord;
    use ifconfig::inet::{AddrLifetime, in6_flags, nd6_flags};
    use ifconfig::media::word::*;

    fn inet() -> Address {
        Address::Inet(InetAddr {
            addr: Ipv4Addr::new(192, 0, 2, 10),
            netmask: Some(Ipv4Addr::new(255, 255, 255, 0)),
            prefix_len: 24,
            dst: None,
            broadcast: Some(Ipv4Addr::new(192, 0, 2, 255)),
            vhid: 0,
        })
    }

    fn inet6() -> Address {
        Address::Inet6(Inet6Addr {
            addr: "fe80::1".parse().unwrap(),
            scope_id: 1,
            dst: None,
            prefix_len: 64,
            flags: in6_flags::TENTATIVE,
            lifetime: AddrLifetime::default(),
            vhid: 0,
        })
    }

    fn report() -> Report {
        Report {
            name: "em0".into(),
            flags: 0x8843,
            addresses: vec![inet(), inet6()],
            metric: Some(0),
            mtu: Some(1500),
            fib: Some(0),
            description: Some("uplink".into()),
            capabilities: Some(Capabilities {
                current: 0x1b,
                supported: 0x3b,
            }),
            media: Some(MediaDescriptor {
                current: MediaWord::new(IFM_ETHER | IFM_AUTO),
                mask: MediaWord::default(),
                status: IFM_AVALID | IFM_ACTIVE,
                active: MediaWord::new(IFM_ETHER | IFM_1000_T | IFM_FDX),
                supported: Vec::new(),
            }),
            groups: vec!["egress".into()],
            driver_status: None,
            nd6: Some(NdInfo {
                flags: nd6_flags::PERFORMNUD | nd6_flags::AUTO_LINKLOCAL,
                ..NdInfo::default()
            }),
        }
    }

    #[test]
    fn test_text() {
        let mut out = Vec::new();
        report()
            .print_text(&mut out, &OutputOptions::default())
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "\
em0: flags=8843<UP,BROADCAST,RUNNING,MULTICAST> metric 0 mtu 1500
\tdescription: uplink
\toptions=1b
\tcapabilities=3b
\tinet 192.0.2.10 netmask 0xffffff00 broadcast 192.0.2.255
\tinet6 fe80::1%em0 prefixlen 64 tentative scopeid 0x1
\tmedia: Ethernet autoselect (1000baseT <full-duplex>)
\tstatus: active
\tgroups: egress
\tnd6 options=21<PERFORMNUD,AUTO_LINKLOCAL>
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_capabilities_without_verbose() {
        let report = Report {
            capabilities: Some(Capabilities {
                current: 0,
                supported: 0x3b,
            }),
            ..report()
        };
        let mut out = Vec::new();
        report
            .print_text(&mut out, &OutputOptions::default())
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\tcapabilities=3b\n"));
        assert!(!text.contains("options=0"));
    }

    #[test]
    fn test_text_without_optional_attributes() {
        let report = Report {
            addresses: vec![Address::Bare(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 10)))],
            metric: None,
            mtu: None,
            fib: Some(2),
            description: None,
            capabilities: None,
            media: None,
            groups: Vec::new(),
            driver_status: Some("\tassociated".into()),
            nd6: None,
            ..report()
        };
        let mut out = Vec::new();
        report
            .print_text(&mut out, &OutputOptions::default())
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "em0: flags=8843<UP,BROADCAST,RUNNING,MULTICAST>\n\tfib: 2\n\tinet 192.0.2.10\n\t\tassociated\n"
        );
    }

    #[test]
    fn test_point_to_point_addresses() {
        let addresses = [
            Address::Inet(InetAddr {
                addr: Ipv4Addr::new(198, 51, 100, 2),
                netmask: None,
                prefix_len: 32,
                dst: Some(Ipv4Addr::new(198, 51, 100, 1)),
                broadcast: None,
                vhid: 7,
            }),
            Address::Inet6(Inet6Addr {
                addr: "2001:db8::2".parse().unwrap(),
                scope_id: 0,
                dst: Some("2001:db8::1".parse().unwrap()),
                prefix_len: 128,
                flags: 0,
                lifetime: AddrLifetime::default(),
                vhid: 0,
            }),
            Address::Bare(IpAddr::V6(Ipv6Addr::LOCALHOST)),
        ];
        let mut out = Vec::new();
        for addr in &addresses {
            addr.print_text(&mut out, "tun0").unwrap();
        }
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\tinet 198.51.100.2 --> 198.51.100.1 netmask 0xffffffff vhid 7\n\
             \tinet6 2001:db8::2 --> 2001:db8::1 prefixlen 128\n\
             \tinet6 ::1\n"
        );
    }

    #[test]
    fn test_optional_inet6() {
        let no_socket = Error::Socket {
            family: ifconfig::AddressFamily::INET6,
            source: io::Error::from(io::ErrorKind::Unsupported),
        };
        assert!(optional_inet6::<()>(Err(no_socket)).unwrap().is_none());
        assert!(optional_inet6::<()>(Err(Error::InvalidName("x y".into()))).is_err());
        assert_eq!(optional_inet6(Ok(3)).unwrap(), Some(3));
    }

    #[test]
    fn test_json() {
        let value = report().to_json();
        assert_eq!(value["ifname"], "em0");
        assert_eq!(value["mtu"], 1500);
        assert_eq!(value["addresses"][0]["family"], "inet");
        assert_eq!(value["addresses"][0]["info"]["addr"], "192.0.2.10");
        assert_eq!(value["addresses"][0]["info"]["prefix_len"], 24);
        assert_eq!(value["addresses"][1]["flag_names"][0], "tentative");
        assert_eq!(value["capabilities"]["current"], 0x1b);
        assert_eq!(value["media"]["status"], "active");
        assert_eq!(value["nd6"]["flags"], 0x21);
        assert!(value["status"].is_null());
    }
}
