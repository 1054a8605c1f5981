//! ifc set command implementation.

use clap::{Args, Subcommand};
use ifconfig::{Handle, Result};
use tracing::info;

#[derive(Args)]
pub struct SetCmd {
    /// Interface name.
    dev: String,

    #[command(subcommand)]
    attr: SetAttr,
}

#[derive(Subcommand)]
enum SetAttr {
    /// Set the MTU.
    Mtu {
        /// New MTU.
        mtu: i32,
    },

    /// Set the routing metric.
    Metric {
        /// New metric.
        metric: i32,
    },

    /// Set the description; an empty string removes it.
    #[command(visible_alias = "description")]
    Descr {
        /// Description text.
        text: String,
    },

    /// Remove the description.
    Nodescr,

    /// Rename the interface.
    Name {
        /// New interface name.
        name: String,
    },

    /// Set the forwarding table.
    Fib {
        /// FIB number.
        fib: u32,
    },

    /// Enable (positive) or disable (negative) capability bits.
    Cap {
        /// Capability bits, decimal or 0x-prefixed hex.
        #[arg(allow_negative_numbers = true, value_parser = parse_cap)]
        cap: i32,
    },

    /// Attach a VLAN interface to a parent with a tag.
    Vlan {
        /// VLAN tag.
        tag: u16,

        /// Parent interface.
        #[arg(long = "dev")]
        parent: String,
    },
}

impl SetCmd {
    pub fn run(self, handle: &mut Handle) -> Result<()> {
        let dev = self.dev.as_str();
        match self.attr {
            SetAttr::Mtu { mtu } => handle.set_mtu(dev, mtu)?,
            SetAttr::Metric { metric } => handle.set_metric(dev, metric)?,
            SetAttr::Descr { text } => handle.set_description(dev, &text)?,
            SetAttr::Nodescr => handle.unset_description(dev)?,
            SetAttr::Name { name } => handle.set_name(dev, &name)?,
            SetAttr::Fib { fib } => handle.set_fib(dev, fib)?,
            SetAttr::Cap { cap } => handle.set_capability(dev, cap)?,
            SetAttr::Vlan { tag, parent } => handle.set_vlan_tag(dev, &parent, tag)?,
        }
        info!(dev, "updated interface");
        Ok(())
    }
}

/// Parse a signed capability value: `0x1b`, `-0x2`, `16` or `-16`.
fn parse_cap(s: &str) -> std::result::Result<i32, String> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let value = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i32::from_str_radix(hex, 16),
        None => digits.parse::<i32>(),
    }
    .map_err(|e| format!("invalid capability value '{s}': {e}"))?;

    if value == 0 {
        return Err(format!("invalid capability value '{s}': no bits set"));
    }
    Ok(if negative { -value } else { value })
}
