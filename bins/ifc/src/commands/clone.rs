//! ifc create/destroy command implementation.

use std::io::{self, Write};

use clap::Args;
use ifconfig::{Handle, Result};
use serde_json::json;

use crate::output::{OutputFormat, OutputOptions, Printable};

#[derive(Args)]
pub struct CreateCmd {
    /// Interface or cloner name (`tap`, `tap3`, `vlan`).
    name: String,

    /// Parent interface of a VLAN.
    #[arg(long, requires = "vlan")]
    vlan_dev: Option<String>,

    /// VLAN tag.
    #[arg(long, requires = "vlan_dev")]
    vlan: Option<u16>,
}

impl CreateCmd {
    pub fn run(self, handle: &mut Handle, format: OutputFormat, opts: &OutputOptions) -> Result<()> {
        let name = match (self.vlan_dev, self.vlan) {
            (Some(parent), Some(tag)) => handle.create_vlan(&self.name, &parent, tag)?,
            _ => handle.create_interface(&self.name)?,
        };
        Created { name }.print(&mut io::stdout().lock(), format, opts)?;
        Ok(())
    }
}

#[derive(Args)]
pub struct DestroyCmd {
    /// Interface name.
    name: String,
}

impl DestroyCmd {
    pub fn run(self, handle: &mut Handle) -> Result<()> {
        handle.destroy_interface(&self.name)
    }
}

/// Name the kernel gave a new interface.
struct Created {
    name: String,
}

impl Printable for Created {
    fn print_text<W: Write>(&self, w: &mut W, _opts: &OutputOptions) -> io::Result<()> {
        writeln!(w, "{}", self.name)
    }

    fn to_json(&self) -> serde_json::Value {
        json!({ "ifname": self.name })
    }
}
