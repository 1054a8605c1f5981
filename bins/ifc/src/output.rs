//! Output formatting (JSON/text).

use std::io::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Pretty print (for JSON).
    pub pretty: bool,
    /// List every supported medium.
    pub verbose: bool,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

/// Trait for types that can be printed.
pub trait Printable {
    /// Print as plain text.
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> std::io::Result<()>;

    /// Convert to JSON value.
    fn to_json(&self) -> serde_json::Value;

    /// Print in the specified format.
    fn print<W: Write>(
        &self,
        w: &mut W,
        format: OutputFormat,
        opts: &OutputOptions,
    ) -> std::io::Result<()> {
        match format {
            OutputFormat::Text => self.print_text(w, opts),
            OutputFormat::Json => write_json(w, &self.to_json(), opts),
        }
    }
}

/// Print a list of items; JSON output is a single array.
pub fn print_all<T: Printable, W: Write>(
    items: &[T],
    w: &mut W,
    format: OutputFormat,
    opts: &OutputOptions,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => {
            for item in items {
                item.print_text(w, opts)?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::Value::Array(items.iter().map(Printable::to_json).collect());
            write_json(w, &json, opts)
        }
    }
}

fn write_json<W: Write>(
    w: &mut W,
    json: &serde_json::Value,
    opts: &OutputOptions,
) -> std::io::Result<()> {
    if opts.pretty {
        serde_json::to_writer_pretty(&mut *w, json)?;
    } else {
        serde_json::to_writer(&mut *w, json)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Interface flag names, BSD values.
const FLAG_NAMES: &[(u32, &str)] = &[
    (0x1, "UP"),
    (0x2, "BROADCAST"),
    (0x4, "DEBUG"),
    (0x8, "LOOPBACK"),
    (0x10, "POINTOPOINT"),
    (0x40, "RUNNING"),
    (0x80, "NOARP"),
    (0x100, "PROMISC"),
    (0x200, "ALLMULTI"),
    (0x800, "SIMPLEX"),
    (0x8000, "MULTICAST"),
];

/// Format interface flags as `8843<UP,BROADCAST,...>`.
pub fn format_flags(flags: u32) -> String {
    let names: Vec<&str> = FLAG_NAMES
        .iter()
        .filter(|(bit, _)| flags & bit != 0)
        .map(|(_, name)| *name)
        .collect();
    format!("{:x}<{}>", flags, names.join(","))
}
