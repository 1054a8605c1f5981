//! ifc media command implementation.

use std::io::{self, Write};

use clap::Args;
use ifconfig::media::{decode_mode, decode_options, decode_subtype, decode_type};
use ifconfig::{Handle, MediaDescriptor, MediaWord, Result};
use serde_json::json;

use crate::output::{OutputFormat, OutputOptions, Printable};

#[derive(Args)]
pub struct MediaCmd {
    /// Interface name.
    dev: String,
}

impl MediaCmd {
    pub fn run(self, handle: &mut Handle, format: OutputFormat, opts: &OutputOptions) -> Result<()> {
        let media = handle.get_media(&self.dev)?;
        let report = MediaReport {
            name: self.dev,
            media,
        };

        // The media command always lists what the interface supports.
        let opts = OutputOptions {
            verbose: true,
            ..*opts
        };
        report.print(&mut io::stdout().lock(), format, &opts)?;
        Ok(())
    }
}

struct MediaReport {
    name: String,
    media: MediaDescriptor,
}

impl Printable for MediaReport {
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> io::Result<()> {
        writeln!(w, "{}:", self.name)?;
        print_media(w, &self.media, opts)
    }

    fn to_json(&self) -> serde_json::Value {
        let mut value = media_json(&self.media);
        value["ifname"] = json!(self.name);
        value
    }
}

/// Subtype followed by its options and mode, e.g. `1000baseT <full-duplex>`.
pub fn describe_word(word: MediaWord) -> String {
    let mut out = decode_subtype(word).to_string();
    let options = decode_options(word);
    if !options.is_empty() {
        out.push_str(&format!(" <{}>", options.join(",")));
    }
    if let Some(mode) = decode_mode(word) {
        out.push_str(&format!(" mode {mode}"));
    }
    out
}

/// The `media:` line: configured media, plus the active media when the
/// two differ (autoselect).
pub fn media_line(media: &MediaDescriptor) -> String {
    let mut line = format!(
        "{} {}",
        decode_type(media.current),
        describe_word(media.current)
    );
    if media.active != media.current && media.active.raw() != 0 {
        line.push_str(&format!(" ({})", describe_word(media.active)));
    }
    line
}

/// Print the media block of an interface, tab-indented.
pub fn print_media<W: Write>(
    w: &mut W,
    media: &MediaDescriptor,
    opts: &OutputOptions,
) -> io::Result<()> {
    writeln!(w, "\tmedia: {}", media_line(media))?;
    if media.status_valid() {
        writeln!(w, "\tstatus: {}", media.status_text())?;
    }
    if opts.verbose {
        writeln!(w, "\tsupported media:")?;
        for word in &media.supported {
            writeln!(w, "\t\t{word}")?;
        }
    }
    Ok(())
}

/// JSON form of a media descriptor with decoded names next to the raw words.
pub fn media_json(media: &MediaDescriptor) -> serde_json::Value {
    json!({
        "type": decode_type(media.current),
        "current": describe_word(media.current),
        "active": describe_word(media.active),
        "status": media.status_valid().then(|| media.status_text()),
        "raw": media,
        "supported": media
            .supported
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>(),
    })
}
