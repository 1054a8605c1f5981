//! Media word decoding and name lookup.
//!
//! Decoding is pure and total: every word maps to some string, with
//! [`UNKNOWN_TYPE`] and [`UNKNOWN_SUBTYPE`] standing in for words no table
//! describes. Aliases never show up in decoded output.

use super::MediaDescriptor;
use super::tables::{Description, TYPE_DESCRIPTIONS, TypeTables, tables_for};
use super::word::*;
use crate::error::{Error, Result};

/// Returned by [`decode_type`] for an unrecognised top-level type.
pub const UNKNOWN_TYPE: &str = "<unknown type>";

/// Returned by [`decode_subtype`] for an unrecognised subtype.
pub const UNKNOWN_SUBTYPE: &str = "<unknown subtype>";

fn printable(tables: &'static [&'static [Description]]) -> impl Iterator<Item = &'static Description> {
    tables.iter().flat_map(|t| t.iter()).filter(|d| !d.alias)
}

fn find_name(tables: &'static [&'static [Description]], name: &str) -> Option<u32> {
    tables
        .iter()
        .flat_map(|t| t.iter())
        .find(|d| d.name.eq_ignore_ascii_case(name))
        .map(|d| d.word)
}

fn tables_or_err(media_type: u32) -> Result<&'static TypeTables> {
    tables_for(media_type)
        .ok_or_else(|| Error::InvalidArgument(format!("unknown media type {media_type:#x}")))
}

pub(crate) fn type_description(word: MediaWord) -> Option<&'static str> {
    TYPE_DESCRIPTIONS
        .iter()
        .find(|d| !d.alias && d.word == word.media_type())
        .map(|d| d.name)
}

pub(crate) fn subtype_description(word: MediaWord) -> Option<&'static str> {
    let tables = tables_for(word.media_type())?;
    printable(tables.subtypes)
        .find(|d| d.word == word.subtype())
        .map(|d| d.name)
}

/// Name of the top-level type of `word`, e.g. `"Ethernet"`.
pub fn decode_type(word: impl Into<MediaWord>) -> &'static str {
    type_description(word.into()).unwrap_or(UNKNOWN_TYPE)
}

/// Name of the subtype of `word`, e.g. `"1000baseT"`.
pub fn decode_subtype(word: impl Into<MediaWord>) -> &'static str {
    subtype_description(word.into()).unwrap_or(UNKNOWN_SUBTYPE)
}

/// Names of every option set in `word`, in table order.
pub fn decode_options(word: impl Into<MediaWord>) -> Vec<&'static str> {
    let word = word.into();
    let Some(tables) = tables_for(word.media_type()) else {
        return Vec::new();
    };
    printable(tables.options)
        .filter(|d| word.options() & d.word != 0)
        .map(|d| d.name)
        .collect()
}

/// Name of the operating mode of `word`, for types that have modes.
pub fn decode_mode(word: impl Into<MediaWord>) -> Option<&'static str> {
    let word = word.into();
    let tables = tables_for(word.media_type())?;
    printable(tables.modes)
        .find(|d| d.word == word.mode())
        .map(|d| d.name)
}

/// Link status text for the active medium.
///
/// Returns an empty string for types without a status convention.
pub fn decode_status(media: &MediaDescriptor) -> &'static str {
    let active = media.active;
    let up = media.status & IFM_ACTIVE != 0;

    match active.media_type() {
        IFM_ETHER | IFM_ATM => {
            if up {
                "active"
            } else {
                "no carrier"
            }
        }
        IFM_FDDI | IFM_TOKEN => {
            if up {
                "inserted"
            } else {
                "no ring"
            }
        }
        IFM_IEEE80211 => match (up, active.opmode()) {
            // Only station mode associates.
            (true, IFM_IEEE80211_STA) => "associated",
            (true, _) => "running",
            (false, _) => "no carrier",
        },
        _ => "",
    }
}

/// Top-level type word for `name`. Case-insensitive; aliases accepted.
pub fn lookup_type(name: &str) -> Option<u32> {
    TYPE_DESCRIPTIONS
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case(name))
        .map(|d| d.word)
}

/// Subtype word for `name` under `media_type`.
pub fn lookup_subtype(media_type: u32, name: &str) -> Result<u32> {
    let tables = tables_or_err(media_type)?;
    find_name(tables.subtypes, name)
        .ok_or_else(|| Error::InvalidArgument(format!("unknown media subtype: {name}")))
}

/// Mode word for `name` under `media_type`, if the type has such a mode.
pub fn lookup_mode(media_type: u32, name: &str) -> Option<u32> {
    find_name(tables_for(media_type)?.modes, name)
}

/// Option bits for a comma-separated list of option names.
pub fn lookup_options(media_type: u32, list: &str) -> Result<u32> {
    let tables = tables_or_err(media_type)?;
    list.split(',')
        .filter(|opt| !opt.is_empty())
        .try_fold(0, |acc, opt| {
            find_name(tables.options, opt)
                .map(|bits| acc | bits)
                .ok_or_else(|| Error::InvalidArgument(format!("unknown option: {opt}")))
        })
}
