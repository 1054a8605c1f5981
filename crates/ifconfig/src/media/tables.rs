//! Media description tables.
//!
//! Every top-level media type has an ordered list of subtype tables, option
//! tables and mode tables. Shared tables come before the type specific ones
//! and lookups stop at the first match, so declaration order is lookup
//! order. Alias entries only take part in name to word lookups.

use super::word::*;

/// A word and its printable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Description {
    /// Media word bits this entry describes.
    pub word: u32,
    /// Printable name.
    pub name: &'static str,
    /// Alternate spelling, accepted on input but never printed.
    pub alias: bool,
}

const fn desc(word: u32, name: &'static str) -> Description {
    Description {
        word,
        name,
        alias: false,
    }
}

const fn alias(word: u32, name: &'static str) -> Description {
    Description {
        word,
        name,
        alias: true,
    }
}

/// Tables for one top-level media type.
#[derive(Debug)]
pub struct TypeTables {
    /// Top-level type word (`IFM_ETHER`, ...).
    pub word: u32,
    pub subtypes: &'static [&'static [Description]],
    pub options: &'static [&'static [Description]],
    pub modes: &'static [&'static [Description]],
}

pub static TYPE_DESCRIPTIONS: &[Description] = &[
    desc(IFM_ETHER, "Ethernet"),
    alias(IFM_ETHER, "ether"),
    desc(IFM_TOKEN, "Token ring"),
    alias(IFM_TOKEN, "TR"),
    desc(IFM_FDDI, "FDDI"),
    desc(IFM_IEEE80211, "IEEE 802.11 Wireless Ethernet"),
    desc(IFM_ATM, "ATM"),
    desc(IFM_CARP, "Common Address Redundancy Protocol"),
];

pub static SHARED_SUBTYPES: &[Description] = &[
    desc(IFM_AUTO, "autoselect"),
    desc(IFM_MANUAL, "manual"),
    desc(IFM_NONE, "none"),
];

pub static SHARED_SUBTYPE_ALIASES: &[Description] = &[alias(IFM_AUTO, "auto")];

pub static SHARED_OPTIONS: &[Description] = &[
    desc(IFM_FDX, "full-duplex"),
    desc(IFM_HDX, "half-duplex"),
    desc(IFM_FLOW, "flowcontrol"),
    desc(IFM_FLAG0, "flag0"),
    desc(IFM_FLAG1, "flag1"),
    desc(IFM_FLAG2, "flag2"),
    desc(IFM_LOOP, "hw-loopback"),
];

pub static SHARED_OPTION_ALIASES: &[Description] = &[
    alias(IFM_FDX, "fdx"),
    alias(IFM_HDX, "hdx"),
    alias(IFM_FLOW, "flow"),
    alias(IFM_LOOP, "loop"),
    alias(IFM_LOOP, "loopback"),
];

pub static ETHERNET_SUBTYPES: &[Description] = &[
    desc(IFM_10_T, "10baseT/UTP"),
    desc(IFM_10_2, "10base2/BNC"),
    desc(IFM_10_5, "10base5/AUI"),
    desc(IFM_100_TX, "100baseTX"),
    desc(IFM_100_FX, "100baseFX"),
    desc(IFM_100_T4, "100baseT4"),
    desc(IFM_100_VG, "100baseVG"),
    desc(IFM_100_T2, "100baseT2"),
    desc(IFM_10_STP, "10baseSTP"),
    desc(IFM_10_FL, "10baseFL"),
    desc(IFM_1000_SX, "1000baseSX"),
    desc(IFM_1000_LX, "1000baseLX"),
    desc(IFM_1000_CX, "1000baseCX"),
    desc(IFM_1000_T, "1000baseT"),
    desc(IFM_HPNA_1, "homePNA"),
    desc(IFM_10G_LR, "10Gbase-LR"),
    desc(IFM_10G_SR, "10Gbase-SR"),
    desc(IFM_10G_CX4, "10Gbase-CX4"),
    desc(IFM_2500_SX, "2500BaseSX"),
    desc(IFM_10G_LRM, "10Gbase-LRM"),
    desc(IFM_10G_TWINAX, "10Gbase-Twinax"),
    desc(IFM_10G_TWINAX_LONG, "10Gbase-Twinax-Long"),
    desc(IFM_UNKNOWN, "Unknown"),
    desc(IFM_10G_T, "10Gbase-T"),
    desc(IFM_40G_CR4, "40Gbase-CR4"),
    desc(IFM_40G_SR4, "40Gbase-SR4"),
    desc(IFM_40G_LR4, "40Gbase-LR4"),
    desc(IFM_1000_KX, "1000Base-KX"),
    desc(IFM_OTHER, "Other"),
    desc(IFM_10G_KX4, "10GBase-KX4"),
    desc(IFM_10G_KR, "10GBase-KR"),
    desc(IFM_10G_CR1, "10GBase-CR1"),
    desc(IFM_20G_KR2, "20GBase-KR2"),
    desc(IFM_2500_KX, "2500Base-KX"),
    desc(IFM_2500_T, "2500Base-T"),
    desc(IFM_5000_T, "5000Base-T"),
    desc(IFM_50G_PCIE, "PCIExpress-50G"),
    desc(IFM_25G_PCIE, "PCIExpress-25G"),
    desc(IFM_1000_SGMII, "1000Base-SGMII"),
    desc(IFM_10G_SFI, "10GBase-SFI"),
    desc(IFM_40G_XLPPI, "40GBase-XLPPI"),
    desc(IFM_1000_CX_SGMII, "1000Base-CX-SGMII"),
    desc(IFM_40G_KR4, "40GBase-KR4"),
    desc(IFM_10G_ER, "10GBase-ER"),
    desc(IFM_100G_CR4, "100GBase-CR4"),
    desc(IFM_100G_SR4, "100GBase-SR4"),
    desc(IFM_100G_KR4, "100GBase-KR4"),
    desc(IFM_100G_LR4, "100GBase-LR4"),
    desc(IFM_56G_R4, "56GBase-R4"),
    desc(IFM_100_T, "100BaseT"),
    desc(IFM_25G_CR, "25GBase-CR"),
    desc(IFM_25G_KR, "25GBase-KR"),
    desc(IFM_25G_SR, "25GBase-SR"),
    desc(IFM_50G_CR2, "50GBase-CR2"),
    desc(IFM_50G_KR2, "50GBase-KR2"),
];

pub static ETHERNET_SUBTYPE_ALIASES: &[Description] = &[
    alias(IFM_10_T, "10baseT"),
    alias(IFM_10_T, "UTP"),
    alias(IFM_10_T, "10UTP"),
    alias(IFM_10_2, "BNC"),
    alias(IFM_10_2, "10BNC"),
    alias(IFM_10_5, "AUI"),
    alias(IFM_10_5, "10AUI"),
    alias(IFM_100_TX, "100TX"),
    alias(IFM_100_T4, "100T4"),
    alias(IFM_100_VG, "100VG"),
    alias(IFM_100_T2, "100T2"),
    alias(IFM_10_STP, "10STP"),
    alias(IFM_10_FL, "10FL"),
    alias(IFM_1000_SX, "1000SX"),
    alias(IFM_1000_LX, "1000LX"),
    alias(IFM_1000_CX, "1000CX"),
    alias(IFM_1000_T, "1000baseTX"),
    alias(IFM_1000_T, "1000TX"),
    alias(IFM_1000_T, "1000T"),
    alias(IFM_2500_SX, "2500SX"),
];

pub static ETHERNET_OPTIONS: &[Description] = &[
    desc(IFM_ETH_MASTER, "master"),
    desc(IFM_ETH_RXPAUSE, "rxpause"),
    desc(IFM_ETH_TXPAUSE, "txpause"),
];

pub static TOKENRING_SUBTYPES: &[Description] = &[
    desc(IFM_TOK_STP4, "DB9/4Mbit"),
    desc(IFM_TOK_STP16, "DB9/16Mbit"),
    desc(IFM_TOK_UTP4, "UTP/4Mbit"),
    desc(IFM_TOK_UTP16, "UTP/16Mbit"),
    desc(IFM_TOK_STP100, "STP/100Mbit"),
    desc(IFM_TOK_UTP100, "UTP/100Mbit"),
];

pub static TOKENRING_SUBTYPE_ALIASES: &[Description] = &[
    alias(IFM_TOK_STP4, "4STP"),
    alias(IFM_TOK_STP16, "16STP"),
    alias(IFM_TOK_UTP4, "4UTP"),
    alias(IFM_TOK_UTP16, "16UTP"),
    alias(IFM_TOK_STP100, "100STP"),
    alias(IFM_TOK_UTP100, "100UTP"),
];

pub static TOKENRING_OPTIONS: &[Description] = &[
    desc(IFM_TOK_ETR, "EarlyTokenRelease"),
    desc(IFM_TOK_SRCRT, "SourceRouting"),
    desc(IFM_TOK_ALLR, "AllRoutes"),
    desc(IFM_TOK_DTR, "Dedicated"),
    desc(IFM_TOK_CLASSIC, "Classic"),
    desc(IFM_TOK_AUTO, "AutoSense"),
];

pub static FDDI_SUBTYPES: &[Description] = &[
    desc(IFM_FDDI_SMF, "Single-mode"),
    desc(IFM_FDDI_MMF, "Multi-mode"),
    desc(IFM_FDDI_UTP, "UTP"),
];

pub static FDDI_SUBTYPE_ALIASES: &[Description] = &[
    alias(IFM_FDDI_SMF, "SMF"),
    alias(IFM_FDDI_MMF, "MMF"),
    alias(IFM_FDDI_UTP, "CDDI"),
];

pub static FDDI_OPTIONS: &[Description] = &[desc(IFM_FDDI_DA, "Dual-attach")];

pub static IEEE80211_SUBTYPES: &[Description] = &[
    desc(IFM_IEEE80211_FH1, "FH/1Mbps"),
    desc(IFM_IEEE80211_FH2, "FH/2Mbps"),
    desc(IFM_IEEE80211_DS1, "DS/1Mbps"),
    desc(IFM_IEEE80211_DS2, "DS/2Mbps"),
    desc(IFM_IEEE80211_DS5, "DS/5.5Mbps"),
    desc(IFM_IEEE80211_DS11, "DS/11Mbps"),
    desc(IFM_IEEE80211_DS22, "DS/22Mbps"),
    desc(IFM_IEEE80211_OFDM6, "OFDM/6Mbps"),
    desc(IFM_IEEE80211_OFDM9, "OFDM/9Mbps"),
    desc(IFM_IEEE80211_OFDM12, "OFDM/12Mbps"),
    desc(IFM_IEEE80211_OFDM18, "OFDM/18Mbps"),
    desc(IFM_IEEE80211_OFDM24, "OFDM/24Mbps"),
    desc(IFM_IEEE80211_OFDM36, "OFDM/36Mbps"),
    desc(IFM_IEEE80211_OFDM48, "OFDM/48Mbps"),
    desc(IFM_IEEE80211_OFDM54, "OFDM/54Mbps"),
    desc(IFM_IEEE80211_OFDM72, "OFDM/72Mbps"),
    desc(IFM_IEEE80211_DS354K, "DS/354Kbps"),
    desc(IFM_IEEE80211_DS512K, "DS/512Kbps"),
    desc(IFM_IEEE80211_OFDM3, "OFDM/3Mbps"),
    desc(IFM_IEEE80211_OFDM4, "OFDM/4.5Mbps"),
    desc(IFM_IEEE80211_OFDM27, "OFDM/27Mbps"),
    desc(IFM_IEEE80211_MCS, "MCS"),
    desc(IFM_IEEE80211_VHT, "VHT"),
];

pub static IEEE80211_SUBTYPE_ALIASES: &[Description] = &[
    alias(IFM_IEEE80211_FH1, "FH1"),
    alias(IFM_IEEE80211_FH2, "FH2"),
    alias(IFM_IEEE80211_FH1, "FrequencyHopping/1Mbps"),
    alias(IFM_IEEE80211_FH2, "FrequencyHopping/2Mbps"),
    alias(IFM_IEEE80211_DS1, "DS1"),
    alias(IFM_IEEE80211_DS2, "DS2"),
    alias(IFM_IEEE80211_DS5, "DS5.5"),
    alias(IFM_IEEE80211_DS11, "DS11"),
    alias(IFM_IEEE80211_DS22, "DS22"),
    alias(IFM_IEEE80211_DS1, "DirectSequence/1Mbps"),
    alias(IFM_IEEE80211_DS2, "DirectSequence/2Mbps"),
    alias(IFM_IEEE80211_DS5, "DirectSequence/5.5Mbps"),
    alias(IFM_IEEE80211_DS11, "DirectSequence/11Mbps"),
    alias(IFM_IEEE80211_DS22, "DirectSequence/22Mbps"),
    alias(IFM_IEEE80211_OFDM6, "OFDM6"),
    alias(IFM_IEEE80211_OFDM9, "OFDM9"),
    alias(IFM_IEEE80211_OFDM12, "OFDM12"),
    alias(IFM_IEEE80211_OFDM18, "OFDM18"),
    alias(IFM_IEEE80211_OFDM24, "OFDM24"),
    alias(IFM_IEEE80211_OFDM36, "OFDM36"),
    alias(IFM_IEEE80211_OFDM48, "OFDM48"),
    alias(IFM_IEEE80211_OFDM54, "OFDM54"),
    alias(IFM_IEEE80211_OFDM72, "OFDM72"),
    alias(IFM_IEEE80211_DS354K, "DS354K"),
    alias(IFM_IEEE80211_DS512K, "DS512K"),
    alias(IFM_IEEE80211_OFDM3, "OFDM3"),
    alias(IFM_IEEE80211_OFDM4, "OFDM4.5"),
    alias(IFM_IEEE80211_OFDM27, "OFDM27"),
];

pub static IEEE80211_OPTIONS: &[Description] = &[
    desc(IFM_IEEE80211_ADHOC, "adhoc"),
    desc(IFM_IEEE80211_HOSTAP, "hostap"),
    desc(IFM_IEEE80211_IBSS, "ibss"),
    desc(IFM_IEEE80211_WDS, "wds"),
    desc(IFM_IEEE80211_TURBO, "turbo"),
    desc(IFM_IEEE80211_MONITOR, "monitor"),
    desc(IFM_IEEE80211_MBSS, "mesh"),
];

pub static IEEE80211_MODES: &[Description] = &[
    desc(IFM_AUTO, "autoselect"),
    desc(IFM_IEEE80211_11A, "11a"),
    desc(IFM_IEEE80211_11B, "11b"),
    desc(IFM_IEEE80211_11G, "11g"),
    desc(IFM_IEEE80211_FH, "fh"),
    desc(IFM_IEEE80211_11NA, "11na"),
    desc(IFM_IEEE80211_11NG, "11ng"),
    desc(IFM_IEEE80211_VHT5G, "11ac"),
    desc(IFM_IEEE80211_VHT2G, "11ac2"),
];

pub static IEEE80211_MODE_ALIASES: &[Description] = &[alias(IFM_AUTO, "auto")];

pub static ATM_SUBTYPES: &[Description] = &[
    desc(IFM_ATM_UNKNOWN, "Unknown"),
    desc(IFM_ATM_UTP_25, "UTP/25.6MBit"),
    desc(IFM_ATM_TAXI_100, "Taxi/100MBit"),
    desc(IFM_ATM_TAXI_140, "Taxi/140MBit"),
    desc(IFM_ATM_MM_155, "Multi-mode/155MBit"),
    desc(IFM_ATM_SM_155, "Single-mode/155MBit"),
    desc(IFM_ATM_UTP_155, "UTP/155MBit"),
    desc(IFM_ATM_MM_622, "Multi-mode/622MBit"),
    desc(IFM_ATM_SM_622, "Single-mode/622MBit"),
    desc(IFM_ATM_VIRTUAL, "Virtual"),
];

pub static ATM_SUBTYPE_ALIASES: &[Description] = &[
    alias(IFM_ATM_UTP_25, "UTP-25"),
    alias(IFM_ATM_TAXI_100, "TAXI-100"),
    alias(IFM_ATM_TAXI_140, "TAXI-140"),
    alias(IFM_ATM_MM_155, "MM-155"),
    alias(IFM_ATM_SM_155, "SM-155"),
    alias(IFM_ATM_UTP_155, "UTP-155"),
    alias(IFM_ATM_MM_622, "MM-622"),
    alias(IFM_ATM_SM_622, "SM-622"),
];

pub static ATM_OPTIONS: &[Description] = &[
    desc(IFM_ATM_SDH, "SONET"),
    desc(IFM_ATM_NOSCRAMB, "Noscramb"),
    desc(IFM_ATM_UNASSIGNED, "Unassigned"),
];

/// Per-type tables, keyed by the top-level type word.
pub static TYPE_TABLES: &[TypeTables] = &[
    TypeTables {
        word: IFM_ETHER,
        subtypes: &[
            SHARED_SUBTYPES,
            SHARED_SUBTYPE_ALIASES,
            ETHERNET_SUBTYPES,
            ETHERNET_SUBTYPE_ALIASES,
        ],
        options: &[SHARED_OPTIONS, SHARED_OPTION_ALIASES, ETHERNET_OPTIONS],
        modes: &[],
    },
    TypeTables {
        word: IFM_TOKEN,
        subtypes: &[
            SHARED_SUBTYPES,
            SHARED_SUBTYPE_ALIASES,
            TOKENRING_SUBTYPES,
            TOKENRING_SUBTYPE_ALIASES,
        ],
        options: &[SHARED_OPTIONS, SHARED_OPTION_ALIASES, TOKENRING_OPTIONS],
        modes: &[],
    },
    TypeTables {
        word: IFM_FDDI,
        subtypes: &[
            SHARED_SUBTYPES,
            SHARED_SUBTYPE_ALIASES,
            FDDI_SUBTYPES,
            FDDI_SUBTYPE_ALIASES,
        ],
        options: &[SHARED_OPTIONS, SHARED_OPTION_ALIASES, FDDI_OPTIONS],
        modes: &[],
    },
    TypeTables {
        word: IFM_IEEE80211,
        subtypes: &[
            SHARED_SUBTYPES,
            SHARED_SUBTYPE_ALIASES,
            IEEE80211_SUBTYPES,
            IEEE80211_SUBTYPE_ALIASES,
        ],
        options: &[SHARED_OPTIONS, SHARED_OPTION_ALIASES, IEEE80211_OPTIONS],
        modes: &[IEEE80211_MODES, IEEE80211_MODE_ALIASES],
    },
    TypeTables {
        word: IFM_ATM,
        subtypes: &[
            SHARED_SUBTYPES,
            SHARED_SUBTYPE_ALIASES,
            ATM_SUBTYPES,
            ATM_SUBTYPE_ALIASES,
        ],
        options: &[SHARED_OPTIONS, SHARED_OPTION_ALIASES, ATM_OPTIONS],
        modes: &[],
    },
];

/// Tables for the top-level type `media_type`, if it has any.
pub fn tables_for(media_type: u32) -> Option<&'static TypeTables> {
    TYPE_TABLES.iter().find(|t| t.word == media_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tables() -> impl Iterator<Item = &'static [Description]> {
        TYPE_TABLES
            .iter()
            .flat_map(|t| t.subtypes.iter().chain(t.options).chain(t.modes))
            .copied()
            .chain(std::iter::once(TYPE_DESCRIPTIONS))
    }

    #[test]
    fn test_alias_tables_hold_only_aliases() {
        for t in TYPE_TABLES {
            for (i, table) in t.subtypes.iter().enumerate() {
                // Descriptions and aliases alternate.
                assert!(table.iter().all(|d| d.alias == (i % 2 == 1)));
            }
        }
    }

    #[test]
    fn test_names_are_nonempty() {
        for table in all_tables() {
            assert!(table.iter().all(|d| !d.name.is_empty()));
        }
    }

    #[test]
    fn test_every_alias_has_a_description() {
        for t in TYPE_TABLES {
            for group in [t.subtypes, t.options, t.modes] {
                for a in group.iter().flat_map(|tbl| tbl.iter()).filter(|d| d.alias) {
                    assert!(
                        group
                            .iter()
                            .flat_map(|tbl| tbl.iter())
                            .any(|d| !d.alias && d.word == a.word),
                        "alias {} has no description",
                        a.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_option_words_fit_option_masks() {
        for t in TYPE_TABLES {
            for d in t.options.iter().flat_map(|tbl| tbl.iter()) {
                assert_ne!(d.word, 0);
                assert_eq!(d.word & !(IFM_OMASK | IFM_GMASK), 0, "{}", d.name);
            }
        }
    }

    #[test]
    fn test_tables_for() {
        assert_eq!(tables_for(IFM_ETHER).map(|t| t.word), Some(IFM_ETHER));
        assert!(tables_for(IFM_IEEE80211).is_some_and(|t| !t.modes.is_empty()));
        assert!(tables_for(IFM_CARP).is_none());
        assert!(tables_for(0).is_none());
    }
}
