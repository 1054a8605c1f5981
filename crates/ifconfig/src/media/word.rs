//! Media word layout and constants.
//!
//! A media word packs the top-level type, subtype, options, operating mode
//! and instance of an interface medium into 32 bits:
//!
//! ```text
//! bits   0-4   subtype (shared, or type specific)
//! bits   5-7   top-level type
//! bits  8-15   type specific options
//! bits 11-14   extended Ethernet subtype (Ethernet only)
//! bits 16-19   operating mode
//! bits 20-27   global options
//! bits 28-31   instance
//! ```

use std::fmt;

use super::decode;

pub const IFM_NMASK: u32 = 0x0000_00e0;
pub const IFM_TMASK: u32 = 0x0000_001f;
pub const IFM_IMASK: u32 = 0xf000_0000;
pub const IFM_ISHIFT: u32 = 28;
pub const IFM_OMASK: u32 = 0x0000_ff00;
pub const IFM_MMASK: u32 = 0x000f_0000;
pub const IFM_MSHIFT: u32 = 16;
pub const IFM_GMASK: u32 = 0x0ff0_0000;

// Top-level types.
pub const IFM_ETHER: u32 = 0x0000_0020;
pub const IFM_TOKEN: u32 = 0x0000_0040;
pub const IFM_FDDI: u32 = 0x0000_0060;
pub const IFM_IEEE80211: u32 = 0x0000_0080;
pub const IFM_ATM: u32 = 0x0000_00a0;
pub const IFM_CARP: u32 = 0x0000_00c0;

// Shared subtypes.
pub const IFM_AUTO: u32 = 0;
pub const IFM_MANUAL: u32 = 1;
pub const IFM_NONE: u32 = 2;

// Shared options.
pub const IFM_FDX: u32 = 0x0010_0000;
pub const IFM_HDX: u32 = 0x0020_0000;
pub const IFM_FLOW: u32 = 0x0040_0000;
pub const IFM_FLAG0: u32 = 0x0100_0000;
pub const IFM_FLAG1: u32 = 0x0200_0000;
pub const IFM_FLAG2: u32 = 0x0400_0000;
pub const IFM_LOOP: u32 = 0x0800_0000;

// Status bits.
pub const IFM_AVALID: u32 = 0x0000_0001;
pub const IFM_ACTIVE: u32 = 0x0000_0002;

// Ethernet.
pub const IFM_ETH_XTYPE: u32 = 0x0000_7800;
pub const IFM_ETH_XSHIFT: u32 = 6;

/// Encode an extended Ethernet subtype.
pub const fn ifm_x(x: u32) -> u32 {
    (x & IFM_TMASK) | ((x & !IFM_TMASK) << IFM_ETH_XSHIFT)
}

pub const IFM_10_T: u32 = 3;
pub const IFM_10_2: u32 = 4;
pub const IFM_10_5: u32 = 5;
pub const IFM_100_TX: u32 = 6;
pub const IFM_100_FX: u32 = 7;
pub const IFM_100_T4: u32 = 8;
pub const IFM_100_VG: u32 = 9;
pub const IFM_100_T2: u32 = 10;
pub const IFM_1000_SX: u32 = 11;
pub const IFM_10_STP: u32 = 12;
pub const IFM_10_FL: u32 = 13;
pub const IFM_1000_LX: u32 = 14;
pub const IFM_1000_CX: u32 = 15;
pub const IFM_1000_T: u32 = 16;
pub const IFM_HPNA_1: u32 = 17;
pub const IFM_10G_LR: u32 = 18;
pub const IFM_10G_SR: u32 = 19;
pub const IFM_10G_CX4: u32 = 20;
pub const IFM_2500_SX: u32 = 21;
pub const IFM_10G_TWINAX: u32 = 22;
pub const IFM_10G_TWINAX_LONG: u32 = 23;
pub const IFM_10G_LRM: u32 = 24;
pub const IFM_UNKNOWN: u32 = 25;
pub const IFM_10G_T: u32 = 26;
pub const IFM_40G_CR4: u32 = 27;
pub const IFM_40G_SR4: u32 = 28;
pub const IFM_40G_LR4: u32 = 29;
pub const IFM_1000_KX: u32 = 30;
pub const IFM_OTHER: u32 = 31;
pub const IFM_10G_KX4: u32 = ifm_x(32);
pub const IFM_10G_KR: u32 = ifm_x(33);
pub const IFM_10G_CR1: u32 = ifm_x(34);
pub const IFM_20G_KR2: u32 = ifm_x(35);
pub const IFM_2500_KX: u32 = ifm_x(36);
pub const IFM_2500_T: u32 = ifm_x(37);
pub const IFM_5000_T: u32 = ifm_x(38);
pub const IFM_50G_PCIE: u32 = ifm_x(39);
pub const IFM_25G_PCIE: u32 = ifm_x(40);
pub const IFM_1000_SGMII: u32 = ifm_x(41);
pub const IFM_10G_SFI: u32 = ifm_x(42);
pub const IFM_40G_XLPPI: u32 = ifm_x(43);
pub const IFM_1000_CX_SGMII: u32 = ifm_x(44);
pub const IFM_40G_KR4: u32 = ifm_x(45);
pub const IFM_10G_ER: u32 = ifm_x(46);
pub const IFM_100G_CR4: u32 = ifm_x(47);
pub const IFM_100G_SR4: u32 = ifm_x(48);
pub const IFM_100G_KR4: u32 = ifm_x(49);
pub const IFM_100G_LR4: u32 = ifm_x(50);
pub const IFM_56G_R4: u32 = ifm_x(51);
pub const IFM_100_T: u32 = ifm_x(52);
pub const IFM_25G_CR: u32 = ifm_x(53);
pub const IFM_25G_KR: u32 = ifm_x(54);
pub const IFM_25G_SR: u32 = ifm_x(55);
pub const IFM_50G_CR2: u32 = ifm_x(56);
pub const IFM_50G_KR2: u32 = ifm_x(57);

pub const IFM_ETH_MASTER: u32 = 0x0000_0100;
pub const IFM_ETH_RXPAUSE: u32 = 0x0000_0200;
pub const IFM_ETH_TXPAUSE: u32 = 0x0000_0400;

// Token ring.
pub const IFM_TOK_STP4: u32 = 3;
pub const IFM_TOK_STP16: u32 = 4;
pub const IFM_TOK_UTP4: u32 = 5;
pub const IFM_TOK_UTP16: u32 = 6;
pub const IFM_TOK_STP100: u32 = 7;
pub const IFM_TOK_UTP100: u32 = 8;
pub const IFM_TOK_ETR: u32 = 0x0000_0200;
pub const IFM_TOK_SRCRT: u32 = 0x0000_0400;
pub const IFM_TOK_ALLR: u32 = 0x0000_0800;
pub const IFM_TOK_DTR: u32 = 0x0000_2000;
pub const IFM_TOK_CLASSIC: u32 = 0x0000_4000;
pub const IFM_TOK_AUTO: u32 = 0x0000_8000;

// FDDI.
pub const IFM_FDDI_SMF: u32 = 3;
pub const IFM_FDDI_MMF: u32 = 4;
pub const IFM_FDDI_UTP: u32 = 5;
pub const IFM_FDDI_DA: u32 = 0x0000_0100;

// IEEE 802.11.
pub const IFM_IEEE80211_FH1: u32 = 3;
pub const IFM_IEEE80211_FH2: u32 = 4;
pub const IFM_IEEE80211_DS1: u32 = 5;
pub const IFM_IEEE80211_DS2: u32 = 6;
pub const IFM_IEEE80211_DS5: u32 = 7;
pub const IFM_IEEE80211_DS11: u32 = 8;
pub const IFM_IEEE80211_DS22: u32 = 9;
pub const IFM_IEEE80211_OFDM6: u32 = 10;
pub const IFM_IEEE80211_OFDM9: u32 = 11;
pub const IFM_IEEE80211_OFDM12: u32 = 12;
pub const IFM_IEEE80211_OFDM18: u32 = 13;
pub const IFM_IEEE80211_OFDM24: u32 = 14;
pub const IFM_IEEE80211_OFDM36: u32 = 15;
pub const IFM_IEEE80211_OFDM48: u32 = 16;
pub const IFM_IEEE80211_OFDM54: u32 = 17;
pub const IFM_IEEE80211_OFDM72: u32 = 18;
pub const IFM_IEEE80211_DS354K: u32 = 19;
pub const IFM_IEEE80211_DS512K: u32 = 20;
pub const IFM_IEEE80211_OFDM3: u32 = 21;
pub const IFM_IEEE80211_OFDM4: u32 = 22;
pub const IFM_IEEE80211_OFDM27: u32 = 23;
pub const IFM_IEEE80211_MCS: u32 = 24;
pub const IFM_IEEE80211_VHT: u32 = 25;

pub const IFM_IEEE80211_ADHOC: u32 = 0x0000_0100;
pub const IFM_IEEE80211_HOSTAP: u32 = 0x0000_0200;
pub const IFM_IEEE80211_IBSS: u32 = 0x0000_0400;
pub const IFM_IEEE80211_WDS: u32 = 0x0000_0800;
pub const IFM_IEEE80211_TURBO: u32 = 0x0000_1000;
pub const IFM_IEEE80211_MONITOR: u32 = 0x0000_2000;
pub const IFM_IEEE80211_MBSS: u32 = 0x0000_4000;

/// Station mode: none of the other operating-mode bits set.
pub const IFM_IEEE80211_STA: u32 = 0;

/// Option bits that select an 802.11 operating mode.
pub const IFM_IEEE80211_OPMODE_MASK: u32 = IFM_IEEE80211_ADHOC
    | IFM_IEEE80211_HOSTAP
    | IFM_IEEE80211_IBSS
    | IFM_IEEE80211_WDS
    | IFM_IEEE80211_MONITOR
    | IFM_IEEE80211_MBSS;

pub const IFM_IEEE80211_11A: u32 = 0x0001_0000;
pub const IFM_IEEE80211_11B: u32 = 0x0002_0000;
pub const IFM_IEEE80211_11G: u32 = 0x0003_0000;
pub const IFM_IEEE80211_FH: u32 = 0x0004_0000;
pub const IFM_IEEE80211_11NA: u32 = 0x0005_0000;
pub const IFM_IEEE80211_11NG: u32 = 0x0006_0000;
pub const IFM_IEEE80211_VHT5G: u32 = 0x0007_0000;
pub const IFM_IEEE80211_VHT2G: u32 = 0x0008_0000;

// ATM.
pub const IFM_ATM_UNKNOWN: u32 = 3;
pub const IFM_ATM_UTP_25: u32 = 4;
pub const IFM_ATM_TAXI_100: u32 = 5;
pub const IFM_ATM_TAXI_140: u32 = 6;
pub const IFM_ATM_MM_155: u32 = 7;
pub const IFM_ATM_SM_155: u32 = 8;
pub const IFM_ATM_UTP_155: u32 = 9;
pub const IFM_ATM_MM_622: u32 = 10;
pub const IFM_ATM_SM_622: u32 = 11;
pub const IFM_ATM_VIRTUAL: u32 = 12;
pub const IFM_ATM_SDH: u32 = 0x0000_0100;
pub const IFM_ATM_NOSCRAMB: u32 = 0x0000_0200;
pub const IFM_ATM_UNASSIGNED: u32 = 0x0000_0400;

/// A media word as reported by the kernel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MediaWord(u32);

impl MediaWord {
    /// Wrap a raw word.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw word.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Top-level type bits.
    pub const fn media_type(self) -> u32 {
        self.0 & IFM_NMASK
    }

    /// Subtype bits, including the extended Ethernet bits.
    pub const fn subtype(self) -> u32 {
        if self.media_type() == IFM_ETHER {
            self.0 & (IFM_TMASK | IFM_ETH_XTYPE)
        } else {
            self.0 & IFM_TMASK
        }
    }

    /// Type-specific and global option bits.
    ///
    /// For Ethernet the extended subtype bits are not options.
    pub const fn options(self) -> u32 {
        let options = self.0 & (IFM_OMASK | IFM_GMASK);
        if self.media_type() == IFM_ETHER {
            options & !IFM_ETH_XTYPE
        } else {
            options
        }
    }

    /// Operating mode bits.
    pub const fn mode(self) -> u32 {
        self.0 & IFM_MMASK
    }

    /// Instance number.
    pub const fn instance(self) -> u32 {
        (self.0 & IFM_IMASK) >> IFM_ISHIFT
    }

    /// 802.11 operating-mode option bits; 0 means station mode.
    pub const fn opmode(self) -> u32 {
        self.0 & IFM_IEEE80211_OPMODE_MASK
    }
}

impl From<u32> for MediaWord {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<i32> for MediaWord {
    fn from(raw: i32) -> Self {
        Self(raw as u32)
    }
}

impl fmt::Debug for MediaWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MediaWord({:#010x})", self.0)
    }
}

/// Renders the word the way `ifconfig` prints a `media` line:
/// `media <subtype>[ mode <mode>][ mediaopt <opt>,...][ instance <n>]`.
impl fmt::Display for MediaWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if decode::type_description(*self).is_none() {
            return f.write_str(decode::UNKNOWN_TYPE);
        }
        let Some(subtype) = decode::subtype_description(*self) else {
            return f.write_str(decode::UNKNOWN_SUBTYPE);
        };

        write!(f, "media {subtype}")?;
        if let Some(mode) = decode::decode_mode(*self) {
            write!(f, " mode {mode}")?;
        }
        let options = decode::decode_options(*self);
        if !options.is_empty() {
            write!(f, " mediaopt {}", options.join(","))?;
        }
        if self.instance() != 0 {
            write!(f, " instance {}", self.instance())?;
        }
        Ok(())
    }
}
