//! Command-line argument definitions.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use pcapwalk_core::LinkType;

use super::OutputFormat;

/// Link-layer encapsulations selectable with `--link-type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkTypeArg {
    /// Ethernet II, optionally 802.1Q tagged
    Ethernet,
    /// Ethernet from captures without a pcap link-type number
    LegacyEthernet,
    /// 802.11 data frames
    Ieee80211,
    /// 802.11 behind a PRISM capture header
    Ieee80211Prism,
    /// Linux cooked capture
    LinuxSll,
    /// OpenBSD pf log
    Pflog,
    /// Packet over SONET
    LegacyPos,
    /// Legacy ATM with LLC/SNAP
    LegacyAtm,
    /// ATM with LLC/SNAP
    Atm,
    /// No link header, frames start with IP
    Raw,
}

impl From<LinkTypeArg> for LinkType {
    fn from(arg: LinkTypeArg) -> Self {
        match arg {
            LinkTypeArg::Ethernet => LinkType::Ethernet,
            LinkTypeArg::LegacyEthernet => LinkType::LegacyEthernet,
            LinkTypeArg::Ieee80211 => LinkType::Ieee80211,
            LinkTypeArg::Ieee80211Prism => LinkType::Ieee80211Prism,
            LinkTypeArg::LinuxSll => LinkType::LinuxSll,
            LinkTypeArg::Pflog => LinkType::Pflog,
            LinkTypeArg::LegacyPos => LinkType::LegacyPos,
            LinkTypeArg::LegacyAtm => LinkType::LegacyAtm,
            LinkTypeArg::Atm => LinkType::Atm,
            LinkTypeArg::Raw => LinkType::None,
        }
    }
}

/// Show where each header starts in captured frames.
#[derive(Parser, Debug)]
#[command(name = "pcapwalk")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// PCAP or PCAPNG file, optionally gzip-compressed
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Decode every frame with this link type instead of the capture's own
    #[arg(long = "link-type", value_enum, value_name = "KIND")]
    pub link_type: Option<LinkTypeArg>,

    /// Output format for stdout
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Stop after this many frames
    #[arg(short = 'c', long = "count", value_name = "N")]
    pub count: Option<u64>,

    /// Print aggregate counters instead of one row per frame
    #[arg(long = "summary")]
    pub summary: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Link type forced on every frame, if any.
    pub fn link_override(&self) -> Option<LinkType> {
        self.link_type.map(LinkType::from)
    }
}
