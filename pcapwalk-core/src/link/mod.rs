//! Link-layer decoding.
//!
//! Strips the link header of a captured frame and reports where the network
//! header starts and which network protocol the link header announced.
//!
//! | Link type | Header | Protocol discriminant |
//! |-----------|--------|-----------------------|
//! | Ethernet, legacy Ethernet | 14 bytes (+4 with one 802.1Q tag) | EtherType |
//! | 802.11 | 30-byte MAC header + 8-byte LLC/SNAP (+4 with 802.1Q) | SNAP EtherType |
//! | 802.11 + PRISM | 144-byte PRISM header, then as 802.11 | SNAP EtherType |
//! | Linux SLL | 16 bytes | protocol field |
//! | pflog | 48 bytes | address family |
//! | legacy POS | 4 bytes | EtherType-like field |
//! | legacy ATM, ATM | 4 unchecked bytes + 8-byte LLC/SNAP | SNAP EtherType |
//! | none (raw IP) | 0 bytes | none |

mod ethernet;
mod ieee80211;
mod legacy;
mod linux_sll;
mod pflog;

use std::fmt;

use crate::buffer::Payload;
use crate::error::{DecodeError, Result};

pub use ethernet::{ethertype, ETHERNET_HEADER_LEN, VLAN_TAG_LEN};
pub use ieee80211::{
    frame_type as ieee80211_frame_type, IEEE80211_HEADER_LEN, LLC_SNAP_LEN, PRISM_HEADER_LEN,
};
pub use legacy::{ATM_SUBHEADER_LEN, POS_HEADER_LEN};
pub use linux_sll::LINUX_SLL_HEADER_LEN;
pub use pflog::{address_family, PFLOG_HEADER_LEN};

/// pcap LINKTYPE numbers with a [`LinkType`] mapping.
pub mod linktype {
    pub const NULL_RAW: u16 = 12;
    pub const ETHERNET: u16 = 1;
    pub const RAW_LEGACY: u16 = 14;
    pub const RAW: u16 = 101;
    pub const IEEE802_11: u16 = 105;
    pub const LINUX_SLL: u16 = 113;
    pub const PFLOG: u16 = 117;
    pub const IEEE802_11_PRISM: u16 = 119;
    pub const IPV4: u16 = 228;
    pub const IPV6: u16 = 229;
}

/// Link-layer encapsulation of a captured frame.
///
/// Supplied by the caller; the decoder never guesses it from the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkType {
    Ethernet,
    LegacyEthernet,
    Ieee80211,
    /// 802.11 preceded by a 144-byte PRISM capture header.
    Ieee80211Prism,
    LinuxSll,
    Pflog,
    LegacyPos,
    LegacyAtm,
    Atm,
    /// No link header: the frame starts with the IP header.
    None,
}

impl LinkType {
    /// Every supported link type.
    pub const ALL: [LinkType; 10] = [
        LinkType::Ethernet,
        LinkType::LegacyEthernet,
        LinkType::Ieee80211,
        LinkType::Ieee80211Prism,
        LinkType::LinuxSll,
        LinkType::Pflog,
        LinkType::LegacyPos,
        LinkType::LegacyAtm,
        LinkType::Atm,
        LinkType::None,
    ];

    /// Map a pcap LINKTYPE number.
    ///
    /// The legacy Ethernet, POS and ATM encapsulations come from capture
    /// formats without a pcap number and are never produced here.
    pub fn from_linktype(link_type: u16) -> Result<Self> {
        match link_type {
            linktype::ETHERNET => Ok(LinkType::Ethernet),
            linktype::NULL_RAW
            | linktype::RAW_LEGACY
            | linktype::RAW
            | linktype::IPV4
            | linktype::IPV6 => Ok(LinkType::None),
            linktype::IEEE802_11 => Ok(LinkType::Ieee80211),
            linktype::IEEE802_11_PRISM => Ok(LinkType::Ieee80211Prism),
            linktype::LINUX_SLL => Ok(LinkType::LinuxSll),
            linktype::PFLOG => Ok(LinkType::Pflog),
            _ => Err(DecodeError::UnrecognizedLinkType { link_type }),
        }
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            LinkType::Ethernet => "ethernet",
            LinkType::LegacyEthernet => "legacy_ethernet",
            LinkType::Ieee80211 => "ieee80211",
            LinkType::Ieee80211Prism => "ieee80211_prism",
            LinkType::LinuxSll => "linux_sll",
            LinkType::Pflog => "pflog",
            LinkType::LegacyPos => "legacy_pos",
            LinkType::LegacyAtm => "legacy_atm",
            LinkType::Atm => "atm",
            LinkType::None => "none",
        }
    }

    /// Size of the link header in front of an untagged network header.
    pub fn base_header_len(&self) -> usize {
        match self {
            LinkType::Ethernet | LinkType::LegacyEthernet => ETHERNET_HEADER_LEN,
            LinkType::Ieee80211 => IEEE80211_HEADER_LEN + LLC_SNAP_LEN,
            LinkType::Ieee80211Prism => PRISM_HEADER_LEN + IEEE80211_HEADER_LEN + LLC_SNAP_LEN,
            LinkType::LinuxSll => LINUX_SLL_HEADER_LEN,
            LinkType::Pflog => PFLOG_HEADER_LEN,
            LinkType::LegacyPos => POS_HEADER_LEN,
            LinkType::LegacyAtm | LinkType::Atm => ATM_SUBHEADER_LEN + LLC_SNAP_LEN,
            LinkType::None => 0,
        }
    }

}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Network-layer protocol announced by a link header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkProtocol {
    Ipv4,
    Ipv6,
}

impl NetworkProtocol {
    /// Protocol for an EtherType, if it is one this crate decodes.
    pub fn from_ethertype(value: u16) -> Option<Self> {
        match value {
            ethertype::IPV4 => Some(NetworkProtocol::Ipv4),
            ethertype::IPV6 => Some(NetworkProtocol::Ipv6),
            _ => None,
        }
    }

    pub fn ethertype(&self) -> u16 {
        match self {
            NetworkProtocol::Ipv4 => ethertype::IPV4,
            NetworkProtocol::Ipv6 => ethertype::IPV6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NetworkProtocol::Ipv4 => "ipv4",
            NetworkProtocol::Ipv6 => "ipv6",
        }
    }
}

/// Output of the link-layer decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkLayer<'a> {
    /// Network header onwards, and the size of everything stripped before it.
    pub payload: Payload<'a>,
    /// Announced network protocol, `None` for raw frames where nothing is announced.
    pub protocol: Option<NetworkProtocol>,
    /// VLAN identifier when one 802.1Q tag was unwrapped.
    pub vlan_id: Option<u16>,
}

impl<'a> LinkLayer<'a> {
    pub(crate) fn new(payload: Payload<'a>, protocol: NetworkProtocol) -> Self {
        Self {
            payload,
            protocol: Some(protocol),
            vlan_id: None,
        }
    }

    /// Whether this link result may hold a header of `wanted`.
    ///
    /// Raw frames announce nothing and therefore admit both protocols.
    pub fn admits(&self, wanted: NetworkProtocol) -> bool {
        self.protocol.map_or(true, |p| p == wanted)
    }
}

/// Strip the link header of `data`.
///
/// Fails with a not-found error when the frame is too short, is not an 802.11
/// data frame, or announces something other than IPv4/IPv6.
pub fn decode_link(data: &[u8], link_type: LinkType) -> Result<LinkLayer<'_>> {
    match link_type {
        LinkType::Ethernet | LinkType::LegacyEthernet => ethernet::decode(data),
        LinkType::Ieee80211 => ieee80211::decode(data, false),
        LinkType::Ieee80211Prism => ieee80211::decode(data, true),
        LinkType::LinuxSll => linux_sll::decode(data),
        LinkType::Pflog => pflog::decode(data),
        LinkType::LegacyPos => legacy::decode_pos(data),
        LinkType::LegacyAtm | LinkType::Atm => legacy::decode_atm(data),
        LinkType::None => Ok(LinkLayer {
            payload: Payload {
                bytes: data,
                consumed: 0,
            },
            protocol: None,
            vlan_id: None,
        }),
    }
}
