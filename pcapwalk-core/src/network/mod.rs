//! Network-layer location.
//!
//! [`locate_ipv4`] and [`locate_ipv6`] strip the link header and return a
//! view over the IP header, or `None` when the frame does not hold one.
//! The `try_` variants report why.

mod ipv4;
mod ipv6;

use crate::buffer::{u8_at, Payload};
use crate::error::{DecodeError, Result};
use crate::link::{decode_link, LinkLayer, LinkType, NetworkProtocol};

pub use ipv4::{Ipv4Header, FRAGMENT_GATE_MASK, IPV4_MIN_HEADER_LEN};
pub use ipv6::{Ipv6Header, IPV6_HEADER_LEN};

/// IPv4 header of `data`, or `None`.
///
/// On raw frames (`LinkType::None`) nothing is type-checked, so this may
/// succeed on an IPv6 packet as well. See [`NetworkHeader::from_link`].
pub fn locate_ipv4(data: &[u8], link_type: LinkType) -> Option<Ipv4Header<'_>> {
    try_locate_ipv4(data, link_type).ok()
}

/// IPv6 header of `data`, or `None`.
pub fn locate_ipv6(data: &[u8], link_type: LinkType) -> Option<Ipv6Header<'_>> {
    try_locate_ipv6(data, link_type).ok()
}

pub fn try_locate_ipv4(data: &[u8], link_type: LinkType) -> Result<Ipv4Header<'_>> {
    let link = decode_link(data, link_type)?;
    expect_protocol(&link, NetworkProtocol::Ipv4)?;
    Ipv4Header::new(link.payload.bytes)
}

pub fn try_locate_ipv6(data: &[u8], link_type: LinkType) -> Result<Ipv6Header<'_>> {
    let link = decode_link(data, link_type)?;
    expect_protocol(&link, NetworkProtocol::Ipv6)?;
    Ipv6Header::new(link.payload.bytes)
}

fn expect_protocol(link: &LinkLayer<'_>, wanted: NetworkProtocol) -> Result<()> {
    match link.protocol {
        Some(found) if found != wanted => Err(DecodeError::UnexpectedType {
            layer: "network",
            found: found.ethertype(),
        }),
        _ => Ok(()),
    }
}

/// Either network header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkHeader<'a> {
    Ipv4(Ipv4Header<'a>),
    Ipv6(Ipv6Header<'a>),
}

impl<'a> NetworkHeader<'a> {
    /// The header a link result points at.
    ///
    /// Uses the announced protocol when there is one. Raw frames announce
    /// nothing; for them the version nibble picks the header.
    pub fn from_link(link: &LinkLayer<'a>) -> Result<Self> {
        let data = link.payload.bytes;
        let protocol = match link.protocol {
            Some(protocol) => protocol,
            None => {
                let version = u8_at("ip", data, 0)? >> 4;
                match version {
                    4 => NetworkProtocol::Ipv4,
                    6 => NetworkProtocol::Ipv6,
                    _ => {
                        return Err(DecodeError::InvalidField {
                            layer: "ip",
                            field: "version",
                            value: version,
                        })
                    }
                }
            }
        };
        match protocol {
            NetworkProtocol::Ipv4 => Ipv4Header::new(data).map(NetworkHeader::Ipv4),
            NetworkProtocol::Ipv6 => Ipv6Header::new(data).map(NetworkHeader::Ipv6),
        }
    }

    pub fn kind(&self) -> NetworkProtocol {
        match self {
            NetworkHeader::Ipv4(_) => NetworkProtocol::Ipv4,
            NetworkHeader::Ipv6(_) => NetworkProtocol::Ipv6,
        }
    }

    /// IP protocol number (IPv4) or next header (IPv6).
    pub fn protocol(&self) -> u8 {
        match self {
            NetworkHeader::Ipv4(ip) => ip.protocol(),
            NetworkHeader::Ipv6(ip) => ip.next_header(),
        }
    }

    pub fn header_len(&self) -> usize {
        match self {
            NetworkHeader::Ipv4(ip) => ip.header_len(),
            NetworkHeader::Ipv6(ip) => ip.header_len(),
        }
    }

    /// Bytes after the header. IPv4 applies the first-fragment gate.
    pub fn payload(&self) -> Result<Payload<'a>> {
        match self {
            NetworkHeader::Ipv4(ip) => ip.payload(),
            NetworkHeader::Ipv6(ip) => Ok(ip.payload()),
        }
    }
}
