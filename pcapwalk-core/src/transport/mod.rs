//! Transport-layer decoding.
//!
//! Dispatches on the IP protocol number (IPv4) or next header (IPv6):
//! 6 is TCP, 17 is UDP, 1 is ICMP. Anything else is
//! [`DecodeError::UnsupportedProtocol`].

mod icmp;
mod tcp;
mod udp;

use etherparse::IpNumber;

use crate::buffer::Payload;
use crate::error::{DecodeError, Result};
use crate::network::NetworkHeader;

pub use icmp::{icmp_type, IcmpHeader, ICMP_HEADER_LEN};
pub use tcp::{flags as tcp_flags, TcpHeader, TCP_MIN_HEADER_LEN};
pub use udp::{UdpHeader, UDP_HEADER_LEN};

/// IP protocol numbers with a transport decoder.
pub mod ip_protocol {
    use super::IpNumber;

    pub const ICMP: u8 = IpNumber::ICMP.0;
    pub const TCP: u8 = IpNumber::TCP.0;
    pub const UDP: u8 = IpNumber::UDP.0;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportProtocol {
    Tcp,
    Udp,
    Icmp,
}

impl TransportProtocol {
    pub fn from_ip_protocol(protocol: u8) -> Option<Self> {
        match protocol {
            ip_protocol::TCP => Some(TransportProtocol::Tcp),
            ip_protocol::UDP => Some(TransportProtocol::Udp),
            ip_protocol::ICMP => Some(TransportProtocol::Icmp),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransportProtocol::Tcp => "tcp",
            TransportProtocol::Udp => "udp",
            TransportProtocol::Icmp => "icmp",
        }
    }
}

/// Decoded transport header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportHeader<'a> {
    Tcp(TcpHeader<'a>),
    Udp(UdpHeader<'a>),
    Icmp(IcmpHeader<'a>),
}

impl<'a> TransportHeader<'a> {
    pub fn protocol(&self) -> TransportProtocol {
        match self {
            TransportHeader::Tcp(_) => TransportProtocol::Tcp,
            TransportHeader::Udp(_) => TransportProtocol::Udp,
            TransportHeader::Icmp(_) => TransportProtocol::Icmp,
        }
    }

    pub fn header_len(&self) -> usize {
        match self {
            TransportHeader::Tcp(tcp) => tcp.header_len(),
            TransportHeader::Udp(udp) => udp.header_len(),
            TransportHeader::Icmp(icmp) => icmp.header_len(),
        }
    }

    /// Application bytes and the number of header bytes in front of them.
    pub fn payload(&self) -> Payload<'a> {
        match self {
            TransportHeader::Tcp(tcp) => tcp.payload(),
            TransportHeader::Udp(udp) => udp.payload(),
            TransportHeader::Icmp(icmp) => icmp.payload(),
        }
    }
}

/// Decode the transport header carried by `ip`.
///
/// IPv4 later fragments fail with [`DecodeError::NotFirstFragment`]; IPv6
/// extension headers are not walked, so a next header other than 1/6/17 is
/// reported as unsupported.
pub fn decode_transport<'a>(ip: &NetworkHeader<'a>) -> Result<TransportHeader<'a>> {
    let protocol = ip.protocol();
    let kind = TransportProtocol::from_ip_protocol(protocol)
        .ok_or(DecodeError::UnsupportedProtocol { protocol })?;
    let payload = ip.payload()?;
    decode_payload(kind, payload.bytes)
}

/// Decode `data` as a header of the given transport protocol.
pub fn decode_payload(kind: TransportProtocol, data: &[u8]) -> Result<TransportHeader<'_>> {
    match kind {
        TransportProtocol::Tcp => TcpHeader::new(data).map(TransportHeader::Tcp),
        TransportProtocol::Udp => UdpHeader::new(data).map(TransportHeader::Udp),
        TransportProtocol::Icmp => IcmpHeader::new(data).map(TransportHeader::Icmp),
    }
}

pub fn tcp_from_ip<'a>(ip: &NetworkHeader<'a>) -> Result<TcpHeader<'a>> {
    match decode_transport(ip)? {
        TransportHeader::Tcp(tcp) => Ok(tcp),
        _ => Err(wrong_protocol("tcp", ip)),
    }
}

pub fn udp_from_ip<'a>(ip: &NetworkHeader<'a>) -> Result<UdpHeader<'a>> {
    match decode_transport(ip)? {
        TransportHeader::Udp(udp) => Ok(udp),
        _ => Err(wrong_protocol("udp", ip)),
    }
}

pub fn icmp_from_ip<'a>(ip: &NetworkHeader<'a>) -> Result<IcmpHeader<'a>> {
    match decode_transport(ip)? {
        TransportHeader::Icmp(icmp) => Ok(icmp),
        _ => Err(wrong_protocol("icmp", ip)),
    }
}

fn wrong_protocol(layer: &'static str, ip: &NetworkHeader<'_>) -> DecodeError {
    DecodeError::UnexpectedType {
        layer,
        found: u16::from(ip.protocol()),
    }
}
