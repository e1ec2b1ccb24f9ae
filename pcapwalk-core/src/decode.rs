//! Whole-frame decoding.
//!
//! [`Frame`] pairs a captured buffer with its link type and offers the
//! packet-level shortcuts (`ipv4`, `tcp`, ...) on top of the per-layer
//! decoders. [`Frame::decode`] walks link, network and transport in one go and
//! records where each header sits.

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::error::{DecodeError, Result};
use crate::link::{decode_link, LinkLayer, LinkType, NetworkProtocol};
use crate::network::{locate_ipv4, locate_ipv6, Ipv4Header, Ipv6Header, NetworkHeader};
use crate::transport::{
    decode_payload, decode_transport, IcmpHeader, TcpHeader, TransportHeader, TransportProtocol,
    UdpHeader,
};

/// What a [`Layer`] record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Link header (everything in front of the network header, minus a VLAN tag).
    Link(LinkType),
    Vlan,
    Ipv4,
    Ipv6,
    Tcp,
    Udp,
    Icmp,
}

impl LayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Link(link_type) => link_type.name(),
            LayerKind::Vlan => "vlan",
            LayerKind::Ipv4 => "ipv4",
            LayerKind::Ipv6 => "ipv6",
            LayerKind::Tcp => "tcp",
            LayerKind::Udp => "udp",
            LayerKind::Icmp => "icmp",
        }
    }
}

impl From<NetworkProtocol> for LayerKind {
    fn from(protocol: NetworkProtocol) -> Self {
        match protocol {
            NetworkProtocol::Ipv4 => LayerKind::Ipv4,
            NetworkProtocol::Ipv6 => LayerKind::Ipv6,
        }
    }
}

impl From<TransportProtocol> for LayerKind {
    fn from(protocol: TransportProtocol) -> Self {
        match protocol {
            TransportProtocol::Tcp => LayerKind::Tcp,
            TransportProtocol::Udp => LayerKind::Udp,
            TransportProtocol::Icmp => LayerKind::Icmp,
        }
    }
}

/// A decoded header's position within the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    pub kind: LayerKind,
    /// Offset of the first header byte from the start of the frame.
    pub offset: usize,
    /// Header length in bytes.
    pub len: usize,
}

/// Everything [`Frame::decode`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame<'a> {
    pub link_type: LinkType,
    pub link: Option<LinkLayer<'a>>,
    pub network: Option<NetworkHeader<'a>>,
    pub transport: Option<TransportHeader<'a>>,
    /// Decoded headers in wire order. Typical frames have 3-4.
    pub layers: SmallVec<[Layer; 6]>,
    /// First byte not covered by a decoded header.
    pub payload_offset: usize,
    /// Why decoding stopped before the transport payload, if it did.
    pub stopped: Option<DecodeError>,
    data: &'a [u8],
}

impl<'a> DecodedFrame<'a> {
    fn new(link_type: LinkType, data: &'a [u8]) -> Self {
        Self {
            link_type,
            link: None,
            network: None,
            transport: None,
            layers: SmallVec::new(),
            payload_offset: 0,
            stopped: None,
            data,
        }
    }

    fn push(&mut self, kind: LayerKind, len: usize) {
        self.layers.push(Layer {
            kind,
            offset: self.payload_offset,
            len,
        });
        self.payload_offset += len;
    }

    /// True when a transport header was decoded.
    pub fn is_complete(&self) -> bool {
        self.stopped.is_none()
    }

    pub fn network_protocol(&self) -> Option<NetworkProtocol> {
        self.network.as_ref().map(NetworkHeader::kind)
    }

    pub fn transport_protocol(&self) -> Option<TransportProtocol> {
        self.transport.as_ref().map(TransportHeader::protocol)
    }

    pub fn vlan_id(&self) -> Option<u16> {
        self.link.and_then(|link| link.vlan_id)
    }

    /// Bytes from [`Self::payload_offset`] to the end of the frame.
    pub fn payload(&self) -> &'a [u8] {
        self.data.get(self.payload_offset..).unwrap_or_default()
    }
}

/// A captured frame and the link type it was captured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    link_type: LinkType,
    data: &'a [u8],
}

impl<'a> Frame<'a> {
    pub fn new(link_type: LinkType, data: &'a [u8]) -> Self {
        Self { link_type, data }
    }

    /// Frame with a numeric pcap LINKTYPE.
    pub fn from_linktype(link_type: u16, data: &'a [u8]) -> Result<Self> {
        Ok(Self::new(LinkType::from_linktype(link_type)?, data))
    }

    pub fn link_type(&self) -> LinkType {
        self.link_type
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn link(&self) -> Result<LinkLayer<'a>> {
        decode_link(self.data, self.link_type)
    }

    pub fn ipv4(&self) -> Option<Ipv4Header<'a>> {
        locate_ipv4(self.data, self.link_type)
    }

    pub fn ipv6(&self) -> Option<Ipv6Header<'a>> {
        locate_ipv6(self.data, self.link_type)
    }

    /// Whichever network header is present.
    pub fn try_network(&self) -> Result<NetworkHeader<'a>> {
        NetworkHeader::from_link(&self.link()?)
    }

    pub fn network(&self) -> Option<NetworkHeader<'a>> {
        self.try_network().ok()
    }

    pub fn try_transport(&self) -> Result<TransportHeader<'a>> {
        decode_transport(&self.try_network()?)
    }

    pub fn transport(&self) -> Option<TransportHeader<'a>> {
        self.try_transport().ok()
    }

    pub fn tcp(&self) -> Option<TcpHeader<'a>> {
        match self.transport()? {
            TransportHeader::Tcp(tcp) => Some(tcp),
            _ => None,
        }
    }

    pub fn udp(&self) -> Option<UdpHeader<'a>> {
        match self.transport()? {
            TransportHeader::Udp(udp) => Some(udp),
            _ => None,
        }
    }

    pub fn icmp(&self) -> Option<IcmpHeader<'a>> {
        match self.transport()? {
            TransportHeader::Icmp(icmp) => Some(icmp),
            _ => None,
        }
    }

    /// Decode every layer, recording offsets and the reason decoding stopped.
    pub fn decode(&self) -> DecodedFrame<'a> {
        let mut decoded = DecodedFrame::new(self.link_type, self.data);
        if let Err(err) = self.decode_into(&mut decoded) {
            trace!(
                link_type = %self.link_type,
                offset = decoded.payload_offset,
                reason = err.kind(),
                "decode stopped: {err}"
            );
            decoded.stopped = Some(err);
        }
        debug!(
            link_type = %self.link_type,
            len = self.data.len(),
            layers = decoded.layers.len(),
            payload_offset = decoded.payload_offset,
            "frame decoded"
        );
        decoded
    }

    fn decode_into(&self, out: &mut DecodedFrame<'a>) -> Result<()> {
        let link = decode_link(self.data, self.link_type)?;
        let consumed = link.payload.consumed;
        out.link = Some(link);
        // Anything past the fixed link header is the 802.1Q tag
        let base = self.link_type.base_header_len();
        if base > 0 {
            out.push(LayerKind::Link(self.link_type), base);
        }
        if consumed > base {
            out.push(LayerKind::Vlan, consumed - base);
        }
        trace!(consumed, vlan_id = ?link.vlan_id, "link layer");

        let network = NetworkHeader::from_link(&link)?;
        out.network = Some(network);
        let after_ip = match network.payload() {
            Ok(payload) => payload,
            Err(err @ DecodeError::NotFirstFragment { .. }) => {
                // The header itself is sound; only the transport header is absent
                if let NetworkHeader::Ipv4(ip) = network {
                    if let Ok(fragment) = ip.data_after_header() {
                        out.push(LayerKind::Ipv4, fragment.consumed);
                    }
                }
                return Err(err);
            }
            Err(err) => return Err(err),
        };
        out.push(network.kind().into(), after_ip.consumed);
        trace!(
            protocol = network.protocol(),
            header_len = after_ip.consumed,
            "network layer"
        );

        let protocol = network.protocol();
        let kind = TransportProtocol::from_ip_protocol(protocol)
            .ok_or(DecodeError::UnsupportedProtocol { protocol })?;
        let transport = decode_payload(kind, after_ip.bytes)?;
        let header_len = transport.header_len();
        out.transport = Some(transport);
        out.push(kind.into(), header_len);
        trace!(transport = kind.name(), header_len, "transport layer");

        Ok(())
    }
}
