//! Turning captured packets into per-frame layer reports.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use pcapwalk_core::{DecodeError, DecodedFrame, Frame, LinkType, NetworkHeader, TransportHeader};

use crate::pcap::RawPacket;

/// One located header inside a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerRecord {
    pub name: &'static str,
    pub offset: usize,
    pub len: usize,
}

/// Decoded layer boundaries of a single frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameRecord {
    pub frame: u64,
    /// Nanoseconds since the Unix epoch.
    pub timestamp: u64,
    pub captured_length: u32,
    pub link_type: String,
    pub layers: Vec<LayerRecord>,
    pub vlan_id: Option<u16>,
    pub network: Option<&'static str>,
    pub src_addr: Option<String>,
    pub dst_addr: Option<String>,
    pub transport: Option<&'static str>,
    pub src_port: Option<u16>,
    pub dst_port: Option<u16>,
    pub payload_offset: usize,
    /// Short label of the reason decoding stopped, if it did.
    pub stopped: Option<&'static str>,
    pub reason: Option<String>,
}

impl FrameRecord {
    /// Layers as `name@offset+len`, space separated.
    pub fn layer_summary(&self) -> String {
        self.layers
            .iter()
            .map(|l| format!("{}@{}+{}", l.name, l.offset, l.len))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn unrecognized(packet: &RawPacket, err: DecodeError) -> Self {
        Self {
            frame: packet.frame_number,
            timestamp: packet.timestamp,
            captured_length: packet.captured_length,
            link_type: format!("linktype {}", packet.link_type),
            layers: Vec::new(),
            vlan_id: None,
            network: None,
            src_addr: None,
            dst_addr: None,
            transport: None,
            src_port: None,
            dst_port: None,
            payload_offset: 0,
            stopped: Some(err.kind()),
            reason: Some(err.to_string()),
        }
    }

    fn from_decoded(packet: &RawPacket, decoded: &DecodedFrame<'_>) -> Self {
        let (src_addr, dst_addr) = match &decoded.network {
            Some(NetworkHeader::Ipv4(ip)) => (
                Some(ip.source().to_string()),
                Some(ip.destination().to_string()),
            ),
            Some(NetworkHeader::Ipv6(ip)) => (
                Some(ip.source().to_string()),
                Some(ip.destination().to_string()),
            ),
            None => (None, None),
        };
        let (src_port, dst_port) = match &decoded.transport {
            Some(TransportHeader::Tcp(tcp)) => {
                (Some(tcp.source_port()), Some(tcp.destination_port()))
            }
            Some(TransportHeader::Udp(udp)) => {
                (Some(udp.source_port()), Some(udp.destination_port()))
            }
            _ => (None, None),
        };

        Self {
            frame: packet.frame_number,
            timestamp: packet.timestamp,
            captured_length: packet.captured_length,
            link_type: decoded.link_type.name().to_string(),
            layers: decoded
                .layers
                .iter()
                .map(|layer| LayerRecord {
                    name: layer.kind.name(),
                    offset: layer.offset,
                    len: layer.len,
                })
                .collect(),
            vlan_id: decoded.vlan_id(),
            network: decoded.network_protocol().map(|p| p.name()),
            src_addr,
            dst_addr,
            transport: decoded.transport_protocol().map(|p| p.name()),
            src_port,
            dst_port,
            payload_offset: decoded.payload_offset,
            stopped: decoded.stopped.as_ref().map(DecodeError::kind),
            reason: decoded.stopped.as_ref().map(ToString::to_string),
        }
    }
}

/// Decodes raw packets, resolving their link type.
///
/// An unrecognized capture link type is reported once per distinct value;
/// its frames are still returned, carrying the stop reason.
#[derive(Debug, Default)]
pub struct Walker {
    link_override: Option<LinkType>,
    warned: HashSet<u16>,
}

impl Walker {
    pub fn new(link_override: Option<LinkType>) -> Self {
        Self {
            link_override,
            warned: HashSet::new(),
        }
    }

    fn resolve(&mut self, link_type: u16) -> Result<LinkType, DecodeError> {
        if let Some(forced) = self.link_override {
            return Ok(forced);
        }
        LinkType::from_linktype(link_type).inspect_err(|err| {
            if self.warned.insert(link_type) {
                warn!(link_type, "{err}; frames will be listed without layers");
            }
        })
    }

    /// Decode one packet into its report.
    pub fn record(&mut self, packet: &RawPacket) -> FrameRecord {
        match self.resolve(packet.link_type) {
            Ok(link_type) => {
                let decoded = Frame::new(link_type, &packet.data).decode();
                if packet.is_truncated() && decoded.stopped.is_some() {
                    debug!(
                        frame = packet.frame_number,
                        captured = packet.captured_length,
                        original = packet.original_length,
                        "decoding stopped in a snap-length truncated frame"
                    );
                }
                FrameRecord::from_decoded(packet, &decoded)
            }
            Err(err) => FrameRecord::unrecognized(packet, err),
        }
    }
}

/// Aggregate counters over a run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Summary {
    pub frames: u64,
    /// Frames decoded through the transport header.
    pub complete: u64,
    pub network: BTreeMap<&'static str, u64>,
    pub transport: BTreeMap<&'static str, u64>,
    pub stopped: BTreeMap<&'static str, u64>,
}

impl Summary {
    pub fn add(&mut self, record: &FrameRecord) {
        self.frames += 1;
        if let Some(network) = record.network {
            *self.network.entry(network).or_default() += 1;
        }
        if let Some(transport) = record.transport {
            *self.transport.entry(transport).or_default() += 1;
        }
        match record.stopped {
            Some(kind) => *self.stopped.entry(kind).or_default() += 1,
            None => self.complete += 1,
        }
    }

    /// `(category, value, frames)` rows in a stable order.
    pub fn rows(&self) -> Vec<(&'static str, String, u64)> {
        let mut rows = vec![
            ("total", "frames".to_string(), self.frames),
            ("total", "complete".to_string(), self.complete),
        ];
        for (category, counts) in [
            ("network", &self.network),
            ("transport", &self.transport),
            ("stopped", &self.stopped),
        ] {
            rows.extend(counts.iter().map(|(k, v)| (category, k.to_string(), *v)));
        }
        rows
    }
}
