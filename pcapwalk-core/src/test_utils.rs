//! Test utilities for header decoding.
//!
//! Builders for link, network and transport headers. Each builder emits its
//! header followed by `payload`, so frames are assembled inside out.

/// Builder for Ethernet II frames.
#[derive(Debug, Clone)]
pub struct EthernetBuilder {
    src_mac: [u8; 6],
    dst_mac: [u8; 6],
    ethertype: u16,
    payload: Vec<u8>,
}

impl Default for EthernetBuilder {
    fn default() -> Self {
        Self {
            src_mac: [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
            dst_mac: [0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
            ethertype: 0x0800, // IPv4
            payload: Vec::new(),
        }
    }
}

impl EthernetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src_mac(mut self, mac: [u8; 6]) -> Self {
        self.src_mac = mac;
        self
    }

    pub fn dst_mac(mut self, mac: [u8; 6]) -> Self {
        self.dst_mac = mac;
        self
    }

    pub fn ethertype(mut self, ethertype: u16) -> Self {
        self.ethertype = ethertype;
        self
    }

    pub fn ipv4(self) -> Self {
        self.ethertype(0x0800)
    }

    pub fn ipv6(self) -> Self {
        self.ethertype(0x86DD)
    }

    pub fn arp(self) -> Self {
        self.ethertype(0x0806)
    }

    /// Outer EtherType 802.1Q; the payload should start with a [`VlanBuilder`] tag.
    pub fn vlan(self) -> Self {
        self.ethertype(0x8100)
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(14 + self.payload.len());
        frame.extend_from_slice(&self.dst_mac);
        frame.extend_from_slice(&self.src_mac);
        frame.extend_from_slice(&self.ethertype.to_be_bytes());
        frame.extend_from_slice(&self.payload);
        frame
    }
}

/// Builder for the 4 bytes following an 802.1Q EtherType: TCI and inner EtherType.
#[derive(Debug, Clone)]
pub struct VlanBuilder {
    priority: u8,
    vlan_id: u16,
    ethertype: u16,
    payload: Vec<u8>,
}

impl Default for VlanBuilder {
    fn default() -> Self {
        Self {
            priority: 0,
            vlan_id: 1,
            ethertype: 0x0800,
            payload: Vec::new(),
        }
    }
}

impl VlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn vlan_id(mut self, vlan_id: u16) -> Self {
        self.vlan_id = vlan_id;
        self
    }

    pub fn ethertype(mut self, ethertype: u16) -> Self {
        self.ethertype = ethertype;
        self
    }

    pub fn ipv4(self) -> Self {
        self.ethertype(0x0800)
    }

    pub fn ipv6(self) -> Self {
        self.ethertype(0x86DD)
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let tci = (u16::from(self.priority & 0x07) << 13) | (self.vlan_id & 0x0fff);
        let mut tag = Vec::with_capacity(4 + self.payload.len());
        tag.extend_from_slice(&tci.to_be_bytes());
        tag.extend_from_slice(&self.ethertype.to_be_bytes());
        tag.extend_from_slice(&self.payload);
        tag
    }
}

/// Builder for 802.11 frames: optional PRISM header, 30-byte MAC header, LLC/SNAP.
#[derive(Debug, Clone)]
pub struct Ieee80211Builder {
    prism: bool,
    frame_control: u8,
    ethertype: u16,
    payload: Vec<u8>,
}

impl Default for Ieee80211Builder {
    fn default() -> Self {
        Self {
            prism: false,
            frame_control: 0x08, // Data, subtype 0
            ethertype: 0x0800,
            payload: Vec::new(),
        }
    }
}

impl Ieee80211Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix a 144-byte PRISM monitor header.
    pub fn prism(mut self) -> Self {
        self.prism = true;
        self
    }

    /// First frame-control byte (protocol version, type, subtype).
    pub fn frame_control(mut self, frame_control: u8) -> Self {
        self.frame_control = frame_control;
        self
    }

    /// EtherType carried in the SNAP header.
    pub fn ethertype(mut self, ethertype: u16) -> Self {
        self.ethertype = ethertype;
        self
    }

    pub fn ipv4(self) -> Self {
        self.ethertype(0x0800)
    }

    pub fn ipv6(self) -> Self {
        self.ethertype(0x86DD)
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(144 + 38 + self.payload.len());

        if self.prism {
            // msgcode 0x41 (little-endian), msglen 144, then device name and items
            frame.extend_from_slice(&[0x41, 0x00, 0x00, 0x00]);
            frame.extend_from_slice(&144u32.to_le_bytes());
            frame.extend_from_slice(b"wlan0");
            frame.resize(144, 0);
        }

        frame.push(self.frame_control);
        frame.push(0x00); // Flags
        frame.extend_from_slice(&[0x00, 0x00]); // Duration
        frame.extend_from_slice(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]); // Address 1
        frame.extend_from_slice(&[0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb]); // Address 2
        frame.extend_from_slice(&[0xff; 6]); // Address 3
        frame.extend_from_slice(&[0x10, 0x00]); // Sequence control
        frame.extend_from_slice(&[0x00; 6]); // Address 4

        // LLC/SNAP: DSAP, SSAP, UI, zero OUI
        frame.extend_from_slice(&[0xaa, 0xaa, 0x03, 0x00, 0x00, 0x00]);
        frame.extend_from_slice(&self.ethertype.to_be_bytes());
        frame.extend_from_slice(&self.payload);
        frame
    }
}

/// Builder for Linux cooked-capture (SLL) frames.
#[derive(Debug, Clone)]
pub struct SllBuilder {
    packet_type: u16,
    protocol: u16,
    payload: Vec<u8>,
}

impl Default for SllBuilder {
    fn default() -> Self {
        Self {
            packet_type: 0, // Unicast to us
            protocol: 0x0800,
            payload: Vec::new(),
        }
    }
}

impl SllBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn packet_type(mut self, packet_type: u16) -> Self {
        self.packet_type = packet_type;
        self
    }

    pub fn protocol(mut self, protocol: u16) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn ipv4(self) -> Self {
        self.protocol(0x0800)
    }

    pub fn ipv6(self) -> Self {
        self.protocol(0x86DD)
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(16 + self.payload.len());
        frame.extend_from_slice(&self.packet_type.to_be_bytes());
        frame.extend_from_slice(&1u16.to_be_bytes()); // ARPHRD_ETHER
        frame.extend_from_slice(&6u16.to_be_bytes()); // Address length
        frame.extend_from_slice(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x00, 0x00]);
        frame.extend_from_slice(&self.protocol.to_be_bytes());
        frame.extend_from_slice(&self.payload);
        frame
    }
}

/// Builder for pflog frames (48-byte header).
#[derive(Debug, Clone)]
pub struct PflogBuilder {
    af: u8,
    action: u8,
    payload: Vec<u8>,
}

impl Default for PflogBuilder {
    fn default() -> Self {
        Self {
            af: 2, // AF_INET
            action: 0,
            payload: Vec::new(),
        }
    }
}

impl PflogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn af(mut self, af: u8) -> Self {
        self.af = af;
        self
    }

    pub fn inet(self) -> Self {
        self.af(2)
    }

    /// AF_INET6 as OpenBSD numbers it.
    pub fn inet6(self) -> Self {
        self.af(24)
    }

    pub fn action(mut self, action: u8) -> Self {
        self.action = action;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(48 + self.payload.len());
        frame.push(45); // Header length without padding
        frame.push(self.af);
        frame.push(self.action);
        frame.push(0); // Reason
        frame.extend_from_slice(b"em0");
        frame.resize(48, 0);
        frame.extend_from_slice(&self.payload);
        frame
    }
}

/// Builder for legacy POS frames.
#[derive(Debug, Clone)]
pub struct PosBuilder {
    ethertype: u16,
    payload: Vec<u8>,
}

impl Default for PosBuilder {
    fn default() -> Self {
        Self {
            ethertype: 0x0800,
            payload: Vec::new(),
        }
    }
}

impl PosBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ethertype(mut self, ethertype: u16) -> Self {
        self.ethertype = ethertype;
        self
    }

    pub fn ipv4(self) -> Self {
        self.ethertype(0x0800)
    }

    pub fn ipv6(self) -> Self {
        self.ethertype(0x86DD)
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(4 + self.payload.len());
        frame.extend_from_slice(&[0xff, 0x03]); // HDLC address, control
        frame.extend_from_slice(&self.ethertype.to_be_bytes());
        frame.extend_from_slice(&self.payload);
        frame
    }
}

/// Builder for ATM cells: 4-byte sub-header, then LLC/SNAP.
#[derive(Debug, Clone)]
pub struct AtmBuilder {
    subheader: [u8; 4],
    ethertype: u16,
    payload: Vec<u8>,
}

impl Default for AtmBuilder {
    fn default() -> Self {
        Self {
            subheader: [0x00, 0x00, 0x00, 0x20],
            ethertype: 0x0800,
            payload: Vec::new(),
        }
    }
}

impl AtmBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subheader(mut self, subheader: [u8; 4]) -> Self {
        self.subheader = subheader;
        self
    }

    pub fn ethertype(mut self, ethertype: u16) -> Self {
        self.ethertype = ethertype;
        self
    }

    pub fn ipv4(self) -> Self {
        self.ethertype(0x0800)
    }

    pub fn ipv6(self) -> Self {
        self.ethertype(0x86DD)
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(12 + self.payload.len());
        frame.extend_from_slice(&self.subheader);
        frame.extend_from_slice(&[0xaa, 0xaa, 0x03, 0x00, 0x00, 0x00]);
        frame.extend_from_slice(&self.ethertype.to_be_bytes());
        frame.extend_from_slice(&self.payload);
        frame
    }
}

/// Builder for IPv4 headers.
///
/// IHL and total length are derived from the options and payload on build.
#[derive(Debug, Clone)]
pub struct Ipv4Builder {
    dscp_ecn: u8,
    identification: u16,
    flags_fragment: u16,
    ttl: u8,
    protocol: u8,
    src_ip: [u8; 4],
    dst_ip: [u8; 4],
    options: Vec<u8>,
    payload: Vec<u8>,
}

impl Default for Ipv4Builder {
    fn default() -> Self {
        Self {
            dscp_ecn: 0x00,
            identification: 0x0001,
            flags_fragment: 0x0000,
            ttl: 64,
            protocol: 6, // TCP
            src_ip: [192, 168, 1, 1],
            dst_ip: [192, 168, 1, 2],
            options: Vec::new(),
            payload: Vec::new(),
        }
    }
}

impl Ipv4Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ttl(mut self, ttl: u8) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn identification(mut self, identification: u16) -> Self {
        self.identification = identification;
        self
    }

    /// Raw flags + fragment offset field, network order.
    pub fn flags_fragment(mut self, flags_fragment: u16) -> Self {
        self.flags_fragment = flags_fragment;
        self
    }

    pub fn protocol(mut self, protocol: u8) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn tcp(self) -> Self {
        self.protocol(6)
    }

    pub fn udp(self) -> Self {
        self.protocol(17)
    }

    pub fn icmp(self) -> Self {
        self.protocol(1)
    }

    pub fn src_ip(mut self, ip: [u8; 4]) -> Self {
        self.src_ip = ip;
        self
    }

    pub fn dst_ip(mut self, ip: [u8; 4]) -> Self {
        self.dst_ip = ip;
        self
    }

    /// Option bytes; must be a multiple of 4.
    pub fn options(mut self, options: Vec<u8>) -> Self {
        self.options = options;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let header_len = 20 + self.options.len();
        let total_length = (header_len + self.payload.len()) as u16;
        let ihl = (header_len / 4) as u8;
        let mut header = Vec::with_capacity(header_len + self.payload.len());

        header.push(0x40 | ihl);
        header.push(self.dscp_ecn);
        header.extend_from_slice(&total_length.to_be_bytes());
        header.extend_from_slice(&self.identification.to_be_bytes());
        header.extend_from_slice(&self.flags_fragment.to_be_bytes());
        header.push(self.ttl);
        header.push(self.protocol);
        header.extend_from_slice(&[0x00, 0x00]); // Checksum (not calculated)
        header.extend_from_slice(&self.src_ip);
        header.extend_from_slice(&self.dst_ip);
        header.extend_from_slice(&self.options);
        header.extend_from_slice(&self.payload);

        header
    }
}

/// Builder for IPv6 fixed headers.
#[derive(Debug, Clone)]
pub struct Ipv6Builder {
    traffic_class: u8,
    flow_label: u32,
    next_header: u8,
    hop_limit: u8,
    src_ip: [u8; 16],
    dst_ip: [u8; 16],
    payload: Vec<u8>,
}

impl Default for Ipv6Builder {
    fn default() -> Self {
        let mut src_ip = [0u8; 16];
        src_ip[..2].copy_from_slice(&[0xfe, 0x80]);
        src_ip[15] = 1;
        let mut dst_ip = src_ip;
        dst_ip[15] = 2;
        Self {
            traffic_class: 0,
            flow_label: 0,
            next_header: 6, // TCP
            hop_limit: 64,
            src_ip,
            dst_ip,
            payload: Vec::new(),
        }
    }
}

impl Ipv6Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn traffic_class(mut self, traffic_class: u8) -> Self {
        self.traffic_class = traffic_class;
        self
    }

    pub fn flow_label(mut self, flow_label: u32) -> Self {
        self.flow_label = flow_label & 0x000f_ffff;
        self
    }

    pub fn next_header(mut self, next_header: u8) -> Self {
        self.next_header = next_header;
        self
    }

    pub fn tcp(self) -> Self {
        self.next_header(6)
    }

    pub fn udp(self) -> Self {
        self.next_header(17)
    }

    pub fn hop_limit(mut self, hop_limit: u8) -> Self {
        self.hop_limit = hop_limit;
        self
    }

    pub fn src_ip(mut self, ip: [u8; 16]) -> Self {
        self.src_ip = ip;
        self
    }

    pub fn dst_ip(mut self, ip: [u8; 16]) -> Self {
        self.dst_ip = ip;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let first_word =
            (6u32 << 28) | (u32::from(self.traffic_class) << 20) | self.flow_label;
        let mut header = Vec::with_capacity(40 + self.payload.len());

        header.extend_from_slice(&first_word.to_be_bytes());
        header.extend_from_slice(&(self.payload.len() as u16).to_be_bytes());
        header.push(self.next_header);
        header.push(self.hop_limit);
        header.extend_from_slice(&self.src_ip);
        header.extend_from_slice(&self.dst_ip);
        header.extend_from_slice(&self.payload);

        header
    }
}

/// Builder for TCP headers.
#[derive(Debug, Clone)]
pub struct TcpBuilder {
    src_port: u16,
    dst_port: u16,
    seq: u32,
    ack: u32,
    data_offset: Option<u8>,
    flags: u16,
    window: u16,
    options: Vec<u8>,
    payload: Vec<u8>,
}

impl Default for TcpBuilder {
    fn default() -> Self {
        Self {
            src_port: 12345,
            dst_port: 80,
            seq: 1,
            ack: 0,
            data_offset: None, // Derived from the options
            flags: 0x002,      // SYN
            window: 65535,
            options: Vec::new(),
            payload: Vec::new(),
        }
    }
}

impl TcpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src_port(mut self, port: u16) -> Self {
        self.src_port = port;
        self
    }

    pub fn dst_port(mut self, port: u16) -> Self {
        self.dst_port = port;
        self
    }

    pub fn seq(mut self, seq: u32) -> Self {
        self.seq = seq;
        self
    }

    pub fn ack_num(mut self, ack: u32) -> Self {
        self.ack = ack;
        self
    }

    /// Force the data-offset nibble regardless of the bytes actually written.
    pub fn data_offset(mut self, data_offset: u8) -> Self {
        self.data_offset = Some(data_offset);
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn syn_ack(self) -> Self {
        self.flags(0x012)
    }

    pub fn psh_ack(self) -> Self {
        self.flags(0x018)
    }

    pub fn window(mut self, window: u16) -> Self {
        self.window = window;
        self
    }

    /// Option bytes; must be a multiple of 4.
    pub fn options(mut self, options: Vec<u8>) -> Self {
        self.options = options;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let header_len = 20 + self.options.len();
        let data_offset = self.data_offset.unwrap_or((header_len / 4) as u8);
        let offset_flags = (u16::from(data_offset) << 12) | (self.flags & 0x01ff);
        let mut header = Vec::with_capacity(header_len + self.payload.len());

        header.extend_from_slice(&self.src_port.to_be_bytes());
        header.extend_from_slice(&self.dst_port.to_be_bytes());
        header.extend_from_slice(&self.seq.to_be_bytes());
        header.extend_from_slice(&self.ack.to_be_bytes());
        header.extend_from_slice(&offset_flags.to_be_bytes());
        header.extend_from_slice(&self.window.to_be_bytes());
        header.extend_from_slice(&[0x00, 0x00]); // Checksum
        header.extend_from_slice(&[0x00, 0x00]); // Urgent pointer
        header.extend_from_slice(&self.options);
        header.extend_from_slice(&self.payload);

        header
    }
}

/// Builder for UDP headers.
#[derive(Debug, Clone)]
pub struct UdpBuilder {
    src_port: u16,
    dst_port: u16,
    payload: Vec<u8>,
}

impl Default for UdpBuilder {
    fn default() -> Self {
        Self {
            src_port: 12345,
            dst_port: 53,
            payload: Vec::new(),
        }
    }
}

impl UdpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src_port(mut self, port: u16) -> Self {
        self.src_port = port;
        self
    }

    pub fn dst_port(mut self, port: u16) -> Self {
        self.dst_port = port;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let length = 8 + self.payload.len() as u16;
        let mut header = Vec::with_capacity(8 + self.payload.len());

        header.extend_from_slice(&self.src_port.to_be_bytes());
        header.extend_from_slice(&self.dst_port.to_be_bytes());
        header.extend_from_slice(&length.to_be_bytes());
        header.extend_from_slice(&[0x00, 0x00]); // Checksum
        header.extend_from_slice(&self.payload);

        header
    }
}

/// Builder for ICMP messages.
#[derive(Debug, Clone)]
pub struct IcmpBuilder {
    icmp_type: u8,
    code: u8,
    rest: [u8; 4],
    payload: Vec<u8>,
}

impl Default for IcmpBuilder {
    fn default() -> Self {
        Self {
            icmp_type: 8, // Echo request
            code: 0,
            rest: [0x00; 4],
            payload: Vec::new(),
        }
    }
}

impl IcmpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn icmp_type(mut self, icmp_type: u8) -> Self {
        self.icmp_type = icmp_type;
        self
    }

    pub fn code(mut self, code: u8) -> Self {
        self.code = code;
        self
    }

    pub fn echo_request(mut self, identifier: u16, sequence: u16) -> Self {
        self.icmp_type = 8;
        self.code = 0;
        self.rest[..2].copy_from_slice(&identifier.to_be_bytes());
        self.rest[2..].copy_from_slice(&sequence.to_be_bytes());
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut packet = Vec::with_capacity(8 + self.payload.len());

        packet.push(self.icmp_type);
        packet.push(self.code);
        packet.extend_from_slice(&[0x00, 0x00]); // Checksum
        packet.extend_from_slice(&self.rest);
        packet.extend_from_slice(&self.payload);

        packet
    }
}
