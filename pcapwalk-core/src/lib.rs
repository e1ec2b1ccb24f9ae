//! # pcapwalk-core
//!
//! Layered header location for captured frames.
//!
//! Given a frame's bytes and the link type it was captured with, this crate
//! finds the IPv4 or IPv6 header, applies the IPv4 first-fragment gate, and
//! decodes the TCP, UDP or ICMP header that follows. Every step returns a
//! read-only view over the caller's buffer plus the number of bytes the
//! header occupied; nothing is copied and nothing is allocated.
//!
//! ## Quick Start
//!
//! ```rust
//! use pcapwalk_core::{Frame, LinkType, TransportHeader};
//!
//! # let bytes: &[u8] = &[];
//! let frame = Frame::new(LinkType::Ethernet, bytes);
//! if let Some(TransportHeader::Tcp(tcp)) = frame.transport() {
//!     println!("{} -> {}", tcp.source_port(), tcp.destination_port());
//! }
//!
//! let decoded = frame.decode();
//! for layer in &decoded.layers {
//!     println!("{} at {} ({} bytes)", layer.kind.name(), layer.offset, layer.len);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                        pcapwalk-core                                |
//! +---------------------------------------------------------------------+
//! |  buffer/     - Bounds-checked reads, Payload (bytes + consumed)     |
//! |  link/       - LinkType, decode_link (Ethernet, 802.11, SLL, ...)   |
//! |  network/    - Ipv4Header, Ipv6Header, locators, fragment gate      |
//! |  transport/  - TcpHeader, UdpHeader, IcmpHeader, decode_transport   |
//! |  decode/     - Frame, DecodedFrame, per-layer offsets               |
//! |  error/      - DecodeError                                          |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Supported Encapsulations
//!
//! | Layer | Protocols |
//! |-------|-----------|
//! | Link | Ethernet (+802.1Q), 802.11 (+PRISM), Linux SLL, pflog, POS, ATM, raw IP |
//! | Network | IPv4, IPv6 (fixed header only) |
//! | Transport | TCP, UDP, ICMP |

pub mod buffer;
pub mod decode;
pub mod error;
pub mod link;
pub mod network;
pub mod transport;

// Test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;

pub use buffer::Payload;
pub use decode::{DecodedFrame, Frame, Layer, LayerKind};
pub use error::{DecodeError, Result};
pub use link::{decode_link, LinkLayer, LinkType, NetworkProtocol};
pub use network::{
    locate_ipv4, locate_ipv6, try_locate_ipv4, try_locate_ipv6, Ipv4Header, Ipv6Header,
    NetworkHeader,
};
pub use transport::{
    decode_transport, icmp_from_ip, tcp_from_ip, udp_from_ip, IcmpHeader, TcpHeader,
    TransportHeader, TransportProtocol, UdpHeader,
};
