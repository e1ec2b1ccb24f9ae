//! Capture file reading.
//!
//! Supports legacy pcap and pcapng, optionally gzip-compressed.

mod packet;
mod reader;

pub use packet::RawPacket;
pub use reader::{is_gzip_extension, PcapReader};
