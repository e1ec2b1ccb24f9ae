//! Raw packet representation.

/// A frame as stored in the capture file.
#[derive(Debug, Clone)]
pub struct RawPacket {
    /// Frame number (1-indexed).
    pub frame_number: u64,

    /// Nanoseconds since the Unix epoch.
    pub timestamp: u64,

    /// Captured length (may be less than original).
    pub captured_length: u32,

    /// Original length on the wire.
    pub original_length: u32,

    /// pcap LINKTYPE of the interface the frame was captured on.
    pub link_type: u16,

    pub data: Vec<u8>,
}

impl RawPacket {
    /// Whether the capture snap length cut the frame short.
    ///
    /// Truncated frames routinely end inside a header; decoding them stops
    /// early with a truncation reason.
    pub fn is_truncated(&self) -> bool {
        self.captured_length < self.original_length
    }
}
