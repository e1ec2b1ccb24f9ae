//! IPv4 header view and the first-fragment gate.

use std::fmt;
use std::net::Ipv4Addr;

use crate::buffer::{field_array, field_u16, field_u8, take, Payload};
use crate::error::{DecodeError, Result};

/// Fixed part of the IPv4 header.
pub const IPV4_MIN_HEADER_LEN: usize = 20;

/// First-fragment mask.
///
/// Applied to the flags/fragment-offset field loaded in little-endian order,
/// i.e. with the two wire bytes swapped. Under that load `0xff1f` selects the
/// 13 fragment-offset bits and leaves out the three flag bits, so "more
/// fragments" and "don't fragment" do not close the gate.
pub const FRAGMENT_GATE_MASK: u16 = 0xff1f;

const IHL_MIN: u8 = 5;
const FLAG_DONT_FRAGMENT: u16 = 0x4000;
const FLAG_MORE_FRAGMENTS: u16 = 0x2000;
const FRAGMENT_OFFSET_MASK: u16 = 0x1fff;

/// Read-only view over an IPv4 header and everything after it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Header<'a> {
    data: &'a [u8],
}

impl<'a> Ipv4Header<'a> {
    /// View `data` as an IPv4 header. Needs the 20 fixed bytes.
    ///
    /// The version nibble is not checked: the link header already said what
    /// follows, and raw frames are disambiguated by the caller.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        take("ipv4", data, IPV4_MIN_HEADER_LEN)?;
        Ok(Self { data })
    }

    /// Header bytes and payload, up to the end of the captured buffer.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn version(&self) -> u8 {
        field_u8(self.data, 0) >> 4
    }

    /// Header length in 32-bit words.
    pub fn ihl(&self) -> u8 {
        field_u8(self.data, 0) & 0x0f
    }

    /// Header length in bytes, `ihl * 4`.
    pub fn header_len(&self) -> usize {
        self.ihl() as usize * 4
    }

    pub fn dscp(&self) -> u8 {
        field_u8(self.data, 1) >> 2
    }

    pub fn ecn(&self) -> u8 {
        field_u8(self.data, 1) & 0x03
    }

    pub fn total_length(&self) -> u16 {
        field_u16(self.data, 2)
    }

    pub fn identification(&self) -> u16 {
        field_u16(self.data, 4)
    }

    /// Flags and fragment offset, network order.
    pub fn flags_fragment(&self) -> u16 {
        field_u16(self.data, 6)
    }

    pub fn dont_fragment(&self) -> bool {
        self.flags_fragment() & FLAG_DONT_FRAGMENT != 0
    }

    pub fn more_fragments(&self) -> bool {
        self.flags_fragment() & FLAG_MORE_FRAGMENTS != 0
    }

    /// Fragment offset in 8-byte units.
    pub fn fragment_offset(&self) -> u16 {
        self.flags_fragment() & FRAGMENT_OFFSET_MASK
    }

    pub fn ttl(&self) -> u8 {
        field_u8(self.data, 8)
    }

    /// IP protocol number of the payload.
    pub fn protocol(&self) -> u8 {
        field_u8(self.data, 9)
    }

    pub fn checksum(&self) -> u16 {
        field_u16(self.data, 10)
    }

    pub fn source(&self) -> Ipv4Addr {
        Ipv4Addr::from(field_array::<4>(self.data, 12))
    }

    pub fn destination(&self) -> Ipv4Addr {
        Ipv4Addr::from(field_array::<4>(self.data, 16))
    }

    /// Option bytes, empty when the header is truncated or has none.
    pub fn options(&self) -> &'a [u8] {
        self.data
            .get(IPV4_MIN_HEADER_LEN..self.header_len())
            .unwrap_or_default()
    }

    /// Whether a transport header can follow this header directly.
    pub fn is_first_fragment(&self) -> bool {
        let raw = u16::from_le_bytes(field_array::<2>(self.data, 6));
        raw & FRAGMENT_GATE_MASK == 0
    }

    /// Bytes after the header, when this datagram is the first fragment.
    pub fn payload(&self) -> Result<Payload<'a>> {
        if !self.is_first_fragment() {
            return Err(DecodeError::NotFirstFragment {
                flags_fragment: self.flags_fragment(),
            });
        }
        self.data_after_header()
    }

    /// Bytes after the header, ignoring the fragment gate.
    ///
    /// For a later fragment these are fragment data, not a transport header.
    pub fn data_after_header(&self) -> Result<Payload<'a>> {
        let ihl = self.ihl();
        if ihl < IHL_MIN {
            return Err(DecodeError::InvalidField {
                layer: "ipv4",
                field: "ihl",
                value: ihl,
            });
        }
        Payload::after("ipv4", self.data, self.header_len())
    }
}

impl fmt::Debug for Ipv4Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ipv4Header")
            .field("ihl", &self.ihl())
            .field("flags_fragment", &format_args!("{:#06x}", self.flags_fragment()))
            .field("protocol", &self.protocol())
            .field("source", &self.source())
            .field("destination", &self.destination())
            .finish()
    }
}
