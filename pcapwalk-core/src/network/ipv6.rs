//! IPv6 fixed header view.

use std::fmt;
use std::net::Ipv6Addr;

use crate::buffer::{field_array, field_u16, field_u32, field_u8, take, Payload};
use crate::error::Result;

pub const IPV6_HEADER_LEN: usize = 40;

/// Read-only view over an IPv6 fixed header and everything after it.
///
/// Extension headers are not walked; `next_header` is reported as found.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ipv6Header<'a> {
    data: &'a [u8],
}

impl<'a> Ipv6Header<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        take("ipv6", data, IPV6_HEADER_LEN)?;
        Ok(Self { data })
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn version(&self) -> u8 {
        field_u8(self.data, 0) >> 4
    }

    pub fn traffic_class(&self) -> u8 {
        ((field_u16(self.data, 0) >> 4) & 0xff) as u8
    }

    pub fn flow_label(&self) -> u32 {
        field_u32(self.data, 0) & 0x000f_ffff
    }

    pub fn payload_length(&self) -> u16 {
        field_u16(self.data, 4)
    }

    pub fn next_header(&self) -> u8 {
        field_u8(self.data, 6)
    }

    pub fn hop_limit(&self) -> u8 {
        field_u8(self.data, 7)
    }

    pub fn source(&self) -> Ipv6Addr {
        Ipv6Addr::from(field_array::<16>(self.data, 8))
    }

    pub fn destination(&self) -> Ipv6Addr {
        Ipv6Addr::from(field_array::<16>(self.data, 24))
    }

    pub fn header_len(&self) -> usize {
        IPV6_HEADER_LEN
    }

    /// Bytes after the fixed header.
    pub fn payload(&self) -> Payload<'a> {
        Payload {
            bytes: self.data.get(IPV6_HEADER_LEN..).unwrap_or_default(),
            consumed: IPV6_HEADER_LEN,
        }
    }
}

impl fmt::Debug for Ipv6Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ipv6Header")
            .field("next_header", &self.next_header())
            .field("payload_length", &self.payload_length())
            .field("source", &self.source())
            .field("destination", &self.destination())
            .finish()
    }
}
