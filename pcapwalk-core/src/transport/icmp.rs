//! ICMP (v4) header view.

use crate::buffer::{field_array, field_u16, field_u8, take, Payload};
use crate::error::Result;

/// Type, code, checksum and the 4-byte rest-of-header.
pub const ICMP_HEADER_LEN: usize = 8;

/// Common ICMP message types.
pub mod icmp_type {
    pub const ECHO_REPLY: u8 = 0;
    pub const DEST_UNREACHABLE: u8 = 3;
    pub const REDIRECT: u8 = 5;
    pub const ECHO_REQUEST: u8 = 8;
    pub const TIME_EXCEEDED: u8 = 11;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcmpHeader<'a> {
    data: &'a [u8],
}

impl<'a> IcmpHeader<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        take("icmp", data, ICMP_HEADER_LEN)?;
        Ok(Self { data })
    }

    pub fn icmp_type(&self) -> u8 {
        field_u8(self.data, 0)
    }

    pub fn code(&self) -> u8 {
        field_u8(self.data, 1)
    }

    pub fn checksum(&self) -> u16 {
        field_u16(self.data, 2)
    }

    /// Bytes 4..8, meaning depends on the type.
    pub fn rest_of_header(&self) -> [u8; 4] {
        field_array::<4>(self.data, 4)
    }

    /// Identifier, for echo request/reply.
    pub fn identifier(&self) -> Option<u16> {
        self.is_echo().then(|| field_u16(self.data, 4))
    }

    /// Sequence number, for echo request/reply.
    pub fn sequence(&self) -> Option<u16> {
        self.is_echo().then(|| field_u16(self.data, 6))
    }

    fn is_echo(&self) -> bool {
        matches!(
            self.icmp_type(),
            icmp_type::ECHO_REQUEST | icmp_type::ECHO_REPLY
        )
    }

    pub fn header_len(&self) -> usize {
        ICMP_HEADER_LEN
    }

    pub fn payload(&self) -> Payload<'a> {
        Payload {
            bytes: self.data.get(ICMP_HEADER_LEN..).unwrap_or_default(),
            consumed: ICMP_HEADER_LEN,
        }
    }
}
