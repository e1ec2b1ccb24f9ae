//! UDP header view.

use etherparse::{UdpHeader as WireUdpHeader, UdpHeaderSlice};

use crate::buffer::Payload;
use crate::error::{DecodeError, Result};

pub const UDP_HEADER_LEN: usize = WireUdpHeader::LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpHeader<'a> {
    header: UdpHeaderSlice<'a>,
    data: &'a [u8],
}

impl<'a> UdpHeader<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let header =
            UdpHeaderSlice::from_slice(data).map_err(|err| DecodeError::from_len("udp", &err))?;
        Ok(Self { header, data })
    }

    pub fn source_port(&self) -> u16 {
        self.header.source_port()
    }

    pub fn destination_port(&self) -> u16 {
        self.header.destination_port()
    }

    /// Header plus data, as claimed by the sender.
    pub fn length(&self) -> u16 {
        self.header.length()
    }

    pub fn checksum(&self) -> u16 {
        self.header.checksum()
    }

    pub fn header_len(&self) -> usize {
        UDP_HEADER_LEN
    }

    pub fn payload(&self) -> Payload<'a> {
        Payload {
            bytes: self.data.get(UDP_HEADER_LEN..).unwrap_or_default(),
            consumed: UDP_HEADER_LEN,
        }
    }
}
