//! TCP header view.

use etherparse::err::tcp::{HeaderError, HeaderSliceError};
use etherparse::{TcpHeader as WireTcpHeader, TcpHeaderSlice};
use smallvec::SmallVec;

use crate::buffer::Payload;
use crate::error::{DecodeError, Result};

pub const TCP_MIN_HEADER_LEN: usize = WireTcpHeader::MIN_LEN;

/// TCP flags bit positions.
pub mod flags {
    pub const FIN: u16 = 0x001;
    pub const SYN: u16 = 0x002;
    pub const RST: u16 = 0x004;
    pub const PSH: u16 = 0x008;
    pub const ACK: u16 = 0x010;
    pub const URG: u16 = 0x020;
    pub const ECE: u16 = 0x040;
    pub const CWR: u16 = 0x080;
    pub const NS: u16 = 0x100;
}

const FLAG_NAMES: [(u16, &str); 9] = [
    (flags::FIN, "FIN"),
    (flags::SYN, "SYN"),
    (flags::RST, "RST"),
    (flags::PSH, "PSH"),
    (flags::ACK, "ACK"),
    (flags::URG, "URG"),
    (flags::ECE, "ECE"),
    (flags::CWR, "CWR"),
    (flags::NS, "NS"),
];

/// Read-only view over a TCP header and its segment data.
///
/// Construction checks the data offset: at least 5 words, and the whole
/// header (options included) inside the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpHeader<'a> {
    header: TcpHeaderSlice<'a>,
    data: &'a [u8],
}

impl<'a> TcpHeader<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let header = TcpHeaderSlice::from_slice(data).map_err(|err| match err {
            HeaderSliceError::Len(len) => DecodeError::from_len("tcp", &len),
            HeaderSliceError::Content(HeaderError::DataOffsetTooSmall { data_offset }) => {
                DecodeError::InvalidField {
                    layer: "tcp",
                    field: "data_offset",
                    value: data_offset,
                }
            }
        })?;
        Ok(Self { header, data })
    }

    pub fn source_port(&self) -> u16 {
        self.header.source_port()
    }

    pub fn destination_port(&self) -> u16 {
        self.header.destination_port()
    }

    pub fn sequence_number(&self) -> u32 {
        self.header.sequence_number()
    }

    pub fn acknowledgment_number(&self) -> u32 {
        self.header.acknowledgment_number()
    }

    /// Header length in 32-bit words.
    pub fn data_offset(&self) -> u8 {
        self.header.data_offset()
    }

    pub fn header_len(&self) -> usize {
        self.header.slice().len()
    }

    /// The nine flag bits, NS included.
    pub fn flags(&self) -> u16 {
        let h = &self.header;
        [
            (h.fin(), flags::FIN),
            (h.syn(), flags::SYN),
            (h.rst(), flags::RST),
            (h.psh(), flags::PSH),
            (h.ack(), flags::ACK),
            (h.urg(), flags::URG),
            (h.ece(), flags::ECE),
            (h.cwr(), flags::CWR),
            (h.ns(), flags::NS),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .fold(0, |bits, (_, bit)| bits | bit)
    }

    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags() & flag != 0
    }

    /// Names of the set flags, lowest bit first.
    pub fn flag_names(&self) -> SmallVec<[&'static str; 4]> {
        let bits = self.flags();
        FLAG_NAMES
            .iter()
            .filter(|(bit, _)| bits & bit != 0)
            .map(|(_, name)| *name)
            .collect()
    }

    pub fn window(&self) -> u16 {
        self.header.window_size()
    }

    pub fn checksum(&self) -> u16 {
        self.header.checksum()
    }

    pub fn urgent_pointer(&self) -> u16 {
        self.header.urgent_pointer()
    }

    pub fn options(&self) -> &'a [u8] {
        self.header
            .slice()
            .get(TCP_MIN_HEADER_LEN..)
            .unwrap_or_default()
    }

    /// Segment data after the header.
    pub fn payload(&self) -> Payload<'a> {
        let consumed = self.header_len();
        Payload {
            bytes: self.data.get(consumed..).unwrap_or_default(),
            consumed,
        }
    }
}
