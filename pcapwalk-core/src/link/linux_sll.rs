//! Linux cooked capture (LINKTYPE_LINUX_SLL).
//!
//! Produced when capturing on the "any" interface. The 16-byte pseudo-header
//! ends with a protocol field holding an EtherType.

use super::{LinkLayer, NetworkProtocol};
use crate::buffer::{be_u16, Payload};
use crate::error::{DecodeError, Result};

/// Linux SLL header length in bytes.
pub const LINUX_SLL_HEADER_LEN: usize = 16;

const PROTOCOL_OFFSET: usize = 14;

pub(super) fn decode(data: &[u8]) -> Result<LinkLayer<'_>> {
    let found = be_u16("linux_sll", data, PROTOCOL_OFFSET)?;
    let protocol = NetworkProtocol::from_ethertype(found).ok_or(DecodeError::UnexpectedType {
        layer: "linux_sll",
        found,
    })?;
    let payload = Payload::after("linux_sll", data, LINUX_SLL_HEADER_LEN)?;
    Ok(LinkLayer::new(payload, protocol))
}
