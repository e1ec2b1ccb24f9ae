//! Legacy POS and ATM framings.
//!
//! Both come from fixed-snap capture formats that predate pcap link types.
//! The ATM path skips a 4-byte sub-header without looking at it; what those
//! bytes hold has never been checked, so any value is accepted.

use super::{LinkLayer, NetworkProtocol, LLC_SNAP_LEN};
use crate::buffer::{be_u16, Payload};
use crate::error::{DecodeError, Result};

/// HDLC address/control, then an EtherType-like protocol field.
pub const POS_HEADER_LEN: usize = 4;

/// Unvalidated bytes in front of the ATM LLC/SNAP header.
pub const ATM_SUBHEADER_LEN: usize = 4;

const POS_TYPE_OFFSET: usize = 2;
const SNAP_TYPE_OFFSET: usize = 6;

pub(super) fn decode_pos(data: &[u8]) -> Result<LinkLayer<'_>> {
    typed_header("legacy_pos", data, POS_TYPE_OFFSET, POS_HEADER_LEN)
}

pub(super) fn decode_atm(data: &[u8]) -> Result<LinkLayer<'_>> {
    typed_header(
        "atm",
        data,
        ATM_SUBHEADER_LEN + SNAP_TYPE_OFFSET,
        ATM_SUBHEADER_LEN + LLC_SNAP_LEN,
    )
}

fn typed_header<'a>(
    layer: &'static str,
    data: &'a [u8],
    type_offset: usize,
    header_len: usize,
) -> Result<LinkLayer<'a>> {
    let found = be_u16(layer, data, type_offset)?;
    let protocol =
        NetworkProtocol::from_ethertype(found).ok_or(DecodeError::UnexpectedType { layer, found })?;
    let payload = Payload::after(layer, data, header_len)?;
    Ok(LinkLayer::new(payload, protocol))
}
