//! Ethernet II and 802.1Q.

use etherparse::{Ethernet2HeaderSlice, EtherType};

use super::{LinkLayer, NetworkProtocol};
use crate::buffer::{be_u16, Payload};
use crate::error::{DecodeError, Result};

/// Destination MAC, source MAC, EtherType.
pub const ETHERNET_HEADER_LEN: usize = etherparse::Ethernet2Header::LEN;

/// Tag control information plus the inner EtherType.
pub const VLAN_TAG_LEN: usize = 4;

/// EtherType values the decoder compares against.
pub mod ethertype {
    use super::EtherType;

    pub const IPV4: u16 = EtherType::IPV4.0;
    pub const VLAN: u16 = EtherType::VLAN_TAGGED_FRAME.0;
    pub const IPV6: u16 = EtherType::IPV6.0;
}

const VLAN_ID_MASK: u16 = 0x0fff;

pub(super) fn decode(data: &[u8]) -> Result<LinkLayer<'_>> {
    let header = Ethernet2HeaderSlice::from_slice(data)
        .map_err(|err| DecodeError::from_len("ethernet", &err))?;
    resolve_ethertype("ethernet", data, header.ether_type().0, header.slice().len())
}

/// Resolve the EtherType found at `type_offset`.
pub(super) fn dispatch_ethertype<'a>(
    layer: &'static str,
    data: &'a [u8],
    type_offset: usize,
) -> Result<LinkLayer<'a>> {
    let outer = be_u16(layer, data, type_offset)?;
    resolve_ethertype(layer, data, outer, type_offset + 2)
}

/// Pick the network protocol for `outer`, the EtherType ending at `header_len`.
///
/// A VLAN EtherType is unwrapped once: the tag's inner EtherType decides, and
/// the network header moves 4 bytes further. A second tag is not unwrapped.
fn resolve_ethertype<'a>(
    layer: &'static str,
    data: &'a [u8],
    outer: u16,
    header_len: usize,
) -> Result<LinkLayer<'a>> {
    let (found, header_len, vlan_id) = if outer == ethertype::VLAN {
        let tci = be_u16(layer, data, header_len)?;
        let inner = be_u16(layer, data, header_len + 2)?;
        (inner, header_len + VLAN_TAG_LEN, Some(tci & VLAN_ID_MASK))
    } else {
        (outer, header_len, None)
    };

    let protocol =
        NetworkProtocol::from_ethertype(found).ok_or(DecodeError::UnexpectedType { layer, found })?;
    let payload = Payload::after(layer, data, header_len)?;

    Ok(LinkLayer {
        payload,
        protocol: Some(protocol),
        vlan_id,
    })
}
