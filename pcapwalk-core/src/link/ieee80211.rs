//! IEEE 802.11 data frames, optionally behind a PRISM capture header.
//!
//! The MAC header is taken as the fixed 30-byte four-address form. A data
//! frame's body starts with an 802.2 LLC/SNAP header whose last two bytes are
//! an EtherType, which is then resolved exactly like Ethernet's (including a
//! single 802.1Q tag).

use super::ethernet::dispatch_ethertype;
use super::LinkLayer;
use crate::buffer::{take, u8_at};
use crate::error::{DecodeError, Result};

/// PRISM monitor-mode capture header.
pub const PRISM_HEADER_LEN: usize = 144;

/// Frame control, duration, four addresses, sequence control.
pub const IEEE80211_HEADER_LEN: usize = 30;

/// DSAP, SSAP, control, OUI, EtherType.
pub const LLC_SNAP_LEN: usize = 8;

const SNAP_ETHERTYPE_OFFSET: usize = 6;

/// Frame-control type values (bits 2-3 of the first byte).
pub mod frame_type {
    pub const MANAGEMENT: u8 = 0;
    pub const CONTROL: u8 = 1;
    pub const DATA: u8 = 2;
    pub const EXTENSION: u8 = 3;
}

/// Frame type from the first frame-control byte.
#[inline]
fn frame_type_of(frame_control: u8) -> u8 {
    (frame_control >> 2) & 0x03
}

pub(super) fn decode(data: &[u8], prism: bool) -> Result<LinkLayer<'_>> {
    let (layer, start) = if prism {
        ("ieee80211_prism", PRISM_HEADER_LEN)
    } else {
        ("ieee80211", 0)
    };

    take(layer, data, start)?;
    let frame_type = frame_type_of(u8_at(layer, data, start)?);
    if frame_type != frame_type::DATA {
        return Err(DecodeError::NotDataFrame { frame_type });
    }
    take(layer, data, start + IEEE80211_HEADER_LEN)?;

    dispatch_ethertype(
        layer,
        data,
        start + IEEE80211_HEADER_LEN + SNAP_ETHERTYPE_OFFSET,
    )
}
