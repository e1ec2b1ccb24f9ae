//! Bounds-checked byte access shared by every decoder.
//!
//! Decoders never index a slice directly. They ask [`take`] for a header of
//! known size, read fields with [`u8_at`] / [`be_u16`], and hand the rest of
//! the buffer downstream as a [`Payload`].

use crate::error::{DecodeError, Result};

/// Bytes following a header, paired with the number of bytes the header used.
///
/// `consumed` counts only the header that produced this payload. Callers that
/// need an absolute offset add the counts of the stacked headers together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload<'a> {
    pub bytes: &'a [u8],
    pub consumed: usize,
}

impl<'a> Payload<'a> {
    /// Split `data` after `consumed` header bytes.
    pub fn after(layer: &'static str, data: &'a [u8], consumed: usize) -> Result<Self> {
        let bytes = data.get(consumed..).ok_or(DecodeError::Truncated {
            layer,
            needed: consumed,
            have: data.len(),
        })?;
        Ok(Self { bytes, consumed })
    }
}

/// The first `len` bytes of `data`, or `Truncated` if there are fewer.
#[inline]
pub fn take<'a>(layer: &'static str, data: &'a [u8], len: usize) -> Result<&'a [u8]> {
    data.get(..len).ok_or(DecodeError::Truncated {
        layer,
        needed: len,
        have: data.len(),
    })
}

/// Single byte at `offset`.
#[inline]
pub fn u8_at(layer: &'static str, data: &[u8], offset: usize) -> Result<u8> {
    data.get(offset).copied().ok_or(DecodeError::Truncated {
        layer,
        needed: offset.saturating_add(1),
        have: data.len(),
    })
}

/// Big-endian (network order) u16 at `offset`.
#[inline]
pub fn be_u16(layer: &'static str, data: &[u8], offset: usize) -> Result<u16> {
    let end = offset.saturating_add(2);
    match data.get(offset..end) {
        Some(&[hi, lo]) => Ok(u16::from_be_bytes([hi, lo])),
        _ => Err(DecodeError::Truncated {
            layer,
            needed: end,
            have: data.len(),
        }),
    }
}

// Header views validate their length once in their constructor; the readers
// below are for those fixed offsets and fall back to zero instead of panicking.

#[inline]
pub(crate) fn field_u8(data: &[u8], offset: usize) -> u8 {
    data.get(offset).copied().unwrap_or_default()
}

#[inline]
pub(crate) fn field_u16(data: &[u8], offset: usize) -> u16 {
    match data.get(offset..offset + 2) {
        Some(&[hi, lo]) => u16::from_be_bytes([hi, lo]),
        _ => 0,
    }
}

#[inline]
pub(crate) fn field_u32(data: &[u8], offset: usize) -> u32 {
    match data.get(offset..offset + 4) {
        Some(&[a, b, c, d]) => u32::from_be_bytes([a, b, c, d]),
        _ => 0,
    }
}

#[inline]
pub(crate) fn field_array<const N: usize>(data: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    if let Some(src) = data.get(offset..offset + N) {
        out.copy_from_slice(src);
    }
    out
}
