//! Error types for pcapwalk-core.
//!
//! Every decode step returns [`DecodeError`] when the header it looks for is
//! not there. Almost all variants are ordinary outcomes for mixed traffic
//! (wrong EtherType, later fragment, unknown IP protocol, short capture) and
//! are grouped as "not found" by [`DecodeError::is_not_found`]. The one
//! exception is [`DecodeError::UnrecognizedLinkType`], which describes the
//! capture rather than the packet and is worth surfacing to an operator.

use etherparse::err::LenError;
use thiserror::Error;

/// Reason a header could not be located.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeError {
    /// A header or computed offset would read past the end of the buffer
    #[error("{layer}: header truncated (need {needed} bytes, have {have})")]
    Truncated {
        layer: &'static str,
        needed: usize,
        have: usize,
    },

    /// The link header announces a protocol other than the one requested
    #[error("{layer}: unexpected protocol type {found:#06x}")]
    UnexpectedType { layer: &'static str, found: u16 },

    /// 802.11 management and control frames carry no network payload
    #[error("802.11: frame type {frame_type} is not a data frame")]
    NotDataFrame { frame_type: u8 },

    /// IPv4 datagram is a non-initial fragment, no transport header follows
    #[error("ipv4: not the first fragment (flags/offset {flags_fragment:#06x})")]
    NotFirstFragment { flags_fragment: u16 },

    /// IP protocol number without a transport decoder
    #[error("unsupported IP protocol {protocol}")]
    UnsupportedProtocol { protocol: u8 },

    /// A length field describes a header shorter than its fixed part
    #[error("{layer}: invalid {field}: {value}")]
    InvalidField {
        layer: &'static str,
        field: &'static str,
        value: u8,
    },

    /// Numeric link-type tag outside the set this crate understands
    #[error("unrecognized link type {link_type}")]
    UnrecognizedLinkType { link_type: u16 },
}

impl DecodeError {
    /// True for the expected, per-packet "header absent" outcomes.
    pub fn is_not_found(&self) -> bool {
        !matches!(self, DecodeError::UnrecognizedLinkType { .. })
    }

    /// Map an etherparse length error onto [`DecodeError::Truncated`].
    pub(crate) fn from_len(layer: &'static str, err: &LenError) -> Self {
        DecodeError::Truncated {
            layer,
            needed: err.required_len,
            have: err.len,
        }
    }

    /// Short stable label, used for counters and structured output.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::Truncated { .. } => "truncated",
            DecodeError::UnexpectedType { .. } => "unexpected_type",
            DecodeError::NotDataFrame { .. } => "not_data_frame",
            DecodeError::NotFirstFragment { .. } => "not_first_fragment",
            DecodeError::UnsupportedProtocol { .. } => "unsupported_protocol",
            DecodeError::InvalidField { .. } => "invalid_field",
            DecodeError::UnrecognizedLinkType { .. } => "unrecognized_link_type",
        }
    }
}

/// Result type alias using [`DecodeError`].
pub type Result<T> = std::result::Result<T, DecodeError>;
