//! OpenBSD pf firewall log header (LINKTYPE_PFLOG).
//!
//! The network protocol is given by a socket address family byte rather than
//! an EtherType.

use super::{LinkLayer, NetworkProtocol};
use crate::buffer::{u8_at, Payload};
use crate::error::{DecodeError, Result};

/// length, af, action, reason, ifname[16], ruleset[16], rulenr, subrulenr, dir, pad[3].
pub const PFLOG_HEADER_LEN: usize = 48;

const AF_OFFSET: usize = 1;

/// Address family values.
///
/// `AF_INET` is 2 everywhere. `AF_INET6` differs per operating system, and a
/// pflog capture carries the value of the system that wrote it.
pub mod address_family {
    pub const INET: u8 = 2;
    pub const INET6_LINUX: u8 = 10;
    pub const INET6_OPENBSD: u8 = 24;
    pub const INET6_FREEBSD: u8 = 28;
    pub const INET6_DARWIN: u8 = 30;

    /// Whether `af` is `AF_INET6` on any system known to write pflog captures.
    pub fn is_inet6(af: u8) -> bool {
        matches!(af, INET6_LINUX | INET6_OPENBSD | INET6_FREEBSD | INET6_DARWIN)
    }
}

pub(super) fn decode(data: &[u8]) -> Result<LinkLayer<'_>> {
    let af = u8_at("pflog", data, AF_OFFSET)?;
    let protocol = if af == address_family::INET {
        NetworkProtocol::Ipv4
    } else if address_family::is_inet6(af) {
        NetworkProtocol::Ipv6
    } else {
        return Err(DecodeError::UnexpectedType {
            layer: "pflog",
            found: af as u16,
        });
    };
    let payload = Payload::after("pflog", data, PFLOG_HEADER_LEN)?;
    Ok(LinkLayer::new(payload, protocol))
}
