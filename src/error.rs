//! Error types for pcapwalk.
//!
//! Per-packet decode outcomes are not errors here; they are reported in the
//! frame output. These types cover the capture file itself.

use thiserror::Error;

/// Main error type for pcapwalk operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error reading or parsing the capture file
    #[error("PCAP error: {0}")]
    Pcap(#[from] PcapError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to capture file reading.
#[derive(Error, Debug)]
pub enum PcapError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Invalid PCAP format
    #[error("Invalid PCAP format: {reason}")]
    InvalidFormat { reason: String },

    /// Enhanced packet block naming an interface that was never described
    #[error("Frame {frame} refers to unknown interface {interface}")]
    UnknownInterface { frame: u64, interface: u32 },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
