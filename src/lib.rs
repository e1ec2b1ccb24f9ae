//! pcapwalk - Show where each protocol header starts in captured frames.
//!
//! Reads pcap/pcapng files (optionally gzipped) and runs every frame through
//! the [`pcapwalk_core`] decoder, reporting the offset and length of the link,
//! network and transport headers.
//!
//! # Example
//!
//! ```no_run
//! use pcapwalk::pcap::PcapReader;
//! use pcapwalk::walk::Walker;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut walker = Walker::new(None);
//!     for packet in PcapReader::open("capture.pcap")? {
//!         let record = walker.record(&packet?);
//!         println!("{}: {}", record.frame, record.layer_summary());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod pcap;
pub mod walk;

pub use error::{Error, Result};
