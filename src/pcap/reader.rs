//! Capture file reader.
//!
//! Reads legacy pcap (both byte orders, micro- and nanosecond variants) and
//! pcapng, transparently gunzipping `.gz` files or files starting with the
//! gzip magic. pcapng files may describe several interfaces with different
//! link types; every packet carries the link type of its own interface.
//! Timestamps are normalized to nanoseconds whatever the file resolution.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use pcap_parser::pcapng::Block;
use pcap_parser::traits::PcapReaderIterator;
use pcap_parser::{LegacyPcapReader, PcapBlockOwned, PcapError, PcapNGReader};

use super::RawPacket;
use crate::error::{Error, PcapError as OurPcapError, Result};

/// Buffer size for reading capture files (64KB).
const BUFFER_SIZE: usize = 65536;

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

type Source = BufReader<Box<dyn Read + Send>>;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Reader for pcap and pcapng files.
pub struct PcapReader {
    format: Format,
    frame_number: u64,
    /// Interfaces by id. Legacy files have exactly one entry.
    interfaces: Vec<Interface>,
}

enum Format {
    Legacy {
        reader: LegacyPcapReader<Source>,
        /// Record timestamp fraction unit, from the file magic.
        ticks_per_second: u64,
    },
    Ng(PcapNGReader<Source>),
}

#[derive(Debug, Clone, Copy)]
struct Interface {
    link_type: u16,
    ticks_per_second: u64,
}

impl Interface {
    /// Convert a tick count since the epoch to nanoseconds.
    fn nanos(&self, ticks: u64) -> u64 {
        let per_second = u128::from(self.ticks_per_second);
        let nanos = u128::from(ticks) * u128::from(NANOS_PER_SECOND) / per_second;
        u64::try_from(nanos).unwrap_or(u64::MAX)
    }
}

/// Ticks per second for a pcapng `if_tsresol` value.
///
/// The high bit selects a power of two, otherwise a power of ten. Values that
/// do not fit in 64 bits fall back to the microsecond default.
fn tsresol_ticks(tsresol: u8) -> u64 {
    let ticks = if tsresol & 0x80 == 0 {
        10u64.checked_pow(u32::from(tsresol))
    } else {
        2u64.checked_pow(u32::from(tsresol & 0x7f))
    };
    ticks.filter(|&t| t > 0).unwrap_or(1_000_000)
}

impl PcapReader {
    /// Open a capture file, detecting gzip and the pcap/pcapng format.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut source = open_source(path)?;

        let magic: [u8; 4] = match source.fill_buf()? {
            [a, b, c, d, ..] => [*a, *b, *c, *d],
            _ => {
                return Err(invalid_format(
                    "File too short to read magic number".to_string(),
                ))
            }
        };

        let format = match magic {
            // Microsecond pcap, either byte order
            [0xd4, 0xc3, 0xb2, 0xa1] | [0xa1, 0xb2, 0xc3, 0xd4] => {
                legacy_format(source, 1_000_000)?
            }
            // Nanosecond pcap, either byte order
            [0x4d, 0x3c, 0xb2, 0xa1] | [0xa1, 0xb2, 0x3c, 0x4d] => {
                legacy_format(source, NANOS_PER_SECOND)?
            }
            [0x0a, 0x0d, 0x0d, 0x0a] => PcapNGReader::new(BUFFER_SIZE, source)
                .map(Format::Ng)
                .map_err(|e| invalid_format(format!("Failed to parse PCAPNG header: {e}")))?,
            _ => return Err(invalid_format(format!("Unknown magic number: {magic:02x?}"))),
        };

        Ok(Self {
            format,
            frame_number: 0,
            interfaces: Vec::new(),
        })
    }

    /// Link type of the first interface, once its header has been read.
    pub fn link_type(&self) -> Option<u16> {
        self.interfaces.first().map(|interface| interface.link_type)
    }

    /// Number of frames returned so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_number
    }

    /// Read the next packet, skipping non-packet blocks.
    pub fn next_packet(&mut self) -> Result<Option<RawPacket>> {
        let interfaces = &mut self.interfaces;
        let frame_number = &mut self.frame_number;

        match &mut self.format {
            Format::Legacy {
                reader,
                ticks_per_second,
            } => read_until_packet(reader, |block| match block {
                PcapBlockOwned::LegacyHeader(header) => {
                    *interfaces = vec![Interface {
                        link_type: header.network.0 as u16,
                        ticks_per_second: *ticks_per_second,
                    }];
                    Ok(None)
                }
                PcapBlockOwned::Legacy(packet) => {
                    let interface = interfaces.first().copied().ok_or_else(|| {
                        invalid_format("Packet record before file header".to_string())
                    })?;
                    *frame_number += 1;
                    Ok(Some(RawPacket {
                        frame_number: *frame_number,
                        timestamp: u64::from(packet.ts_sec) * NANOS_PER_SECOND
                            + interface.nanos(u64::from(packet.ts_usec)),
                        captured_length: packet.caplen,
                        original_length: packet.origlen,
                        link_type: interface.link_type,
                        data: captured(packet.data, packet.caplen).to_vec(),
                    }))
                }
                _ => Ok(None),
            }),
            Format::Ng(reader) => read_until_packet(reader, |block| match block {
                PcapBlockOwned::NG(Block::SectionHeader(_)) => {
                    // Interface ids restart with every section
                    interfaces.clear();
                    Ok(None)
                }
                PcapBlockOwned::NG(Block::InterfaceDescription(idb)) => {
                    interfaces.push(Interface {
                        link_type: idb.linktype.0 as u16,
                        ticks_per_second: tsresol_ticks(idb.if_tsresol),
                    });
                    Ok(None)
                }
                PcapBlockOwned::NG(Block::EnhancedPacket(epb)) => {
                    *frame_number += 1;
                    let interface = interfaces.get(epb.if_id as usize).copied().ok_or(
                        OurPcapError::UnknownInterface {
                            frame: *frame_number,
                            interface: epb.if_id,
                        },
                    )?;
                    let ticks = (u64::from(epb.ts_high) << 32) | u64::from(epb.ts_low);
                    Ok(Some(RawPacket {
                        frame_number: *frame_number,
                        timestamp: interface.nanos(ticks),
                        captured_length: epb.caplen,
                        original_length: epb.origlen,
                        link_type: interface.link_type,
                        data: captured(epb.data, epb.caplen).to_vec(),
                    }))
                }
                PcapBlockOwned::NG(Block::SimplePacket(spb)) => {
                    *frame_number += 1;
                    let link_type = interfaces.first().map(|i| i.link_type).ok_or(
                        OurPcapError::UnknownInterface {
                            frame: *frame_number,
                            interface: 0,
                        },
                    )?;
                    let data = captured(spb.data, spb.origlen);
                    Ok(Some(RawPacket {
                        frame_number: *frame_number,
                        timestamp: 0, // No timestamp in simple packets
                        captured_length: data.len() as u32,
                        original_length: spb.origlen,
                        link_type,
                        data: data.to_vec(),
                    }))
                }
                _ => Ok(None),
            }),
        }
    }
}

fn legacy_format(source: Source, ticks_per_second: u64) -> Result<Format> {
    let reader = LegacyPcapReader::new(BUFFER_SIZE, source)
        .map_err(|e| invalid_format(format!("Failed to parse PCAP header: {e}")))?;
    Ok(Format::Legacy {
        reader,
        ticks_per_second,
    })
}

/// Drive a pcap-parser reader until `handle` yields a packet or the file ends.
fn read_until_packet<R, F>(reader: &mut R, mut handle: F) -> Result<Option<RawPacket>>
where
    R: PcapReaderIterator,
    F: FnMut(PcapBlockOwned<'_>) -> Result<Option<RawPacket>>,
{
    loop {
        match reader.next() {
            Ok((offset, block)) => {
                let packet = handle(block);
                reader.consume(offset);
                if let Some(packet) = packet? {
                    return Ok(Some(packet));
                }
            }
            Err(PcapError::Eof) => return Ok(None),
            Err(PcapError::Incomplete(_)) => {
                reader
                    .refill()
                    .map_err(|e| invalid_format(format!("Refill error: {e}")))?;
            }
            Err(e) => return Err(invalid_format(format!("Parse error: {e}"))),
        }
    }
}

/// Block data without the 32-bit alignment padding.
fn captured(data: &[u8], caplen: u32) -> &[u8] {
    data.get(..caplen as usize).unwrap_or(data)
}

fn invalid_format(reason: String) -> Error {
    Error::Pcap(OurPcapError::InvalidFormat { reason })
}

/// Open `path`, wrapping it in a gzip decoder when needed.
fn open_source(path: &Path) -> Result<Source> {
    let gzipped = is_gzip_file(path)?;
    let file = open_file(path)?;

    let reader: Box<dyn Read + Send> = if gzipped {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(BufReader::with_capacity(BUFFER_SIZE, reader))
}

/// Check if a file is gzipped by extension or magic bytes.
fn is_gzip_file(path: &Path) -> Result<bool> {
    if is_gzip_extension(path) {
        return Ok(true);
    }

    let mut file = open_file(path)?;
    let mut magic = [0u8; 2];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == GZIP_MAGIC),
        Err(_) => Ok(false), // Too short to be gzipped
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|_| {
        Error::Pcap(OurPcapError::FileNotFound {
            path: path.display().to_string(),
        })
    })
}

/// Check if a path appears to be a gzip file by extension only.
pub fn is_gzip_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|f| f.to_str())
        .is_some_and(|name| name.to_lowercase().ends_with(".gz"))
}

impl Iterator for PcapReader {
    type Item = Result<RawPacket>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_packet().transpose()
    }
}
