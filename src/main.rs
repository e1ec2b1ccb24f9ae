//! pcapwalk CLI entry point.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pcapwalk::cli::{Args, OutputFormatter};
use pcapwalk::pcap::PcapReader;
use pcapwalk::walk::{Summary, Walker};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let reader = PcapReader::open(&args.file)
        .with_context(|| format!("Failed to open PCAP file: {}", args.file.display()))?;

    let mut walker = Walker::new(args.link_override());
    let mut summary = Summary::default();
    let formatter = OutputFormatter::new(args.format);
    let mut frames = if args.summary {
        None
    } else {
        Some(formatter.frames(io::stdout().lock())?)
    };

    for packet in reader.take(args.count.map_or(usize::MAX, |n| n as usize)) {
        let packet = packet
            .with_context(|| format!("Failed to read PCAP file: {}", args.file.display()))?;
        let record = walker.record(&packet);
        summary.add(&record);
        if let Some(frames) = &mut frames {
            frames.write(&record)?;
        }
    }

    info!(
        frames = summary.frames,
        complete = summary.complete,
        "finished reading capture"
    );

    match frames {
        Some(frames) => {
            frames.finish()?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            formatter.write_summary(&summary, &mut stdout)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
