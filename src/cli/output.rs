//! Output formatting for frame reports.
//!
//! Frames are shown as a table, CSV, or JSON Lines. Table and CSV flatten the
//! layer list into a single `name@offset+len` column; JSON keeps it
//! structured.

use std::io::Write;

use clap::ValueEnum;

use crate::walk::{FrameRecord, Summary};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table (default)
    Table,
    /// Comma-separated values
    Csv,
    /// JSON Lines (one JSON object per row)
    Json,
}

const FRAME_COLUMNS: [&str; 12] = [
    "frame",
    "link_type",
    "layers",
    "vlan",
    "network",
    "src",
    "dst",
    "transport",
    "src_port",
    "dst_port",
    "payload_offset",
    "stopped",
];

const SUMMARY_COLUMNS: [&str; 3] = ["category", "value", "frames"];

/// Formats frame reports for output.
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Create a new formatter with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Start writing frame rows to `writer`.
    ///
    /// CSV and JSON rows go out as each frame is written; a table needs every
    /// row for its column widths and is rendered by [`FrameWriter::finish`].
    pub fn frames<W: Write>(&self, mut writer: W) -> std::io::Result<FrameWriter<W>> {
        let table = match self.format {
            OutputFormat::Table => Some(new_table(&FRAME_COLUMNS)),
            OutputFormat::Csv => {
                writeln!(writer, "{}", FRAME_COLUMNS.join(","))?;
                None
            }
            OutputFormat::Json => None,
        };
        Ok(FrameWriter {
            format: self.format,
            writer,
            table,
        })
    }

    /// Write aggregate counters.
    pub fn write_summary<W: Write>(&self, summary: &Summary, writer: &mut W) -> std::io::Result<()> {
        let rows = summary
            .rows()
            .into_iter()
            .map(|(category, value, frames)| vec![category.to_string(), value, frames.to_string()]);
        match self.format {
            OutputFormat::Table => write_table(&SUMMARY_COLUMNS, rows, writer),
            OutputFormat::Csv => write_csv(&SUMMARY_COLUMNS, rows, writer),
            OutputFormat::Json => {
                serde_json::to_writer(&mut *writer, summary)?;
                writeln!(writer)
            }
        }
    }
}

/// Row-at-a-time frame output, created by [`OutputFormatter::frames`].
pub struct FrameWriter<W: Write> {
    format: OutputFormat,
    writer: W,
    table: Option<comfy_table::Table>,
}

impl<W: Write> FrameWriter<W> {
    /// Write one frame.
    pub fn write(&mut self, record: &FrameRecord) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Table => {
                if let Some(table) = &mut self.table {
                    add_table_row(table, frame_cells(record));
                }
                Ok(())
            }
            OutputFormat::Csv => write_csv_row(frame_cells(record), &mut self.writer),
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, record)?;
                writeln!(self.writer)
            }
        }
    }

    /// Render any buffered table and flush, returning the writer.
    pub fn finish(mut self) -> std::io::Result<W> {
        if let Some(table) = self.table.take() {
            writeln!(self.writer, "{table}")?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn frame_cells(record: &FrameRecord) -> Vec<String> {
    fn opt<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    vec![
        record.frame.to_string(),
        record.link_type.clone(),
        record.layer_summary(),
        opt(record.vlan_id),
        opt(record.network),
        opt(record.src_addr.as_deref()),
        opt(record.dst_addr.as_deref()),
        opt(record.transport),
        opt(record.src_port),
        opt(record.dst_port),
        record.payload_offset.to_string(),
        opt(record.reason.as_deref()),
    ]
}

fn new_table(headers: &[&str]) -> comfy_table::Table {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(headers.iter().map(Cell::new).collect::<Vec<_>>());
    table
}

fn add_table_row(table: &mut comfy_table::Table, row: Vec<String>) {
    table.add_row(row.into_iter().map(comfy_table::Cell::new).collect::<Vec<_>>());
}

fn write_table<W: Write>(
    headers: &[&str],
    rows: impl Iterator<Item = Vec<String>>,
    writer: &mut W,
) -> std::io::Result<()> {
    let mut table = new_table(headers);
    for row in rows {
        add_table_row(&mut table, row);
    }

    writeln!(writer, "{table}")
}

fn write_csv<W: Write>(
    headers: &[&str],
    rows: impl Iterator<Item = Vec<String>>,
    writer: &mut W,
) -> std::io::Result<()> {
    writeln!(writer, "{}", headers.join(","))?;

    for row in rows {
        write_csv_row(row, writer)?;
    }

    Ok(())
}

fn write_csv_row<W: Write>(row: Vec<String>, writer: &mut W) -> std::io::Result<()> {
    let values: Vec<String> = row
        .into_iter()
        .map(|value| {
            // Escape commas and quotes
            if value.contains(',') || value.contains('"') || value.contains('\n') {
                format!("\"{}\"", value.replace('"', "\"\""))
            } else {
                value
            }
        })
        .collect();
    writeln!(writer, "{}", values.join(","))
}
