//! Bulk export of a record batch to CSV or JSON.

use crate::datetime::{format_run_time, utc_offset};
use crate::error::{Error, Result};
use crate::types::PrefetchRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

/// Supported export formats
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Pretty-printed JSON array including accessed files
    #[default]
    Json,
    /// Summary CSV without accessed files
    Csv,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(Error::UnsupportedFormat(token.to_string())),
        }
    }
}

/// One exported record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub executable: String,
    /// `YYYY-MM-DD HH:MM:SS` in UTC, or `N/A`
    pub last_run: String,
    pub run_count: u32,
    pub files: Vec<String>,
}

impl From<&PrefetchRecord> for ExportRow {
    fn from(record: &PrefetchRecord) -> Self {
        Self {
            executable: record.executable_name.clone(),
            last_run: format_run_time(record.last_run_time, utc_offset()),
            run_count: record.run_count,
            files: record.accessed_files.clone(),
        }
    }
}

/// Write `records` to `destination` in the requested format.
///
/// The destination is created (or truncated) once and written once.
pub fn export(records: &[PrefetchRecord], format: ExportFormat, destination: &Path) -> Result<()> {
    let file = File::create(destination).map_err(|e| Error::export_io(destination, e))?;
    let mut writer = BufWriter::new(file);

    let written = match format {
        ExportFormat::Json => write_json(records, &mut writer),
        ExportFormat::Csv => write_csv(records, &mut writer),
    };
    written.map_err(|e| into_export_error(destination, e))?;

    writer.flush().map_err(|e| Error::export_io(destination, e))?;
    log::debug!("Exported {} records to {}", records.len(), destination.display());
    Ok(())
}

/// Like [`export`], with the format given as a raw token
pub fn export_with_token(records: &[PrefetchRecord], format: &str, destination: &Path) -> Result<()> {
    export(records, format.parse()?, destination)
}

fn into_export_error(destination: &Path, err: Error) -> Error {
    match err {
        Error::Io(e) => Error::export_io(destination, e),
        Error::Json(e) if e.is_io() => Error::export_io(destination, e.into()),
        Error::Csv(e) if e.is_io_error() => Error::export_io(destination, std::io::Error::other(e)),
        other => other,
    }
}

/// Summary CSV: `executable,last_run,run_count`, one row per record
pub fn write_csv<W: Write>(records: &[PrefetchRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["executable", "last_run", "run_count"])?;

    for record in records {
        csv_writer.write_record([
            record.executable_name.clone(),
            format_run_time(record.last_run_time, utc_offset()),
            record.run_count.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Single pretty-printed JSON array of [`ExportRow`]
pub fn write_json<W: Write>(records: &[PrefetchRecord], mut writer: W) -> Result<()> {
    let rows: Vec<ExportRow> = records.iter().map(ExportRow::from).collect();
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writeln!(writer)?;
    Ok(())
}

/// Read back a JSON export
pub fn read_json_export<R: Read>(reader: R) -> Result<Vec<ExportRow>> {
    Ok(serde_json::from_reader(reader)?)
}
