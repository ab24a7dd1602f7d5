//! Console rendering for single-artifact queries, timelines and search hits.

use crate::datetime::format_run_time;
use crate::error::Result;
use crate::timeline::render_entry;
use crate::types::{PrefetchRecord, SearchHit, TimelineEntry};
use chrono::FixedOffset;
use std::io::Write;

/// Which fields a single-artifact query prints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldSelection {
    pub last_run: bool,
    pub run_count: bool,
    pub open_files: bool,
}

impl FieldSelection {
    /// Every field, used when no query switch was given
    pub fn all() -> Self {
        Self {
            last_run: true,
            run_count: true,
            open_files: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.last_run || self.run_count || self.open_files)
    }
}

/// Handles console output formatting
pub struct OutputWriter;

impl OutputWriter {
    /// Print the selected fields of one record, in last-run, run-count, files order
    pub fn write_record<W: Write>(
        record: &PrefetchRecord,
        fields: FieldSelection,
        writer: &mut W,
        timezone: FixedOffset,
    ) -> Result<()> {
        let fields = if fields.is_empty() { FieldSelection::all() } else { fields };

        writeln!(writer, "{:<11} {}", "Executable:", record.executable_name)?;
        if fields.last_run {
            writeln!(writer, "{:<11} {}", "Last Run:", format_run_time(record.last_run_time, timezone))?;
        }
        if fields.run_count {
            writeln!(writer, "{:<11} {}", "Run Count:", record.run_count)?;
        }
        if fields.open_files {
            writeln!(writer, "Accessed Files ({}):", record.accessed_files.len())?;
            for file in &record.accessed_files {
                writeln!(writer, "  {}", file)?;
            }
        }
        Ok(())
    }

    /// Print one fixed-width line per timeline entry
    pub fn write_timeline<W: Write>(entries: &[TimelineEntry], writer: &mut W, timezone: FixedOffset) -> Result<()> {
        for entry in entries {
            writeln!(writer, "{}", render_entry(entry, timezone))?;
        }
        Ok(())
    }

    /// Print each matching executable followed by its matched files
    pub fn write_search_hits<W: Write>(hits: &[SearchHit], writer: &mut W) -> Result<()> {
        for hit in hits {
            writeln!(writer, "{} (matches: {})", hit.executable_name, hit.matched_files.len())?;
            for file in &hit.matched_files {
                writeln!(writer, "  {}", file)?;
            }
        }
        Ok(())
    }
}
