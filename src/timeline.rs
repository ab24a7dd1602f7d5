//! Chronological execution report, most recent run first.

use crate::datetime::format_run_time;
use crate::types::{PrefetchRecord, TimelineEntry};
use chrono::FixedOffset;
use std::cmp::Ordering;

/// Order records by last run, newest first.
///
/// Records without a last-run time sort after every record that has one.
/// The sort is stable, so equal timestamps and the undated tail keep their
/// input order.
pub fn build_timeline(records: &[PrefetchRecord]) -> Vec<TimelineEntry> {
    let mut entries: Vec<TimelineEntry> = records.iter().map(TimelineEntry::from).collect();
    entries.sort_by(|a, b| match (&a.last_run_time, &b.last_run_time) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    entries
}

/// Render one entry as fixed-width `File:`, `Last Run:` and `Run Count:` fields
pub fn render_entry(entry: &TimelineEntry, timezone: FixedOffset) -> String {
    format!(
        "File: {:<30} Last Run: {:<20} Run Count: {:<5}",
        entry.executable_name,
        format_run_time(entry.last_run_time, timezone),
        entry.run_count
    )
}
