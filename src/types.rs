//! Core data types for prefetch records and the reports derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Normalized execution metadata for one prefetch artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PrefetchRecord {
    /// Program name recorded in the artifact
    pub executable_name: String,
    /// Most recent run, if the artifact recorded one
    pub last_run_time: Option<DateTime<Utc>>,
    /// Number of recorded executions
    pub run_count: u32,
    /// Files referenced during execution, in artifact order
    pub accessed_files: Vec<String>,
    /// Artifact this record was read from
    #[serde(skip)]
    pub source_path: PathBuf,
}

/// One line of a chronological execution report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub executable_name: String,
    pub last_run_time: Option<DateTime<Utc>>,
    pub run_count: u32,
}

impl From<&PrefetchRecord> for TimelineEntry {
    fn from(record: &PrefetchRecord) -> Self {
        Self {
            executable_name: record.executable_name.clone(),
            last_run_time: record.last_run_time,
            run_count: record.run_count,
        }
    }
}

/// Accessed files of one record that matched a search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub executable_name: String,
    /// Never empty; original order and casing preserved
    pub matched_files: Vec<String>,
}
