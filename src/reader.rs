//! Capability interface over a Prefetch container decoder.
//!
//! The record pipeline never touches the binary layout itself. It talks to an
//! [`ArtifactReader`], which opens one artifact at a time and hands back an
//! [`ArtifactHandle`] exposing the handful of fields the pipeline consumes.
//! [`crate::scca::SccaReader`] decodes real files; [`MemoryReader`] serves
//! fixed fixtures.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Opens prefetch artifacts
pub trait ArtifactReader {
    type Handle: ArtifactHandle;

    /// Open the artifact at `path`, failing with a decode or I/O error
    fn open(&self, path: &Path) -> Result<Self::Handle>;
}

/// An opened prefetch artifact
pub trait ArtifactHandle {
    /// Timestamp stored in the given history slot, `None` when the slot is
    /// empty or does not exist in this format version
    fn last_run_time(&self, slot: usize) -> Option<DateTime<Utc>>;

    /// Number of recorded executions
    fn run_count(&self) -> u32;

    /// Executable name stored in the artifact header
    fn executable_name(&self) -> String;

    /// Referenced file paths in stored order
    fn accessed_files(&self) -> Vec<String>;

    /// Release the handle
    fn close(self);
}

/// Decoded artifact contents held in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactData {
    pub executable_name: String,
    pub run_count: u32,
    /// History slots, index 0 is the most recent run
    pub run_times: Vec<Option<DateTime<Utc>>>,
    pub accessed_files: Vec<String>,
}

impl ArtifactHandle for ArtifactData {
    fn last_run_time(&self, slot: usize) -> Option<DateTime<Utc>> {
        self.run_times.get(slot).copied().flatten()
    }

    fn run_count(&self) -> u32 {
        self.run_count
    }

    fn executable_name(&self) -> String {
        self.executable_name.clone()
    }

    fn accessed_files(&self) -> Vec<String> {
        self.accessed_files.clone()
    }

    fn close(self) {}
}

/// Reader serving fixtures registered by path
#[derive(Debug, Default)]
pub struct MemoryReader {
    artifacts: HashMap<PathBuf, ArtifactData>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fixture under `path`
    pub fn insert(&mut self, path: impl Into<PathBuf>, data: ArtifactData) {
        self.artifacts.insert(path.into(), data);
    }

    /// Builder-style variant of [`MemoryReader::insert`]
    pub fn with(mut self, path: impl Into<PathBuf>, data: ArtifactData) -> Self {
        self.insert(path, data);
        self
    }
}

impl ArtifactReader for MemoryReader {
    type Handle = ArtifactData;

    fn open(&self, path: &Path) -> Result<ArtifactData> {
        self.artifacts
            .get(path)
            .cloned()
            .ok_or_else(|| Error::Decode("no artifact registered for path".to_string()))
    }
}
