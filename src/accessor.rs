//! Normalizes reader output into [`PrefetchRecord`]s.

use crate::error::{Error, Result};
use crate::reader::{ArtifactHandle, ArtifactReader};
use crate::types::PrefetchRecord;
use std::path::{Path, PathBuf};

/// History slot treated as "last run" everywhere. Slot 0 holds the newest
/// run in every supported format version.
pub const MOST_RECENT_RUN_SLOT: usize = 0;

/// Result of reading one artifact in a batch
pub type RecordOutcome = Result<PrefetchRecord>;

/// How a batch reacts to unreadable artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Abort on the first unreadable artifact
    #[default]
    FailFast,
    /// Keep readable records and report the failures alongside them
    ContinueOnError,
}

/// Records read from a directory plus the artifacts that were skipped
#[derive(Debug, Default)]
pub struct Batch {
    pub records: Vec<PrefetchRecord>,
    pub failures: Vec<Error>,
}

impl BatchPolicy {
    /// Fold per-file outcomes into a batch according to the policy.
    ///
    /// Outcomes are pulled lazily, so under [`BatchPolicy::FailFast`] nothing
    /// after the first failure is read.
    pub fn collect<I: IntoIterator<Item = RecordOutcome>>(self, outcomes: I) -> Result<Batch> {
        let mut batch = Batch::default();
        for outcome in outcomes {
            match outcome {
                Ok(record) => batch.records.push(record),
                Err(e) if self == BatchPolicy::FailFast => return Err(e),
                Err(e) => {
                    log::warn!("{}", e);
                    batch.failures.push(e);
                }
            }
        }
        Ok(batch)
    }
}

/// Opens artifacts through a reader and produces normalized records
pub struct RecordAccessor<R: ArtifactReader> {
    reader: R,
}

impl<R: ArtifactReader> RecordAccessor<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read one artifact. Every failure carries the artifact path.
    pub fn open(&self, path: &Path) -> Result<PrefetchRecord> {
        let handle = self
            .reader
            .open(path)
            .map_err(|e| Error::record_read(path, e))?;

        let record = PrefetchRecord {
            executable_name: handle.executable_name(),
            last_run_time: handle.last_run_time(MOST_RECENT_RUN_SLOT),
            run_count: handle.run_count(),
            accessed_files: handle.accessed_files(),
            source_path: path.to_path_buf(),
        };
        handle.close();

        log::debug!(
            "Read {} from {} ({} runs, {} files)",
            record.executable_name,
            path.display(),
            record.run_count,
            record.accessed_files.len()
        );
        Ok(record)
    }

    /// Read artifacts one after another, one outcome per path in input order.
    /// Each artifact is opened only when its outcome is pulled.
    pub fn read_all<'a>(&'a self, paths: &'a [PathBuf]) -> impl Iterator<Item = RecordOutcome> + 'a {
        paths.iter().map(move |path| self.open(path))
    }

    /// Like [`RecordAccessor::read_all`], reporting progress after each artifact
    pub fn read_all_with_progress<'a, F: FnMut() + 'a>(
        &'a self,
        paths: &'a [PathBuf],
        mut on_read: F,
    ) -> impl Iterator<Item = RecordOutcome> + 'a {
        paths.iter().map(move |path| {
            let outcome = self.open(path);
            on_read();
            outcome
        })
    }
}
