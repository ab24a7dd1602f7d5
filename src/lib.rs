//! # prefetch - Windows Prefetch execution-history extractor
//!
//! A CLI tool and library for pulling execution history out of Windows
//! Prefetch (`.pf`) artifacts in a mounted evidence directory.
//!
//! ## Features
//!
//! - Single artifact inspection (last run, run count, accessed files)
//! - Directory-wide timeline ordered by most recent run
//! - Case-insensitive substring search across accessed files
//! - Bulk export to pretty-printed JSON or summary CSV
//! - Fail-fast or continue-on-error handling of unreadable artifacts
//!
//! Container decoding sits behind the [`reader::ArtifactReader`] trait.
//! [`scca::SccaReader`] handles the uncompressed SCCA layouts (versions 17,
//! 23, 26 and 30); compressed Windows 10+ files are reported as unreadable.

pub mod accessor;
pub mod app;
pub mod cli;
pub mod datetime;
pub mod error;
pub mod export;
pub mod output;
pub mod reader;
pub mod scanner;
pub mod scca;
pub mod search;
pub mod timeline;
pub mod types;

pub use accessor::{BatchPolicy, RecordAccessor, MOST_RECENT_RUN_SLOT};
pub use error::{Error, Result};
pub use export::{ExportFormat, ExportRow};
pub use reader::{ArtifactHandle, ArtifactReader, MemoryReader};
pub use scca::SccaReader;
pub use types::{PrefetchRecord, SearchHit, TimelineEntry};
