//! Error types and handling for the prefetch application.

use std::fmt;
use std::path::{Path, PathBuf};

/// Custom error type for prefetch operations
#[derive(Debug)]
pub enum Error {
    /// I/O related errors
    Io(std::io::Error),
    /// JSON serialization/deserialization errors
    Json(serde_json::Error),
    /// CSV writing errors
    Csv(csv::Error),
    /// Target directory is missing or not a directory
    DirectoryNotFound(PathBuf),
    /// An artifact could not be opened or decoded
    RecordRead { path: PathBuf, reason: String },
    /// Prefetch container decoding errors
    Decode(String),
    /// Export destination could not be created or written
    ExportIo { path: PathBuf, source: std::io::Error },
    /// Unknown export format token
    UnsupportedFormat(String),
    /// A required companion flag was not supplied
    MissingArgument(String),
    /// Invalid input format
    InvalidInput(String),
}

impl Error {
    /// Wrap any failure raised while reading `path` into a `RecordRead` error.
    pub fn record_read(path: &Path, err: Error) -> Self {
        match err {
            Error::RecordRead { .. } => err,
            Error::Io(io) => Error::RecordRead {
                path: path.to_path_buf(),
                reason: io.to_string(),
            },
            Error::Decode(msg) => Error::RecordRead {
                path: path.to_path_buf(),
                reason: msg,
            },
            other => Error::RecordRead {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }

    /// Wrap an I/O failure on the export destination.
    pub fn export_io(path: &Path, source: std::io::Error) -> Self {
        Error::ExportIo {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Csv(err) => write!(f, "CSV error: {}", err),
            Error::DirectoryNotFound(path) => {
                write!(f, "Directory not found: {}", path.display())
            }
            Error::RecordRead { path, reason } => {
                write!(f, "Failed to read prefetch file {}: {}", path.display(), reason)
            }
            Error::Decode(msg) => write!(f, "Prefetch decode error: {}", msg),
            Error::ExportIo { path, source } => {
                write!(f, "Failed to write export to {}: {}", path.display(), source)
            }
            Error::UnsupportedFormat(token) => {
                write!(f, "Unsupported export format '{}'. Use 'json' or 'csv'", token)
            }
            Error::MissingArgument(msg) => write!(f, "{}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::ExportIo { source, .. } => Some(source),
            _ => None,
        }
    }
}

// Convenient conversion traits
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;
