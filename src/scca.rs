//! Uncompressed SCCA (Prefetch) decoder
//!
//! Reads the fields the record pipeline needs from Windows Prefetch files in
//! the uncompressed layouts written by Windows XP (version 17), Vista/7
//! (version 23), 8/8.1 (version 26) and early Windows 10 (version 30).
//! Compressed `MAM\x04` containers are recognised and rejected.

use crate::datetime::filetime_to_datetime;
use crate::error::{Error, Result};
use crate::reader::{ArtifactData, ArtifactReader};
use byteorder::{LittleEndian, ReadBytesExt};
use chrono::{DateTime, Utc};
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// File header is 84 bytes, file information follows immediately
const HEADER_SIZE: usize = 84;
const SIGNATURE: &[u8; 4] = b"SCCA";
const COMPRESSED_SIGNATURE: &[u8; 3] = b"MAM";

/// Executable name field: 30 UTF-16 code units
const EXECUTABLE_NAME_OFFSET: u64 = 16;
const EXECUTABLE_NAME_UNITS: usize = 30;

const METRICS_OFFSET_FIELD: u64 = 84;
const FILENAME_STRINGS_OFFSET_FIELD: u64 = 100;
const FILENAME_STRINGS_SIZE_FIELD: u64 = 104;

/// Version 30 variant whose file information block is 8 bytes shorter
const V30_SHORT_METRICS_OFFSET: u32 = 0x128;

/// Supported format versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    /// Windows XP / 2003
    WinXp = 17,
    /// Windows Vista / 7
    Win7 = 23,
    /// Windows 8 / 8.1
    Win8 = 26,
    /// Windows 10 (uncompressed)
    Win10 = 30,
}

impl FormatVersion {
    fn from_u32(value: u32) -> Option<Self> {
        match value {
            17 => Some(Self::WinXp),
            23 => Some(Self::Win7),
            26 => Some(Self::Win8),
            30 => Some(Self::Win10),
            _ => None,
        }
    }

    /// Offset of the first last-run FILETIME
    fn run_times_offset(self) -> u64 {
        match self {
            Self::WinXp => 120,
            _ => 128,
        }
    }

    /// Number of retained last-run FILETIMEs, newest first
    fn run_time_slots(self) -> usize {
        match self {
            Self::WinXp | Self::Win7 => 1,
            Self::Win8 | Self::Win10 => 8,
        }
    }

    fn run_count_offset(self, metrics_offset: u32) -> u64 {
        match self {
            Self::WinXp => 144,
            Self::Win7 => 152,
            Self::Win8 => 208,
            Self::Win10 if metrics_offset == V30_SHORT_METRICS_OFFSET => 200,
            Self::Win10 => 208,
        }
    }
}

/// Reader backed by the SCCA decoder
#[derive(Debug, Default, Clone, Copy)]
pub struct SccaReader;

impl SccaReader {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactReader for SccaReader {
    type Handle = ArtifactData;

    fn open(&self, path: &Path) -> Result<ArtifactData> {
        let data = std::fs::read(path)?;
        log::debug!("Decoding {} ({} bytes)", path.display(), data.len());
        parse_scca(&data)
    }
}

/// Decode an uncompressed prefetch file held in memory
pub fn parse_scca(data: &[u8]) -> Result<ArtifactData> {
    if data.len() >= 3 && &data[..3] == COMPRESSED_SIGNATURE {
        return Err(Error::Decode(
            "compressed (MAM) prefetch files are not supported".to_string(),
        ));
    }

    if data.len() < HEADER_SIZE {
        return Err(Error::Decode(format!(
            "file too small: {} bytes, need at least {}",
            data.len(),
            HEADER_SIZE
        )));
    }

    let mut cursor = Cursor::new(data);
    let raw_version = cursor.read_u32::<LittleEndian>()?;

    let mut signature = [0u8; 4];
    cursor.read_exact(&mut signature)?;
    if &signature != SIGNATURE {
        return Err(Error::Decode("missing SCCA signature".to_string()));
    }

    let version = FormatVersion::from_u32(raw_version)
        .ok_or_else(|| Error::Decode(format!("unsupported format version {}", raw_version)))?;

    let executable_name = read_executable_name(&mut cursor)?;

    let metrics_offset = read_u32_at(&mut cursor, METRICS_OFFSET_FIELD)?;
    let strings_offset = read_u32_at(&mut cursor, FILENAME_STRINGS_OFFSET_FIELD)? as usize;
    let strings_size = read_u32_at(&mut cursor, FILENAME_STRINGS_SIZE_FIELD)? as usize;

    let run_times = read_run_times(&mut cursor, version)?;
    let run_count = read_u32_at(&mut cursor, version.run_count_offset(metrics_offset))?;

    let strings_end = strings_offset
        .checked_add(strings_size)
        .filter(|end| *end <= data.len())
        .ok_or_else(|| {
            Error::Decode(format!(
                "filename strings ({} bytes at offset {}) exceed file size {}",
                strings_size,
                strings_offset,
                data.len()
            ))
        })?;
    let accessed_files = split_utf16_strings(&data[strings_offset..strings_end]);

    Ok(ArtifactData {
        executable_name,
        run_count,
        run_times,
        accessed_files,
    })
}

fn read_u32_at(cursor: &mut Cursor<&[u8]>, offset: u64) -> Result<u32> {
    cursor.seek(SeekFrom::Start(offset))?;
    Ok(cursor.read_u32::<LittleEndian>()?)
}

fn read_executable_name(cursor: &mut Cursor<&[u8]>) -> Result<String> {
    cursor.seek(SeekFrom::Start(EXECUTABLE_NAME_OFFSET))?;
    let mut units = Vec::with_capacity(EXECUTABLE_NAME_UNITS);
    for _ in 0..EXECUTABLE_NAME_UNITS {
        let unit = cursor.read_u16::<LittleEndian>()?;
        if unit == 0 {
            break;
        }
        units.push(unit);
    }
    Ok(String::from_utf16_lossy(&units))
}

fn read_run_times(
    cursor: &mut Cursor<&[u8]>,
    version: FormatVersion,
) -> Result<Vec<Option<DateTime<Utc>>>> {
    cursor.seek(SeekFrom::Start(version.run_times_offset()))?;
    (0..version.run_time_slots())
        .map(|_| -> Result<Option<DateTime<Utc>>> {
            Ok(filetime_to_datetime(cursor.read_u64::<LittleEndian>()?))
        })
        .collect()
}

/// Split a block of NUL-terminated UTF-16LE strings, keeping order
fn split_utf16_strings(block: &[u8]) -> Vec<String> {
    let units: Vec<u16> = block
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    units
        .split(|unit| *unit == 0)
        .filter(|s| !s.is_empty())
        .map(String::from_utf16_lossy)
        .collect()
}
