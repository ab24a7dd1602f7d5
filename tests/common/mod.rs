//! Synthetic prefetch fixtures for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

/// FILETIME for 2024-01-10 09:00:00 UTC
pub const JAN_10_0900: u64 = 133_493_508_000_000_000;

/// One hour in FILETIME units
pub const HOUR: u64 = 36_000_000_000;

fn utf16_bytes(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

/// Build an uncompressed version 23 (Windows 7) prefetch file
pub fn scca_v23(name: &str, last_run: u64, run_count: u32, files: &[&str]) -> Vec<u8> {
    let strings_offset = 84 + 156;
    let mut strings = Vec::new();
    for file in files {
        strings.extend(utf16_bytes(file));
        strings.extend([0u8, 0u8]);
    }

    let mut buf = vec![0u8; strings_offset + strings.len()];
    let total = buf.len() as u32;
    buf[0..4].copy_from_slice(&23u32.to_le_bytes());
    buf[4..8].copy_from_slice(b"SCCA");
    buf[12..16].copy_from_slice(&total.to_le_bytes());
    let name_bytes = utf16_bytes(name);
    buf[16..16 + name_bytes.len()].copy_from_slice(&name_bytes);
    buf[84..88].copy_from_slice(&(strings_offset as u32).to_le_bytes());
    buf[100..104].copy_from_slice(&(strings_offset as u32).to_le_bytes());
    buf[104..108].copy_from_slice(&(strings.len() as u32).to_le_bytes());
    buf[128..136].copy_from_slice(&last_run.to_le_bytes());
    buf[152..156].copy_from_slice(&run_count.to_le_bytes());
    buf[strings_offset..].copy_from_slice(&strings);
    buf
}

/// Write a fixture into `dir` and return its path
pub fn write_pf(dir: &Path, file_name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, data).expect("failed to write fixture");
    path
}
