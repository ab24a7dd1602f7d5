//! Case-insensitive substring search over accessed files.

use crate::types::{PrefetchRecord, SearchHit};

/// Find accessed files containing `term`, ignoring case.
///
/// Matched files keep their original casing and order. Records without a
/// match are left out of the result.
pub fn search(term: &str, records: &[PrefetchRecord]) -> Vec<SearchHit> {
    let needle = term.to_lowercase();

    records
        .iter()
        .filter_map(|record| {
            let matched_files: Vec<String> = record
                .accessed_files
                .iter()
                .filter(|file| file.to_lowercase().contains(&needle))
                .cloned()
                .collect();

            if matched_files.is_empty() {
                None
            } else {
                Some(SearchHit {
                    executable_name: record.executable_name.clone(),
                    matched_files,
                })
            }
        })
        .collect()
}
