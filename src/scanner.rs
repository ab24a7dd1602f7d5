//! Directory enumeration of prefetch artifacts.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Extension of prefetch artifacts, compared ASCII case-insensitively
pub const ARTIFACT_EXTENSION: &str = "pf";

/// List the `.pf` files directly inside `dir`.
///
/// Results come back in the order the filesystem lists them, which is not
/// guaranteed to be sorted. Callers that need a stable order must sort.
/// Subdirectories are not descended into. Symlinks are followed, so a link
/// to a `.pf` file is listed and a dangling link is skipped.
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut artifacts = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !is_artifact_name(&path) {
            continue;
        }

        match std::fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => artifacts.push(path),
            Ok(_) => log::debug!("Skipping non-file entry {}", path.display()),
            Err(e) => log::debug!("Skipping {}: {}", path.display(), e),
        }
    }

    log::debug!("Found {} prefetch files in {}", artifacts.len(), dir.display());
    Ok(artifacts)
}

fn is_artifact_name(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ARTIFACT_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_filters_by_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("CMD.EXE-0BD30981.pf"), b"x").unwrap();
        fs::write(dir.path().join("NOTEPAD.EXE-D8414F97.PF"), b"x").unwrap();
        fs::write(dir.path().join("Layout.ini"), b"x").unwrap();
        fs::write(dir.path().join("pf"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested.pf")).unwrap();
        fs::write(dir.path().join("nested.pf").join("INNER.EXE-1.pf"), b"x").unwrap();

        let mut names: Vec<String> = scan_directory(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        // listing order is filesystem-defined
        names.sort();

        assert_eq!(names, vec!["CMD.EXE-0BD30981.pf", "NOTEPAD.EXE-D8414F97.PF"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let target_dir = TempDir::new().unwrap();
        let target = target_dir.path().join("CMD.EXE-0BD30981.pf");
        fs::write(&target, b"x").unwrap();
        symlink(&target, dir.path().join("LINKED.EXE-11111111.pf")).unwrap();
        symlink(dir.path().join("gone.pf"), dir.path().join("DANGLING.EXE-22222222.pf")).unwrap();
        symlink(target_dir.path(), dir.path().join("DIRLINK.pf")).unwrap();

        let paths = scan_directory(dir.path()).unwrap();
        assert_eq!(paths, vec![dir.path().join("LINKED.EXE-11111111.pf")]);
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(scan_directory(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(matches!(scan_directory(&missing), Err(Error::DirectoryNotFound(p)) if p == missing));
    }

    #[test]
    fn test_scan_file_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("A.pf");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(scan_directory(&file), Err(Error::DirectoryNotFound(_))));
    }
}
