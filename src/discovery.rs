//! Non-recursive listing of the files to organize.

use crate::error::{OrganizeError, OrganizeResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Lists the regular files directly inside `source_dir`.
///
/// Directories and everything below them are skipped. Symlinks are followed
/// when classifying, so a link to a regular file is listed and a broken link
/// is not. The result is sorted by lowercase file name, with the exact name
/// as a tie-breaker, so plans and conflict suffixes are reproducible.
///
/// # Errors
///
/// * [`OrganizeError::SourceNotFound`] if `source_dir` does not exist
/// * [`OrganizeError::NotADirectory`] if it exists but is not a directory
/// * [`OrganizeError::PermissionDenied`] if the directory cannot be read
pub fn discover(source_dir: &Path) -> OrganizeResult<Vec<PathBuf>> {
    let metadata = fs::metadata(source_dir)
        .map_err(|e| OrganizeError::from_read(source_dir.to_path_buf(), e))?;
    if !metadata.is_dir() {
        return Err(OrganizeError::NotADirectory(source_dir.to_path_buf()));
    }

    let entries = fs::read_dir(source_dir)
        .map_err(|e| OrganizeError::from_read(source_dir.to_path_buf(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| entry_error(source_dir.to_path_buf(), e))?;
        let path = entry.path();
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => {}
            // Dangling or cyclic symlink, or entry removed since read_dir.
            Err(e)
                if e.kind() == io::ErrorKind::NotFound || is_filesystem_loop(&e) => {}
            Err(e) => return Err(entry_error(path, e)),
        }
    }

    files.sort_by_cached_key(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        (name.to_lowercase(), name)
    });
    Ok(files)
}

// Stable stand-in for `io::ErrorKind::FilesystemLoop` (unstable
// `io_error_more`): std maps exactly the ELOOP errno to that kind.
fn is_filesystem_loop(e: &io::Error) -> bool {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    const ELOOP: i32 = 40;
    #[cfg(all(unix, not(any(target_os = "linux", target_os = "android"))))]
    const ELOOP: i32 = 62;
    #[cfg(unix)]
    {
        e.raw_os_error() == Some(ELOOP)
    }
    #[cfg(not(unix))]
    {
        let _ = e;
        false
    }
}

// The source folder itself was already found, so a vanished entry is not
// a missing source.
fn entry_error(path: PathBuf, source: io::Error) -> OrganizeError {
    match source.kind() {
        io::ErrorKind::PermissionDenied => OrganizeError::PermissionDenied { path, source },
        _ => OrganizeError::Io { path, source },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_discover_lists_only_top_level_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("a.pdf"), "x").unwrap();
        fs::write(base.join("b.jpg"), "x").unwrap();
        fs::create_dir(base.join("subdir")).unwrap();
        fs::write(base.join("subdir").join("c.txt"), "x").unwrap();

        let files = discover(base).expect("discover failed");
        assert_eq!(names(&files), vec!["a.pdf", "b.jpg"]);
        assert!(files.iter().all(|p| p.parent() == Some(base)));
    }

    #[test]
    fn test_discover_sorts_case_insensitively() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        for name in ["beta.txt", "Alpha.txt", "charlie.txt", "ALPHA2.txt"] {
            fs::write(base.join(name), "x").unwrap();
        }

        let files = discover(base).unwrap();
        assert_eq!(
            names(&files),
            vec!["Alpha.txt", "ALPHA2.txt", "beta.txt", "charlie.txt"]
        );
    }

    #[test]
    fn test_discover_empty_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        assert!(discover(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_discover_missing_source() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("nope");
        let result = discover(&missing);
        assert!(matches!(result, Err(OrganizeError::SourceNotFound(p)) if p == missing));
    }

    #[test]
    fn test_discover_source_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            discover(&file),
            Err(OrganizeError::NotADirectory(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_follows_symlinks_and_skips_dangling() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path().join("src");
        fs::create_dir(&base).unwrap();
        let target = temp_dir.path().join("real.txt");
        fs::write(&target, "x").unwrap();
        symlink(&target, base.join("link.txt")).unwrap();
        symlink(temp_dir.path().join("gone.txt"), base.join("dangling.txt")).unwrap();

        let files = discover(&base).unwrap();
        assert_eq!(names(&files), vec!["link.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_skips_symlink_cycles() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("a.pdf"), "x").unwrap();
        symlink(base.join("loop"), base.join("loop")).unwrap();
        symlink(base.join("ping"), base.join("pong")).unwrap();
        symlink(base.join("pong"), base.join("ping")).unwrap();

        let files = discover(base).expect("a symlink cycle should not abort discovery");
        assert_eq!(names(&files), vec!["a.pdf"]);
    }

    #[test]
    fn test_entry_errors_never_claim_missing_source() {
        let path = PathBuf::from("/src/vanished.pdf");

        let err = entry_error(path.clone(), io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, OrganizeError::Io { .. }));

        let err = entry_error(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, OrganizeError::PermissionDenied { .. }));
    }
}
