//! Collision-free destination names.
//!
//! A taken name is retried as `{stem}-1{ext}`, `{stem}-2{ext}`, ... until a
//! free one is found. The existence check is not atomic with the later move,
//! so another process creating the chosen path in between will make that
//! move fail rather than overwrite. The search has no upper bound.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Returns `target` if nothing exists there, otherwise the first free
/// `{stem}-{n}{ext}` sibling with `n` counting from 1.
///
/// # Examples
///
/// ```no_run
/// use organizer::conflict::disambiguate;
/// use std::path::Path;
///
/// // With Documents/file.pdf and Documents/file-1.pdf already present:
/// let free = disambiguate(Path::new("/dst/Documents/file.pdf"));
/// assert_eq!(free, Path::new("/dst/Documents/file-2.pdf"));
/// ```
pub fn disambiguate(target: &Path) -> PathBuf {
    disambiguate_against(target, &HashSet::new())
}

/// Same as [`disambiguate`], but paths in `reserved` count as occupied even
/// if they do not exist on disk yet.
pub fn disambiguate_against(target: &Path, reserved: &HashSet<PathBuf>) -> PathBuf {
    let is_taken = |candidate: &Path| reserved.contains(candidate) || candidate.exists();

    if !is_taken(target) {
        return target.to_path_buf();
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = target.with_file_name(suffixed_name(target, counter));
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Builds `{stem}-{counter}{ext}` from the file name of `target`, keeping
/// non-UTF-8 bytes intact.
fn suffixed_name(target: &Path, counter: u64) -> OsString {
    let mut name = target
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    name.push(format!("-{}", counter));
    if let Some(ext) = target.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}
