//! Physical execution of a plan.
//!
//! Moves run in plan order. The default mode stops at the first failure and
//! leaves already-moved files where they are; there is no rollback.
//! [`execute_best_effort`] is the separate mode that keeps going and reports
//! every failure.
use crate::error::{OrganizeError, OrganizeResult};
use crate::planner::{MovePair, Plan};
use filetime::FileTime;
use std::fs;
use std::io;
use std::path::Path;

/// Outcome of [`execute_best_effort`].
#[derive(Debug, Default)]
pub struct ExecutionReport {
    /// Pairs that were moved, in plan order.
    pub moved: Vec<MovePair>,
    /// Pairs that failed, with the error that stopped each one.
    pub failed: Vec<(MovePair, OrganizeError)>,
}

impl ExecutionReport {
    /// Returns true if every planned move succeeded.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of pairs processed.
    pub fn total_processed(&self) -> usize {
        self.moved.len() + self.failed.len()
    }
}

/// Executes every move in `plan`, aborting on the first failure.
///
/// # Errors
///
/// Returns the first [`OrganizeError::DirectoryCreationFailed`] or
/// [`OrganizeError::MoveFailed`] encountered.
pub fn execute(plan: &Plan) -> OrganizeResult<()> {
    execute_with(plan, |_| {})
}

/// Like [`execute`], calling `on_moved` after each successful move.
pub fn execute_with<F>(plan: &Plan, mut on_moved: F) -> OrganizeResult<()>
where
    F: FnMut(&MovePair),
{
    for pair in plan {
        move_pair(pair)?;
        on_moved(pair);
    }
    Ok(())
}

/// Executes every move in `plan`, continuing past failures.
pub fn execute_best_effort(plan: &Plan) -> ExecutionReport {
    let mut report = ExecutionReport::default();
    for pair in plan {
        match move_pair(pair) {
            Ok(()) => report.moved.push(pair.clone()),
            Err(e) => report.failed.push((pair.clone(), e)),
        }
    }
    report
}

/// Ensures the destination folder exists, then moves one file.
fn move_pair(pair: &MovePair) -> OrganizeResult<()> {
    if let Some(parent) = pair.destination.parent() {
        fs::create_dir_all(parent).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    move_file(&pair.source, &pair.destination).map_err(|e| OrganizeError::MoveFailed {
        from: pair.source.clone(),
        to: pair.destination.clone(),
        source: e,
    })
}

/// Moves `from` to `to`, never replacing an existing entry.
///
/// A plain rename is tried first. Across filesystems the file is copied and
/// the original removed afterwards; a symlink is recreated as a symlink and a
/// regular file keeps its access and modification times.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if to.symlink_metadata().is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "destination already exists",
        ));
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => copy_then_remove(from, to),
        Err(e) => Err(e),
    }
}

/// Recreates `from` at `to`, then unlinks `from`.
///
/// On failure nothing of ours is left at `to`, so a later run does not see
/// a half-written file as a taken name.
fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(from)?;
    let copied = if meta.file_type().is_symlink() {
        copy_symlink(from, to)
    } else {
        fs::copy(from, to).map(|_| preserve_times(to, &meta))
    };

    if let Err(e) = copied {
        // AlreadyExists means someone else owns `to`.
        if e.kind() != io::ErrorKind::AlreadyExists {
            let _ = fs::remove_file(to);
        }
        return Err(e);
    }

    if let Err(e) = fs::remove_file(from) {
        let _ = fs::remove_file(to);
        return Err(e);
    }
    Ok(())
}

// Same raw target as the original link.
#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(from)?, to)
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to).map(|_| ())
}

// Best effort: the content already arrived, a clock mismatch is not a failed move.
fn preserve_times(to: &Path, meta: &fs::Metadata) {
    let atime = FileTime::from_last_access_time(meta);
    let mtime = FileTime::from_last_modification_time(meta);
    let _ = filetime::set_file_times(to, atime, mtime);
}
