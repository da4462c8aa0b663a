//! Typed errors for the organize pipeline.
//!
//! The core modules return these instead of printing; the front end decides
//! how to present them.

use crate::config::ConfigError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering, planning or moving files.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The source directory does not exist.
    #[error("Source folder not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The source path exists but is not a directory.
    #[error("Source is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Filesystem access was refused while reading a directory or entry.
    #[error("Permission denied on {}: {source}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to create a category directory under the destination root.
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The relocation primitive failed for one planned move.
    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure tied to a path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be loaded or compiled.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl OrganizeError {
    /// Classifies an I/O error raised while reading `path`.
    ///
    /// `NotFound` becomes [`OrganizeError::SourceNotFound`], refused access
    /// becomes [`OrganizeError::PermissionDenied`], anything else is kept as
    /// [`OrganizeError::Io`].
    pub(crate) fn from_read(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::SourceNotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }
}

/// Result type for organize operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;
