// src/system/fs.rs

//! Recursive directory creation.

use crate::constants::DEFAULT_DIR_MODE;
use log::trace;
use std::fs::{self, DirBuilder};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by [`mkdirp`].
#[derive(Error, Debug)]
pub enum MkdirError {
    /// The path could not be made absolute.
    #[error("Could not resolve directory path '{path}': {source}")]
    Resolve {
        /// The path as given.
        path: String,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// A directory could not be created, or a non-directory is in the way.
    #[error("Could not create directory '{path}': {source}")]
    Create {
        /// The absolute path that was being created.
        path: String,
        /// The original error.
        #[source]
        source: io::Error,
    },
}

/// Creates `path` and any missing ancestors, like `mkdir -p`.
///
/// Returns the first directory that had to be created, or `None` if `path` already existed
/// as a directory. On Unix every created directory gets `mode` (subject to the umask).
///
/// # Errors
/// Fails with the original error when `path` (or an ancestor) exists but is not a directory,
/// or when a directory cannot be created.
pub fn mkdirp(path: impl AsRef<Path>, mode: u32) -> Result<Option<PathBuf>, MkdirError> {
    let path = path.as_ref();
    let absolute = std::path::absolute(path).map_err(|source| MkdirError::Resolve {
        path: path.display().to_string(),
        source,
    })?;

    make_dir(&absolute, mode).map_err(|source| MkdirError::Create {
        path: dunce::simplified(&absolute).display().to_string(),
        source,
    })
}

/// `mkdirp` with the default mode.
pub fn mkdirp_default(path: impl AsRef<Path>) -> Result<Option<PathBuf>, MkdirError> {
    mkdirp(path, DEFAULT_DIR_MODE)
}

fn make_dir(path: &Path, mode: u32) -> io::Result<Option<PathBuf>> {
    match create_single(path, mode) {
        Ok(()) => {
            trace!("Created directory '{}'", path.display());
            Ok(Some(path.to_path_buf()))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            // A missing ancestor: create it first, then retry this one.
            let Some(parent) = path.parent() else {
                return Err(e);
            };
            let first_created = make_dir(parent, mode)?;
            let created = make_dir(path, mode)?;
            Ok(first_created.or(created))
        }
        Err(e) => match fs::metadata(path) {
            Ok(metadata) if metadata.is_dir() => Ok(None),
            _ => Err(e),
        },
    }
}

fn create_single(path: &Path, mode: u32) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path)
}
