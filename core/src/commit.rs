#![deny(missing_docs)]

//! # Backup and Commit
//!
//! Persists a rewritten file next to the original: the original is first
//! renamed to its backup name, then the patched text is written under the
//! patched name.
//!
//! The pair of steps is not atomic. If the rename succeeds and the write
//! fails, the backup exists, the original name is free and no patched file
//! is present. Nothing is rolled back.

use crate::config::{has_extension, RelocationConfig};
use crate::error::{AppError, AppResult};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File-system operations used by the patch workflow.
///
/// Abstracted to allow running the workflow against an in-memory store in tests.
pub trait Storage {
    /// Reads the whole file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Moves `from` to `to`, replacing `to` if it exists.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Creates or truncates `path` and writes `contents`.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Standard storage backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }
}

/// Where a committed file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedPaths {
    /// The original content, under its backup name.
    pub backup: PathBuf,
    /// The rewritten content.
    pub patched: PathBuf,
}

/// Backup name: the full original name followed by `suffix` (`a.go` -> `a.go_old`).
pub fn backup_path(original: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(original.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Patched name: a trailing `.<extension>` is swapped for
/// `<suffix>.<extension>` (`a.go` -> `a_patched.go`).
///
/// A path without that extension simply gets `<suffix>.<extension>` appended.
pub fn patched_path(original: &Path, extension: &str, suffix: &str) -> PathBuf {
    let file_name = original.file_name().unwrap_or_default();
    let mut name = if has_extension(original, extension) {
        original.file_stem().unwrap_or(file_name).to_os_string()
    } else {
        file_name.to_os_string()
    };
    name.push(suffix);
    name.push(".");
    name.push(extension);
    original.with_file_name(name)
}

/// Moves `original` aside and writes `patched` under the patched name.
///
/// # Errors
///
/// * `AppError::Rename` if the original cannot be moved to its backup name.
///   Nothing has changed on disk in that case.
/// * `AppError::Write` if the patched file cannot be written. The backup is
///   left in place and the original name stays empty.
pub fn commit<S: Storage + ?Sized>(
    storage: &S,
    original: &Path,
    patched: &[u8],
    config: &RelocationConfig,
) -> AppResult<CommittedPaths> {
    let backup = backup_path(original, &config.backup_suffix);
    storage
        .rename(original, &backup)
        .map_err(|source| AppError::Rename {
            from: original.to_path_buf(),
            to: backup.clone(),
            source,
        })?;

    let target = patched_path(original, &config.source_extension, &config.patched_suffix);
    storage
        .write(&target, patched)
        .map_err(|source| AppError::Write {
            path: target.clone(),
            source,
        })?;

    Ok(CommittedPaths {
        backup,
        patched: target,
    })
}
