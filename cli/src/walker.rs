#![deny(missing_docs)]

//! # Tree Walker
//!
//! Depth-first traversal of the base directory, yielding every file with a
//! given extension.

use crate::error::CliResult;
use reroot_core::config::has_extension;
use std::path::Path;
use walkdir::WalkDir;

/// Calls `visit` with the path and size of each non-directory entry under
/// `base_dir` whose extension is `extension` (without the dot).
///
/// Entries are sorted by file name, and each directory is listed in full
/// before its entries are visited, so files created by `visit` next to the
/// current one are not picked up.
///
/// # Errors
///
/// Returns `CliError::Walk` as soon as the traversal itself fails (e.g. the
/// base directory is missing); remaining entries are not visited.
pub fn visit_files<F>(base_dir: &Path, extension: &str, mut visit: F) -> CliResult<usize>
where
    F: FnMut(&Path, u64),
{
    let mut visited = 0;

    for entry in WalkDir::new(base_dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() || !has_extension(entry.path(), extension) {
            continue;
        }
        let size = entry.metadata()?.len();
        visit(entry.path(), size);
        visited += 1;
    }

    Ok(visited)
}
