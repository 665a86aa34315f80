#![deny(missing_docs)]

//! # Patch Workflow
//!
//! Read -> rewrite -> commit for a single source file.

use crate::commit::{commit, Storage};
use crate::config::RelocationConfig;
use crate::error::{AppError, AppResult};
use crate::rewriter::{rewrite_imports, RewrittenImport};
use crate::syntax::SourceSyntax;
use std::path::{Path, PathBuf};

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileReport {
    /// No import matched; nothing was written.
    Unchanged,
    /// At least one import matched and the result was committed.
    Patched {
        /// Backup of the original content.
        backup: PathBuf,
        /// File holding the rewritten content.
        patched: PathBuf,
        /// The literals that changed.
        rewritten: Vec<RewrittenImport>,
    },
}

/// Rewrites the imports of the file at `path` and commits the result.
///
/// Files without a matching import are left untouched.
///
/// # Errors
///
/// * `AppError::Io` if the file cannot be read.
/// * `AppError::Parse` if it is not valid UTF-8 or does not parse.
/// * `AppError::Rename` / `AppError::Write` from the commit.
pub fn patch_file<S, St>(
    syntax: &S,
    storage: &St,
    path: &Path,
    config: &RelocationConfig,
) -> AppResult<FileReport>
where
    S: SourceSyntax,
    St: Storage + ?Sized,
{
    let bytes = storage.read(path)?;
    let source = String::from_utf8(bytes)
        .map_err(|e| AppError::Parse(format!("{:?} is not valid UTF-8: {}", path, e)))?;

    let outcome = rewrite_imports(syntax, &source, &config.rule)?;
    let Some(patched) = outcome.patched else {
        return Ok(FileReport::Unchanged);
    };

    let paths = commit(storage, path, patched.as_bytes(), config)?;
    tracing::info!(
        backup = %paths.backup.display(),
        patched = %paths.patched.display(),
        imports = outcome.rewritten.len(),
        "Committed patched file"
    );

    Ok(FileReport::Patched {
        backup: paths.backup,
        patched: paths.patched,
        rewritten: outcome.rewritten,
    })
}
