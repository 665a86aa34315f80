#![deny(missing_docs)]

//! # Migration Pipeline
//!
//! The two phases of a run over the base directory:
//!
//! 1. **Generate**: every schema file is handed to the [`SchemaGenerator`].
//! 2. **Patch**: every source file goes through the core patch workflow.
//!
//! A failure on one file is logged and the walk moves on. Only a failure of
//! the traversal itself ends a phase early.

use crate::error::CliResult;
use crate::generator::SchemaGenerator;
use crate::walker::visit_files;
use reroot_core::{patch_file, FileReport, RelocationConfig, SourceSyntax, Storage};
use std::path::{Component, Path, PathBuf};

/// Counters for one phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSummary {
    /// Files with the phase's extension.
    pub visited: usize,
    /// Files processed without error.
    pub succeeded: usize,
    /// Files that were rewritten and committed (patch phase only).
    pub patched: usize,
    /// Files whose processing failed.
    pub failed: usize,
}

/// Runs the generator once per schema file under `base_dir`.
///
/// The include and output directories are the absolute base directory and
/// each schema is passed by absolute path.
pub fn generate_sources<G: SchemaGenerator>(
    base_dir: &Path,
    config: &RelocationConfig,
    generator: &G,
) -> CliResult<PhaseSummary> {
    let work_dir = std::env::current_dir()?;
    let proto_root = absolute_path(&work_dir, base_dir);
    let mut summary = PhaseSummary::default();

    let visited = visit_files(base_dir, &config.schema_extension, |path, size| {
        let schema = absolute_path(&work_dir, path);
        match generator.generate(&schema, &proto_root, &proto_root) {
            Ok(output) => {
                if !output.trim().is_empty() {
                    tracing::info!(schema = %path.display(), "{}", output.trim_end());
                }
                summary.succeeded += 1;
            }
            Err(e) => {
                tracing::warn!(schema = %path.display(), error = %e, "Generation failed");
                summary.failed += 1;
            }
        }
        tracing::info!(path = %path.display(), size, "Processed schema");
    })?;
    summary.visited = visited;
    Ok(summary)
}

/// Joins `path` onto `work_dir` and drops `.` and `..` components lexically.
fn absolute_path(work_dir: &Path, path: &Path) -> PathBuf {
    let mut clean = PathBuf::new();
    for component in work_dir.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                clean.pop();
            }
            other => clean.push(other),
        }
    }
    clean
}

/// Relocates the imports of every source file under `base_dir`.
pub fn patch_sources<S, St>(
    base_dir: &Path,
    config: &RelocationConfig,
    syntax: &S,
    storage: &St,
) -> CliResult<PhaseSummary>
where
    S: SourceSyntax,
    St: Storage + ?Sized,
{
    let mut summary = PhaseSummary::default();

    let visited = visit_files(base_dir, &config.source_extension, |path, size| {
        match patch_file(syntax, storage, path, config) {
            Ok(FileReport::Patched { .. }) => {
                summary.succeeded += 1;
                summary.patched += 1;
            }
            Ok(FileReport::Unchanged) => summary.succeeded += 1,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Patching failed");
                summary.failed += 1;
            }
        }
        tracing::info!(path = %path.display(), size, "Processed source");
    })?;
    summary.visited = visited;
    Ok(summary)
}
