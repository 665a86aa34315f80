#![deny(missing_docs)]

//! # Reroot Core
//!
//! Core library for relocating Go import paths after a shared package moved.
//!
//! Only import literals starting with the configured old root are touched;
//! the rest of each file is reproduced byte for byte.

/// Shared error types.
pub mod error;

/// Relocation constants and configuration.
pub mod config;

/// Prefix matching of import literals.
pub mod matcher;

/// Parse/print round-trip of source files.
pub mod syntax;

/// Import rewriting.
pub mod rewriter;

/// Backup and commit of rewritten files.
pub mod commit;

/// Per-file patch workflow.
pub mod workflow;

pub use commit::{commit, CommittedPaths, FsStorage, Storage};
pub use config::{RelocationConfig, RelocationRule};
pub use error::{AppError, AppResult};
pub use matcher::matches_prefix;
pub use rewriter::{rewrite_imports, RewriteOutcome, RewrittenImport};
pub use syntax::{GoSourceFile, GoSyntax, ImportDeclaration, SourceSyntax, SyntaxFile};
pub use workflow::{patch_file, FileReport};
