#![deny(missing_docs)]

//! # Relocation Configuration
//!
//! The constants that drive a migration run: which import root is moved,
//! where it is moved to, which files are considered, and how the commit
//! names its backup and output files.

use std::path::Path;

/// Import root the generated sources were produced against.
pub const DEFAULT_OLD_PREFIX: &str = "vptech/data/contract";

/// Root the matched imports are nested under.
pub const DEFAULT_NEW_PREFIX: &str = "travel/tracking/datalake_exporter/pkg/proto";

/// Extension of the files whose imports are patched.
pub const DEFAULT_SOURCE_EXTENSION: &str = "go";

/// Extension of the schema files handed to the generator.
pub const DEFAULT_SCHEMA_EXTENSION: &str = "proto";

/// Appended to the original file name when it is moved aside.
pub const DEFAULT_BACKUP_SUFFIX: &str = "_old";

/// Inserted before the source extension of the written file.
pub const DEFAULT_PATCHED_SUFFIX: &str = "_patched";

/// The prefix pair applied to every import literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationRule {
    /// Literals starting with this text (after the opening quote) are rewritten.
    pub old_prefix: String,
    /// Prepended in front of the whole matched literal.
    pub new_prefix: String,
}

impl RelocationRule {
    /// Builds a rule from the two prefixes.
    pub fn new(old_prefix: impl Into<String>, new_prefix: impl Into<String>) -> Self {
        Self {
            old_prefix: old_prefix.into(),
            new_prefix: new_prefix.into(),
        }
    }
}

impl Default for RelocationRule {
    fn default() -> Self {
        Self::new(DEFAULT_OLD_PREFIX, DEFAULT_NEW_PREFIX)
    }
}

/// Full configuration of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationConfig {
    /// Prefix pair.
    pub rule: RelocationRule,
    /// Source extension, stored without the leading dot.
    pub source_extension: String,
    /// Schema extension, stored without the leading dot.
    pub schema_extension: String,
    /// Suffix for the backup of a patched file.
    pub backup_suffix: String,
    /// Suffix for the rewritten copy of a patched file.
    pub patched_suffix: String,
}

impl Default for RelocationConfig {
    fn default() -> Self {
        Self {
            rule: RelocationRule::default(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            schema_extension: DEFAULT_SCHEMA_EXTENSION.to_string(),
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            patched_suffix: DEFAULT_PATCHED_SUFFIX.to_string(),
        }
    }
}

impl RelocationConfig {
    /// Replaces the prefix pair.
    pub fn with_rule(mut self, rule: RelocationRule) -> Self {
        self.rule = rule;
        self
    }

    /// Sets the source extension. Accepts `go` as well as `.go`.
    pub fn with_source_extension(mut self, ext: &str) -> Self {
        self.source_extension = normalize_extension(ext);
        self
    }

    /// Sets the schema extension. Accepts `proto` as well as `.proto`.
    pub fn with_schema_extension(mut self, ext: &str) -> Self {
        self.schema_extension = normalize_extension(ext);
        self
    }

    /// True if `path` carries the configured source extension.
    pub fn is_source_file(&self, path: &Path) -> bool {
        has_extension(path, &self.source_extension)
    }

    /// True if `path` carries the configured schema extension.
    pub fn is_schema_file(&self, path: &Path) -> bool {
        has_extension(path, &self.schema_extension)
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_string()
}

/// Compares the final extension of `path` with `ext` (no leading dot).
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}
