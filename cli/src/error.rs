#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use std::process::ExitStatus;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// The directory traversal itself failed.
    #[display("Walk Error: {}", _0)]
    Walk(walkdir::Error),

    /// The external generator ran but reported failure.
    #[from(ignore)]
    #[display("{program} failed with status {status}: {output}")]
    Subprocess {
        /// Program that was run.
        program: String,
        /// Its exit status.
        status: ExitStatus,
        /// Combined stdout and stderr.
        output: String,
    },
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Walk(e) => Some(e),
            CliError::Subprocess { .. } => None,
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
