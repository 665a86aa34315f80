//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};
use std::path::PathBuf;

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The source text is not a syntactically valid Go file.
    /// Created explicitly so that `From<String>` keeps mapping to `General`.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// Moving the original file to its backup name failed.
    #[from(ignore)]
    #[display("Rename Error: can't move {from:?} to {to:?}: {source}")]
    Rename {
        /// The original file.
        from: PathBuf,
        /// The backup name.
        to: PathBuf,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// Writing the patched file failed after the backup was taken.
    #[from(ignore)]
    #[display("Write Error: can't save result to {path:?}: {source}")]
    Write {
        /// The patched file name.
        path: PathBuf,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Rename { source, .. } | AppError::Write { source, .. } => Some(source),
            AppError::Parse(_) | AppError::General(_) => None,
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // String must land in General, never in Parse
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_parse_manual_creation() {
        let app_err = AppError::Parse("3:1: expected declaration".into());
        assert_eq!(
            format!("{}", app_err),
            "Parse Error: 3:1: expected declaration"
        );
    }

    #[test]
    fn test_rename_display_and_source() {
        let app_err = AppError::Rename {
            from: PathBuf::from("a.go"),
            to: PathBuf::from("a.go_old"),
            source: Error::new(ErrorKind::NotFound, "missing"),
        };
        let text = app_err.to_string();
        assert!(text.contains("\"a.go\""));
        assert!(text.contains("\"a.go_old\""));
        assert!(text.ends_with("missing"));
        assert!(app_err.source().is_some());
    }
}
