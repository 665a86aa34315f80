#![deny(missing_docs)]

//! # Syntax Round-Trip
//!
//! Narrow interface over a parser that can list a file's import
//! declarations, replace import literals in place and print the file back.
//!
//! - **go**: the tree-sitter backed implementation for Go sources.
//!
//! The rewrite logic only talks to [`SourceSyntax`] and [`SyntaxFile`], so the
//! concrete parsing library stays swappable.

use crate::error::AppResult;
use std::ops::Range;

/// Go implementation of the round-trip interface.
pub mod go;

pub use go::{GoSourceFile, GoSyntax};

/// An import declaration as found in a parsed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// Local name given to the import (`foo`, `_` or `.`), if any.
    pub alias: Option<String>,
    /// The path literal exactly as written, quotes included.
    pub literal: String,
    /// Byte range of the literal inside the source text.
    pub span: Range<usize>,
    /// 1-based line of the literal.
    pub line: usize,
    /// 1-based column of the literal.
    pub column: usize,
}

/// A parser for one source language.
pub trait SourceSyntax {
    /// The parsed, editable representation of a file.
    type File: SyntaxFile;

    /// Parses `source`.
    ///
    /// Fails with `AppError::Parse` if the text is not a valid file of the language.
    fn parse(&self, source: &str) -> AppResult<Self::File>;
}

/// A parsed file whose import literals can be edited.
pub trait SyntaxFile {
    /// Import declarations in declaration order.
    fn imports(&self) -> Vec<ImportDeclaration>;

    /// Replaces the literal of `import` with `path` wrapped in double quotes.
    ///
    /// `import` must come from [`SyntaxFile::imports`] of this same file.
    fn set_literal(&mut self, import: &ImportDeclaration, path: &str);

    /// Serializes the file.
    ///
    /// Every byte outside the replaced literals is reproduced verbatim.
    fn print(&self) -> String;
}

/// Wraps `path` in double quotes.
///
/// `path` is in source form (taken from an existing literal), so escape
/// sequences such as `\u00e9` are carried over as written.
pub fn quote_literal(path: &str) -> String {
    format!("\"{}\"", path)
}
