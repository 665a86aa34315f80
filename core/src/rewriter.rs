#![deny(missing_docs)]

//! # Import Rewriting
//!
//! Applies a [`RelocationRule`] to every import of one file.
//!
//! A matched literal is not substituted: the new prefix is joined in front
//! of the whole existing path, so `acme/contract/v1` under the new prefix
//! `co/new/proto` becomes `co/new/proto/acme/contract/v1`.

use crate::config::RelocationRule;
use crate::error::AppResult;
use crate::matcher::matches_prefix;
use crate::syntax::{quote_literal, SourceSyntax, SyntaxFile};

/// One import literal that was changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenImport {
    /// Literal before the rewrite, quotes included.
    pub original: String,
    /// Literal after the rewrite, quotes included.
    pub replacement: String,
    /// 1-based line of the literal.
    pub line: usize,
}

/// Result of rewriting a single file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RewriteOutcome {
    /// Changed imports, in declaration order.
    pub rewritten: Vec<RewrittenImport>,
    /// Printed file. Only present when at least one import changed.
    pub patched: Option<String>,
}

impl RewriteOutcome {
    /// True if any import matched the old prefix.
    pub fn was_patched(&self) -> bool {
        self.patched.is_some()
    }
}

/// Rewrites the imports of `source` that start with `rule.old_prefix`.
///
/// Fails with `AppError::Parse` if `source` does not parse. The file is only
/// printed when something changed; otherwise `patched` is `None`.
///
/// # Examples
/// ```
/// use reroot_core::config::RelocationRule;
/// use reroot_core::rewriter::rewrite_imports;
/// use reroot_core::syntax::GoSyntax;
///
/// let code = "package p\n\nimport (\n\t\"fmt\"\n\t\"acme/contract/v1\"\n)\n";
/// let rule = RelocationRule::new("acme/contract", "co/new/proto");
/// let outcome = rewrite_imports(&GoSyntax, code, &rule).unwrap();
/// assert_eq!(
///     outcome.patched.as_deref(),
///     Some("package p\n\nimport (\n\t\"fmt\"\n\t\"co/new/proto/acme/contract/v1\"\n)\n")
/// );
/// ```
pub fn rewrite_imports<S: SourceSyntax>(
    syntax: &S,
    source: &str,
    rule: &RelocationRule,
) -> AppResult<RewriteOutcome> {
    let mut file = syntax.parse(source)?;
    let mut rewritten = Vec::new();

    for import in file.imports() {
        if !matches_prefix(&import.literal, &rule.old_prefix) {
            continue;
        }
        let new_path = relocated_path(&rule.new_prefix, &import.literal);
        file.set_literal(&import, &new_path);

        tracing::debug!(
            line = import.line,
            column = import.column,
            alias = import.alias.as_deref(),
            old = %import.literal,
            new = %new_path,
            "Rewriting import"
        );
        rewritten.push(RewrittenImport {
            original: import.literal,
            replacement: quote_literal(&new_path),
            line: import.line,
        });
    }

    let patched = if rewritten.is_empty() {
        None
    } else {
        Some(file.print())
    };

    Ok(RewriteOutcome { rewritten, patched })
}

/// Computes the unquoted path that replaces `literal` under `new_prefix`.
pub fn relocated_path(new_prefix: &str, literal: &str) -> String {
    join_path(&[new_prefix, literal.trim_matches('"')])
}

/// Joins path elements with `/` and lexically cleans the result.
///
/// Empty elements are ignored; an all-empty input yields an empty string.
/// Backslashes are only treated as separators where they are the platform
/// separator; elsewhere they belong to escape sequences and are kept.
pub fn join_path(elements: &[&str]) -> String {
    let joined = elements
        .iter()
        .filter(|e| !e.is_empty())
        .map(|e| to_slash(e))
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        joined
    } else {
        clean_path(&joined)
    }
}

fn to_slash(element: &str) -> String {
    if std::path::MAIN_SEPARATOR == '\\' {
        element.replace('\\', "/")
    } else {
        element.to_string()
    }
}

/// Lexical path cleanup: collapses repeated separators, drops `.` segments,
/// resolves `..` against the preceding segment and removes a trailing `/`.
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    // `..` at the root stays at the root
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("/{}", body),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::syntax::GoSyntax;
    use pretty_assertions::assert_eq;

    fn rule() -> RelocationRule {
        RelocationRule::new("acme/contract", "co/new/proto")
    }

    #[test]
    fn test_prepends_instead_of_substituting() {
        assert_eq!(
            relocated_path("x/y", "\"a/b/v1\""),
            "x/y/a/b/v1".to_string()
        );
    }

    #[test]
    fn test_join_cleans_separators() {
        assert_eq!(join_path(&["co/new/", "/acme//v1/"]), "co/new/acme/v1");
        assert_eq!(join_path(&["", "acme"]), "acme");
        assert_eq!(join_path(&["", ""]), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_join_keeps_backslashes_on_unix() {
        assert_eq!(
            relocated_path("co/new", r#""acme/contract/\u00e9""#),
            r"co/new/acme/contract/\u00e9"
        );
    }

    #[cfg(windows)]
    #[test]
    fn test_join_converts_backslashes_on_windows() {
        assert_eq!(join_path(&["co\\new", "acme"]), "co/new/acme");
    }

    #[cfg(unix)]
    #[test]
    fn test_escape_sequences_survive_rewrite() {
        let code = "package p\n\nimport \"acme/contract/\\u00e9\"\n";
        let outcome = rewrite_imports(&GoSyntax, code, &rule()).unwrap();
        assert_eq!(
            outcome.patched.as_deref(),
            Some("package p\n\nimport \"co/new/proto/acme/contract/\\u00e9\"\n")
        );
    }

    #[test]
    fn test_clean_path_dots() {
        assert_eq!(clean_path("a/./b/../c"), "a/c");
        assert_eq!(clean_path("../a"), "../a");
        assert_eq!(clean_path("a/../.."), "..");
        assert_eq!(clean_path("/../a"), "/a");
        assert_eq!(clean_path("a/.."), ".");
        assert_eq!(clean_path("/"), "/");
    }

    #[test]
    fn test_no_match_leaves_file_unpatched() {
        let code = "package p\n\nimport (\n\t\"fmt\"\n\t\"other/contract\"\n)\n";
        let outcome = rewrite_imports(&GoSyntax, code, &rule()).unwrap();
        assert!(!outcome.was_patched());
        assert!(outcome.rewritten.is_empty());
    }

    #[test]
    fn test_no_imports_at_all() {
        let outcome = rewrite_imports(&GoSyntax, "package p\n", &rule()).unwrap();
        assert_eq!(outcome, RewriteOutcome::default());
    }

    #[test]
    fn test_single_match_keeps_neighbours() {
        let code = "package p\n\nimport (\n\t\"a\"\n\t\"acme/contract/v1\"\n\t\"c\"\n)\n\nvar _ = 1 // keep\n";
        let outcome = rewrite_imports(&GoSyntax, code, &rule()).unwrap();
        assert_eq!(
            outcome.patched.as_deref(),
            Some("package p\n\nimport (\n\t\"a\"\n\t\"co/new/proto/acme/contract/v1\"\n\t\"c\"\n)\n\nvar _ = 1 // keep\n")
        );
        assert_eq!(
            outcome.rewritten,
            vec![RewrittenImport {
                original: "\"acme/contract/v1\"".into(),
                replacement: "\"co/new/proto/acme/contract/v1\"".into(),
                line: 5,
            }]
        );
    }

    #[test]
    fn test_adjacent_package_name_is_rewritten() {
        let code = "package p\n\nimport \"acme/contractX\"\n";
        let outcome = rewrite_imports(&GoSyntax, code, &rule()).unwrap();
        assert_eq!(
            outcome.patched.as_deref(),
            Some("package p\n\nimport \"co/new/proto/acme/contractX\"\n")
        );
    }

    #[test]
    fn test_every_match_is_rewritten_independently() {
        let code = "package p\n\nimport (\n\tv1 \"acme/contract/v1\"\n\tv2 \"acme/contract/v2\"\n)\n";
        let outcome = rewrite_imports(&GoSyntax, code, &rule()).unwrap();
        assert_eq!(outcome.rewritten.len(), 2);
        assert_eq!(
            outcome.patched.as_deref(),
            Some("package p\n\nimport (\n\tv1 \"co/new/proto/acme/contract/v1\"\n\tv2 \"co/new/proto/acme/contract/v2\"\n)\n")
        );
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        let code = "package p\n\nimport \"acme/contract/v1\"\n";
        let first = rewrite_imports(&GoSyntax, code, &rule()).unwrap();
        let patched = first.patched.unwrap();
        let second = rewrite_imports(&GoSyntax, &patched, &rule()).unwrap();
        assert!(!second.was_patched());
    }

    #[test]
    fn test_second_pass_matches_again_when_new_prefix_collides() {
        let rule = RelocationRule::new("acme", "acme/moved");
        let code = "package p\n\nimport \"acme/v1\"\n";
        let first = rewrite_imports(&GoSyntax, code, &rule).unwrap();
        let patched = first.patched.unwrap();
        let second = rewrite_imports(&GoSyntax, &patched, &rule).unwrap();
        assert_eq!(
            second.patched.as_deref(),
            Some("package p\n\nimport \"acme/moved/acme/moved/acme/v1\"\n")
        );
    }

    #[test]
    fn test_malformed_source_is_a_parse_error() {
        let code = "package p\n\nimport (\n\t\"acme/contract/v1\"\n";
        let err = rewrite_imports(&GoSyntax, code, &rule()).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }
}
