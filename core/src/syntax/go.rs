//! Go sources parsed with `tree-sitter-go`.
//!
//! The concrete syntax tree keeps exact byte offsets for every node, so
//! printing is a splice of the replaced literal spans into the original text.

use super::{quote_literal, ImportDeclaration, SourceSyntax, SyntaxFile};
use crate::error::{AppError, AppResult};
use std::collections::BTreeMap;
use tree_sitter::{Node, Parser, Tree};

/// Parser for Go source files.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoSyntax;

impl SourceSyntax for GoSyntax {
    type File = GoSourceFile;

    fn parse(&self, source: &str) -> AppResult<GoSourceFile> {
        GoSourceFile::parse(source)
    }
}

/// A parsed Go file plus the literal replacements recorded against it.
#[derive(Debug, Clone)]
pub struct GoSourceFile {
    source: String,
    tree: Tree,
    // keyed by literal start offset
    replacements: BTreeMap<usize, Replacement>,
}

#[derive(Debug, Clone)]
struct Replacement {
    end: usize,
    text: String,
}

impl GoSourceFile {
    /// Parses `source`, rejecting anything `go/parser` would not accept as a
    /// file: syntax errors, a missing or repeated package clause, imports
    /// after other declarations and statements at the top level.
    pub fn parse(source: &str) -> AppResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| AppError::Parse(format!("Failed to load Go grammar: {:?}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| AppError::Parse("Failed to parse Go source code".into()))?;

        check_source_file(tree.root_node())?;

        Ok(Self {
            source: source.to_string(),
            tree,
            replacements: BTreeMap::new(),
        })
    }

    fn import_declaration(&self, spec: Node) -> Option<ImportDeclaration> {
        let path = spec.child_by_field_name("path")?;
        let alias = spec
            .child_by_field_name("name")
            .map(|n| self.source[n.byte_range()].to_string());
        let pos = path.start_position();
        Some(ImportDeclaration {
            alias,
            literal: self.source[path.byte_range()].to_string(),
            span: path.byte_range(),
            line: pos.row + 1,
            column: pos.column + 1,
        })
    }
}

impl SyntaxFile for GoSourceFile {
    fn imports(&self) -> Vec<ImportDeclaration> {
        let root = self.tree.root_node();
        let mut imports = Vec::new();

        let mut cursor = root.walk();
        for decl in root.named_children(&mut cursor) {
            if decl.kind() != "import_declaration" {
                continue;
            }
            // `import "x"` holds one spec, `import ( ... )` holds a spec list
            let mut decl_cursor = decl.walk();
            for child in decl.named_children(&mut decl_cursor) {
                match child.kind() {
                    "import_spec" => imports.extend(self.import_declaration(child)),
                    "import_spec_list" => {
                        let mut list_cursor = child.walk();
                        for spec in child.named_children(&mut list_cursor) {
                            if spec.kind() == "import_spec" {
                                imports.extend(self.import_declaration(spec));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        imports
    }

    fn set_literal(&mut self, import: &ImportDeclaration, path: &str) {
        debug_assert!(import.span.end <= self.source.len());
        self.replacements.insert(
            import.span.start,
            Replacement {
                end: import.span.end,
                text: quote_literal(path),
            },
        );
    }

    fn print(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut copied = 0;
        for (&start, replacement) in &self.replacements {
            out.push_str(&self.source[copied..start]);
            out.push_str(&replacement.text);
            copied = replacement.end;
        }
        out.push_str(&self.source[copied..]);
        out
    }
}

fn syntax_error(node: Node, what: &str) -> AppError {
    let pos = node.start_position();
    AppError::Parse(format!("{}:{}: {}", pos.row + 1, pos.column + 1, what))
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

// The grammar accepts statements and misplaced clauses at the top level.
fn check_source_file(root: Node) -> AppResult<()> {
    if let Some(node) = first_error(root) {
        let what = if node.is_missing() {
            format!("missing '{}'", node.kind())
        } else {
            "syntax error".to_string()
        };
        return Err(syntax_error(node, &what));
    }

    let mut seen_package = false;
    let mut seen_decl = false;
    let mut cursor = root.walk();
    for node in root.named_children(&mut cursor) {
        match node.kind() {
            "comment" => {}
            _ if !seen_package => {
                if node.kind() != "package_clause" {
                    return Err(syntax_error(node, "expected 'package' clause"));
                }
                seen_package = true;
            }
            "import_declaration" if seen_decl => {
                return Err(syntax_error(
                    node,
                    "imports must appear before other declarations",
                ));
            }
            "import_declaration" => {}
            "function_declaration" | "method_declaration" | "type_declaration"
            | "var_declaration" | "const_declaration" => seen_decl = true,
            other => {
                return Err(syntax_error(
                    node,
                    &format!("expected declaration, found {}", other),
                ));
            }
        }
    }

    if !seen_package {
        return Err(AppError::Parse("expected 'package' clause".into()));
    }
    Ok(())
}
