//! Tree-sitter parser integration for Ruby

use crate::core::errors::{Error, Result};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// A parsed Ruby file together with the source it was parsed from.
pub struct RubyAst {
    pub tree: Tree,
    pub path: PathBuf,
    pub source: String,
}

impl RubyAst {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

/// Parse Ruby source code into a tree-sitter AST
pub fn parse_source(content: &str, path: &Path) -> Result<RubyAst> {
    let mut parser = Parser::new();

    parser
        .set_language(&tree_sitter_ruby::LANGUAGE.into())
        .map_err(|e| Error::parse(path, format!("Failed to set tree-sitter language: {}", e)))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| Error::parse(path, "Failed to parse source code"))?;

    Ok(RubyAst {
        tree,
        path: path.to_path_buf(),
        source: content.to_string(),
    })
}

/// Check if a parse tree has errors
pub fn has_parse_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}

/// Location of the first error or missing node, 1-indexed
pub fn first_error_position(node: Node<'_>) -> Option<(usize, usize)> {
    if node.is_error() || node.is_missing() {
        return Some((node_line(&node), node_column(&node)));
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_position)
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Get the column number for a tree-sitter node (1-indexed)
pub fn node_column(node: &Node) -> usize {
    node.start_position().column + 1
}
