//! Definition extraction using tree-sitter
//!
//! Finds the top-level definitions of a Python text blob:
//! - Function definitions (including `async def`)
//! - Class definitions
//! - Either of the above behind decorators
//!
//! Nested definitions are part of their enclosing span and are not reported
//! on their own.

use super::{DefinitionKind, LocatedDefinition, Span};
use crate::error::Result;
use tree_sitter::{Node, Parser, Point};

/// Statements the grammar keeps for Python 2 that Python 3 rejects
const PYTHON2_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// Position of the first syntax error in a blob (1-indexed line, byte column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "syntax error at line {}, column {}", self.line, self.column)
    }
}

impl std::error::Error for SyntaxError {}

/// Extracts top-level definitions from Python source
pub struct DefinitionExtractor {
    parser: Parser,
}

impl DefinitionExtractor {
    /// Create a new extractor with the Python grammar loaded
    pub fn new() -> Result<Self> {
        let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        Ok(Self { parser })
    }

    /// Locate every top-level definition in `source`, in document order
    pub fn locate(&mut self, source: &str) -> std::result::Result<Vec<LocatedDefinition>, SyntaxError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(SyntaxError { line: 1, column: 0 })?;
        let root = tree.root_node();

        if let Some(node) = first_invalid(root) {
            let position = node.start_position();
            return Err(SyntaxError {
                line: position.row + 1,
                column: position.column,
            });
        }

        let mut found = Vec::new();
        let mut cursor = root.walk();
        for statement in root.named_children(&mut cursor) {
            if let Some(located) = locate_definition(statement, source) {
                found.push(located);
            }
        }

        Ok(found)
    }

    /// Locate definitions and cut their text out of `source`
    pub fn extract(
        &mut self,
        source: &str,
    ) -> std::result::Result<Vec<(LocatedDefinition, String)>, SyntaxError> {
        let located = self.locate(source)?;
        located
            .into_iter()
            .map(|def| match def.span.slice(source) {
                Some(text) => Ok((def, text)),
                None => Err(SyntaxError {
                    line: def.span.start_line,
                    column: def.span.start_col,
                }),
            })
            .collect()
    }
}

/// Turn a module-level statement into a located definition, if it is one
fn locate_definition(node: Node, source: &str) -> Option<LocatedDefinition> {
    // A decorated definition spans its decorators; the name comes from the inner node
    let inner = match node.kind() {
        "decorated_definition" => node.child_by_field_name("definition")?,
        _ => node,
    };

    let kind = match inner.kind() {
        "function_definition" => DefinitionKind::Function,
        "class_definition" => DefinitionKind::Class,
        _ => return None,
    };

    let name = inner
        .child_by_field_name("name")?
        .utf8_text(source.as_bytes())
        .ok()?
        .to_string();

    let start = node.start_position();
    let end = content_end(node);

    Some(LocatedDefinition {
        name,
        kind,
        span: Span::new(start.row + 1, end.row + 1, start.column, end.column),
    })
}

/// End of the last token in `node` that is not a comment
///
/// The grammar keeps comments that precede a dedent inside the block, so the
/// node's own end can overshoot the last statement.
fn content_end(node: Node) -> Point {
    let mut cursor = node.walk();
    let last = node
        .children(&mut cursor)
        .filter(|child| child.kind() != "comment" && child.end_byte() > child.start_byte())
        .last();

    match last {
        Some(child) => content_end(child),
        None => node.end_position(),
    }
}

/// Depth-first search for the first node Python 3 would not accept
fn first_invalid(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() || PYTHON2_STATEMENTS.contains(&node.kind()) {
        return Some(node);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_invalid(child) {
            return Some(found);
        }
    }

    // An error flag with no error node below it
    if node.has_error() && node.parent().is_none() {
        return Some(node);
    }
    None
}
