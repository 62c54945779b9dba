//! Definition extraction module
//!
//! This module handles locating top-level definitions in:
//! - Python source text (using tree-sitter)
//! - Jupyter notebook code cells

pub mod code;
pub mod notebook;

pub use code::{DefinitionExtractor, SyntaxError};
pub use notebook::{Cell, CellType, Notebook};

use std::path::{Path, PathBuf};

/// Line/column region of one definition within a text blob
///
/// Lines are 1-indexed and inclusive. Columns are byte offsets: `start_col`
/// is where the definition begins on `start_line`, `end_col` is one past its
/// last byte on `end_line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start_line: usize,
    pub end_line: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl Span {
    pub fn new(start_line: usize, end_line: usize, start_col: usize, end_col: usize) -> Self {
        Self {
            start_line,
            end_line,
            start_col,
            end_col,
        }
    }

    /// Cut the spanned region out of `text`
    ///
    /// Takes lines `start_line..=end_line`, trims the first line before
    /// `start_col` and the last line after `end_col`, and rejoins them with
    /// `\n`. Returns `None` when the span does not fit inside `text`.
    pub fn slice(&self, text: &str) -> Option<String> {
        if self.start_line == 0 || self.end_line < self.start_line {
            return None;
        }

        let mut lines: Vec<&str> = text
            .lines()
            .skip(self.start_line - 1)
            .take(self.end_line - self.start_line + 1)
            .collect();
        if lines.len() != self.end_line - self.start_line + 1 {
            return None;
        }

        // Trim the end first so a single-line span keeps its byte offsets
        let last = lines.len() - 1;
        lines[last] = lines[last].get(..self.end_col)?;
        lines[0] = lines[0].get(self.start_col..)?;

        Some(lines.join("\n"))
    }
}

/// Kind of top-level definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Function,
    Class,
}

impl std::fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinitionKind::Function => write!(f, "function"),
            DefinitionKind::Class => write!(f, "class"),
        }
    }
}

/// A definition found by the parser, before its text is cut out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedDefinition {
    /// Identifier bound by the definition
    pub name: String,
    pub kind: DefinitionKind,
    pub span: Span,
}

/// A named definition and the exact source text it was extracted as
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Definition {
    /// Function or class name
    pub name: String,
    /// File the definition belongs to
    pub path: PathBuf,
    /// Source text, decorators through the last line of the body
    pub src: String,
}

impl Definition {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, src: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            src: src.into(),
        }
    }

    /// Same definition attributed to another file
    pub fn with_path(self, path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            ..self
        }
    }
}
