//! Jupyter notebook reading
//!
//! Reads the nbformat JSON container and exposes its cells. Only version 4
//! notebooks are understood; writing notebooks is not supported.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Oldest nbformat major version with a flat `cells` list
pub const MIN_NBFORMAT: u32 = 4;

/// Kind of notebook cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Code,
    Markdown,
    Raw,
    #[serde(other)]
    Other,
}

/// Cell source is stored either whole or split into lines
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl Default for CellSource {
    fn default() -> Self {
        CellSource::Text(String::new())
    }
}

impl CellSource {
    fn into_text(self) -> String {
        match self {
            CellSource::Text(text) => text,
            // Each line already carries its own trailing newline
            CellSource::Lines(lines) => lines.concat(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCell {
    cell_type: CellType,
    #[serde(default)]
    source: CellSource,
}

#[derive(Debug, Deserialize)]
struct RawNotebook {
    nbformat: u32,
    #[serde(default)]
    cells: Vec<RawCell>,
}

/// A single notebook cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub cell_type: CellType,
    pub source: String,
}

/// A notebook as an ordered list of cells
#[derive(Debug, Clone, Default)]
pub struct Notebook {
    pub cells: Vec<Cell>,
}

impl Notebook {
    /// Read a notebook from disk
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content).map_err(|reason| Error::Notebook {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse notebook JSON
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let raw: RawNotebook = serde_json::from_str(content).map_err(|e| e.to_string())?;

        if raw.nbformat < MIN_NBFORMAT {
            return Err(format!(
                "unsupported nbformat {}, expected {} or later",
                raw.nbformat, MIN_NBFORMAT
            ));
        }

        let cells = raw
            .cells
            .into_iter()
            .map(|cell| Cell {
                cell_type: cell.cell_type,
                source: cell.source.into_text(),
            })
            .collect();

        Ok(Self { cells })
    }

    /// Source of every code cell, in notebook order
    pub fn code_cells(&self) -> impl Iterator<Item = &str> {
        self.cells
            .iter()
            .filter(|cell| cell.cell_type == CellType::Code)
            .map(|cell| cell.source.as_str())
    }
}
