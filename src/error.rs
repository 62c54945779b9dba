//! Error taxonomy for extraction and export

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while collecting, merging or exporting definitions
#[derive(Debug, Error)]
pub enum Error {
    /// Source location does not exist
    #[error("no such file or directory: {}", path.display())]
    NotFound { path: PathBuf },

    /// Single source file with an unsupported suffix
    #[error("invalid file extension for {}: expected `.py` or `.ipynb`, got `{suffix}`", path.display())]
    FileSuffix { path: PathBuf, suffix: String },

    /// Directory holding both plain-source and notebook files
    #[error("expected only one file type under {}, got {suffixes:?}", root.display())]
    MixedSuffix { root: PathBuf, suffixes: Vec<String> },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Source and destination disagree on being a file or a directory
    #[error(
        "'{}' is a {kind} and '{}' has '{suffix}' suffix; pass --no-check-pathnames if this is intended",
        src.display(),
        dest.display()
    )]
    PathName {
        src: PathBuf,
        dest: PathBuf,
        kind: &'static str,
        suffix: String,
    },

    #[error("destination already exists: {}", path.display())]
    Exists { path: PathBuf },

    /// Source text is not valid Python
    #[error("syntax error in {} at line {line}, column {column}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("failed to read notebook {}: {reason}", path.display())]
    Notebook { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ignore pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to load the Python grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
}

impl Error {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;
