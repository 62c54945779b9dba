//! nbdefs - Extract function and class definitions from notebooks
//!
//! This library locates top-level Python definitions in notebooks or plain
//! source files, merges them with definitions already present at a
//! destination, and writes them out as standalone `.py` files.

pub mod cli;
pub mod collect;
pub mod error;
pub mod export;
pub mod extract;
pub mod merge;
pub mod source;

/// Re-export commonly used types
pub use collect::{CollectOptions, Collector, NameFilter};
pub use error::{Error, Result};
pub use export::{export, ExportOptions, ExportSummary};
pub use extract::{Definition, DefinitionExtractor, Span};
pub use merge::{merge, MergePolicy};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
