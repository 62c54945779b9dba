//! Export configuration for nbdefs

use crate::merge::MergePolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "nbdefs.toml";

/// Settings that can live in `nbdefs.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Glob of files to skip when walking a source directory
    #[serde(default)]
    pub ignore: Option<String>,

    /// Merge policy used when no flag is given
    #[serde(default)]
    pub policy: Option<MergePolicy>,

    /// Check that files map to `.py` files and directories to directories
    #[serde(default = "default_true")]
    pub check_pathnames: bool,

    /// Allow writing into an existing destination
    #[serde(default = "default_true")]
    pub exist_ok: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            ignore: None,
            policy: None,
            check_pathnames: true,
            exist_ok: true,
        }
    }
}

impl ExportConfig {
    /// Load configuration from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: ExportConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Load `nbdefs.toml` from `dir` or return defaults
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }
}
