//! # Runtime Configuration Module
//!
//! Controller resolution settings, read from an optional TOML file and then
//! overridden by environment variables.
//!
//! ## Environment Variables
//!
//! ### `MULTIROUTE_CONTROLLER_DIR`
//!
//! Root directory that controller references are resolved against.
//! Default: `src/controllers`
//!
//! ### `MULTIROUTE_CONTROLLER_EXT`
//!
//! Extension of controller source files, with or without the dot.
//! Default: `.rs`
//!
//! ## File Format
//!
//! ```toml
//! controller_dir = "app/controllers"
//! controller_extension = ".rs"
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use multiroute::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("Controllers: {}", config.controller_dir.display());
//! ```

use crate::error::RouterError;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub const ENV_CONTROLLER_DIR: &str = "MULTIROUTE_CONTROLLER_DIR";
pub const ENV_CONTROLLER_EXT: &str = "MULTIROUTE_CONTROLLER_EXT";

const DEFAULT_CONTROLLER_DIR: &str = "src/controllers";
const DEFAULT_CONTROLLER_EXT: &str = ".rs";

/// Router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Directory that controller references resolve against
    pub controller_dir: PathBuf,
    /// Controller source file extension
    pub controller_extension: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            controller_dir: PathBuf::from(DEFAULT_CONTROLLER_DIR),
            controller_extension: DEFAULT_CONTROLLER_EXT.to_string(),
        }
    }
}

impl RouterConfig {
    /// Defaults overridden by environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Load `path` if given, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Config`] if the file cannot be read or is not
    /// valid TOML for this structure.
    pub fn load(path: Option<&Path>) -> Result<Self, RouterError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(|key| env::var(key).ok()))
    }

    /// Parse a TOML configuration file without applying overrides.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Config`] on I/O or parse failure.
    pub fn from_file(path: &Path) -> Result<Self, RouterError> {
        let content = std::fs::read_to_string(path).map_err(|e| RouterError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|message| RouterError::Config {
            path: path.display().to_string(),
            message,
        })
    }

    fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production, a closure in tests). Empty values are ignored.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_CONTROLLER_DIR).filter(|v| !v.is_empty()) {
            self.controller_dir = PathBuf::from(dir);
        }
        if let Some(ext) = lookup(ENV_CONTROLLER_EXT).filter(|v| !v.is_empty()) {
            self.controller_extension = ext;
        }
        self
    }
}
