//! Project configuration from `stamp.toml`.
//!
//! # Example
//!
//! ```toml
//! type = "javascripts"       # directive verb
//! directory = "public"       # base directory for paths and output
//! paths = ["assets/js", "vendor/js"]
//! output = "assets"          # `compile` only: default write path
//! gzip = true                # `compile` only: also write .gz variants
//!
//! [options]
//! source_open = "[%"
//! source_close = "%]"
//! js_compressor = "oxc"      # none | oxc
//! css_compressor = "none"    # none | lightningcss
//! extensions = [".js", ".css"]
//! ```
//!
//! `rewrite` ignores `output` and `gzip`: link directives always land in
//! `directory` (or the working directory) without gzip variants.

mod error;

pub use error::ConfigError;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::environment::FsEnvironment;
use crate::manager::{AssetManager, DEFAULT_ASSET_TYPE, WriteOptions};
use crate::options::Options;

/// Default config file name.
pub const CONFIG_FILE: &str = "stamp.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StampConfig {
    /// Directive verb, e.g. `javascripts` or `stylesheets`.
    #[serde(rename = "type")]
    pub asset_type: String,

    /// Base directory for search paths and output.
    pub directory: Option<String>,

    /// Search paths, in priority order.
    pub paths: Vec<String>,

    /// Default write path for `compile`. `rewrite` ignores it.
    pub output: Option<String>,

    /// Also write gzip variants on `compile`. `rewrite` ignores it.
    pub gzip: bool,

    /// Options merged over the defaults.
    pub options: Options,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            asset_type: DEFAULT_ASSET_TYPE.to_string(),
            directory: None,
            paths: Vec::new(),
            output: None,
            gzip: false,
            options: Options::new(),
        }
    }
}

impl StampConfig {
    /// Read and validate a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        content.parse()
    }

    /// Reject settings that would make every directive unmatchable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.asset_type.trim().is_empty() {
            return Err(ConfigError::Validation("`type` must not be empty".into()));
        }
        if self.asset_type.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "`type` must be a single word, got '{}'",
                self.asset_type
            )));
        }
        Ok(())
    }

    /// Write options for calls that do not override them.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            path: self.output.clone(),
            gzip: self.gzip,
        }
    }

    /// Build a manager over the filesystem environment.
    pub fn into_manager(self) -> AssetManager<FsEnvironment> {
        let mut manager = AssetManager::new(self.asset_type)
            .with_options(self.options)
            .with_paths(self.paths);
        manager.set_directory(self.directory);
        manager
    }
}

impl std::str::FromStr for StampConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}
