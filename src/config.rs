//! Configuration
//!
//! Settings are layered: built-in defaults, the global file
//! (`~/.config/cachekey/config.toml`), the workspace file
//! (`<workspace>/cachekey.toml`) and finally `CACHEKEY__*` environment
//! variables. Later layers override earlier ones key by key.

use crate::content::ContentHasher;
use crate::error::ConfigError;
use crate::hashers::WarningFilter;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge_policy;
mod sources;

pub use sources::WORKSPACE_CONFIG_FILE;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheKeyConfig {
    #[serde(default)]
    pub hashing: HashingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hashing behaviour that is not part of the graph itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashingConfig {
    /// Worker threads per graph level (0 = one per CPU)
    #[serde(default)]
    pub workers: usize,

    /// File names skipped when hashing directories
    #[serde(default = "default_directory_ignore")]
    pub directory_ignore: Vec<String>,

    /// Build settings treated as warning settings on top of the built-in list
    #[serde(default)]
    pub extra_warning_settings: Vec<String>,
}

fn default_directory_ignore() -> Vec<String> {
    vec![".DS_Store".to_string()]
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            directory_ignore: default_directory_ignore(),
            extra_warning_settings: Vec::new(),
        }
    }
}

impl HashingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in &self.directory_ignore {
            if name.is_empty() {
                return Err(ConfigError::Invalid(
                    "hashing.directory_ignore entries cannot be empty".to_string(),
                ));
            }
            if name.contains('/') {
                return Err(ConfigError::Invalid(format!(
                    "hashing.directory_ignore entries are file names, not paths: {}",
                    name
                )));
            }
        }
        if self.extra_warning_settings.iter().any(|key| key.is_empty()) {
            return Err(ConfigError::Invalid(
                "hashing.extra_warning_settings entries cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn content_hasher(&self) -> ContentHasher {
        ContentHasher::with_ignore_names(self.directory_ignore.clone())
    }

    pub fn warning_filter(&self) -> WarningFilter {
        WarningFilter::with_extra_keys(self.extra_warning_settings.iter().cloned())
    }
}

impl CacheKeyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hashing.validate()?;
        self.logging.validate()
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `workspace_root` from every layer.
    pub fn load(workspace_root: &Path) -> Result<CacheKeyConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = sources::add_global_file(builder)?;
        let builder = sources::add_workspace_file(builder, workspace_root)?;
        let builder = sources::add_environment(builder);
        Self::finish(builder)
    }

    /// Load configuration from a single file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<CacheKeyConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Invalid(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = sources::add_file(merge_policy::builder_with_defaults()?, path);
        Self::finish(builder)
    }

    /// Location of the global configuration file.
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_config_path()
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<CacheKeyConfig, ConfigError> {
        let config: CacheKeyConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
