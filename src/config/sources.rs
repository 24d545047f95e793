//! Configuration sources, lowest precedence first: the global file, the
//! workspace file and `CACHEKEY__SECTION__KEY` environment variables.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the per-workspace configuration file.
pub const WORKSPACE_CONFIG_FILE: &str = "cachekey.toml";

/// Path to the global config file: `$XDG_CONFIG_HOME/cachekey/config.toml`,
/// otherwise `~/.config/cachekey/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".config"))
        })?;
    Some(config_home.join("cachekey").join("config.toml"))
}

/// Add the global config file source to builder if it exists.
pub fn add_global_file(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match global_config_path() {
        Some(path) if path.exists() => Ok(add_file(builder, &path)),
        Some(path) => {
            debug!(config_path = %path.display(), "No global configuration file");
            Ok(builder)
        }
        None => Ok(builder),
    }
}

/// Add `<workspace>/cachekey.toml` to builder if it exists.
pub fn add_workspace_file(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_root.join(WORKSPACE_CONFIG_FILE);
    if path.exists() {
        Ok(add_file(builder, &path))
    } else {
        Ok(builder)
    }
}

/// `CACHEKEY__HASHING__WORKERS=4` sets `hashing.workers`; list settings take
/// comma separated values.
pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("CACHEKEY")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("hashing.directory_ignore")
            .with_list_parse_key("hashing.extra_warning_settings"),
    )
}

pub fn add_file(builder: ConfigBuilder<DefaultState>, path: &Path) -> ConfigBuilder<DefaultState> {
    debug!(config_path = %path.display(), "Adding configuration file");
    builder.add_source(File::from(path).format(FileFormat::Toml).required(false))
}
