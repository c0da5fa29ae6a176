//! Configuration file loading.

use std::path::Path;

use super::{
    ConfigError,
    ResolverConfig,
};

/// Name of the configuration file looked up in a configuration directory.
pub const CONFIG_FILE_NAME: &str = "translation-manager.json";

/// Load settings from `{config_dir}/translation-manager.json`.
///
/// Relative package paths are resolved against `config_dir`.
///
/// # Returns
/// - `Ok(Some(settings))`: the file was found and parsed
/// - `Ok(None)`: there is no configuration file
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_dir(config_dir: &Path) -> Result<Option<ResolverConfig>, ConfigError> {
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let mut settings: ResolverConfig = serde_json::from_str(&content)?;

    for package in &mut settings.packages {
        if package.path.is_relative() && !package.path.as_os_str().is_empty() {
            package.path = config_dir.join(&package.path);
        }
    }

    Ok(Some(settings))
}
