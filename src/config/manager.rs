//! Configuration management.

use std::path::PathBuf;

use super::{
    ConfigError,
    ResolverConfig,
    loader,
};

/// Holds the validated resolver settings.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Current settings
    current_settings: ResolverConfig,

    /// Directory the settings were loaded from
    config_dir: Option<PathBuf>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Creates a manager holding environment-derived defaults.
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: ResolverConfig::from_env(), config_dir: None }
    }

    /// Load settings.
    ///
    /// Without a directory, or when the directory has no configuration file,
    /// environment-derived defaults are used.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, config_dir: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings from: {:?}", config_dir);

        let settings = if let Some(dir) = &config_dir {
            loader::load_from_dir(dir)?.map_or_else(ResolverConfig::from_env, |loaded| {
                tracing::debug!("Loaded settings: {:?}", loaded);
                loaded
            })
        } else {
            ResolverConfig::from_env()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.config_dir = config_dir;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replace the settings after validating them.
    ///
    /// # Errors
    /// Validation error; the current settings are kept.
    pub fn update_settings(&mut self, new_settings: ResolverConfig) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &ResolverConfig {
        &self.current_settings
    }

    /// Consumes the manager, returning the settings.
    #[must_use]
    pub fn into_settings(self) -> ResolverConfig {
        self.current_settings
    }

    #[must_use]
    pub const fn config_dir(&self) -> Option<&PathBuf> {
        self.config_dir.as_ref()
    }
}
