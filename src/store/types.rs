//! Store type definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a translation file into a tree.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read translation file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse translation file: {0}")]
    Parse(String),

    #[error("Translation file contains no value")]
    Empty,
}

/// Reasons a registration step was skipped.
///
/// None of these reach the caller as an `Err`; they are logged and collected
/// in the [`RegistrationReport`].
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Invalid base path for package '{package}': {path}")]
    InvalidBasePath { package: String, path: PathBuf },

    #[error("No language directories found in: {path}")]
    NoLocaleDirectories { path: PathBuf },

    #[error("File not found: {path}")]
    FileNotFound { locale: String, path: PathBuf },

    #[error("File did not contain a mapping: {path}")]
    NotAMapping { locale: String, path: PathBuf },

    #[error("Error loading file: {path} - {source}")]
    Load {
        locale: String,
        path: PathBuf,
        #[source]
        source: LoadError,
    },
}

impl RegistrationError {
    /// Locale the skip applies to, or `None` when the whole registration was skipped.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::InvalidBasePath { .. } | Self::NoLocaleDirectories { .. } => None,
            Self::FileNotFound { locale, .. }
            | Self::NotAMapping { locale, .. }
            | Self::Load { locale, .. } => Some(locale),
        }
    }
}

/// Outcome of registering one package.
#[derive(Debug, Default)]
pub struct RegistrationReport {
    pub package: String,
    /// Locales whose file was merged into the store, in directory order.
    pub loaded: Vec<String>,
    pub skipped: Vec<RegistrationError>,
}

impl RegistrationReport {
    pub(crate) fn new(package: &str) -> Self {
        Self { package: package.to_string(), ..Self::default() }
    }

    /// Returns true if at least one locale was loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.loaded.is_empty()
    }
}
