//! Error types for configuration and registry setup.

use std::path::PathBuf;

use unitkit_core::UnitError;

/// Result type for configuration and registry operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error type for configuration and registry operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or does not match the expected layout.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// No configuration file was found in the standard locations.
    #[error("No units.toml found in standard locations")]
    NotFound,

    /// Two base units share a symbol or two units share a name.
    #[error("Duplicate unit name: {0}")]
    DuplicateName(String),

    /// The process-wide registry was already initialized.
    #[error("Common units are already initialized")]
    AlreadyInitialized,

    /// A configured unit could not be built.
    #[error(transparent)]
    Unit(#[from] UnitError),
}
