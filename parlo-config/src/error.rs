//! Typed error variants for the parlo-config crate.
//!
//! Produced by `SettingsStore::load` and `SettingsStore::save`. Callers that
//! use `anyhow` get these coerced automatically; callers that care can match
//! on the specific failure mode.

use thiserror::Error;

/// Errors that can occur when loading or saving the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the settings file.
    #[error("I/O error reading settings: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file contained TOML that could not be parsed.
    #[error("TOML parse error in settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// The in-memory settings could not be serialized to TOML.
    #[error("TOML serialize error in settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
