//! Configuration loading and saving
//!
//! Engine configuration types implement [`Config`] to gain file-backed
//! load/save in TOML or RON, selected by file extension.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// File-backed configuration
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load a configuration from a `.toml` or `.ron` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match extension(path) {
            Some("toml") => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save this configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Errors raised while loading or saving configuration files
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Underlying filesystem error
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    /// File contents did not parse as the expected type
    #[error("config parse error: {0}")]
    Parse(String),

    /// Value could not be serialized
    #[error("config serialize error: {0}")]
    Serialize(String),

    /// Extension is not `.toml` or `.ron`
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}
