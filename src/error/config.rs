use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Unsupported config extension '{ext}' (expected .toml).")]
    UnsupportedExtension { ext: String },
    #[error("Config path has no file extension.")]
    MissingExtension,
    #[error("Invalid timeout '{value}' in config: {reason}")]
    InvalidTimeout { value: String, reason: String },
}
