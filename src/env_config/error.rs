use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Startup configuration failures; the service refuses to start on any of them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown environment '{0}', expected local, dev or prod")]
    UnknownEnvironment(String),

    #[error("ENV -> {name} has invalid value '{value}'")]
    InvalidVar { name: &'static str, value: String },

    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
