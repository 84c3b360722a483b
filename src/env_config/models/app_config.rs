use super::app_env::Env;
use crate::env_config::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR: &str = "config";

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub log: LogConfig,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Budget of an inbound request; the upstream deadline is derived from it
    pub request_timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamConfig {
    pub url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// Budget of a single insert, counted from its own start
    pub write_timeout_ms: u64,
    pub max_connections: u32,
    pub acquire_timeout_ms: u64,
}

impl AppConfig {
    /// Loads `config/<env>.toml`.
    pub fn new(env: &Env) -> Result<Self, ConfigError> {
        Self::from_dir(Path::new(CONFIG_DIR), env)
    }

    /// Loads `<dir>/<env>.toml`.
    pub fn from_dir(dir: &Path, env: &Env) -> Result<Self, ConfigError> {
        Self::from_file(dir.join(format!("{}.toml", env)))
    }

    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl DatabaseConfig {
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [log]
        level = "debug"
        format = "json"

        [server]
        request_timeout_ms = 500

        [upstream]
        url = "https://economia.awesomeapi.com.br/json/last/USD-BRL"
        timeout_ms = 200

        [database]
        write_timeout_ms = 10
        max_connections = 1
        acquire_timeout_ms = 1000
    "#;

    #[test]
    fn test_from_toml_str() {
        let config = AppConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.log.format, "json");
        assert_eq!(config.upstream.timeout(), Duration::from_millis(200));
        assert_eq!(config.database.write_timeout(), Duration::from_millis(10));
        assert_eq!(config.server.request_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let err = AppConfig::from_toml_str("[log]\nlevel = \"info\"\nformat = \"plain\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_shipped_configs_parse() {
        for env in [Env::Local, Env::Dev, Env::Prod] {
            let path = Path::new(env!("CARGO_MANIFEST_DIR"))
                .join(CONFIG_DIR)
                .join(format!("{}.toml", env));
            assert!(AppConfig::from_file(path).is_ok(), "config for {} is invalid", env);
        }
    }
}
